use std::fmt;

/// Custom error type for IBM Cloud API operations
#[derive(Debug)]
pub enum IbmError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// API key not found in any source
    ApiKeyNotFound(String),
    /// IAM token exchange failed
    Auth(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
    /// Request body rejected before sending
    Validation(String),
    /// Malformed pagination links or misuse of a pager
    Pagination(String),
    /// Error tagged with the component and operation that produced it
    Operation {
        component: &'static str,
        operation: String,
        source: Box<IbmError>,
    },
}

impl IbmError {
    /// Wrap this error with a component/operation tag for diagnostics
    pub fn tagged(self, component: &'static str, operation: impl Into<String>) -> Self {
        IbmError::Operation {
            component,
            operation: operation.into(),
            source: Box::new(self),
        }
    }

    /// HTTP status of the underlying API error, looking through tags
    pub fn status(&self) -> Option<u16> {
        match self {
            IbmError::Api { status, .. } => Some(*status),
            IbmError::Http(e) => e.status().map(|s| s.as_u16()),
            IbmError::Operation { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the error is a 404 from the API
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl fmt::Display for IbmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IbmError::Http(e) => write!(f, "HTTP request failed: {}", e),
            IbmError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            IbmError::ApiKeyNotFound(msg) => write!(f, "{}", msg),
            IbmError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            IbmError::Json(msg) => write!(f, "JSON error: {}", msg),
            IbmError::Config(msg) => write!(f, "Configuration error: {}", msg),
            IbmError::Validation(msg) => write!(f, "Invalid request: {}", msg),
            IbmError::Pagination(msg) => write!(f, "Pagination error: {}", msg),
            IbmError::Operation {
                component,
                operation,
                source,
            } => write!(f, "[{}] {}: {}", component, operation, source),
        }
    }
}

impl std::error::Error for IbmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IbmError::Http(e) => Some(e),
            IbmError::Operation { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IbmError {
    fn from(err: reqwest::Error) -> Self {
        IbmError::Http(err)
    }
}

impl From<serde_json::Error> for IbmError {
    fn from(err: serde_json::Error) -> Self {
        IbmError::Json(err.to_string())
    }
}

impl From<std::io::Error> for IbmError {
    fn from(err: std::io::Error) -> Self {
        IbmError::Config(err.to_string())
    }
}

/// Result type alias for IBM Cloud operations
pub type Result<T> = std::result::Result<T, IbmError>;
