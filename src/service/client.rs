//! Base HTTP service client shared by all IBM Cloud API clients

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::config::{api, retry};
use crate::error::{IbmError, Result};
use crate::service::auth::Authenticator;

/// Retry behaviour for transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt (0 disables retries)
    pub max_retries: u32,
    /// Upper bound on any single wait
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: retry::DEFAULT_MAX_RETRIES,
            max_interval: Duration::from_secs(retry::DEFAULT_MAX_INTERVAL_SECS),
        }
    }
}

impl RetryPolicy {
    /// Wait before retry number `attempt` (0-based), honouring Retry-After
    pub fn delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let wait = retry_after.unwrap_or_else(|| {
            let factor = 1u64 << attempt.min(16);
            Duration::from_millis(retry::BASE_INTERVAL_MS.saturating_mul(factor))
        });
        wait.min(self.max_interval)
    }
}

/// Base service client: holds the HTTP client, service URL, authenticator,
/// default headers and retry policy
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    service_url: String,
    authenticator: Arc<Authenticator>,
    default_headers: Vec<(String, String)>,
    retry: RetryPolicy,
}

impl ServiceClient {
    /// Create a new service client with optimized connection settings
    pub fn new(service_url: impl Into<String>, authenticator: Authenticator) -> Self {
        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            service_url: service_url.into(),
            authenticator: Arc::new(authenticator),
            default_headers: Vec::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Point the client at a different endpoint (private endpoints, mock servers)
    pub fn set_service_url(&mut self, url: impl Into<String>) {
        self.service_url = url.into();
    }

    /// Add a header sent with every request
    pub fn set_default_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.default_headers.push((name, value.into()));
    }

    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.retry = RetryPolicy {
            max_retries,
            max_interval,
        };
    }

    pub fn disable_retries(&mut self) {
        self.retry.max_retries = 0;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Join the service URL and an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.service_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Create a request builder with default and per-request headers
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
    ) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        for (name, value) in self.default_headers.iter().chain(headers) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    /// Authenticate and send a request, retrying transient failures
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let builder = match self.authenticator.authorization(&self.client).await? {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        };

        let mut attempt: u32 = 0;
        loop {
            // Last attempt (or an unclonable body) sends the original builder
            let current = match builder.try_clone() {
                Some(b) if attempt < self.retry.max_retries => b,
                _ => return Ok(builder.send().await?),
            };

            match current.send().await {
                Ok(response) if retry::RETRYABLE_STATUS.contains(&response.status().as_u16()) => {
                    let delay = self.retry.delay(attempt, retry_after(&response));
                    debug!(
                        "Status {} from {}, retry {}/{} in {:?}",
                        response.status().as_u16(),
                        response.url(),
                        attempt + 1,
                        self.retry.max_retries,
                        delay
                    );
                    sleep(delay).await;
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() || e.is_timeout() => {
                    let delay = self.retry.delay(attempt, None);
                    debug!(
                        "Transport error ({}), retry {}/{} in {:?}",
                        e,
                        attempt + 1,
                        self.retry.max_retries,
                        delay
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
            attempt += 1;
        }
    }

    /// Send a request and parse a JSON body, returning an error for non-success status codes
    pub(crate) async fn execute<T>(&self, builder: RequestBuilder, operation: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(builder).await?;
        self.parse_api_response(response, operation).await
    }

    /// Send a request whose response body is ignored
    pub(crate) async fn execute_empty(&self, builder: RequestBuilder, operation: &str) -> Result<()> {
        let response = self.send(builder).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response, operation).await);
        }
        Ok(())
    }

    /// Send a request, returning `None` for 404 and the raw JSON body otherwise
    pub(crate) async fn fetch_optional(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> Result<Option<Value>> {
        let response = self.send(builder).await?;
        if response.status().as_u16() == 404 {
            debug!("{}: not found", operation);
            return Ok(None);
        }
        self.parse_api_response(response, operation).await.map(Some)
    }

    /// Parse an API response, returning error for non-success status codes
    pub(crate) async fn parse_api_response<T>(&self, response: Response, operation: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(error_from_response(response, operation).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| IbmError::Json(format!("Failed to parse response to {}: {}", operation, e)))
    }
}

/// Build an `Api` error from a failed response, using the body's message when present
async fn error_from_response(response: Response, operation: &str) -> IbmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    debug!("{} failed with status {}", operation, status);
    let message = api_error_message(&body).unwrap_or_else(|| "request failed".to_string());
    IbmError::Api { status, message }
}

/// Extract the first human-readable error message from an IBM Cloud error body
pub(crate) fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(first) = value
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        if let Some(msg) = first.get("message").and_then(Value::as_str) {
            return Some(msg.to_string());
        }
        // CIS reports errors as [code, message] pairs
        if let Some(msg) = first
            .as_array()
            .and_then(|pair| pair.iter().rev().find_map(Value::as_str))
        {
            return Some(msg.to_string());
        }
        if let Some(msg) = first.as_str() {
            return Some(msg.to_string());
        }
    }

    ["message", "errorMessage", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Parse a Retry-After header given in seconds
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
impl ServiceClient {
    /// Unauthenticated client against a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new(base_url, Authenticator::NoAuth)
    }
}
