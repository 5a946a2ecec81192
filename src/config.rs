/// Configuration constants for the IBM Cloud APIs
pub mod api {
    /// Host suffix of the App Configuration service (prefixed by region)
    pub const APP_CONFIG_HOST_SUFFIX: &str = "apprapp.cloud.ibm.com";

    /// Base path of the App Configuration admin API (followed by instance GUID)
    pub const APP_CONFIG_BASE_PATH: &str = "/apprapp/feature/v1/instances";

    /// CIS API endpoint
    pub const CIS_URL: &str = "https://api.cis.cloud.ibm.com";

    /// Default page size for App Configuration list requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Default page size for CIS list requests
    pub const CIS_PAGE_SIZE: u32 = 50;

    /// Maximum concurrent page requests for parallel pagination
    pub const MAX_CONCURRENT_PAGE_REQUESTS: usize = 10;

    /// User-Agent sent with every request
    pub const USER_AGENT: &str = concat!("ibmctl/", env!("CARGO_PKG_VERSION"));
}

/// IAM token service settings
pub mod iam {
    /// IAM token endpoint
    pub const TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

    /// Grant type for API key exchange
    pub const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

    /// Refresh the token when fewer than this many seconds remain
    pub const REFRESH_WINDOW_SECS: i64 = 60;
}

/// Retry settings for the base service client
pub mod retry {
    /// Default number of retries (disabled)
    pub const DEFAULT_MAX_RETRIES: u32 = 0;

    /// First back-off interval in milliseconds
    pub const BASE_INTERVAL_MS: u64 = 1000;

    /// Default upper bound on a single back-off in seconds
    pub const DEFAULT_MAX_INTERVAL_SECS: u64 = 30;

    /// Status codes worth retrying
    pub const RETRYABLE_STATUS: &[u16] = &[429, 500, 502, 503, 504];
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable names for the API key (checked in order)
    pub const APIKEY_ENV_VARS: &[&str] = &["IBMCLOUD_API_KEY", "IC_API_KEY"];
}

/// Configuration constants for context management
pub mod context {
    /// Directory name under home for ibmctl config
    pub const DIR_NAME: &str = ".ibmctl";

    /// Config file name
    pub const FILE_NAME: &str = "config.json";

    /// Environment variable to override the active context
    pub const ENV_VAR: &str = "IBMCTL_CONTEXT";
}

/// Default values for CLI
pub mod defaults {
    /// Default App Configuration region
    pub const REGION: &str = "us-south";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_format() {
        assert!(api::APP_CONFIG_BASE_PATH.starts_with('/'));
        assert!(!api::APP_CONFIG_BASE_PATH.ends_with('/'));
    }

    #[test]
    fn test_apikey_env_vars() {
        assert_eq!(
            credentials::APIKEY_ENV_VARS,
            &["IBMCLOUD_API_KEY", "IC_API_KEY"]
        );
    }

    #[test]
    fn test_cis_url_is_https() {
        assert!(api::CIS_URL.starts_with("https://"));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(retry::RETRYABLE_STATUS.contains(&429));
        assert!(!retry::RETRYABLE_STATUS.contains(&404));
    }
}
