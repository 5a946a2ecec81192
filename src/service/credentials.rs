//! API key resolution from multiple sources

use log::debug;

use crate::config::credentials;
use crate::error::{IbmError, Result};

/// API key resolution with fallback logic
pub struct ApiKeyResolver;

impl ApiKeyResolver {
    /// Resolve the API key from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variables (IBMCLOUD_API_KEY, IC_API_KEY - in order)
    /// 3. Active context
    pub fn resolve(cli_key: Option<&str>, context_key: Option<&str>) -> Result<String> {
        if let Some(key) = cli_key {
            debug!("Using API key from CLI argument");
            return Ok(key.to_string());
        }

        for env_var in credentials::APIKEY_ENV_VARS {
            if let Ok(key) = std::env::var(env_var) {
                if !key.is_empty() {
                    debug!("Using API key from {} environment variable", env_var);
                    return Ok(key);
                }
            }
        }

        if let Some(key) = context_key {
            debug!("Using API key from active context");
            return Ok(key.to_string());
        }

        Err(IbmError::ApiKeyNotFound(Self::not_found_message()))
    }

    fn not_found_message() -> String {
        format!(
            "No IBM Cloud API key found. Pass --apikey, set one of {}, \
             or store it in a context with 'ibmctl config set-context <name> --apikey <KEY>'",
            credentials::APIKEY_ENV_VARS.join(", ")
        )
    }
}
