//! Request authentication

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::iam;
use crate::error::{IbmError, Result};

/// How requests to a service are authenticated
pub enum Authenticator {
    /// No Authorization header
    NoAuth,
    /// Static bearer token
    Bearer(String),
    /// IBM Cloud IAM API key exchange
    Iam(IamAuthenticator),
}

impl Authenticator {
    /// IAM authenticator for the given API key against the public IAM endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Authenticator::Iam(IamAuthenticator::new(apikey))
    }

    /// Value for the Authorization header, if any
    pub async fn authorization(&self, http: &Client) -> Result<Option<String>> {
        match self {
            Authenticator::NoAuth => Ok(None),
            Authenticator::Bearer(token) => Ok(Some(format!("Bearer {}", token))),
            Authenticator::Iam(iam) => {
                let token = iam.token(http).await?;
                Ok(Some(format!("Bearer {}", token)))
            }
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authenticator::NoAuth => write!(f, "NoAuth"),
            Authenticator::Bearer(_) => write!(f, "Bearer(***)"),
            Authenticator::Iam(iam) => write!(f, "Iam({})", iam.url),
        }
    }
}

/// IAM token response
#[derive(Deserialize, Debug)]
struct IamTokenResponse {
    access_token: String,
    /// Absolute expiry as unix seconds
    expiration: Option<i64>,
    /// Relative lifetime in seconds
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expiration: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expiration - iam::REFRESH_WINDOW_SECS > now
    }
}

/// Exchanges an API key for an IAM access token and caches it until close to expiry
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    cache: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    pub fn new(apikey: impl Into<String>) -> Self {
        Self::with_url(apikey, iam::TOKEN_URL)
    }

    /// Use a non-default IAM token endpoint (private endpoints, tests)
    pub fn with_url(apikey: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            url: url.into(),
            cache: Mutex::new(None),
        }
    }

    /// Current access token, requesting a new one when the cached token is stale.
    ///
    /// The cache lock is held across the exchange so concurrent callers
    /// wait for a single refresh.
    pub async fn token(&self, http: &Client) -> Result<String> {
        let mut cache = self.cache.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(now) {
                return Ok(cached.access_token.clone());
            }
            debug!("IAM token expires at {}, refreshing", cached.expiration);
        }

        let fresh = self.request_token(http, now).await?;
        let token = fresh.access_token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self, http: &Client, now: i64) -> Result<CachedToken> {
        debug!("Requesting IAM token from: {}", self.url);

        let body = format!(
            "grant_type={}&apikey={}",
            urlencoding::encode(iam::GRANT_TYPE),
            urlencoding::encode(&self.apikey)
        );

        let response = http
            .post(&self.url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = super::client::api_error_message(&text)
                .unwrap_or_else(|| "no error details".to_string());
            return Err(IbmError::Auth(format!(
                "IAM token request failed (status {}): {}",
                status.as_u16(),
                detail
            )));
        }

        let token: IamTokenResponse = response
            .json()
            .await
            .map_err(|e| IbmError::Auth(format!("Failed to parse IAM token response: {}", e)))?;

        let expiration = token
            .expiration
            .or_else(|| token.expires_in.map(|secs| now + secs))
            .unwrap_or(now);

        Ok(CachedToken {
            access_token: token.access_token,
            expiration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token_body(token: &str, expires_in: i64) -> serde_json::Value {
        serde_json::json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": expires_in,
            "expiration": chrono::Utc::now().timestamp() + expires_in
        })
    }

    #[tokio::test]
    async fn test_no_auth_has_no_header() {
        let auth = Authenticator::NoAuth;
        assert!(auth.authorization(&Client::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bearer_header() {
        let auth = Authenticator::Bearer("abc".to_string());
        assert_eq!(
            auth.authorization(&Client::new()).await.unwrap(),
            Some("Bearer abc".to_string())
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let auth = Authenticator::Bearer("very-secret".to_string());
        assert!(!format!("{:?}", auth).contains("very-secret"));
    }

    #[tokio::test]
    async fn test_iam_exchange_and_cache() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("apikey=my-key"))
            .and(body_string_contains("grant_type=urn%3Aibm%3Aparams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("tok-1", 3600)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let iam = IamAuthenticator::with_url(
            "my-key",
            format!("{}/identity/token", mock_server.uri()),
        );
        let http = Client::new();

        assert_eq!(iam.token(&http).await.unwrap(), "tok-1");
        // Served from cache, mock expects exactly one call
        assert_eq!(iam.token(&http).await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_iam_refreshes_expiring_token() {
        let mock_server = MockServer::start().await;

        // Expires within the refresh window, so every call goes to IAM
        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("short", 10)))
            .expect(2)
            .mount(&mock_server)
            .await;

        let iam = IamAuthenticator::with_url(
            "my-key",
            format!("{}/identity/token", mock_server.uri()),
        );
        let http = Client::new();

        iam.token(&http).await.unwrap();
        iam.token(&http).await.unwrap();
    }

    #[tokio::test]
    async fn test_iam_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errorCode": "BXNIM0415E",
                "errorMessage": "Provided API key could not be found"
            })))
            .mount(&mock_server)
            .await;

        let iam = IamAuthenticator::with_url(
            "bad-key",
            format!("{}/identity/token", mock_server.uri()),
        );

        match iam.token(&Client::new()).await.unwrap_err() {
            IbmError::Auth(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("could not be found"));
            }
            other => panic!("Expected IbmError::Auth, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_iam_expires_in_fallback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let auth = Authenticator::Iam(IamAuthenticator::with_url(
            "k",
            format!("{}/identity/token", mock_server.uri()),
        ));
        let http = Client::new();
        assert_eq!(
            auth.authorization(&http).await.unwrap(),
            Some("Bearer tok".to_string())
        );
        auth.authorization(&http).await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(token_body("shared", 3600))
                    .set_delay(std::time::Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let iam = IamAuthenticator::with_url(
            "my-key",
            format!("{}/identity/token", mock_server.uri()),
        );
        let http = Client::new();

        let tokens = futures::future::join_all((0..8).map(|_| iam.token(&http))).await;
        assert_eq!(tokens.len(), 8);
        for token in tokens {
            assert_eq!(token.unwrap(), "shared");
        }
    }
}
