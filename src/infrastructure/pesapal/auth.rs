use super::{TOKEN_PATH, read_success_body};
use crate::config::{Credentials, GatewayConfig};
use crate::domain::ports::AccessToken;
use crate::error::GatewayError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Exchanges static client credentials for a bearer token.
///
/// Each call performs exactly one POST to the token endpoint. Nothing is
/// retried and nothing is cached.
#[derive(Clone)]
pub struct TokenAuthenticator {
    http: reqwest::Client,
    endpoint: String,
}

impl TokenAuthenticator {
    pub fn new(http: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint(TOKEN_PATH),
        }
    }

    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken, GatewayError> {
        if credentials.consumer_key.is_empty() || credentials.consumer_secret.is_empty() {
            return Err(GatewayError::Auth("consumer credentials are empty".to_string()));
        }

        tracing::debug!(endpoint = %self.endpoint, "requesting access token");
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .header(CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await
            .map_err(|e| GatewayError::Auth(e.to_string()))?;

        let body = read_success_body(response)
            .await
            .map_err(GatewayError::Auth)?;

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Auth(format!("malformed token response ({e}): {body}")))?;

        parsed
            .token
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| GatewayError::Auth(format!("no token in response: {body}")))
    }
}

/// `Basic base64(key:secret)`
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.consumer_key, credentials.consumer_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn authenticator(server: &MockServer) -> TokenAuthenticator {
        let config = GatewayConfig::default().with_base_url(server.base_url());
        TokenAuthenticator::new(reqwest::Client::new(), &config)
    }

    #[test]
    fn test_basic_auth_header() {
        let header = basic_auth_header(&Credentials::new("key", "secret"));
        assert_eq!(header, "Basic a2V5OnNlY3JldA==");
    }

    #[tokio::test]
    async fn test_fetch_token_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .header("Authorization", "Basic a2V5OnNlY3JldA==")
                    .json_body(json!({}));
                then.status(200)
                    .json_body(json!({"token": "T", "expiryDate": "2026-01-01T00:00:00Z"}));
            })
            .await;

        let token = authenticator(&server)
            .fetch_token(&Credentials::new("key", "secret"))
            .await
            .unwrap();

        assert_eq!(token.value(), "T");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_token_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(401).body("invalid consumer key");
            })
            .await;

        let err = authenticator(&server)
            .fetch_token(&Credentials::new("key", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(&err, GatewayError::Auth(detail) if detail.contains("401")));
        assert!(matches!(&err, GatewayError::Auth(detail) if detail.contains("invalid consumer key")));
    }

    #[tokio::test]
    async fn test_fetch_token_missing_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200)
                    .json_body(json!({"error": {"code": "invalid_consumer_key_or_secret_provided"}}));
            })
            .await;

        let err = authenticator(&server)
            .fetch_token(&Credentials::new("key", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Auth(_)));
    }

    #[tokio::test]
    async fn test_fetch_token_empty_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({"token": ""}));
            })
            .await;

        let err = authenticator(&server)
            .fetch_token(&Credentials::new("key", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Auth(detail) if detail.contains("no token")));
    }

    #[tokio::test]
    async fn test_fetch_token_rejects_empty_credentials_without_calling_out() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({"token": "T"}));
            })
            .await;

        let err = authenticator(&server)
            .fetch_token(&Credentials::new("", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Auth(_)));
        assert_eq!(mock.hits_async().await, 0);
    }
}
