use crate::domain::order::OrderUrls;
use crate::error::ConfigError;
use std::env;
use std::time::Duration;
use url::Url;

pub const ENV_CONSUMER_KEY: &str = "PESAPAL_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "PESAPAL_CONSUMER_SECRET";
pub const ENV_BASE_URL: &str = "PESAPAL_BASE_URL";
pub const ENV_CALLBACK_URL: &str = "PESAPAL_CALLBACK_URL";
pub const ENV_CANCELLATION_URL: &str = "PESAPAL_CANCELLATION_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "PESAPAL_HTTP_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://pay.pesapal.com";
const DEFAULT_CALLBACK_URL: &str = "https://A96DEF93-54F5-4E85-BB46-E62D863FB561.backendless.app/api/services/PaymentService/verifyPayment";
const DEFAULT_CANCELLATION_URL: &str = "https://google.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Static client credentials for the gateway's token endpoint.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds credentials from an arbitrary variable source. Both values must be non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingRequired(name))
        };
        Ok(Self::new(
            required(ENV_CONSUMER_KEY)?,
            required(ENV_CONSUMER_SECRET)?,
        ))
    }
}

/// Endpoint and order constants for one gateway deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Scheme and host of the gateway, without the `/v3/api` prefix.
    pub base_url: String,
    /// Embedded in every submitted order.
    pub callback_url: String,
    /// Embedded in every submitted order.
    pub cancellation_url: String,
    /// Applied to every outbound request by the HTTP client.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
            cancellation_url: DEFAULT_CANCELLATION_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = optional(ENV_BASE_URL).unwrap_or(defaults.base_url);
        let callback_url = optional(ENV_CALLBACK_URL).unwrap_or(defaults.callback_url);
        let cancellation_url =
            optional(ENV_CANCELLATION_URL).unwrap_or(defaults.cancellation_url);

        validate_url(ENV_BASE_URL, &base_url)?;
        validate_url(ENV_CALLBACK_URL, &callback_url)?;
        validate_url(ENV_CANCELLATION_URL, &cancellation_url)?;

        let timeout = match optional(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidNumber {
                    name: ENV_HTTP_TIMEOUT_SECS,
                    value: raw,
                })?,
            None => defaults.timeout,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            callback_url,
            cancellation_url,
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn order_urls(&self) -> OrderUrls {
        OrderUrls {
            callback_url: self.callback_url.clone(),
            cancellation_url: self.cancellation_url.clone(),
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value).map(|_| ()).map_err(|_| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
    })
}
