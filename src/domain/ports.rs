use super::order::{OrderSubmission, PaymentOrder};
use super::prediction::Prediction;
use crate::config::Credentials;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;

/// Short-lived bearer token issued by the gateway. Never cached.
#[derive(Clone, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// The three calls the payment lifecycle makes against a gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn request_token(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<AccessToken, GatewayError>;

    async fn submit_order(
        &self,
        token: &AccessToken,
        order: &PaymentOrder,
    ) -> std::result::Result<OrderSubmission, GatewayError>;

    /// Returns the raw `payment_status` the gateway reports, if any.
    async fn transaction_status(
        &self,
        token: &AccessToken,
        order_tracking_id: &str,
    ) -> std::result::Result<Option<String>, GatewayError>;
}

#[async_trait]
pub trait PredictionStore: Send + Sync {
    async fn save(&self, prediction: Prediction) -> Result<()>;
    /// Newest first, at most `limit` entries.
    async fn recent(&self, limit: usize) -> Result<Vec<Prediction>>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type PredictionStoreBox = Box<dyn PredictionStore>;
