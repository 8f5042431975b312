//! HTTP adapter for the Pesapal v3 API.
//!
//! Request shapes follow the gateway exactly: token requests use Basic
//! auth with an empty JSON body, everything else uses the bearer token.

pub mod auth;

use crate::config::{Credentials, GatewayConfig};
use crate::domain::order::{OrderSubmission, PaymentOrder};
use crate::domain::ports::{AccessToken, PaymentGateway};
use crate::error::{GatewayError, PaymentError, Result};
use async_trait::async_trait;
use auth::TokenAuthenticator;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

pub const TOKEN_PATH: &str = "/v3/api/Auth/RequestToken";
pub const SUBMIT_ORDER_PATH: &str = "/v3/api/Transactions/SubmitOrderRequest";
pub const TRANSACTION_STATUS_PATH: &str = "/v3/api/Transactions/GetTransactionStatus";

#[derive(Debug, Deserialize)]
struct SubmitOrderResponse {
    #[serde(default)]
    redirect_url: Option<String>,
    #[serde(default)]
    order_tracking_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransactionStatusResponse {
    #[serde(default)]
    payment_status: Option<String>,
}

#[derive(Clone)]
pub struct PesapalGateway {
    http: reqwest::Client,
    config: GatewayConfig,
    authenticator: TokenAuthenticator,
}

impl PesapalGateway {
    /// Builds the gateway with a client bounded by `config.timeout`.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::HttpClient(e.to_string()))?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: GatewayConfig) -> Self {
        let authenticator = TokenAuthenticator::new(http.clone(), &config);
        Self {
            http,
            config,
            authenticator,
        }
    }
}

#[async_trait]
impl PaymentGateway for PesapalGateway {
    async fn request_token(
        &self,
        credentials: &Credentials,
    ) -> std::result::Result<AccessToken, GatewayError> {
        self.authenticator.fetch_token(credentials).await
    }

    async fn submit_order(
        &self,
        token: &AccessToken,
        order: &PaymentOrder,
    ) -> std::result::Result<OrderSubmission, GatewayError> {
        let endpoint = self.config.endpoint(SUBMIT_ORDER_PATH);
        tracing::debug!(%endpoint, order_id = %order.id, "submitting order");

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(token.value())
            .json(order)
            .send()
            .await
            .map_err(|e| GatewayError::OrderSubmission(e.to_string()))?;

        let body = read_success_body(response)
            .await
            .map_err(GatewayError::OrderSubmission)?;

        let parsed: SubmitOrderResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::OrderSubmission(format!("malformed order response ({e}): {body}"))
        })?;

        match (parsed.redirect_url, parsed.order_tracking_id) {
            (Some(redirect_url), Some(order_tracking_id)) => Ok(OrderSubmission {
                redirect_url,
                order_tracking_id,
            }),
            _ => Err(GatewayError::OrderSubmission(format!(
                "order response missing redirect_url or order_tracking_id: {body}"
            ))),
        }
    }

    async fn transaction_status(
        &self,
        token: &AccessToken,
        order_tracking_id: &str,
    ) -> std::result::Result<Option<String>, GatewayError> {
        let endpoint = self.config.endpoint(TRANSACTION_STATUS_PATH);
        tracing::debug!(%endpoint, order_tracking_id, "querying transaction status");

        let response = self
            .http
            .get(&endpoint)
            .query(&[("orderTrackingId", order_tracking_id)])
            .bearer_auth(token.value())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::StatusQuery(e.to_string()))?;

        let body = read_success_body(response)
            .await
            .map_err(GatewayError::StatusQuery)?;

        let parsed: TransactionStatusResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::StatusQuery(format!("malformed status response ({e}): {body}"))
        })?;

        Ok(parsed.payment_status)
    }
}

/// Reads the body of a 2xx response. Anything else becomes a detail string
/// carrying the status and whatever body the gateway sent.
pub(crate) async fn read_success_body(
    response: reqwest::Response,
) -> std::result::Result<String, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read response body ({status}): {e}"))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(format!("status {status}: {body}"))
    }
}
