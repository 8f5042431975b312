use crate::config::Credentials;
use crate::domain::order::{OrderSubmission, PaymentOrder};
use crate::domain::ports::{AccessToken, PaymentGateway, PredictionStore};
use crate::domain::prediction::Prediction;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for generated predictions.
///
/// Uses `Arc<RwLock<Vec<Prediction>>>` so clones share the same history.
/// Ideal for testing or single-process runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryPredictionStore {
    predictions: Arc<RwLock<Vec<Prediction>>>,
}

impl InMemoryPredictionStore {
    /// Creates a new, empty in-memory prediction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PredictionStore for InMemoryPredictionStore {
    async fn save(&self, prediction: Prediction) -> Result<()> {
        let mut predictions = self.predictions.write().await;
        predictions.push(prediction);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Prediction>> {
        let predictions = self.predictions.read().await;
        Ok(newest_first(predictions.iter().cloned().collect(), limit))
    }
}

/// Sorts by creation time, newest first, and keeps `limit` entries.
/// Ties keep insertion order reversed so the last saved wins.
pub(crate) fn newest_first(mut predictions: Vec<Prediction>, limit: usize) -> Vec<Prediction> {
    predictions.reverse();
    predictions.sort_by(|a, b| b.created.cmp(&a.created));
    predictions.truncate(limit);
    predictions
}

/// One call observed by [`InMemoryGateway`], in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    RequestToken,
    SubmitOrder,
    TransactionStatus(String),
}

#[derive(Default)]
struct GatewayState {
    calls: Vec<GatewayCall>,
    orders: Vec<PaymentOrder>,
}

/// A scripted gateway that never touches the network.
///
/// Test double for driving the order lifecycle in unit and integration
/// tests. The CLI always wires up the Pesapal adapter instead.
///
/// Records every call and submitted order, and answers with the canned
/// token, submission and statuses it was built with.
#[derive(Clone)]
pub struct InMemoryGateway {
    token: String,
    submission: Option<OrderSubmission>,
    statuses: HashMap<String, String>,
    token_error: Option<GatewayError>,
    submit_error: Option<GatewayError>,
    status_error: Option<GatewayError>,
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryGateway {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            submission: None,
            statuses: HashMap::new(),
            token_error: None,
            submit_error: None,
            status_error: None,
            state: Arc::new(RwLock::new(GatewayState::default())),
        }
    }

    pub fn with_submission(
        mut self,
        redirect_url: impl Into<String>,
        order_tracking_id: impl Into<String>,
    ) -> Self {
        self.submission = Some(OrderSubmission {
            redirect_url: redirect_url.into(),
            order_tracking_id: order_tracking_id.into(),
        });
        self
    }

    pub fn with_status(
        mut self,
        order_tracking_id: impl Into<String>,
        payment_status: impl Into<String>,
    ) -> Self {
        self.statuses
            .insert(order_tracking_id.into(), payment_status.into());
        self
    }

    pub fn failing_token(mut self, error: GatewayError) -> Self {
        self.token_error = Some(error);
        self
    }

    pub fn failing_submission(mut self, error: GatewayError) -> Self {
        self.submit_error = Some(error);
        self
    }

    pub fn failing_status(mut self, error: GatewayError) -> Self {
        self.status_error = Some(error);
        self
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.state.read().await.calls.clone()
    }

    pub async fn submitted_orders(&self) -> Vec<PaymentOrder> {
        self.state.read().await.orders.clone()
    }

    async fn record(&self, call: GatewayCall) {
        self.state.write().await.calls.push(call);
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn request_token(
        &self,
        _credentials: &Credentials,
    ) -> std::result::Result<AccessToken, GatewayError> {
        self.record(GatewayCall::RequestToken).await;
        match &self.token_error {
            Some(error) => Err(error.clone()),
            None => Ok(AccessToken::new(self.token.clone())),
        }
    }

    async fn submit_order(
        &self,
        token: &AccessToken,
        order: &PaymentOrder,
    ) -> std::result::Result<OrderSubmission, GatewayError> {
        {
            let mut state = self.state.write().await;
            state.calls.push(GatewayCall::SubmitOrder);
            state.orders.push(order.clone());
        }
        if token.value() != self.token {
            return Err(GatewayError::OrderSubmission("unknown token".to_string()));
        }
        if let Some(error) = &self.submit_error {
            return Err(error.clone());
        }
        self.submission
            .clone()
            .ok_or_else(|| GatewayError::OrderSubmission("no submission scripted".to_string()))
    }

    async fn transaction_status(
        &self,
        token: &AccessToken,
        order_tracking_id: &str,
    ) -> std::result::Result<Option<String>, GatewayError> {
        self.record(GatewayCall::TransactionStatus(order_tracking_id.to_string()))
            .await;
        if token.value() != self.token {
            return Err(GatewayError::StatusQuery("unknown token".to_string()));
        }
        if let Some(error) = &self.status_error {
            return Err(error.clone());
        }
        Ok(self.statuses.get(order_tracking_id).cloned())
    }
}
