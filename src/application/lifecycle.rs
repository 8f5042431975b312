use crate::config::Credentials;
use crate::domain::id::new_order_id;
use crate::domain::order::{
    OrderSubmission, OrderUrls, PaymentOrder, PaymentRequest, VerificationQuery,
    VerificationResult,
};
use crate::domain::ports::PaymentGatewayBox;
use crate::error::{GatewayError, LifecycleError};

/// Drives a payment order from creation to verification.
///
/// Every operation acquires its own access token first, so concurrent calls
/// share nothing mutable. Failures are logged with full gateway detail and
/// surfaced to the caller as a [`LifecycleError`] with a fixed message.
pub struct OrderLifecycleManager {
    credentials: Credentials,
    urls: OrderUrls,
    gateway: PaymentGatewayBox,
}

impl OrderLifecycleManager {
    /// Creates a new `OrderLifecycleManager`.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Client credentials used for every token request.
    /// * `urls` - Callback and cancellation URLs embedded in each order.
    /// * `gateway` - The payment gateway adapter.
    pub fn new(credentials: Credentials, urls: OrderUrls, gateway: PaymentGatewayBox) -> Self {
        Self {
            credentials,
            urls,
            gateway,
        }
    }

    /// Creates and submits an order, returning where to redirect the payer.
    pub async fn initiate_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<OrderSubmission, LifecycleError> {
        self.submit(request).await.map_err(|cause| {
            tracing::error!(error = %cause, "payment initiation failed");
            LifecycleError::Initiation { cause }
        })
    }

    /// Resolves the settlement status of a previously submitted order.
    pub async fn verify_payment(
        &self,
        query: &VerificationQuery,
    ) -> Result<VerificationResult, LifecycleError> {
        self.verify(&query.order_tracking_id)
            .await
            .map_err(|cause| {
                tracing::error!(
                    error = %cause,
                    order_tracking_id = %query.order_tracking_id,
                    "payment verification failed"
                );
                LifecycleError::Verification { cause }
            })
    }

    async fn submit(&self, request: &PaymentRequest) -> Result<OrderSubmission, GatewayError> {
        let token = self.gateway.request_token(&self.credentials).await?;
        let order = PaymentOrder::new(new_order_id(), request, &self.urls);
        let submission = self.gateway.submit_order(&token, &order).await?;

        tracing::info!(
            order_id = %order.id,
            order_tracking_id = %submission.order_tracking_id,
            amount = %order.amount,
            currency = %order.currency,
            "payment order submitted"
        );
        Ok(submission)
    }

    async fn verify(&self, order_tracking_id: &str) -> Result<VerificationResult, GatewayError> {
        let token = self.gateway.request_token(&self.credentials).await?;
        let status = self
            .gateway
            .transaction_status(&token, order_tracking_id)
            .await?;

        tracing::info!(
            order_tracking_id,
            payment_status = status.as_deref().unwrap_or("<none>"),
            "payment status resolved"
        );
        Ok(VerificationResult::from_status(status.as_deref()))
    }
}
