use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_AMOUNT: Decimal = dec!(99.0);
pub const DEFAULT_CURRENCY: &str = "KES";
pub const ORDER_DESCRIPTION: &str = "Aviator Prediction Access";

/// The only gateway status treated as a settled payment.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// Caller input for starting a payment.
///
/// `email` is passed through untouched. A missing or zero `amount` and a
/// missing or empty `currency` fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PaymentRequest {
    pub email: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl PaymentRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn effective_amount(&self) -> Decimal {
        self.amount
            .filter(|a| !a.is_zero())
            .unwrap_or(DEFAULT_AMOUNT)
    }

    pub fn effective_currency(&self) -> String {
        self.currency
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string()
    }
}

/// Caller input for resolving a previously submitted order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerificationQuery {
    pub order_tracking_id: String,
}

impl VerificationQuery {
    pub fn new(order_tracking_id: impl Into<String>) -> Self {
        Self {
            order_tracking_id: order_tracking_id.into(),
        }
    }
}

/// Billing details sent with an order. Only the email is ever filled in;
/// the gateway still expects the remaining keys to be present.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BillingAddress {
    pub email: String,
    pub phone_number: String,
    pub country_code: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub line_1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub zip_code: String,
}

impl BillingAddress {
    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Deployment-specific URLs embedded in every order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUrls {
    pub callback_url: String,
    pub cancellation_url: String,
}

/// Order body for the gateway's submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentOrder {
    pub id: String,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub callback_url: String,
    pub cancellation_url: String,
    pub billing_address: BillingAddress,
}

impl PaymentOrder {
    pub fn new(id: String, request: &PaymentRequest, urls: &OrderUrls) -> Self {
        Self {
            id,
            currency: request.effective_currency(),
            amount: request.effective_amount(),
            description: ORDER_DESCRIPTION.to_string(),
            callback_url: urls.callback_url.clone(),
            cancellation_url: urls.cancellation_url.clone(),
            billing_address: BillingAddress::for_email(request.email.clone()),
        }
    }
}

/// Where to send the payer, and how to find the order again later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub redirect_url: String,
    pub order_tracking_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    pub success: bool,
    pub message: String,
}

impl VerificationResult {
    /// Collapses the gateway's status into paid / not paid. Anything other
    /// than the exact `COMPLETED` literal, including no status at all, is
    /// reported as not completed.
    pub fn from_status(payment_status: Option<&str>) -> Self {
        if payment_status == Some(STATUS_COMPLETED) {
            Self {
                success: true,
                message: "Payment successful.".to_string(),
            }
        } else {
            Self {
                success: false,
                message: "Payment not completed.".to_string(),
            }
        }
    }
}
