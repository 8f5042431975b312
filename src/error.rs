use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),
    #[error("invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Failures reported by the payment gateway adapters.
///
/// The detail strings carry status codes and raw response bodies, so these
/// are meant for operator logs only and never cross the lifecycle boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("token request failed: {0}")]
    Auth(String),
    #[error("order submission failed: {0}")]
    OrderSubmission(String),
    #[error("status query failed: {0}")]
    StatusQuery(String),
}

/// The only errors a lifecycle operation hands back to its caller.
///
/// The underlying [`GatewayError`] is kept in `cause` for logging. It is
/// deliberately not wired up as `source()`, so rendering the error (plain
/// `Display` or a full diagnostic report) shows the fixed message only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifecycleError {
    #[error("Failed to initiate payment.")]
    Initiation { cause: GatewayError },
    #[error("Payment verification failed.")]
    Verification { cause: GatewayError },
}

impl LifecycleError {
    pub fn cause(&self) -> &GatewayError {
        match self {
            Self::Initiation { cause } | Self::Verification { cause } => cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_messages_hide_gateway_detail() {
        let err = LifecycleError::Initiation {
            cause: GatewayError::Auth("status 500: {\"error\":\"boom\"}".to_string()),
        };
        assert_eq!(err.to_string(), "Failed to initiate payment.");
        assert!(std::error::Error::source(&err).is_none());
        assert!(matches!(err.cause(), GatewayError::Auth(detail) if detail.contains("boom")));

        let err = LifecycleError::Verification {
            cause: GatewayError::StatusQuery("connection refused".to_string()),
        };
        assert_eq!(err.to_string(), "Payment verification failed.");
    }

    #[test]
    fn test_payment_error_keeps_outer_messages() {
        let err = PaymentError::from(LifecycleError::Verification {
            cause: GatewayError::StatusQuery("status 502: upstream reset".to_string()),
        });
        assert_eq!(err.to_string(), "Payment verification failed.");
        assert!(std::error::Error::source(&err).is_none());

        let err = PaymentError::from(ConfigError::MissingRequired("PESAPAL_CONSUMER_KEY"));
        assert_eq!(
            err.to_string(),
            "missing required environment variable: PESAPAL_CONSUMER_KEY"
        );
    }
}
