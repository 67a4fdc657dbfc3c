//! Payment Error Types

use course_core::CoreError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Tier key is not in the catalog
    #[error("Invalid course tier: {0}")]
    InvalidTier(String),

    /// Credentials missing or malformed
    #[error("Payment service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Stripe API call failed
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Session id could not be resolved to an outcome
    #[error("Outcome lookup failed: {0}")]
    OutcomeLookup(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Stripe(_))
    }

    /// Whether the caller sent something invalid
    pub fn is_client_error(&self) -> bool {
        matches!(self, PaymentError::InvalidTier(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::InvalidTier(_) => "Invalid course type",
            PaymentError::ServiceUnavailable(_) => {
                "Payments are not configured. Running in demo mode."
            }
            PaymentError::Stripe(_) => "Payment service error. Running in demo mode.",
            PaymentError::OutcomeLookup(_) => "Failed to retrieve session details",
        }
    }
}

impl From<CoreError> for PaymentError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTier(tier) => PaymentError::InvalidTier(tier),
            other => PaymentError::Stripe(other.to_string()),
        }
    }
}

/// Result of an operation that absorbs failures instead of surfacing them.
///
/// `Degraded` still carries a usable value (a demo session, a fallback
/// outcome) together with the error that forced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Complete(T),
    Degraded(T, PaymentError),
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded(value, _) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded(value, _) => value,
        }
    }

    /// Error that caused the degradation
    pub fn reason(&self) -> Option<&PaymentError> {
        match self {
            Outcome::Complete(_) => None,
            Outcome::Degraded(_, reason) => Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded(..))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Complete(value) => Outcome::Complete(f(value)),
            Outcome::Degraded(value, reason) => Outcome::Degraded(f(value), reason),
        }
    }
}
