//! Payment Outcomes
//!
//! What a checkout attempt ended up as, and how failures are explained to
//! the buyer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::CourseTier;
use crate::session::SessionId;

/// Resolved status of a checkout attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Failed,
    Expired,
    /// Buyer left the hosted page through the cancel link
    Canceled,
    /// Simulated purchase, no payment service involved
    Demo,
}

impl PaymentStatus {
    /// Failure reason shown on the failure page, `None` for success states
    pub fn failure_reason(self) -> Option<FailureReason> {
        match self {
            PaymentStatus::Paid | PaymentStatus::Demo => None,
            PaymentStatus::Failed => Some(FailureReason::Failed),
            PaymentStatus::Expired => Some(FailureReason::Expired),
            PaymentStatus::Canceled => Some(FailureReason::Canceled),
        }
    }
}

/// Why the buyer ended up on the failure page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureReason {
    Canceled,
    Failed,
    Expired,
    #[serde(other)]
    Unknown,
}

impl FailureReason {
    /// Parse the `reason` query parameter.
    ///
    /// A missing reason is a cancellation: the cancel callback is the only
    /// way to land on the failure page without one.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("canceled") => FailureReason::Canceled,
            Some("failed") => FailureReason::Failed,
            Some("expired") => FailureReason::Expired,
            Some(_) => FailureReason::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FailureReason::Canceled => "canceled",
            FailureReason::Failed => "failed",
            FailureReason::Expired => "expired",
            FailureReason::Unknown => "unknown",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FailureReason::Canceled => "Payment was canceled",
            FailureReason::Failed => "Payment did not go through",
            FailureReason::Expired => "Payment session expired",
            FailureReason::Unknown => "Something went wrong",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FailureReason::Canceled => {
                "You canceled the payment. No worries, you can try again at any time."
            }
            FailureReason::Failed => {
                "The payment could not be processed. This can happen because of card issues, \
                 insufficient funds, or a technical problem."
            }
            FailureReason::Expired => {
                "The time to complete the payment ran out. Please start the purchase again."
            }
            FailureReason::Unknown => {
                "A technical error occurred while processing the payment. Please try again."
            }
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving a session id. Derived per request, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    /// `None` when the outcome is a fallback for an unresolvable id
    pub session_id: Option<SessionId>,

    pub tier: CourseTier,

    pub status: PaymentStatus,

    #[serde(default)]
    pub customer_email: Option<String>,

    /// Raw payment status reported by the payment service
    #[serde(default)]
    pub payment_status: Option<String>,

    /// Raw session status reported by the payment service
    #[serde(default)]
    pub session_status: Option<String>,
}

impl PaymentOutcome {
    /// Outcome of a locally minted demo session
    pub fn demo(session_id: SessionId, tier: CourseTier) -> Self {
        Self {
            session_id: Some(session_id),
            tier,
            status: PaymentStatus::Demo,
            customer_email: None,
            payment_status: None,
            session_status: None,
        }
    }

    /// Safe default when a session cannot be resolved: lowest tier, demo success
    pub fn fallback() -> Self {
        Self {
            session_id: None,
            tier: CourseTier::default(),
            status: PaymentStatus::Demo,
            customer_email: None,
            payment_status: None,
            session_status: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.failure_reason().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_param() {
        assert_eq!(FailureReason::from_param(None), FailureReason::Canceled);
        assert_eq!(FailureReason::from_param(Some("expired")), FailureReason::Expired);
        assert_eq!(FailureReason::from_param(Some("declined")), FailureReason::Unknown);
    }

    #[test]
    fn test_cancellation_is_never_success() {
        assert_eq!(
            PaymentStatus::Canceled.failure_reason(),
            Some(FailureReason::Canceled)
        );
        assert_eq!(PaymentStatus::Demo.failure_reason(), None);
    }

    #[test]
    fn test_fallback_outcome() {
        let outcome = PaymentOutcome::fallback();
        assert_eq!(outcome.tier, CourseTier::Basic);
        assert!(outcome.is_success());
        assert!(outcome.session_id.is_none());
    }

    #[test]
    fn test_unknown_reason_deserializes() {
        let reason: FailureReason = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(reason, FailureReason::Unknown);
    }
}
