//! API Wire Types
//!
//! JSON bodies exchanged between the browser and the server. Field names
//! are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::catalog::{CourseOffering, CourseTier};
use crate::outcome::{FailureReason, PaymentOutcome, PaymentStatus};
use crate::session::{CheckoutSession, SessionMode};

/// `POST /api/checkout` body.
///
/// The tier stays a string here so an unknown key surfaces as
/// `InvalidTier` instead of a body-rejection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub course_type: String,
}

impl CheckoutRequest {
    pub fn new(tier: CourseTier) -> Self {
        Self {
            course_type: tier.as_str().to_string(),
        }
    }
}

/// Course details echoed back with a checkout session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub tier: CourseTier,
    pub name: String,
    pub unit_amount: i64,
    pub currency: String,
    pub description: String,
}

impl From<&CourseOffering> for CourseSummary {
    fn from(offering: &CourseOffering) -> Self {
        Self {
            tier: offering.tier,
            name: offering.display_name.to_string(),
            unit_amount: offering.unit_amount,
            currency: offering.currency.to_string(),
            description: offering.description.to_string(),
        }
    }
}

/// `POST /api/checkout` response
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,

    pub mode: SessionMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseSummary>,

    /// Set when the session is a fallback for a failed or unavailable service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckoutResponse {
    pub fn from_session(session: &CheckoutSession) -> Self {
        Self {
            session_id: session.id.as_str().to_string(),
            mode: session.mode,
            checkout_url: session.checkout_url.clone(),
            course: Some(session.tier.offering().into()),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// How the result page should treat a resolved session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailsMode {
    Live,
    Demo,
    Failed,
}

/// `GET /api/session-details` response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailsResponse {
    pub course_type: CourseTier,

    pub mode: DetailsMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionDetailsResponse {
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

impl From<&PaymentOutcome> for SessionDetailsResponse {
    fn from(outcome: &PaymentOutcome) -> Self {
        let mode = match outcome.status {
            PaymentStatus::Paid => DetailsMode::Live,
            PaymentStatus::Demo => DetailsMode::Demo,
            PaymentStatus::Failed | PaymentStatus::Expired | PaymentStatus::Canceled => {
                DetailsMode::Failed
            }
        };

        Self {
            course_type: outcome.tier,
            mode,
            session_id: outcome.session_id.as_ref().map(|id| id.as_str().to_string()),
            payment_status: outcome.payment_status.clone(),
            status: outcome.session_status.clone(),
            customer_email: outcome.customer_email.clone(),
            reason: outcome.status.failure_reason(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;
    use chrono::Utc;

    #[test]
    fn test_checkout_response_shape() {
        let session = CheckoutSession::demo(CourseTier::Vip, Utc::now());
        let json = serde_json::to_value(CheckoutResponse::from_session(&session)).unwrap();

        assert_eq!(json["mode"], "demo");
        assert!(json["sessionId"].as_str().unwrap().starts_with("demo_vip_"));
        assert_eq!(json["course"]["unitAmount"], 10000);
        assert!(json.get("checkoutUrl").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_unpaid_outcome_reports_failed_reason() {
        let outcome = PaymentOutcome {
            session_id: Some(SessionId::from_string("cs_test_123")),
            tier: CourseTier::Standard,
            status: PaymentStatus::Failed,
            customer_email: None,
            payment_status: Some("unpaid".into()),
            session_status: Some("open".into()),
        };
        let json = serde_json::to_value(SessionDetailsResponse::from(&outcome)).unwrap();

        assert_eq!(json["mode"], "failed");
        assert_eq!(json["reason"], "failed");
        assert_eq!(json["courseType"], "standard");
        assert_eq!(json["paymentStatus"], "unpaid");
    }

    #[test]
    fn test_canceled_outcome_is_a_failure() {
        let outcome = PaymentOutcome {
            status: PaymentStatus::Canceled,
            ..PaymentOutcome::fallback()
        };
        let details = SessionDetailsResponse::from(&outcome);
        assert_eq!(details.mode, DetailsMode::Failed);
        assert_eq!(details.reason, Some(FailureReason::Canceled));
    }

    #[test]
    fn test_request_camel_case() {
        let request: CheckoutRequest =
            serde_json::from_str(r#"{"courseType":"gold"}"#).unwrap();
        assert_eq!(request.course_type, "gold");
    }
}
