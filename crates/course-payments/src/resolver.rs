//! Outcome Resolver
//!
//! Turns a session id from a result-page URL into a payment outcome.
//! Demo ids decode locally; hosted ids are looked up at the gateway. Any
//! failure resolves to the fallback outcome rather than an error.

use std::sync::Arc;

use course_core::{CourseTier, PaymentOutcome, PaymentStatus, SessionId};

use crate::error::{Outcome, PaymentError};
use crate::gateway::{PaymentGateway, RemotePaymentStatus, RemoteSession, RemoteSessionStatus};

/// Resolves session ids to payment outcomes
#[derive(Clone)]
pub struct OutcomeResolver {
    gateway: Option<Arc<dyn PaymentGateway>>,
}

impl OutcomeResolver {
    pub fn new(gateway: Option<Arc<dyn PaymentGateway>>) -> Self {
        Self { gateway }
    }

    pub async fn resolve(&self, session_id: &str) -> Outcome<PaymentOutcome> {
        let id = SessionId::from_string(session_id);

        if !id.is_well_formed() {
            return degraded(PaymentError::OutcomeLookup(format!(
                "malformed session id: {session_id:?}"
            )));
        }

        if let Some(tier) = id.demo_tier() {
            return Outcome::Complete(PaymentOutcome::demo(id, tier));
        }

        let Some(gateway) = &self.gateway else {
            return degraded(PaymentError::ServiceUnavailable(
                "payment credentials not configured".into(),
            ));
        };

        match gateway.retrieve_session(&id).await {
            Ok(remote) => {
                let outcome = outcome_from_remote(remote);
                tracing::info!(
                    session_id = %id,
                    tier = %outcome.tier,
                    status = ?outcome.status,
                    "Resolved checkout session"
                );
                Outcome::Complete(outcome)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %id,
                    gateway = gateway.name(),
                    error = %e,
                    "Session lookup failed, using fallback outcome"
                );
                degraded(PaymentError::OutcomeLookup(e.to_string()))
            }
        }
    }
}

fn degraded(reason: PaymentError) -> Outcome<PaymentOutcome> {
    Outcome::Degraded(PaymentOutcome::fallback(), reason)
}

/// Map a hosted session onto the outcome taxonomy.
///
/// Expiry wins over payment state; an unpaid session is a failure;
/// everything else counts as paid.
pub fn outcome_from_remote(remote: RemoteSession) -> PaymentOutcome {
    let status = if remote.status == Some(RemoteSessionStatus::Expired) {
        PaymentStatus::Expired
    } else if remote.payment_status == RemotePaymentStatus::Unpaid {
        PaymentStatus::Failed
    } else {
        PaymentStatus::Paid
    };

    let tier = remote
        .course_type
        .as_deref()
        .and_then(|t| t.parse::<CourseTier>().ok())
        .unwrap_or_default();

    // Email is only meaningful once the buyer actually paid
    let customer_email = match status {
        PaymentStatus::Paid => remote.customer_email,
        _ => None,
    };

    PaymentOutcome {
        session_id: Some(SessionId::from_string(remote.id)),
        tier,
        status,
        customer_email,
        payment_status: Some(remote.payment_status.as_str().to_string()),
        session_status: remote.status.map(|s| s.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGateway;
    use chrono::Utc;

    fn remote(
        id: &str,
        payment_status: RemotePaymentStatus,
        status: RemoteSessionStatus,
        course_type: Option<&str>,
    ) -> RemoteSession {
        RemoteSession {
            id: id.into(),
            payment_status,
            status: Some(status),
            course_type: course_type.map(str::to_string),
            customer_email: Some("buyer@example.com".into()),
        }
    }

    #[tokio::test]
    async fn test_demo_id_round_trips_tier() {
        let gateway = Arc::new(MockGateway::new());
        let resolver = OutcomeResolver::new(Some(gateway.clone()));

        for tier in CourseTier::ALL {
            let id = SessionId::demo(tier, Utc::now());
            let outcome = resolver.resolve(id.as_str()).await;
            assert!(!outcome.is_degraded());
            assert_eq!(outcome.value().tier, tier);
            assert_eq!(outcome.value().status, PaymentStatus::Demo);
        }
        assert_eq!(gateway.retrieve_calls(), 0);
    }

    #[tokio::test]
    async fn test_demo_id_resolves_without_credentials() {
        let resolver = OutcomeResolver::new(None);
        let outcome = resolver.resolve("demo_error_standard_1760529600000").await;
        assert_eq!(outcome.value().tier, CourseTier::Standard);
        assert!(!outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_unpaid_session_is_failed() {
        let gateway = MockGateway::new().with_session(remote(
            "cs_test_unpaid",
            RemotePaymentStatus::Unpaid,
            RemoteSessionStatus::Open,
            Some("vip"),
        ));
        let resolver = OutcomeResolver::new(Some(Arc::new(gateway)));

        let outcome = resolver.resolve("cs_test_unpaid").await.into_value();

        assert_eq!(outcome.status, PaymentStatus::Failed);
        assert_eq!(outcome.tier, CourseTier::Vip);
        assert_eq!(outcome.customer_email, None);
        assert_eq!(outcome.payment_status.as_deref(), Some("unpaid"));
    }

    #[tokio::test]
    async fn test_expired_session() {
        let gateway = MockGateway::new().with_session(remote(
            "cs_test_expired",
            RemotePaymentStatus::Unpaid,
            RemoteSessionStatus::Expired,
            Some("standard"),
        ));
        let resolver = OutcomeResolver::new(Some(Arc::new(gateway)));

        let outcome = resolver.resolve("cs_test_expired").await.into_value();

        assert_eq!(outcome.status, PaymentStatus::Expired);
        assert_eq!(outcome.session_status.as_deref(), Some("expired"));
    }

    #[tokio::test]
    async fn test_paid_session_carries_email() {
        let gateway = MockGateway::new().with_session(remote(
            "cs_test_paid",
            RemotePaymentStatus::Paid,
            RemoteSessionStatus::Complete,
            Some("standard"),
        ));
        let resolver = OutcomeResolver::new(Some(Arc::new(gateway)));

        let outcome = resolver.resolve("cs_test_paid").await.into_value();

        assert_eq!(outcome.status, PaymentStatus::Paid);
        assert_eq!(outcome.tier, CourseTier::Standard);
        assert_eq!(outcome.customer_email.as_deref(), Some("buyer@example.com"));
    }

    #[tokio::test]
    async fn test_missing_metadata_defaults_to_basic() {
        let gateway = MockGateway::new().with_session(remote(
            "cs_test_nometa",
            RemotePaymentStatus::Paid,
            RemoteSessionStatus::Complete,
            None,
        ));
        let resolver = OutcomeResolver::new(Some(Arc::new(gateway)));

        let outcome = resolver.resolve("cs_test_nometa").await.into_value();

        assert_eq!(outcome.tier, CourseTier::Basic);
    }

    #[tokio::test]
    async fn test_unknown_session_falls_back() {
        let resolver = OutcomeResolver::new(Some(Arc::new(MockGateway::new())));

        let outcome = resolver.resolve("cs_test_missing").await;

        assert!(matches!(
            outcome.reason(),
            Some(PaymentError::OutcomeLookup(_))
        ));
        assert_eq!(outcome.into_value(), PaymentOutcome::fallback());
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let resolver = OutcomeResolver::new(Some(gateway.clone()));

        let outcome = resolver.resolve("cs_test<script>").await;

        assert!(outcome.is_degraded());
        assert_eq!(gateway.retrieve_calls(), 0);
    }

    #[tokio::test]
    async fn test_live_id_without_credentials_falls_back() {
        let resolver = OutcomeResolver::new(None);

        let outcome = resolver.resolve("cs_test_live").await;

        assert!(matches!(
            outcome.reason(),
            Some(PaymentError::ServiceUnavailable(_))
        ));
        assert_eq!(outcome.value().tier, CourseTier::Basic);
    }
}
