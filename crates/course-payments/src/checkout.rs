//! Checkout Session Creator
//!
//! Turns a tier key into a checkout session. Only an unknown tier is an
//! error; a missing or failing payment service degrades to a demo session
//! so the storefront flow always completes.

use chrono::Utc;
use std::sync::Arc;

use course_core::{CheckoutSession, CourseTier};

use crate::error::{Outcome, PaymentError, Result};
use crate::gateway::{PaymentGateway, SessionRequest};

/// Creates checkout sessions, live when a gateway is configured
#[derive(Clone)]
pub struct SessionCreator {
    gateway: Option<Arc<dyn PaymentGateway>>,
}

impl SessionCreator {
    pub fn new(gateway: Option<Arc<dyn PaymentGateway>>) -> Self {
        Self { gateway }
    }

    /// Creator that only ever issues demo sessions
    pub fn demo_only() -> Self {
        Self { gateway: None }
    }

    pub fn is_live(&self) -> bool {
        self.gateway.is_some()
    }

    /// Create a session for `tier_key`, with callbacks pointing at `origin`.
    ///
    /// Fails only with [`PaymentError::InvalidTier`], before any call to the
    /// payment service.
    pub async fn create(&self, tier_key: &str, origin: &str) -> Result<Outcome<CheckoutSession>> {
        let tier: CourseTier = tier_key.parse()?;
        let now = Utc::now();

        let Some(gateway) = &self.gateway else {
            tracing::info!(tier = %tier, "Payments not configured, issuing demo session");
            return Ok(Outcome::Degraded(
                CheckoutSession::demo(tier, now),
                PaymentError::ServiceUnavailable("payment credentials not configured".into()),
            ));
        };

        let request = SessionRequest::new(tier, origin);
        match gateway.create_session(&request).await {
            Ok(created) => {
                tracing::info!(
                    tier = %tier,
                    session_id = %created.id,
                    gateway = gateway.name(),
                    "Created checkout session"
                );
                Ok(Outcome::Complete(CheckoutSession::live(
                    created.id,
                    tier,
                    created.url,
                    now,
                )))
            }
            Err(e) => {
                tracing::error!(
                    tier = %tier,
                    gateway = gateway.name(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "Checkout session creation failed, falling back to demo"
                );
                Ok(Outcome::Degraded(CheckoutSession::demo(tier, now), e))
            }
        }
    }
}
