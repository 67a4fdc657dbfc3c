//! Application State

use std::sync::Arc;

use course_payments::{CredentialStatus, OutcomeResolver, PaymentGateway, SessionCreator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout session creator
    pub creator: Arc<SessionCreator>,

    /// Session id → payment outcome
    pub resolver: Arc<OutcomeResolver>,

    /// What the health check reports about Stripe keys
    pub credentials: CredentialStatus,

    /// Fallback origin for payment callbacks
    pub site_url: Arc<str>,
}

impl AppState {
    /// Wire the creator and resolver to the same gateway (None = demo mode)
    pub fn new(
        gateway: Option<Arc<dyn PaymentGateway>>,
        credentials: CredentialStatus,
        site_url: &str,
    ) -> Self {
        Self {
            creator: Arc::new(SessionCreator::new(gateway.clone())),
            resolver: Arc::new(OutcomeResolver::new(gateway)),
            credentials,
            site_url: Arc::from(site_url),
        }
    }

    pub fn is_live(&self) -> bool {
        self.creator.is_live()
    }
}
