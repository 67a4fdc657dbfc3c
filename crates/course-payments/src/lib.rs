//! # course-payments
//!
//! Checkout session creation and payment outcome resolution for the course
//! storefront.
//!
//! ## Flow
//!
//! **Stripe Checkout (Hosted):** Your site → Stripe's hosted page → back to
//! `/success` or `/payment-failed`.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────────┐
//! │  Your Site  │────▶│  Stripe Hosted  │────▶│      Your Site       │
//! │  (pricing)  │     │  Checkout Page  │     │ (success / failed)   │
//! └─────────────┘     └─────────────────┘     └──────────────────────┘
//! ```
//!
//! Without valid credentials, or when Stripe errors, sessions come back as
//! [`Outcome::Degraded`] demo sessions instead of errors. The only hard
//! failure is an unknown course tier.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use course_payments::{OutcomeResolver, SessionCreator, StripeConfig, StripeGateway};
//!
//! let gateway = StripeConfig::from_env()
//!     .ok()
//!     .map(|config| Arc::new(StripeGateway::new(&config)) as _);
//! let creator = SessionCreator::new(gateway.clone());
//! let resolver = OutcomeResolver::new(gateway);
//!
//! let session = creator.create("vip", "https://yoursite.com").await?.into_value();
//! // Redirect user to: session.checkout_url (live) or /success?session_id=... (demo)
//!
//! let outcome = resolver.resolve(session.id.as_str()).await;
//! ```

#![cfg_attr(test, recursion_limit = "256")]

mod checkout;
mod config;
mod error;
mod gateway;
mod mock;
mod resolver;
mod stripe_gateway;

pub use checkout::SessionCreator;
pub use config::{CredentialStatus, StripeConfig};
pub use error::{Outcome, PaymentError, Result};
pub use gateway::{
    CreatedSession, PaymentGateway, RemotePaymentStatus, RemoteSession, RemoteSessionStatus,
    SessionRequest,
};
pub use mock::MockGateway;
pub use resolver::{OutcomeResolver, outcome_from_remote};
pub use stripe_gateway::StripeGateway;

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::{PaymentStatus, SessionDetailsResponse};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_checkout_then_resolve() {
        let gateway = Arc::new(MockGateway::new());
        let creator = SessionCreator::new(Some(gateway.clone()));
        let resolver = OutcomeResolver::new(Some(gateway.clone()));

        let session = creator
            .create("standard", "https://course.example")
            .await
            .unwrap()
            .into_value();

        let pending = resolver.resolve(session.id.as_str()).await.into_value();
        assert_eq!(pending.status, PaymentStatus::Failed);

        gateway.complete(session.id.as_str(), Some("buyer@example.com"));
        let paid = resolver.resolve(session.id.as_str()).await.into_value();
        assert_eq!(paid.status, PaymentStatus::Paid);

        let details = SessionDetailsResponse::from(&paid);
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["mode"], "live");
        assert_eq!(json["courseType"], "standard");
        assert_eq!(json["customerEmail"], "buyer@example.com");
    }
}
