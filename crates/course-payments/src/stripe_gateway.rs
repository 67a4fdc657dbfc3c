//! Stripe Checkout Gateway
//!
//! Hosted Stripe Checkout: one `payment`-mode session per attempt with a
//! single inline-priced line item. No products or prices need to exist in
//! the Stripe dashboard.

use async_trait::async_trait;
use std::collections::HashMap;
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionId, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData, Currency,
};

use course_core::SessionId;

use crate::config::StripeConfig;
use crate::error::{PaymentError, Result};
use crate::gateway::{
    COURSE_TYPE_METADATA, CreatedSession, PaymentGateway, RemotePaymentStatus,
    RemoteSession, RemoteSessionStatus, SessionRequest,
};

/// Stripe client wrapper
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            client: Client::new(config.secret_key()),
        }
    }
}

/// Session parameters: one USD line item, quantity 1, tier in metadata
fn checkout_params(request: &SessionRequest) -> CreateCheckoutSession<'_> {
    let offering = request.offering();

    let mut params = CreateCheckoutSession::new();
    params.success_url = Some(&request.success_url);
    params.cancel_url = Some(&request.cancel_url);
    params.mode = Some(CheckoutSessionMode::Payment);

    let mut metadata = HashMap::new();
    metadata.insert(
        COURSE_TYPE_METADATA.to_string(),
        request.tier.as_str().to_string(),
    );
    params.metadata = Some(metadata);

    params.line_items = Some(vec![CreateCheckoutSessionLineItems {
        quantity: Some(1),
        price_data: Some(CreateCheckoutSessionLineItemsPriceData {
            currency: Currency::USD,
            unit_amount: Some(offering.unit_amount),
            product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                name: offering.display_name.to_string(),
                description: Some(offering.description.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }]);

    params
}

fn remote_from_stripe(session: StripeCheckoutSession) -> RemoteSession {
    RemoteSession {
        id: session.id.to_string(),
        payment_status: RemotePaymentStatus::parse(session.payment_status.as_str()),
        status: session
            .status
            .and_then(|status| RemoteSessionStatus::parse(status.as_str())),
        course_type: session
            .metadata
            .as_ref()
            .and_then(|m| m.get(COURSE_TYPE_METADATA))
            .cloned(),
        customer_email: session.customer_details.and_then(|details| details.email),
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_session(&self, request: &SessionRequest) -> Result<CreatedSession> {
        let session = StripeCheckoutSession::create(&self.client, checkout_params(request))
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        Ok(CreatedSession {
            id: session.id.to_string(),
            url: session.url,
        })
    }

    async fn retrieve_session(&self, id: &SessionId) -> Result<RemoteSession> {
        let session_id: CheckoutSessionId = id
            .as_str()
            .parse()
            .map_err(|e| PaymentError::OutcomeLookup(format!("{id}: {e}")))?;

        let session = StripeCheckoutSession::retrieve(&self.client, &session_id, &[])
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        Ok(remote_from_stripe(session))
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
