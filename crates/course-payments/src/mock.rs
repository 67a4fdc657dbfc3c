//! Mock Payment Gateway
//!
//! For testing and local demos. Issues `cs_test_` ids and remembers the
//! sessions it opened so they can be resolved afterwards.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use course_core::SessionId;
use course_core::route::hosted_checkout_url;

use crate::error::{PaymentError, Result};
use crate::gateway::{
    CreatedSession, PaymentGateway, RemotePaymentStatus, RemoteSession, RemoteSessionStatus,
    SessionRequest,
};

/// In-memory gateway with call counters
#[derive(Default)]
pub struct MockGateway {
    create_calls: AtomicUsize,
    retrieve_calls: AtomicUsize,
    fail_with: Option<PaymentError>,
    sessions: Mutex<HashMap<String, RemoteSession>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose every call fails with `error`
    pub fn failing(error: PaymentError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    /// Pre-register a session for lookups
    pub fn with_session(self, session: RemoteSession) -> Self {
        self.lock().insert(session.id.clone(), session);
        self
    }

    /// Mark a previously created session as paid
    pub fn complete(&self, id: &str, customer_email: Option<&str>) {
        if let Some(session) = self.lock().get_mut(id) {
            session.payment_status = RemotePaymentStatus::Paid;
            session.status = Some(RemoteSessionStatus::Complete);
            session.customer_email = customer_email.map(str::to_string);
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RemoteSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_session(&self, request: &SessionRequest) -> Result<CreatedSession> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        let id = format!("cs_test_mock{n:04}");
        self.lock().insert(
            id.clone(),
            RemoteSession {
                id: id.clone(),
                payment_status: RemotePaymentStatus::Unpaid,
                status: Some(RemoteSessionStatus::Open),
                course_type: Some(request.tier.as_str().to_string()),
                customer_email: None,
            },
        );

        Ok(CreatedSession {
            url: Some(hosted_checkout_url(&id)),
            id,
        })
    }

    async fn retrieve_session(&self, id: &SessionId) -> Result<RemoteSession> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        self.lock()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| PaymentError::Stripe(format!("No such checkout.session: '{id}'")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
