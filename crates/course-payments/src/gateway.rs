//! Payment Gateway
//!
//! The seam between the storefront and the hosted payment service. The
//! session creator and outcome resolver only ever talk to a
//! `PaymentGateway`; Stripe is one implementation, the mock another.

use async_trait::async_trait;
use course_core::route::{cancel_callback_url, success_callback_url};
use course_core::{CourseOffering, CourseTier, SessionId};

use crate::error::Result;

/// Metadata key carrying the tier on a hosted session
pub const COURSE_TYPE_METADATA: &str = "courseType";

/// Everything the payment service needs to open a one-shot checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRequest {
    pub tier: CourseTier,
    pub success_url: String,
    pub cancel_url: String,
}

impl SessionRequest {
    /// Request with callbacks pointing back at `origin`
    pub fn new(tier: CourseTier, origin: &str) -> Self {
        Self {
            tier,
            success_url: success_callback_url(origin),
            cancel_url: cancel_callback_url(origin, tier),
        }
    }

    /// The single line item being sold
    pub fn offering(&self) -> &'static CourseOffering {
        self.tier.offering()
    }
}

/// Session opened at the payment service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedSession {
    pub id: String,

    /// Hosted checkout page
    pub url: Option<String>,
}

/// Payment state reported by the payment service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemotePaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
}

impl RemotePaymentStatus {
    /// Parse the service's wire value; unrecognized values count as unpaid
    pub fn parse(s: &str) -> Self {
        match s {
            "paid" => RemotePaymentStatus::Paid,
            "no_payment_required" => RemotePaymentStatus::NoPaymentRequired,
            _ => RemotePaymentStatus::Unpaid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RemotePaymentStatus::Paid => "paid",
            RemotePaymentStatus::Unpaid => "unpaid",
            RemotePaymentStatus::NoPaymentRequired => "no_payment_required",
        }
    }
}

/// Lifecycle state of a hosted session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteSessionStatus {
    Open,
    Complete,
    Expired,
}

impl RemoteSessionStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(RemoteSessionStatus::Open),
            "complete" => Some(RemoteSessionStatus::Complete),
            "expired" => Some(RemoteSessionStatus::Expired),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RemoteSessionStatus::Open => "open",
            RemoteSessionStatus::Complete => "complete",
            RemoteSessionStatus::Expired => "expired",
        }
    }
}

/// Snapshot of a hosted session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSession {
    pub id: String,
    pub payment_status: RemotePaymentStatus,
    pub status: Option<RemoteSessionStatus>,

    /// Raw `courseType` metadata, as stored at creation
    pub course_type: Option<String>,

    pub customer_email: Option<String>,
}

/// Hosted payment service (Strategy pattern)
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session
    async fn create_session(&self, request: &SessionRequest) -> Result<CreatedSession>;

    /// Fetch the current state of a hosted session
    async fn retrieve_session(&self, id: &SessionId) -> Result<RemoteSession>;

    /// Gateway name, for logs
    fn name(&self) -> &str;
}
