//! Result Routing
//!
//! URLs of the result pages and the decision of which one a resolved
//! session lands on.

use crate::catalog::CourseTier;
use crate::outcome::FailureReason;
use crate::wire::{DetailsMode, SessionDetailsResponse};

pub const SUCCESS_PATH: &str = "/success";
pub const FAILURE_PATH: &str = "/payment-failed";

/// Hosted checkout page, used when the server returned no URL
const HOSTED_CHECKOUT_BASE: &str = "https://checkout.stripe.com/c/pay/";

/// Placeholder Stripe substitutes with the real session id on redirect
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

pub fn success_path(session_id: &str) -> String {
    format!("{SUCCESS_PATH}?session_id={session_id}")
}

pub fn failure_path(reason: FailureReason, tier: CourseTier, session_id: Option<&str>) -> String {
    let mut path = format!("{FAILURE_PATH}?reason={reason}&course={tier}");
    if let Some(id) = session_id {
        path.push_str("&session_id=");
        path.push_str(id);
    }
    path
}

pub fn hosted_checkout_url(session_id: &str) -> String {
    format!("{HOSTED_CHECKOUT_BASE}{session_id}")
}

/// Where the payment service sends the buyer after paying
pub fn success_callback_url(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), success_path(SESSION_ID_PLACEHOLDER))
}

/// Where the payment service sends the buyer after backing out
pub fn cancel_callback_url(origin: &str, tier: CourseTier) -> String {
    format!(
        "{}{}",
        origin.trim_end_matches('/'),
        failure_path(FailureReason::Canceled, tier, None)
    )
}

/// Result page a resolved session should render
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultRoute {
    Success {
        tier: CourseTier,
        demo: bool,
        customer_email: Option<String>,
    },
    Failure {
        reason: FailureReason,
        tier: CourseTier,
        session_id: Option<String>,
    },
}

impl ResultRoute {
    pub fn from_details(details: &SessionDetailsResponse) -> Self {
        match details.mode {
            DetailsMode::Failed => ResultRoute::Failure {
                reason: details.reason.unwrap_or(FailureReason::Unknown),
                tier: details.course_type,
                session_id: details.session_id.clone(),
            },
            DetailsMode::Live | DetailsMode::Demo => ResultRoute::Success {
                tier: details.course_type,
                demo: details.mode == DetailsMode::Demo,
                customer_email: details.customer_email.clone(),
            },
        }
    }

    /// Path to navigate to, when the route is not the page already showing
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            ResultRoute::Success { .. } => None,
            ResultRoute::Failure {
                reason,
                tier,
                session_id,
            } => Some(failure_path(*reason, *tier, session_id.as_deref())),
        }
    }
}
