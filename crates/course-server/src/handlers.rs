//! HTTP Handlers

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use course_core::{CheckoutRequest, CheckoutResponse, SessionDetailsResponse, SessionMode};
use course_payments::{CredentialStatus, Outcome, PaymentError};

use crate::config::parse_http_origin;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub mode: SessionMode,
    pub stripe: CredentialStatus,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionDetailsQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

/// Status for an error that aborted a request.
///
/// Only an unknown tier aborts a checkout today; every other payment error
/// is absorbed into a degraded 200. Anything new that escapes is a server
/// fault, not the caller's.
fn error_status(err: &PaymentError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_code(err: &PaymentError) -> &'static str {
    match err {
        PaymentError::InvalidTier(_) => "INVALID_TIER",
        PaymentError::ServiceUnavailable(_) => "PAYMENTS_DISABLED",
        PaymentError::Stripe(_) => "CHECKOUT_ERROR",
        PaymentError::OutcomeLookup(_) => "LOOKUP_ERROR",
    }
}

/// Origin for payment callbacks: the request's `Origin` when usable
fn request_origin(headers: &HeaderMap, site_url: &str) -> String {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_origin)
        .unwrap_or_else(|| site_url.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        mode: if state.is_live() {
            SessionMode::Live
        } else {
            SessionMode::Demo
        },
        stripe: state.credentials,
    })
}

/// Create a checkout session
///
/// Degraded sessions still answer 200; the body's `mode` and `error` tell
/// them apart.
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("Rejected checkout body: {}", e);
        api_error(StatusCode::BAD_REQUEST, e.body_text(), "INVALID_REQUEST")
    })?;

    let origin = request_origin(&headers, &state.site_url);

    let outcome = state
        .creator
        .create(&payload.course_type, &origin)
        .await
        .map_err(|e| {
            tracing::warn!(course_type = %payload.course_type, "Checkout rejected: {}", e);
            api_error(error_status(&e), e.user_message(), error_code(&e))
        })?;

    let response = match outcome {
        Outcome::Complete(session) => CheckoutResponse::from_session(&session),
        Outcome::Degraded(session, reason) => {
            tracing::warn!(
                session_id = %session.id,
                code = error_code(&reason),
                "Serving demo checkout session: {}",
                reason
            );
            CheckoutResponse::from_session(&session).with_error(reason.user_message())
        }
    };

    Ok(Json(response))
}

/// Resolve a session id into a payment outcome
pub async fn session_details(
    State(state): State<AppState>,
    Query(query): Query<SessionDetailsQuery>,
) -> Result<Json<SessionDetailsResponse>, ApiError> {
    let session_id = query
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "Session ID is required",
                "MISSING_SESSION_ID",
            )
        })?;

    let outcome = state.resolver.resolve(&session_id).await;

    let response = match outcome {
        Outcome::Complete(payment) => SessionDetailsResponse::from(&payment),
        Outcome::Degraded(payment, reason) => {
            tracing::warn!(
                code = error_code(&reason),
                "Serving fallback session details: {}",
                reason
            );
            SessionDetailsResponse::from(&payment).with_error(reason.user_message())
        }
    };

    Ok(Json(response))
}
