//! Router

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{create_checkout, health_check, session_details};
use crate::state::AppState;

pub fn router(state: AppState, static_dir: &Path) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Client-side routes (/success, /payment-failed) all load the SPA shell
    let frontend =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        // Health
        .route("/api/health", get(health_check).post(health_check))
        // Checkout
        .route("/api/checkout", post(create_checkout))
        .route("/api/session-details", get(session_details))
        // Static files (WASM frontend)
        .fallback_service(frontend)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use course_payments::{
        CredentialStatus, MockGateway, PaymentError, PaymentGateway, RemotePaymentStatus,
        RemoteSession, RemoteSessionStatus,
    };

    const SITE: &str = "http://localhost:3000";

    fn demo_app() -> Router {
        router(
            AppState::new(None, CredentialStatus::default(), SITE),
            Path::new("static"),
        )
    }

    fn live_app(gateway: Arc<dyn PaymentGateway>) -> Router {
        let credentials = CredentialStatus {
            has_secret_key: true,
            has_publishable_key: true,
            keys_valid: true,
        };
        router(
            AppState::new(Some(gateway), credentials, SITE),
            Path::new("static"),
        )
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn checkout_request(body: &str) -> Request<Body> {
        Request::post("/api/checkout")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn details_request(query: &str) -> Request<Body> {
        Request::get(format!("/api/session-details{query}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_demo_checkout_round_trip() {
        let app = demo_app();

        let (status, created) =
            send(app.clone(), checkout_request(r#"{"courseType":"vip"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["mode"], "demo");
        assert_eq!(created["course"]["unitAmount"], 10000);
        assert!(created["error"].is_string());

        let session_id = created["sessionId"].as_str().unwrap();
        assert!(session_id.starts_with("demo_vip_"));

        let (status, details) = send(app, details_request(&format!("?session_id={session_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["mode"], "demo");
        assert_eq!(details["courseType"], "vip");
        assert!(details.get("error").is_none());
    }

    #[tokio::test]
    async fn test_unknown_tier_is_rejected() {
        let (status, body) = send(demo_app(), checkout_request(r#"{"courseType":"gold"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_TIER");
    }

    #[tokio::test]
    async fn test_tier_keys_are_exact() {
        for course_type in ["Standard", "VIP", " basic"] {
            let body = json!({ "courseType": course_type }).to_string();
            let (status, body) = send(demo_app(), checkout_request(&body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "INVALID_TIER");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (status, body) = send(demo_app(), checkout_request("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_live_checkout_returns_hosted_url() {
        let gateway = Arc::new(MockGateway::new());
        let app = live_app(gateway.clone());

        let (status, body) = send(app, checkout_request(r#"{"courseType":"standard"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "live");
        assert!(body["sessionId"].as_str().unwrap().starts_with("cs_"));
        assert!(
            body["checkoutUrl"]
                .as_str()
                .unwrap()
                .starts_with("https://checkout.stripe.com/")
        );
        assert!(body.get("error").is_none());
        assert_eq!(gateway.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_gateway_failure_degrades_to_demo() {
        let gateway = Arc::new(MockGateway::failing(PaymentError::Stripe(
            "api unreachable".into(),
        )));

        let (status, body) = send(
            live_app(gateway),
            checkout_request(r#"{"courseType":"basic"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "demo");
        assert!(body["sessionId"].as_str().unwrap().starts_with("demo_basic_"));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unpaid_session_reports_failure() {
        let gateway = MockGateway::new().with_session(RemoteSession {
            id: "cs_test_unpaid".into(),
            payment_status: RemotePaymentStatus::Unpaid,
            status: Some(RemoteSessionStatus::Open),
            course_type: Some("vip".into()),
            customer_email: Some("buyer@example.com".into()),
        });

        let (status, body) = send(
            live_app(Arc::new(gateway)),
            details_request("?session_id=cs_test_unpaid"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "courseType": "vip",
                "mode": "failed",
                "sessionId": "cs_test_unpaid",
                "paymentStatus": "unpaid",
                "status": "open",
                "reason": "failed",
            })
        );
    }

    #[tokio::test]
    async fn test_missing_session_id_is_rejected() {
        for query in ["", "?session_id="] {
            let (status, body) = send(demo_app(), details_request(query)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "MISSING_SESSION_ID");
        }
    }

    #[tokio::test]
    async fn test_unknown_session_falls_back_to_basic() {
        let (status, body) = send(
            live_app(Arc::new(MockGateway::new())),
            details_request("?session_id=cs_test_missing"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courseType"], "basic");
        assert_eq!(body["mode"], "demo");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_health_reports_mode() {
        let request = Request::get("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(demo_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mode"], "demo");
        assert_eq!(body["stripe"]["keysValid"], false);

        let request = Request::post("/api/health").body(Body::empty()).unwrap();
        let (status, body) = send(live_app(Arc::new(MockGateway::new())), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "live");
    }
}
