//! API Client

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::channel::oneshot;
use serde::de::DeserializeOwned;

use course_core::{
    CheckoutClient, CheckoutRequest, CheckoutResponse, CheckoutTransport, Clock, CoreError,
    CourseTier, Result, SessionDetailsResponse,
};

/// Checkout client as used by the storefront pages
pub type StorefrontClient = CheckoutClient<HttpTransport, BrowserClock>;

pub fn storefront_client() -> StorefrontClient {
    CheckoutClient::new(HttpTransport::default(), BrowserClock)
}

/// Origin of the page, e.g. `https://course.example`
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

/// Send the browser to `url` (absolute, or a path on this site)
pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

fn api_url(path: &str) -> String {
    format!("{}{path}", origin())
}

/// `POST /api/checkout` over fetch
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[async_trait(?Send)]
impl CheckoutTransport for HttpTransport {
    async fn create_session(&self, tier: CourseTier) -> Result<CheckoutResponse> {
        let response = self
            .client
            .post(api_url("/api/checkout"))
            .json(&CheckoutRequest::new(tier))
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;

        decode(response).await
    }
}

/// Resolve the session a result page was opened with
pub async fn fetch_session_details(session_id: &str) -> Result<SessionDetailsResponse> {
    let response = reqwest::Client::new()
        .get(api_url("/api/session-details"))
        .query(&[("session_id", session_id)])
        .send()
        .await
        .map_err(|e| CoreError::Network(e.to_string()))?;

    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        return Err(CoreError::UnexpectedStatus {
            status: status.as_u16(),
            body: data["error"].as_str().unwrap_or("Request failed").to_string(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| CoreError::Decode(e.to_string()))
}

/// Wall clock and `setTimeout`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

#[async_trait(?Send)]
impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        let (tx, rx) = oneshot::channel::<()>();
        leptos::prelude::set_timeout(
            move || {
                let _ = tx.send(());
            },
            duration,
        );
        let _ = rx.await;
    }
}
