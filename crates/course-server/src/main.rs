//! course-storefront HTTP Server
//!
//! Axum-based server for the checkout API and the WASM storefront.
//!
//! Runs in live mode when both Stripe keys are configured, otherwise every
//! checkout is served as a demo session.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_payments::{CredentialStatus, PaymentGateway, StripeConfig, StripeGateway};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let credentials = CredentialStatus::from_env();

    // Initialize payments
    let gateway: Option<Arc<dyn PaymentGateway>> = match StripeConfig::from_env() {
        Ok(stripe) => {
            let keys = if stripe.is_test_mode() { "test" } else { "live" };
            tracing::info!("✓ Stripe configured ({} keys)", keys);
            Some(Arc::new(StripeGateway::new(&stripe)))
        }
        Err(e) => {
            tracing::warn!("⚠ Stripe not configured - serving demo sessions");
            tracing::warn!("  {}", e);
            tracing::warn!("  Set STRIPE_SECRET_KEY and STRIPE_PUBLISHABLE_KEY in .env");
            None
        }
    };

    let state = AppState::new(gateway, credentials, &config.site_url);
    let app = routes::router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 course-storefront running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /api/health          - Health check");
    tracing::info!("  POST /api/checkout        - Create checkout session");
    tracing::info!("  GET  /api/session-details - Resolve payment outcome");
    tracing::info!("  GET  /*                   - Storefront ({})", config.static_dir.display());
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
