//! # course-core
//!
//! Shared model for the course storefront: catalog, checkout sessions,
//! payment outcomes, wire types and the browser-side checkout flow.
//!
//! ## Checkout flow
//!
//! ```text
//! ┌──────────────┐   POST /api/checkout   ┌──────────────┐      ┌────────────────┐
//! │ Pricing page │───────────────────────▶│    Server    │─────▶│ Stripe Checkout│
//! │ (client.rs)  │◀───────────────────────│  (creator)   │      │    (hosted)    │
//! └──────┬───────┘  {sessionId, mode}     └──────────────┘      └───────┬────────┘
//!        │ demo                                                          │ redirect
//!        ▼                                                               ▼
//! ┌──────────────┐ GET /api/session-details ┌──────────────┐
//! │ Result pages │─────────────────────────▶│   Server     │
//! │  (route.rs)  │◀─────────────────────────│  (resolver)  │
//! └──────────────┘                          └──────────────┘
//! ```
//!
//! This crate has no server or browser dependencies so it builds for both
//! the backend and the wasm frontend.

pub mod catalog;
pub mod client;
pub mod error;
pub mod outcome;
pub mod route;
pub mod session;
pub mod wire;

pub use catalog::{CourseOffering, CourseTier};
pub use client::{CheckoutClient, CheckoutPhase, CheckoutTransport, Clock, Navigation, Submission};
pub use error::{CoreError, Result};
pub use outcome::{FailureReason, PaymentOutcome, PaymentStatus};
pub use route::ResultRoute;
pub use session::{CheckoutSession, SessionId, SessionMode};
pub use wire::{CheckoutRequest, CheckoutResponse, CourseSummary, DetailsMode, SessionDetailsResponse};
