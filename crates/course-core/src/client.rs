//! Checkout Redirect Client
//!
//! Drives one checkout attempt from the pricing page: asks the server for a
//! session, then decides where the browser goes next.
//!
//! ```text
//! idle ──▶ submitting ──┬──▶ redirected   (hosted checkout page)
//!   ▲                   ├──▶ demo-result  (success page, demo id)
//!   └─── failsafe/reset ┘
//! ```
//!
//! Network and timers sit behind [`CheckoutTransport`] and [`Clock`] so the
//! same flow runs on browser timers and on tokio's paused clock in tests.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use futures::future::{self, Either};

use crate::catalog::CourseTier;
use crate::error::Result;
use crate::route::{hosted_checkout_url, success_path};
use crate::session::{SessionId, SessionMode};
use crate::wire::CheckoutResponse;

/// Shortest time the processing state stays visible
pub const MIN_PROCESSING: Duration = Duration::from_secs(2);

/// Longest time an attempt may block further attempts
pub const FAILSAFE_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls the checkout endpoint
#[async_trait(?Send)]
pub trait CheckoutTransport {
    async fn create_session(&self, tier: CourseTier) -> Result<CheckoutResponse>;
}

/// Wall clock and timer
#[async_trait(?Send)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientTimings {
    pub min_processing: Duration,
    pub failsafe: Duration,
}

impl Default for ClientTimings {
    fn default() -> Self {
        Self {
            min_processing: MIN_PROCESSING,
            failsafe: FAILSAFE_TIMEOUT,
        }
    }
}

/// Client-observed checkout state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    /// Browser handed off to the hosted checkout page
    Redirected,
    /// Browser sent straight to the success page with a demo id
    DemoResult,
}

/// Where the browser should go next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Hosted payment page (absolute URL)
    Hosted(String),
    /// Result page on this site (path)
    ResultPage(String),
}

impl Navigation {
    pub fn url(&self) -> &str {
        match self {
            Navigation::Hosted(url) | Navigation::ResultPage(url) => url,
        }
    }
}

/// What a call to [`CheckoutClient::start`] produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Another attempt was in flight; nothing was sent
    Ignored,
    /// The request never settled and the attempt was abandoned
    TimedOut,
    /// A newer attempt started while this one was outstanding
    Superseded,
    Navigate(Navigation),
}

#[derive(Debug, Default)]
struct InFlight {
    phase: CheckoutPhase,
    started_at: Option<DateTime<Utc>>,
    attempt: u64,
}

/// Checkout client with a duplicate-submission guard
pub struct CheckoutClient<T, C> {
    transport: T,
    clock: C,
    timings: ClientTimings,
    state: Mutex<InFlight>,
}

impl<T: CheckoutTransport, C: Clock> CheckoutClient<T, C> {
    pub fn new(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            timings: ClientTimings::default(),
            state: Mutex::new(InFlight::default()),
        }
    }

    pub fn with_timings(mut self, timings: ClientTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.lock().phase
    }

    /// Whether a new attempt would be ignored right now
    pub fn is_in_flight(&self) -> bool {
        let now = self.clock.now();
        self.blocks(&self.lock(), now)
    }

    /// Clear the in-flight flag, e.g. when the page regains focus.
    ///
    /// An outstanding request may still complete afterwards; it only loses
    /// its navigation if a newer attempt has started in the meantime.
    pub fn reset(&self) {
        let mut state = self.lock();
        if state.phase == CheckoutPhase::Submitting {
            tracing::debug!(attempt = state.attempt, "Checkout guard reset");
        }
        state.phase = CheckoutPhase::Idle;
        state.started_at = None;
    }

    /// Run one checkout attempt for `tier`
    pub async fn start(&self, tier: CourseTier) -> Submission {
        let Some(attempt) = self.try_begin() else {
            tracing::debug!(tier = %tier, "Checkout already in flight, ignoring");
            return Submission::Ignored;
        };

        let request = async {
            let (response, ()) = future::join(
                self.transport.create_session(tier),
                self.clock.sleep(self.timings.min_processing),
            )
            .await;
            response
        };
        let failsafe = self.clock.sleep(self.timings.failsafe);

        let response = match future::select(Box::pin(request), failsafe).await {
            Either::Left((response, _)) => response,
            Either::Right(((), _)) => {
                tracing::warn!(tier = %tier, attempt, "Checkout request did not settle, releasing guard");
                self.finish(attempt, CheckoutPhase::Idle);
                return Submission::TimedOut;
            }
        };

        let navigation = match response {
            Ok(response) => {
                if let Some(error) = &response.error {
                    tracing::info!(tier = %tier, error = %error, "Checkout running in demo mode");
                }
                self.navigation_for(tier, &response)
            }
            Err(e) => {
                tracing::warn!(tier = %tier, error = %e, "Checkout request failed, using demo result");
                let id = SessionId::fallback(tier, self.clock.now());
                Navigation::ResultPage(success_path(id.as_str()))
            }
        };

        let phase = match navigation {
            Navigation::Hosted(_) => CheckoutPhase::Redirected,
            Navigation::ResultPage(_) => CheckoutPhase::DemoResult,
        };

        if self.finish(attempt, phase) {
            Submission::Navigate(navigation)
        } else {
            Submission::Superseded
        }
    }

    fn navigation_for(&self, tier: CourseTier, response: &CheckoutResponse) -> Navigation {
        let id = SessionId::from_string(response.session_id.as_str());

        match response.mode {
            SessionMode::Live if id.is_hosted() => Navigation::Hosted(
                response
                    .checkout_url
                    .clone()
                    .unwrap_or_else(|| hosted_checkout_url(id.as_str())),
            ),
            _ if id.is_well_formed() => Navigation::ResultPage(success_path(id.as_str())),
            _ => {
                let id = SessionId::fallback(tier, self.clock.now());
                Navigation::ResultPage(success_path(id.as_str()))
            }
        }
    }

    fn try_begin(&self) -> Option<u64> {
        let now = self.clock.now();
        let mut state = self.lock();
        if self.blocks(&state, now) {
            return None;
        }
        state.attempt += 1;
        state.phase = CheckoutPhase::Submitting;
        state.started_at = Some(now);
        Some(state.attempt)
    }

    /// Record the end of `attempt`; false if a newer attempt owns the state
    fn finish(&self, attempt: u64, phase: CheckoutPhase) -> bool {
        let mut state = self.lock();
        if state.attempt != attempt {
            return false;
        }
        if state.phase == CheckoutPhase::Submitting {
            state.phase = phase;
        }
        state.started_at = None;
        true
    }

    fn blocks(&self, state: &InFlight, now: DateTime<Utc>) -> bool {
        if state.phase != CheckoutPhase::Submitting {
            return false;
        }
        let limit = TimeDelta::from_std(self.timings.failsafe).unwrap_or(TimeDelta::MAX);
        state.started_at.is_some_and(|started| now - started < limit)
    }

    fn lock(&self) -> MutexGuard<'_, InFlight> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
