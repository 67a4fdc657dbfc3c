//! Checkout Sessions
//!
//! Session identifiers and the session record handed back to the browser.
//! Live ids are issued by Stripe (`cs_...`); demo ids are minted locally and
//! carry their tier so the result page can be rendered without a lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::CourseTier;

/// Prefix shared by every locally minted session id
pub const DEMO_PREFIX: &str = "demo_";

/// Prefix of ids minted by the browser after a failed request
pub const FALLBACK_PREFIX: &str = "demo_error_";

/// Prefix of Stripe Checkout session ids
pub const HOSTED_PREFIX: &str = "cs_";

const MAX_ID_LEN: usize = 255;

/// Checkout session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Server-side demo id: `demo_<tier>_<millis>`
    pub fn demo(tier: CourseTier, at: DateTime<Utc>) -> Self {
        Self(format!("{DEMO_PREFIX}{tier}_{}", at.timestamp_millis()))
    }

    /// Browser-side fallback id: `demo_error_<tier>_<millis>`
    pub fn fallback(tier: CourseTier, at: DateTime<Utc>) -> Self {
        Self(format!("{FALLBACK_PREFIX}{tier}_{}", at.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_demo(&self) -> bool {
        self.0.starts_with(DEMO_PREFIX)
    }

    /// Whether this id was issued by the hosted checkout service
    pub fn is_hosted(&self) -> bool {
        self.0.starts_with(HOSTED_PREFIX)
    }

    /// Non-empty, bounded, and limited to `[A-Za-z0-9_]`.
    ///
    /// Ids are echoed into redirect URLs, so anything else is rejected
    /// before it reaches a query string.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() <= MAX_ID_LEN
            && self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Tier embedded in a demo id.
    ///
    /// Returns `None` for non-demo ids. A demo id without a recognizable
    /// tier segment decodes to the lowest tier.
    pub fn demo_tier(&self) -> Option<CourseTier> {
        let rest = self.0.strip_prefix(DEMO_PREFIX)?;
        let tier = rest
            .split('_')
            .find_map(|segment| segment.parse::<CourseTier>().ok())
            .unwrap_or_default();
        Some(tier)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a session exists at the payment service or only locally
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Live,
    Demo,
}

/// One checkout attempt
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: SessionId,

    /// Tier being purchased
    pub tier: CourseTier,

    pub mode: SessionMode,

    pub created_at: DateTime<Utc>,

    /// Hosted checkout page (live sessions only)
    #[serde(default)]
    pub checkout_url: Option<String>,
}

impl CheckoutSession {
    /// A locally minted session with no external counterpart
    pub fn demo(tier: CourseTier, at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::demo(tier, at),
            tier,
            mode: SessionMode::Demo,
            created_at: at,
            checkout_url: None,
        }
    }

    /// A session owned by the payment service
    pub fn live(
        id: impl Into<String>,
        tier: CourseTier,
        checkout_url: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::from_string(id),
            tier,
            mode: SessionMode::Live,
            created_at: at,
            checkout_url,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.mode == SessionMode::Demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_demo_id_format() {
        let id = SessionId::demo(CourseTier::Vip, at());
        assert_eq!(id.as_str(), format!("demo_vip_{}", at().timestamp_millis()));
        assert!(id.is_demo());
        assert!(id.is_well_formed());
        assert!(!id.is_hosted());
    }

    #[test]
    fn test_demo_ids_decode_to_their_tier() {
        for tier in CourseTier::ALL {
            assert_eq!(SessionId::demo(tier, at()).demo_tier(), Some(tier));
            assert_eq!(SessionId::fallback(tier, at()).demo_tier(), Some(tier));
        }
    }

    #[test]
    fn test_demo_id_without_tier_defaults_to_basic() {
        let id = SessionId::from_string("demo_1760529600000");
        assert_eq!(id.demo_tier(), Some(CourseTier::Basic));

        let upper = SessionId::from_string("demo_VIP_1760529600000");
        assert_eq!(upper.demo_tier(), Some(CourseTier::Basic));
    }

    #[test]
    fn test_hosted_id_is_not_demo() {
        let id = SessionId::from_string("cs_test_a1B2c3");
        assert!(id.is_hosted());
        assert_eq!(id.demo_tier(), None);
    }

    #[test]
    fn test_rejects_ids_unsafe_for_urls() {
        assert!(!SessionId::from_string("").is_well_formed());
        assert!(!SessionId::from_string("cs_test&reason=paid").is_well_formed());
        assert!(!SessionId::from_string("x".repeat(256)).is_well_formed());
    }

    #[test]
    fn test_demo_session() {
        let session = CheckoutSession::demo(CourseTier::Standard, at());
        assert!(session.is_demo());
        assert_eq!(session.created_at, at());
        assert!(session.checkout_url.is_none());
        assert!(session.id.as_str().contains("standard"));
    }
}
