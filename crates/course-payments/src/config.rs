//! Stripe Credentials
//!
//! Whether live payments are possible is decided once, at startup, from
//! these two keys.

use serde::Serialize;
use std::fmt;

use crate::error::{PaymentError, Result};

pub const SECRET_KEY_VAR: &str = "STRIPE_SECRET_KEY";
pub const PUBLISHABLE_KEY_VAR: &str = "STRIPE_PUBLISHABLE_KEY";

const SECRET_KEY_PREFIX: &str = "sk_";
const PUBLISHABLE_KEY_PREFIX: &str = "pk_";

/// Validated Stripe credentials
#[derive(Clone)]
pub struct StripeConfig {
    secret_key: String,
    publishable_key: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Result<Self> {
        let secret_key = secret_key.into();
        let publishable_key = publishable_key.into();

        if !secret_key.starts_with(SECRET_KEY_PREFIX) {
            return Err(PaymentError::ServiceUnavailable(format!(
                "{SECRET_KEY_VAR} must start with {SECRET_KEY_PREFIX}"
            )));
        }
        if !publishable_key.starts_with(PUBLISHABLE_KEY_PREFIX) {
            return Err(PaymentError::ServiceUnavailable(format!(
                "{PUBLISHABLE_KEY_VAR} must start with {PUBLISHABLE_KEY_PREFIX}"
            )));
        }

        Ok(Self {
            secret_key,
            publishable_key,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret_key = lookup(SECRET_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PaymentError::ServiceUnavailable(format!("{SECRET_KEY_VAR} not set")))?;
        let publishable_key = lookup(PUBLISHABLE_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                PaymentError::ServiceUnavailable(format!("{PUBLISHABLE_KEY_VAR} not set"))
            })?;

        Self::new(secret_key, publishable_key)
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Test-mode keys (`sk_test_...`)
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[redacted]")
            .field("publishable_key", &self.publishable_key)
            .finish()
    }
}

/// Presence and shape of the credentials, safe to expose on a health check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatus {
    pub has_secret_key: bool,
    pub has_publishable_key: bool,
    pub keys_valid: bool,
}

impl CredentialStatus {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        Self {
            has_secret_key: present(SECRET_KEY_VAR),
            has_publishable_key: present(PUBLISHABLE_KEY_VAR),
            keys_valid: StripeConfig::from_lookup(&lookup).is_ok(),
        }
    }
}
