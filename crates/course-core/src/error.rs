//! Error Types

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Tier key is not part of the catalog
    #[error("Invalid course tier: {0}")]
    InvalidTier(String),

    /// Request never reached the checkout endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// Checkout endpoint answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}
