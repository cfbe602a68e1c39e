//! # Error Types
//!
//! Errors raised while constructing core values. All of them indicate
//! malformed input (a caller bug), never an adversarial verification outcome;
//! verification failures are reported as data by the higher crates.

use thiserror::Error;

/// Top-level error type for `addrzk-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A digest string was not 64 hex characters.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// A timestamp could not be parsed or was out of range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// An identifier failed its format check.
    #[error("invalid {kind}: {reason}")]
    InvalidIdentifier {
        /// Identifier kind (`pid`, `country code`, `facility id`).
        kind: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
