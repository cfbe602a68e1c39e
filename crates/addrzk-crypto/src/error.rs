//! # Cryptographic Error Types
//!
//! Errors from constructing commitments, proofs and disclosures. Verification
//! predicates in this crate return `bool` and never produce these.

use thiserror::Error;

use addrzk_core::CoreError;

/// Errors from cryptographic operations in `addrzk-crypto`.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The operating system randomness source failed. No proof can be built.
    #[error("randomness source unavailable: {0}")]
    Rng(String),

    /// A hex value did not decode to a valid group element or scalar.
    #[error("invalid {what} encoding: {reason}")]
    InvalidEncoding {
        /// What was being decoded (`scalar`, `point`, `secret`).
        what: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },

    /// The MAC key was rejected by the HMAC implementation.
    #[error("invalid MAC key: {0}")]
    InvalidKey(String),

    /// A disclosure was asked to reveal a field it never committed to.
    #[error("field not committed: {0}")]
    UnknownField(String),

    /// The value supplied to reveal a field does not match its commitment.
    #[error("revealed value does not match committed hash for field: {0}")]
    FieldMismatch(String),

    /// Core type error (digest parsing, identifiers).
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_display() {
        let err = CryptoError::Rng("getrandom failed".into());
        assert!(err.to_string().contains("getrandom failed"));
    }

    #[test]
    fn invalid_encoding_display() {
        let err = CryptoError::InvalidEncoding {
            what: "point",
            reason: "not a valid Ristretto encoding".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("point"));
        assert!(msg.contains("Ristretto"));
    }

    #[test]
    fn field_errors_name_the_field() {
        assert!(CryptoError::UnknownField("city".into())
            .to_string()
            .contains("city"));
        assert!(CryptoError::FieldMismatch("country".into())
            .to_string()
            .contains("country"));
    }
}
