//! # Error and Failure Types
//!
//! Two separate taxonomies:
//!
//! - [`ZkpError`] is returned as `Err` for malformed input and for
//!   construction failures (RNG, PID not in set, structure constraints
//!   violated). These indicate a caller bug or an unusable environment.
//! - [`VerifyFailure`] is carried as data inside verification results. It
//!   covers every expected or adversarial outcome (wrong secret, expired,
//!   tampered, mismatched root). Verification never returns `Err`.
//!
//! The `Display` strings of `VerifyFailure` are stable and are what hosts
//! match on. Whether to echo them to an untrusted verifier is a boundary
//! decision, not made here.

use serde::{Serialize, Serializer};
use thiserror::Error;

use addrzk_core::{CanonicalizationError, CoreError};
use addrzk_crypto::CryptoError;

use crate::backend::policy::PolicyError;
use crate::backend::traits::ProofError;
use crate::circuit::CircuitKind;

/// Errors from building or parsing proofs.
#[derive(Error, Debug)]
pub enum ZkpError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    #[error(transparent)]
    Proof(#[from] ProofError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// The proven element is not in the supplied set.
    #[error("{0} is not a member of the supplied set")]
    NotAMember(&'static str),

    /// A PID violates the configured hierarchy rules.
    #[error("structure constraint violated: {0}")]
    StructureViolation(String),

    /// A circuit descriptor of the wrong kind was supplied.
    #[error("circuit kind mismatch: expected {expected}, got {found}")]
    CircuitKind {
        expected: CircuitKind,
        found: CircuitKind,
    },

    /// Proof JSON is not a recognised envelope.
    #[error("invalid proof format: {0}")]
    InvalidFormat(String),

    /// Envelope version is neither 1 nor 2.
    #[error("unsupported proof version: {0}")]
    UnsupportedVersion(u64),

    /// Expiry offset overflowed the timestamp range.
    #[error("invalid expiry: {0}")]
    InvalidExpiry(String),

    /// Any other invalid argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for ZkpError {
    fn from(e: serde_json::Error) -> Self {
        ZkpError::InvalidFormat(e.to_string())
    }
}

/// Why a verification returned `valid: false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerifyFailure {
    Expired,
    SecretRequired,
    InvalidSignature,
    InvalidProof,
    InvalidDisclosure,
    Replayed,
    UnsupportedFormat,
    CircuitMismatch,
    RootMismatch,
    InvalidMerkleProof,
    CountryMismatch,
    FacilityMismatch,
    StructureMismatch,
    CommitmentMismatch,
    OwnerMismatch,
    NotRevoked,
    BackendRejected,
}

impl VerifyFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            VerifyFailure::Expired => "Proof expired",
            VerifyFailure::SecretRequired => "Secret required",
            VerifyFailure::InvalidSignature => "Invalid signature",
            VerifyFailure::InvalidProof => "Invalid proof",
            VerifyFailure::InvalidDisclosure => "Invalid disclosure",
            VerifyFailure::Replayed => "Proof already used",
            VerifyFailure::UnsupportedFormat => "Unsupported proof format",
            VerifyFailure::CircuitMismatch => "Circuit mismatch",
            VerifyFailure::RootMismatch => "Root mismatch",
            VerifyFailure::InvalidMerkleProof => "Invalid Merkle proof",
            VerifyFailure::CountryMismatch => "Country mismatch",
            VerifyFailure::FacilityMismatch => "Facility mismatch",
            VerifyFailure::StructureMismatch => "Structural commitment mismatch",
            VerifyFailure::CommitmentMismatch => "Commitment mismatch",
            VerifyFailure::OwnerMismatch => "Owner key mismatch",
            VerifyFailure::NotRevoked => "Old PID not revoked",
            VerifyFailure::BackendRejected => "Proof backend rejected by policy",
        }
    }
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VerifyFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
