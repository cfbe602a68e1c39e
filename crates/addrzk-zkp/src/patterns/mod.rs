//! # Pattern Proofs
//!
//! Five statement-specific proofs built from the `addrzk-crypto` primitives.
//! Each records the digest of the [`CircuitDescriptor`](crate::circuit::CircuitDescriptor)
//! it was made under, and each verifier rejects a proof made under any other
//! circuit.
//!
//! | Pattern | Statement | Built from |
//! |---|---|---|
//! | [`membership`] | PID is in a published set | Merkle |
//! | [`structure`] | PID has the declared country and depth | Pedersen + proof system |
//! | [`selective_reveal`] | Revealed fields belong to the PID's address | disclosure |
//! | [`version`] | Same owner holds old and new PID | Pedersen + Schnorr |
//! | [`locker`] | Locker is in a facility's inventory | Merkle |
//!
//! Generation returns `Err` when the statement is false. Verification
//! returns a [`PatternVerification`] and never `Err`.

pub mod locker;
pub mod membership;
pub mod selective_reveal;
pub mod structure;
pub mod version;

use serde::Serialize;

use crate::error::VerifyFailure;

/// Outcome of a pattern verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternVerification {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VerifyFailure>,
}

impl PatternVerification {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn fail(error: VerifyFailure) -> Self {
        tracing::warn!(failure = %error, "pattern proof rejected");
        Self {
            valid: false,
            error: Some(error),
        }
    }
}
