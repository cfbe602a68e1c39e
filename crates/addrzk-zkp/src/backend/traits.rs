//! # Proof System Trait
//!
//! The seam between the structure pattern and whatever proves its
//! arithmetic constraints. The in-tree implementation is
//! [`MockProofSystem`](super::mock::MockProofSystem). A real R1CS backend
//! (Groth16, PLONK) run as an external proving service plugs in by
//! implementing this trait and reporting [`ProofBackend::External`].
//!
//! The trait is not sealed: external provers live outside this
//! crate. What keeps an unvetted backend out of production is
//! [`ProofPolicy`](super::policy::ProofPolicy), which gates on
//! [`ProofSystem::backend()`].

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::policy::ProofBackend;

/// Error during proof generation.
#[derive(Error, Debug)]
pub enum ProofError {
    /// The circuit inputs are invalid or missing.
    #[error("invalid circuit inputs: {0}")]
    InvalidInputs(String),
}

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof is structurally malformed.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
}

/// A proving backend for circuit statements.
pub trait ProofSystem: Send + Sync {
    /// The proof artifact.
    type Proof: Serialize + DeserializeOwned + Clone + std::fmt::Debug;
    /// Key used to verify proofs.
    type VerifyingKey: Clone;
    /// Key used to generate proofs.
    type ProvingKey;
    /// Statement plus witness.
    type Circuit: Clone;

    /// Which backend this is, for policy checks.
    fn backend(&self) -> ProofBackend;

    /// Prove that the circuit's constraints hold for its witness.
    fn prove(
        &self,
        pk: &Self::ProvingKey,
        circuit: &Self::Circuit,
    ) -> Result<Self::Proof, ProofError>;

    /// Verify a proof against public inputs.
    ///
    /// `Ok(false)` means well-formed but invalid. `Err` means the proof
    /// could not be parsed.
    fn verify(
        &self,
        vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError>;
}
