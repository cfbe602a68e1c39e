//! # Mock Proof System
//!
//! Deterministic, transparent placeholder for the structure circuit.
//!
//! ```text
//! proof = SHA256( canonical_bytes(circuit_data) || public_inputs )
//! ```
//!
//! ## Security Warning
//!
//! **NOT ZERO-KNOWLEDGE AND NOT SOUND.** Anyone holding the public circuit
//! data can recompute the proof. It stands in for an external R1CS prover
//! so that the structure pattern's data flow is complete. Production
//! verifiers reject it via [`ProofPolicy`](super::policy::ProofPolicy).

use serde::{Deserialize, Serialize};

use addrzk_core::{CanonicalBytes, CanonicalizationError, HexDigest, Sha256Accumulator};

use super::policy::ProofBackend;
use super::traits::{ProofError, ProofSystem, VerifyError};

/// `SHA256(canonical(circuit_data) || public_inputs)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockProof {
    pub proof: HexDigest,
}

/// Stateless verifying key.
#[derive(Debug, Clone)]
pub struct MockVerifyingKey;

/// Stateless proving key.
#[derive(Debug, Clone)]
pub struct MockProvingKey;

/// Circuit payload and public inputs for the mock backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockCircuit {
    /// Constraint-relevant public data. Canonicalized before hashing.
    pub circuit_data: serde_json::Value,
    /// Raw public inputs, hex on the wire.
    #[serde(with = "hex::serde")]
    pub public_inputs: Vec<u8>,
}

impl MockCircuit {
    fn transcript(&self) -> Result<Vec<u8>, CanonicalizationError> {
        let canonical = CanonicalBytes::from_value(self.circuit_data.clone())?;
        let mut out = canonical.as_bytes().to_vec();
        out.extend_from_slice(&self.public_inputs);
        Ok(out)
    }
}

/// The in-tree placeholder backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProofSystem;

impl ProofSystem for MockProofSystem {
    type Proof = MockProof;
    type VerifyingKey = MockVerifyingKey;
    type ProvingKey = MockProvingKey;
    type Circuit = MockCircuit;

    fn backend(&self) -> ProofBackend {
        ProofBackend::Mock
    }

    fn prove(
        &self,
        _pk: &Self::ProvingKey,
        circuit: &Self::Circuit,
    ) -> Result<Self::Proof, ProofError> {
        let input = circuit.transcript().map_err(|e| {
            ProofError::InvalidInputs(format!("failed to canonicalize circuit data: {e}"))
        })?;
        let mut acc = Sha256Accumulator::new();
        acc.update(&input);
        Ok(MockProof {
            proof: acc.finalize(),
        })
    }

    /// `public_inputs` must be `canonical(circuit_data) || public_inputs`,
    /// the same bytes `prove()` hashed. Prefer
    /// [`MockProofSystem::verify_circuit`].
    fn verify(
        &self,
        _vk: &Self::VerifyingKey,
        proof: &Self::Proof,
        public_inputs: &[u8],
    ) -> Result<bool, VerifyError> {
        let mut acc = Sha256Accumulator::new();
        acc.update(public_inputs);
        Ok(acc.finalize() == proof.proof)
    }
}

impl MockProofSystem {
    /// Verify against a circuit directly, rebuilding the transcript.
    pub fn verify_circuit(
        &self,
        vk: &MockVerifyingKey,
        proof: &MockProof,
        circuit: &MockCircuit,
    ) -> Result<bool, VerifyError> {
        let input = circuit.transcript().map_err(|e| {
            VerifyError::MalformedProof(format!("failed to canonicalize circuit data: {e}"))
        })?;
        self.verify(vk, proof, &input)
    }
}
