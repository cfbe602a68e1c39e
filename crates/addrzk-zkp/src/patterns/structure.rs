//! # ZK-Structure
//!
//! Proves a PID has the declared country and hierarchy depth without
//! revealing the component values.
//!
//! 1. [`HierarchyRules::check`] enforces the constraints on the prover side.
//!    A PID that violates them never yields a proof.
//! 2. Each component is Pedersen-committed. The openings go back to the
//!    prover only.
//! 3. `structural_commitment = H(country, depth, circuit digest)` is the
//!    public input. A verifier recomputes it from public data.
//! 4. A [`ProofSystem`] binds the commitments and public input together.
//!
//! ## Security Warning
//!
//! The in-tree backend is [`MockProofSystem`]. Its proofs are recomputable
//! by anyone and show nothing about the hidden components. They are
//! accepted only under [`PolicyMode::Development`](crate::backend::PolicyMode).

use serde::{Deserialize, Serialize};
use serde_json::json;

use addrzk_core::{CountryCode, HexDigest, Pid, Timestamp};
use addrzk_crypto::hash::hash_parts;
use addrzk_crypto::{pedersen, Blinding};

use crate::backend::{
    MockCircuit, MockProof, MockProofSystem, MockProvingKey, MockVerifyingKey, ProofBackend,
    ProofPolicy, ProofSystem,
};
use crate::circuit::{CircuitDescriptor, CircuitKind};
use crate::config::HierarchyRules;
use crate::error::{VerifyFailure, ZkpError};
use crate::patterns::PatternVerification;

const STRUCTURE_DOMAIN: &str = "addrzk/structure/v1";

/// Public commitment to `(country, depth, circuit)`.
pub fn structural_commitment(country: &CountryCode, depth: usize, circuit: &HexDigest) -> HexDigest {
    hash_parts(
        STRUCTURE_DOMAIN,
        &[
            country.as_str().as_bytes(),
            &(depth as u64).to_be_bytes(),
            circuit.as_bytes(),
        ],
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkStructureProof {
    pub circuit: HexDigest,
    pub country: CountryCode,
    pub depth: usize,
    /// One Pedersen commitment per PID component, in order.
    pub component_commitments: Vec<HexDigest>,
    pub structural_commitment: HexDigest,
    pub backend: ProofBackend,
    pub proof: MockProof,
    pub generated_at: Timestamp,
}

/// A structure proof plus the component openings, which stay with the prover.
#[derive(Debug)]
pub struct StructureWitness {
    pub proof: ZkStructureProof,
    pub openings: Vec<Blinding>,
}

fn mock_circuit(
    circuit: &HexDigest,
    country: &CountryCode,
    depth: usize,
    commitments: &[HexDigest],
    structural: &HexDigest,
) -> MockCircuit {
    MockCircuit {
        circuit_data: json!({
            "circuit": circuit,
            "country": country,
            "depth": depth,
            "component_commitments": commitments,
        }),
        public_inputs: structural.as_bytes().to_vec(),
    }
}

/// Prove `pid` has `depth` components under `country`.
///
/// # Errors
///
/// [`ZkpError::StructureViolation`] if `pid` breaks `rules`, and
/// [`ZkpError::CircuitKind`] for a non-structure circuit.
pub fn generate(
    pid: &Pid,
    country: &CountryCode,
    depth: usize,
    circuit: &CircuitDescriptor,
    rules: &HierarchyRules,
) -> Result<StructureWitness, ZkpError> {
    circuit.require_kind(CircuitKind::Structure)?;
    let components = rules.check(pid, country, depth)?;

    let mut component_commitments = Vec::with_capacity(components.len());
    let mut openings = Vec::with_capacity(components.len());
    for c in components {
        let pc = pedersen::commit(c.as_bytes(), None)?;
        component_commitments.push(pc.commitment);
        openings.push(pc.randomness);
    }

    let circuit_digest = circuit.digest();
    let structural = structural_commitment(country, depth, &circuit_digest);
    let system = MockProofSystem;
    let proof = system.prove(
        &MockProvingKey,
        &mock_circuit(
            &circuit_digest,
            country,
            depth,
            &component_commitments,
            &structural,
        ),
    )?;

    tracing::debug!(circuit = %circuit_digest, country = %country, depth, "generated structure proof");
    Ok(StructureWitness {
        proof: ZkStructureProof {
            circuit: circuit_digest,
            country: country.clone(),
            depth,
            component_commitments,
            structural_commitment: structural,
            backend: system.backend(),
            proof,
            generated_at: Timestamp::now(),
        },
        openings,
    })
}

/// Verify a structure proof.
///
/// Order: circuit → country → structural commitment → component count →
/// backend policy → backend proof. Proofs from an external backend pass
/// policy here but are checked by the host that owns that backend, so this
/// function reports them as [`VerifyFailure::InvalidProof`].
pub fn verify(
    proof: &ZkStructureProof,
    circuit: &CircuitDescriptor,
    expected_country: Option<&CountryCode>,
    policy: &ProofPolicy,
) -> PatternVerification {
    let circuit_digest = circuit.digest();
    if circuit.kind != CircuitKind::Structure || proof.circuit != circuit_digest {
        return PatternVerification::fail(VerifyFailure::CircuitMismatch);
    }
    if expected_country.is_some_and(|c| *c != proof.country) {
        return PatternVerification::fail(VerifyFailure::CountryMismatch);
    }
    if structural_commitment(&proof.country, proof.depth, &circuit_digest)
        != proof.structural_commitment
    {
        return PatternVerification::fail(VerifyFailure::StructureMismatch);
    }
    if proof.component_commitments.len() != proof.depth {
        return PatternVerification::fail(VerifyFailure::StructureMismatch);
    }
    if policy.validate(proof.backend).is_err() {
        return PatternVerification::fail(VerifyFailure::BackendRejected);
    }
    if proof.backend != ProofBackend::Mock {
        return PatternVerification::fail(VerifyFailure::InvalidProof);
    }
    let mc = mock_circuit(
        &proof.circuit,
        &proof.country,
        proof.depth,
        &proof.component_commitments,
        &proof.structural_commitment,
    );
    match MockProofSystem.verify_circuit(&MockVerifyingKey, &proof.proof, &mc) {
        Ok(true) => PatternVerification::ok(),
        _ => PatternVerification::fail(VerifyFailure::InvalidProof),
    }
}

/// Whether `component` and `opening` open commitment `index` of `proof`.
pub fn opens_component(
    proof: &ZkStructureProof,
    index: usize,
    component: &str,
    opening: &Blinding,
) -> bool {
    proof
        .component_commitments
        .get(index)
        .is_some_and(|c| pedersen::verify(c, component.as_bytes(), opening))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit() -> CircuitDescriptor {
        CircuitDescriptor::new(CircuitKind::Structure, 1)
    }

    fn jp() -> CountryCode {
        CountryCode::new("JP").unwrap()
    }

    fn make() -> StructureWitness {
        generate(
            &Pid::new("JP-13-113-01").unwrap(),
            &jp(),
            4,
            &circuit(),
            &HierarchyRules::default(),
        )
        .unwrap()
    }

    #[test]
    fn roundtrip_in_development() {
        let w = make();
        assert_eq!(w.openings.len(), 4);
        let r = verify(&w.proof, &circuit(), Some(&jp()), &ProofPolicy::development());
        assert!(r.valid, "{r:?}");
    }

    #[test]
    fn component_values_not_in_proof() {
        let w = make();
        let json = serde_json::to_string(&w.proof).unwrap();
        assert!(!json.contains("\"113\""));
        assert!(!json.contains("JP-13-113-01"));
    }

    #[test]
    fn openings_open_components() {
        let w = make();
        assert!(opens_component(&w.proof, 2, "113", &w.openings[2]));
        assert!(!opens_component(&w.proof, 2, "114", &w.openings[2]));
        assert!(!opens_component(&w.proof, 9, "113", &w.openings[2]));
    }

    #[test]
    fn production_rejects_mock_backend() {
        let w = make();
        let r = verify(&w.proof, &circuit(), None, &ProofPolicy::production());
        assert_eq!(r.error, Some(VerifyFailure::BackendRejected));
    }

    #[test]
    fn country_mismatch() {
        let w = make();
        let us = CountryCode::new("US").unwrap();
        let r = verify(&w.proof, &circuit(), Some(&us), &ProofPolicy::development());
        assert_eq!(r.error, Some(VerifyFailure::CountryMismatch));
    }

    #[test]
    fn relabelled_country_breaks_structural_commitment() {
        let mut w = make();
        w.proof.country = CountryCode::new("US").unwrap();
        let r = verify(&w.proof, &circuit(), None, &ProofPolicy::development());
        assert_eq!(r.error, Some(VerifyFailure::StructureMismatch));
    }

    #[test]
    fn dropped_component_detected() {
        let mut w = make();
        w.proof.component_commitments.pop();
        let r = verify(&w.proof, &circuit(), None, &ProofPolicy::development());
        assert_eq!(r.error, Some(VerifyFailure::StructureMismatch));
    }

    #[test]
    fn swapped_component_breaks_backend_proof() {
        let mut w = make();
        w.proof.component_commitments.swap(0, 1);
        let r = verify(&w.proof, &circuit(), None, &ProofPolicy::development());
        assert_eq!(r.error, Some(VerifyFailure::InvalidProof));
    }

    #[test]
    fn wrong_depth_cannot_generate() {
        let err = generate(
            &Pid::new("JP-13-113-01").unwrap(),
            &jp(),
            3,
            &circuit(),
            &HierarchyRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ZkpError::StructureViolation(_)));
    }

    #[test]
    fn circuit_mismatch() {
        let w = make();
        let other = CircuitDescriptor::new(CircuitKind::Structure, 2);
        let r = verify(&w.proof, &other, None, &ProofPolicy::development());
        assert_eq!(r.error, Some(VerifyFailure::CircuitMismatch));
    }
}
