//! # ZK-Locker
//!
//! Proves the prover holds one of a facility's lockers without saying
//! which. The facility publishes [`locker_set_root`] over its inventory.
//! Each leaf binds the facility ID, so a locker path from one facility
//! never verifies under another facility's root.
//!
//! The facility ID and optional zone are public. The locker ID never
//! appears in the proof.

use serde::{Deserialize, Serialize};

use addrzk_core::{FacilityId, HexDigest, Timestamp};
use addrzk_crypto::hash::hash_parts;
use addrzk_crypto::merkle::{self, MerkleProof, MerkleTree};

use crate::circuit::{CircuitDescriptor, CircuitKind};
use crate::error::{VerifyFailure, ZkpError};
use crate::patterns::PatternVerification;

const LOCKER_DOMAIN: &str = "addrzk/locker/v1";

/// Merkle leaf for `locker_id` in `facility`.
pub fn locker_leaf(facility: &FacilityId, locker_id: &str) -> HexDigest {
    let inner = hash_parts(
        LOCKER_DOMAIN,
        &[facility.as_str().as_bytes(), locker_id.as_bytes()],
    );
    merkle::leaf_hash(inner.as_bytes())
}

/// Root a facility publishes over its locker inventory.
pub fn locker_set_root(facility: &FacilityId, lockers: &[&str]) -> HexDigest {
    let leaves: Vec<HexDigest> = lockers.iter().map(|l| locker_leaf(facility, l)).collect();
    merkle::calculate_root(&leaves)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkLockerProof {
    pub circuit: HexDigest,
    pub facility_id: FacilityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub merkle: MerkleProof,
    pub generated_at: Timestamp,
}

/// Prove `locker_id` is one of `all_lockers` in `facility`.
///
/// # Errors
///
/// [`ZkpError::NotAMember`] if the locker is not in the inventory.
pub fn generate(
    locker_id: &str,
    facility: &FacilityId,
    all_lockers: &[&str],
    circuit: &CircuitDescriptor,
    zone: Option<&str>,
) -> Result<ZkLockerProof, ZkpError> {
    circuit.require_kind(CircuitKind::Locker)?;
    let leaves: Vec<HexDigest> = all_lockers
        .iter()
        .map(|l| locker_leaf(facility, l))
        .collect();
    let merkle = MerkleTree::new(&leaves)
        .proof_for(&locker_leaf(facility, locker_id))
        .ok_or(ZkpError::NotAMember("locker"))?;
    let circuit = circuit.digest();
    tracing::debug!(
        circuit = %circuit,
        facility = %facility,
        inventory = leaves.len(),
        "generated locker proof"
    );
    Ok(ZkLockerProof {
        circuit,
        facility_id: facility.clone(),
        zone: zone.map(str::to_string),
        merkle,
        generated_at: Timestamp::now(),
    })
}

/// Verify against the facility's published root.
pub fn verify(
    proof: &ZkLockerProof,
    circuit: &CircuitDescriptor,
    expected_root: &HexDigest,
    expected_facility: Option<&FacilityId>,
) -> PatternVerification {
    if circuit.kind != CircuitKind::Locker || proof.circuit != circuit.digest() {
        return PatternVerification::fail(VerifyFailure::CircuitMismatch);
    }
    if expected_facility.is_some_and(|f| *f != proof.facility_id) {
        return PatternVerification::fail(VerifyFailure::FacilityMismatch);
    }
    if !proof.merkle.verify_against(expected_root) {
        if proof.merkle.root != *expected_root {
            return PatternVerification::fail(VerifyFailure::RootMismatch);
        }
        return PatternVerification::fail(VerifyFailure::InvalidMerkleProof);
    }
    PatternVerification::ok()
}
