//! # ZK-Membership
//!
//! Proves a PID belongs to a published set of valid PIDs. The set owner
//! publishes [`membership_root`]; the prover supplies a Merkle path from
//! `leaf_hash(pid)` to that root.
//!
//! ## Known limitation
//!
//! The leaf and path identify the PID's position in the tree. A verifier
//! who also knows the full PID set can tell which member proved. Hiding
//! the member from such a verifier needs a circuit-backed proof.

use serde::{Deserialize, Serialize};

use addrzk_core::{HexDigest, Pid, Timestamp};
use addrzk_crypto::merkle::{self, MerkleProof, MerkleTree};

use crate::circuit::{CircuitDescriptor, CircuitKind};
use crate::error::{VerifyFailure, ZkpError};
use crate::patterns::PatternVerification;

/// Merkle leaf for `pid`.
pub fn pid_leaf(pid: &Pid) -> HexDigest {
    merkle::leaf_hash(pid.as_str().as_bytes())
}

/// Root a set owner publishes for `pids`.
pub fn membership_root(pids: &[Pid]) -> HexDigest {
    let leaves: Vec<HexDigest> = pids.iter().map(pid_leaf).collect();
    merkle::calculate_root(&leaves)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkMembershipProof {
    /// Digest of the circuit this proof was made under.
    pub circuit: HexDigest,
    pub merkle: MerkleProof,
    pub generated_at: Timestamp,
}

/// Prove `pid ∈ valid_pids`.
///
/// # Errors
///
/// [`ZkpError::NotAMember`] if `pid` is absent, and
/// [`ZkpError::CircuitKind`] if `circuit` is not a membership circuit.
pub fn generate(
    pid: &Pid,
    valid_pids: &[Pid],
    circuit: &CircuitDescriptor,
) -> Result<ZkMembershipProof, ZkpError> {
    circuit.require_kind(CircuitKind::Membership)?;
    let leaves: Vec<HexDigest> = valid_pids.iter().map(pid_leaf).collect();
    let merkle = MerkleTree::new(&leaves)
        .proof_for(&pid_leaf(pid))
        .ok_or(ZkpError::NotAMember("pid"))?;
    let circuit = circuit.digest();
    tracing::debug!(circuit = %circuit, set_size = leaves.len(), "generated membership proof");
    Ok(ZkMembershipProof {
        circuit,
        merkle,
        generated_at: Timestamp::now(),
    })
}

/// Verify against the verifier's circuit and the published root.
pub fn verify(
    proof: &ZkMembershipProof,
    circuit: &CircuitDescriptor,
    expected_root: &HexDigest,
) -> PatternVerification {
    if circuit.kind != CircuitKind::Membership || proof.circuit != circuit.digest() {
        return PatternVerification::fail(VerifyFailure::CircuitMismatch);
    }
    if proof.merkle.root != *expected_root {
        return PatternVerification::fail(VerifyFailure::RootMismatch);
    }
    if !proof.merkle.verify() {
        return PatternVerification::fail(VerifyFailure::InvalidMerkleProof);
    }
    PatternVerification::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pids(v: &[&str]) -> Vec<Pid> {
        v.iter().map(|s| Pid::new(*s).unwrap()).collect()
    }

    fn circuit() -> CircuitDescriptor {
        CircuitDescriptor::new(CircuitKind::Membership, 1)
    }

    #[test]
    fn member_verifies() {
        let set = pids(&["JP-13-113-01", "JP-13-113-02", "JP-27-100-05"]);
        let root = membership_root(&set);
        for p in &set {
            let proof = generate(p, &set, &circuit()).unwrap();
            assert_eq!(verify(&proof, &circuit(), &root), PatternVerification::ok());
        }
    }

    #[test]
    fn non_member_cannot_generate() {
        let set = pids(&["JP-13-113-01", "JP-13-113-02"]);
        let outsider = Pid::new("JP-01-001-01").unwrap();
        assert!(matches!(
            generate(&outsider, &set, &circuit()),
            Err(ZkpError::NotAMember(_))
        ));
    }

    #[test]
    fn wrong_root_rejected() {
        let set = pids(&["A-1", "A-2", "A-3"]);
        let proof = generate(&set[1], &set, &circuit()).unwrap();
        let other = membership_root(&pids(&["A-1", "A-3"]));
        assert_eq!(
            verify(&proof, &circuit(), &other).error,
            Some(VerifyFailure::RootMismatch)
        );
    }

    #[test]
    fn tampered_path_rejected() {
        let set = pids(&["A-1", "A-2", "A-3", "A-4"]);
        let root = membership_root(&set);
        let mut proof = generate(&set[0], &set, &circuit()).unwrap();
        proof.merkle.leaf = pid_leaf(&Pid::new("A-9").unwrap());
        assert_eq!(
            verify(&proof, &circuit(), &root).error,
            Some(VerifyFailure::InvalidMerkleProof)
        );
    }

    #[test]
    fn other_circuit_rejected() {
        let set = pids(&["A-1", "A-2"]);
        let root = membership_root(&set);
        let proof = generate(&set[0], &set, &circuit()).unwrap();
        let v2 = CircuitDescriptor::new(CircuitKind::Membership, 2);
        assert_eq!(
            verify(&proof, &v2, &root).error,
            Some(VerifyFailure::CircuitMismatch)
        );
        let locker = CircuitDescriptor::new(CircuitKind::Locker, 1);
        assert!(matches!(
            generate(&set[0], &set, &locker),
            Err(ZkpError::CircuitKind { .. })
        ));
    }

    #[test]
    fn single_member_set() {
        let set = pids(&["JP-13-113-01"]);
        let proof = generate(&set[0], &set, &circuit()).unwrap();
        assert!(proof.merkle.proof.is_empty());
        assert!(verify(&proof, &circuit(), &membership_root(&set)).valid);
    }
}
