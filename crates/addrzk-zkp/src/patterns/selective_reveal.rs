//! # ZK-Selective-Reveal
//!
//! A [`SelectiveDisclosure`] over a full address, keyed to a PID. The proof
//! binds the PID hash, every committed field hash and the circuit together,
//! so a disclosure cannot be detached from its PID and attached to another.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use addrzk_core::{AddressInput, CanonicalBytes, HexDigest, Pid, Timestamp};
use addrzk_crypto::hash::hash_parts;
use addrzk_crypto::SelectiveDisclosure;

use crate::circuit::{CircuitDescriptor, CircuitKind};
use crate::error::{VerifyFailure, ZkpError};

const PID_DOMAIN: &str = "addrzk/selective-reveal/pid/v1";
const BINDING_DOMAIN: &str = "addrzk/selective-reveal/binding/v1";

/// Hash identifying `pid` inside a selective-reveal proof.
pub fn pid_hash(pid: &Pid) -> HexDigest {
    hash_parts(PID_DOMAIN, &[pid.as_str().as_bytes()])
}

fn binding(
    pid_hash: &HexDigest,
    disclosure: &SelectiveDisclosure,
    circuit: &HexDigest,
) -> Result<HexDigest, ZkpError> {
    let hashes = CanonicalBytes::new(&disclosure.hashes)?;
    Ok(hash_parts(
        BINDING_DOMAIN,
        &[pid_hash.as_bytes(), hashes.as_bytes(), circuit.as_bytes()],
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkSelectiveRevealProof {
    pub circuit: HexDigest,
    pub pid_hash: HexDigest,
    pub disclosure: SelectiveDisclosure,
    pub binding: HexDigest,
    pub generated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectiveRevealVerification {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VerifyFailure>,
    /// Revealed fields whose values matched their commitments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed_data: Option<BTreeMap<String, String>>,
}

impl SelectiveRevealVerification {
    fn fail(error: VerifyFailure) -> Self {
        tracing::warn!(failure = %error, "selective reveal proof rejected");
        Self {
            valid: false,
            error: Some(error),
            revealed_data: None,
        }
    }
}

pub fn generate(
    pid: &Pid,
    address: &AddressInput,
    fields_to_reveal: &[&str],
    circuit: &CircuitDescriptor,
) -> Result<ZkSelectiveRevealProof, ZkpError> {
    circuit.require_kind(CircuitKind::SelectiveReveal)?;
    let circuit = circuit.digest();
    let pid_hash = pid_hash(pid);
    let disclosure = SelectiveDisclosure::create(address, fields_to_reveal);
    let binding = binding(&pid_hash, &disclosure, &circuit)?;
    tracing::debug!(
        circuit = %circuit,
        revealed = disclosure.revealed_fields().len(),
        "generated selective reveal proof"
    );
    Ok(ZkSelectiveRevealProof {
        circuit,
        pid_hash,
        disclosure,
        binding,
        generated_at: Timestamp::now(),
    })
}

/// Verify the binding and every revealed value. When `expected_pid` is
/// given the proof must be about that PID.
pub fn verify(
    proof: &ZkSelectiveRevealProof,
    circuit: &CircuitDescriptor,
    expected_pid: Option<&Pid>,
) -> SelectiveRevealVerification {
    let circuit_digest = circuit.digest();
    if circuit.kind != CircuitKind::SelectiveReveal || proof.circuit != circuit_digest {
        return SelectiveRevealVerification::fail(VerifyFailure::CircuitMismatch);
    }
    if expected_pid.is_some_and(|p| pid_hash(p) != proof.pid_hash) {
        return SelectiveRevealVerification::fail(VerifyFailure::CommitmentMismatch);
    }
    match binding(&proof.pid_hash, &proof.disclosure, &circuit_digest) {
        Ok(b) if b == proof.binding => {}
        _ => return SelectiveRevealVerification::fail(VerifyFailure::CommitmentMismatch),
    }
    let check = proof.disclosure.verify();
    if !check.valid {
        return SelectiveRevealVerification::fail(VerifyFailure::InvalidDisclosure);
    }
    let revealed = proof.disclosure.revealed_fields();
    let revealed_data: BTreeMap<String, String> = check
        .verified
        .into_iter()
        .filter_map(|k| revealed.get(&k).map(|v| (k.clone(), v.clone())))
        .collect();
    SelectiveRevealVerification {
        valid: true,
        error: None,
        revealed_data: Some(revealed_data),
    }
}
