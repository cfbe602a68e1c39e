//! # ZK-Version (Continuity)
//!
//! Proves the owner of an old PID also controls its replacement, showing a
//! third party only the two PID commitments.
//!
//! ```text
//! old_c       = Pedersen(old, r_old)      new_c = Pedersen(new, r_new)
//! ownership   = H("ownership", secret, old, new)
//! migration   = H("migration", old, new, ownership, nonce, r_old, r_new)
//! owner_proof = Schnorr_secret( H("owner", old_c, new_c, migration, circuit) )
//! ```
//!
//! PID commitments are hiding. PIDs are short structured strings, so an
//! unblinded hash of one could be inverted by enumerating candidates. The
//! blindings stay with the prover ([`VersionWitness`]) or with whoever
//! published the commitments. A verifier given a [`PidOpening`] for each
//! side can check the commitments and recompute `migration`.
//!
//! A [`RevocationList`] is a snapshot of revoked PID commitments published
//! by the revocation service. When one is passed to [`verify`], the old
//! commitment must be on it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use addrzk_core::{HexDigest, Pid, Timestamp};
use addrzk_crypto::hash::hash_parts;
use addrzk_crypto::schnorr::{self, SchnorrProof};
use addrzk_crypto::{pedersen, Blinding, PedersenCommitment, Secret};

use crate::circuit::{CircuitDescriptor, CircuitKind};
use crate::error::{VerifyFailure, ZkpError};
use crate::patterns::PatternVerification;

const OWNERSHIP_DOMAIN: &str = "addrzk/version/ownership/v1";
const MIGRATION_DOMAIN: &str = "addrzk/version/migration/v1";
const OWNER_DOMAIN: &str = "addrzk/version/owner/v1";

/// Hiding commitment to `pid` under fresh randomness.
pub fn commit_pid(pid: &Pid) -> Result<PedersenCommitment, ZkpError> {
    Ok(pedersen::commit(pid.as_str().as_bytes(), None)?)
}

/// A PID together with the blinding that opens its commitment.
#[derive(Debug, Clone, Copy)]
pub struct PidOpening<'a> {
    pub pid: &'a Pid,
    pub blinding: &'a Blinding,
}

impl<'a> PidOpening<'a> {
    pub fn new(pid: &'a Pid, blinding: &'a Blinding) -> Self {
        Self { pid, blinding }
    }

    pub fn commitment(&self) -> Result<HexDigest, ZkpError> {
        let pc = pedersen::commit(self.pid.as_str().as_bytes(), Some(self.blinding.clone()))?;
        Ok(pc.commitment)
    }

    /// Whether this opening opens `commitment`.
    pub fn opens(&self, commitment: &HexDigest) -> bool {
        pedersen::verify(commitment, self.pid.as_str().as_bytes(), self.blinding)
    }
}

fn migration_commitment(
    old: &PidOpening<'_>,
    new: &PidOpening<'_>,
    ownership: &HexDigest,
    nonce: &[u8],
) -> HexDigest {
    let (r_old, r_new) = (old.blinding.to_hex(), new.blinding.to_hex());
    hash_parts(
        MIGRATION_DOMAIN,
        &[
            old.pid.as_str().as_bytes(),
            new.pid.as_str().as_bytes(),
            ownership.as_bytes(),
            nonce,
            r_old.as_bytes(),
            r_new.as_bytes(),
        ],
    )
}

fn owner_statement(
    old_c: &HexDigest,
    new_c: &HexDigest,
    migration: &HexDigest,
    circuit: &HexDigest,
) -> HexDigest {
    hash_parts(
        OWNER_DOMAIN,
        &[
            old_c.as_bytes(),
            new_c.as_bytes(),
            migration.as_bytes(),
            circuit.as_bytes(),
        ],
    )
}

/// Commitments of revoked PIDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevocationList {
    revoked: BTreeSet<HexDigest>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commitments(commitments: impl IntoIterator<Item = HexDigest>) -> Self {
        Self {
            revoked: commitments.into_iter().collect(),
        }
    }

    pub fn revoke(&mut self, commitment: HexDigest) {
        self.revoked.insert(commitment);
    }

    pub fn contains(&self, commitment: &HexDigest) -> bool {
        self.revoked.contains(commitment)
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkVersionProof {
    pub circuit: HexDigest,
    pub old_pid_commitment: HexDigest,
    pub new_pid_commitment: HexDigest,
    pub ownership_proof: HexDigest,
    pub migration_commitment: HexDigest,
    /// Hex-encoded migration nonce.
    pub migration_nonce: String,
    pub owner_proof: SchnorrProof,
    pub generated_at: Timestamp,
}

impl ZkVersionProof {
    /// Public key of the owner who signed this migration.
    pub fn owner_key(&self) -> &HexDigest {
        &self.owner_proof.public_key
    }
}

/// A fresh version proof plus the blindings for both PID commitments.
#[derive(Debug)]
pub struct VersionWitness {
    pub proof: ZkVersionProof,
    pub old_opening: Blinding,
    pub new_opening: Blinding,
}

/// Prove that the holder of `owner_secret` moved from `old_pid` to
/// `new_pid`, committing to both PIDs under fresh randomness.
///
/// # Errors
///
/// [`ZkpError::InvalidInput`] if the PIDs are equal or the nonce is empty.
pub fn generate(
    old_pid: &Pid,
    new_pid: &Pid,
    owner_secret: &Secret,
    migration_nonce: &[u8],
    circuit: &CircuitDescriptor,
) -> Result<VersionWitness, ZkpError> {
    let old_opening = commit_pid(old_pid)?.randomness;
    let new_opening = commit_pid(new_pid)?.randomness;
    let proof = generate_with(
        PidOpening::new(old_pid, &old_opening),
        PidOpening::new(new_pid, &new_opening),
        owner_secret,
        migration_nonce,
        circuit,
    )?;
    Ok(VersionWitness {
        proof,
        old_opening,
        new_opening,
    })
}

/// Like [`generate`], reusing blindings of commitments already published.
pub fn generate_with(
    old: PidOpening<'_>,
    new: PidOpening<'_>,
    owner_secret: &Secret,
    migration_nonce: &[u8],
    circuit: &CircuitDescriptor,
) -> Result<ZkVersionProof, ZkpError> {
    circuit.require_kind(CircuitKind::Version)?;
    if old.pid == new.pid {
        return Err(ZkpError::InvalidInput("old and new PID are identical".into()));
    }
    if migration_nonce.is_empty() {
        return Err(ZkpError::InvalidInput("migration nonce is empty".into()));
    }

    let circuit = circuit.digest();
    let old_c = old.commitment()?;
    let new_c = new.commitment()?;
    let ownership = hash_parts(
        OWNERSHIP_DOMAIN,
        &[
            owner_secret.as_bytes(),
            old.pid.as_str().as_bytes(),
            new.pid.as_str().as_bytes(),
        ],
    );
    let migration = migration_commitment(&old, &new, &ownership, migration_nonce);
    let statement = owner_statement(&old_c, &new_c, &migration, &circuit);
    let owner_proof = schnorr::prove(owner_secret, statement.as_bytes())?;

    tracing::debug!(circuit = %circuit, "generated version proof");
    Ok(ZkVersionProof {
        circuit,
        old_pid_commitment: old_c,
        new_pid_commitment: new_c,
        ownership_proof: ownership,
        migration_commitment: migration,
        migration_nonce: hex::encode(migration_nonce),
        owner_proof,
        generated_at: Timestamp::now(),
    })
}

/// Optional checks for [`verify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionChecks<'a> {
    /// Openings of both commitments, letting the verifier recompute them.
    pub openings: Option<(PidOpening<'a>, PidOpening<'a>)>,
    pub revocation_list: Option<&'a RevocationList>,
    pub expected_owner_key: Option<&'a HexDigest>,
}

impl<'a> VersionChecks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_openings(mut self, old: PidOpening<'a>, new: PidOpening<'a>) -> Self {
        self.openings = Some((old, new));
        self
    }

    pub fn with_revocation_list(mut self, list: &'a RevocationList) -> Self {
        self.revocation_list = Some(list);
        self
    }

    pub fn with_owner_key(mut self, key: &'a HexDigest) -> Self {
        self.expected_owner_key = Some(key);
        self
    }
}

/// Verify a version proof against the commitments the verifier expects.
///
/// Order: circuit → commitments → openings → owner proof → owner key →
/// revocation.
pub fn verify(
    proof: &ZkVersionProof,
    circuit: &CircuitDescriptor,
    old_pid_commitment: &HexDigest,
    new_pid_commitment: &HexDigest,
    checks: &VersionChecks<'_>,
) -> PatternVerification {
    let circuit_digest = circuit.digest();
    if circuit.kind != CircuitKind::Version || proof.circuit != circuit_digest {
        return PatternVerification::fail(VerifyFailure::CircuitMismatch);
    }
    if proof.old_pid_commitment != *old_pid_commitment
        || proof.new_pid_commitment != *new_pid_commitment
    {
        return PatternVerification::fail(VerifyFailure::CommitmentMismatch);
    }
    if let Some((old, new)) = &checks.openings {
        let Ok(nonce) = hex::decode(&proof.migration_nonce) else {
            return PatternVerification::fail(VerifyFailure::CommitmentMismatch);
        };
        if !old.opens(&proof.old_pid_commitment)
            || !new.opens(&proof.new_pid_commitment)
            || migration_commitment(old, new, &proof.ownership_proof, &nonce)
                != proof.migration_commitment
        {
            return PatternVerification::fail(VerifyFailure::CommitmentMismatch);
        }
    }
    let statement = owner_statement(
        &proof.old_pid_commitment,
        &proof.new_pid_commitment,
        &proof.migration_commitment,
        &circuit_digest,
    );
    if !schnorr::verify(&proof.owner_proof, statement.as_bytes()) {
        return PatternVerification::fail(VerifyFailure::InvalidProof);
    }
    if checks
        .expected_owner_key
        .is_some_and(|k| *k != proof.owner_proof.public_key)
    {
        return PatternVerification::fail(VerifyFailure::OwnerMismatch);
    }
    if checks
        .revocation_list
        .is_some_and(|list| !list.contains(&proof.old_pid_commitment))
    {
        return PatternVerification::fail(VerifyFailure::NotRevoked);
    }
    PatternVerification::ok()
}
