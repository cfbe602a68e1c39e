//! # Address Proofs (v2)
//!
//! The proof envelope a prover hands to a verifier to show it holds an
//! address and the secret bound to it, optionally revealing selected fields.
//!
//! ```text
//! {
//!   "type": "zkp_proof", "version": 2, "algorithm": "pedersen" | "schnorr",
//!   "data": {
//!     "proof_id", "public_value", "commitment", "challenge", "response",
//!     "nonce_hash"?, "public_key"?, "disclosed_fields"?,
//!     "verified_at", "expires_at"
//!   },
//!   "signature": HMAC-SHA256(JCS(data), mac_key(secret))
//! }
//! ```
//!
//! `public_value = H("binding", JCS(address), secret)`. It is keyed by the
//! secret, so it reveals nothing about the address on its own.
//!
//! - **schnorr**: `commitment`/`challenge`/`response`/`nonce_hash`/
//!   `public_key` are a Schnorr proof over `public_value` by the key derived
//!   from the secret.
//! - **pedersen**: `commitment` is a Pedersen commitment to `JCS(address)`,
//!   `challenge = H("pedersen-challenge", commitment, public_value)` and
//!   `response = HMAC(challenge, mac_key(secret))`. The prover keeps the
//!   opening and can later open the commitment to a chosen party.
//!
//! `mac_key` is [`Secret::mac_key()`].
//!
//! ## Verification order
//!
//! format → expiry → secret present → signature → algorithm → disclosure →
//! replay. The first failing check is reported. The replay guard is touched
//! only when everything else passed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use addrzk_core::{AddressInput, CanonicalBytes, HexDigest, Timestamp};
use addrzk_crypto::hash::{hash_parts, mac, verify_mac};
use addrzk_crypto::schnorr::{self, SchnorrProof, SecretVerifier};
use addrzk_crypto::{pedersen, Blinding, Secret, SelectiveDisclosure};

use crate::config::{Algorithm, ProofConfig};
use crate::error::{VerifyFailure, ZkpError};
use crate::replay::ReplayGuard;

/// `type` of a v2 envelope.
pub const PROOF_TYPE: &str = "zkp_proof";
/// `version` of a v2 envelope.
pub const PROOF_VERSION: u32 = 2;

const BINDING_DOMAIN: &str = "addrzk/proof/binding/v1";
const PEDERSEN_CHALLENGE_DOMAIN: &str = "addrzk/proof/pedersen-challenge/v1";

/// The signed body of a v2 proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofData {
    pub proof_id: Uuid,
    pub public_value: HexDigest,
    pub commitment: HexDigest,
    pub challenge: HexDigest,
    pub response: HexDigest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce_hash: Option<HexDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<HexDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosed_fields: Option<SelectiveDisclosure>,
    pub verified_at: Timestamp,
    pub expires_at: Timestamp,
}

/// A v2 address proof envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZkpAddressProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub version: u32,
    pub algorithm: Algorithm,
    pub data: ProofData,
    pub signature: HexDigest,
}

impl ZkpAddressProof {
    pub fn to_json(&self) -> Result<String, ZkpError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether `(address, opening)` opens the Pedersen commitment of a
    /// `pedersen` proof. Always false for `schnorr` proofs.
    pub fn opens_to(&self, address: &AddressInput, opening: &Blinding) -> bool {
        if self.algorithm != Algorithm::Pedersen {
            return false;
        }
        match address.canonical_bytes() {
            Ok(cb) => pedersen::verify(&self.data.commitment, cb.as_bytes(), opening),
            Err(_) => false,
        }
    }
}

/// Per-proof options. Unset fields fall back to [`ProofConfig`].
#[derive(Debug, Default)]
pub struct ProofOptions {
    pub algorithm: Option<Algorithm>,
    pub secret: Option<Secret>,
    pub disclosure_fields: Vec<String>,
    pub expires_in: Option<i64>,
}

impl ProofOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn secret(mut self, secret: Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn disclose(mut self, fields: &[&str]) -> Self {
        self.disclosure_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Seconds until expiry. Zero or negative yields an expired proof.
    pub fn expires_in(mut self, secs: i64) -> Self {
        self.expires_in = Some(secs);
        self
    }
}

/// What the prover gets back: the proof, the secret that keys it, and the
/// Pedersen opening when one exists.
#[derive(Debug)]
pub struct IssuedProof {
    pub proof: ZkpAddressProof,
    pub secret: Secret,
    pub opening: Option<Blinding>,
}

/// Builds v2 address proofs.
#[derive(Debug, Clone, Default)]
pub struct ZkpAddressProver {
    config: ProofConfig,
}

fn binding_value(address: &CanonicalBytes, secret: &Secret) -> HexDigest {
    hash_parts(BINDING_DOMAIN, &[address.as_bytes(), secret.as_bytes()])
}

fn pedersen_challenge(commitment: &HexDigest, public_value: &HexDigest) -> HexDigest {
    hash_parts(
        PEDERSEN_CHALLENGE_DOMAIN,
        &[commitment.as_bytes(), public_value.as_bytes()],
    )
}

impl ZkpAddressProver {
    pub fn new(config: ProofConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    /// Create a proof stamped with the current time.
    pub fn create(
        &self,
        address: &AddressInput,
        options: ProofOptions,
    ) -> Result<IssuedProof, ZkpError> {
        self.create_at(address, options, Timestamp::now())
    }

    /// Create a proof stamped with `now`.
    pub fn create_at(
        &self,
        address: &AddressInput,
        options: ProofOptions,
        now: Timestamp,
    ) -> Result<IssuedProof, ZkpError> {
        let secret = match options.secret {
            Some(s) => s,
            None => Secret::generate()?,
        };
        let algorithm = options.algorithm.unwrap_or(self.config.algorithm);
        let expires_in = options
            .expires_in
            .unwrap_or(self.config.default_expiry_secs);
        let expires_at = now
            .checked_add_secs(expires_in)
            .map_err(|e| ZkpError::InvalidExpiry(e.to_string()))?;

        let canonical = address.canonical_bytes()?;
        let public_value = binding_value(&canonical, &secret);

        let (commitment, challenge, response, nonce_hash, public_key, opening) = match algorithm {
            Algorithm::Pedersen => {
                let pc = pedersen::commit(canonical.as_bytes(), None)?;
                let challenge = pedersen_challenge(&pc.commitment, &public_value);
                let response = mac(challenge.as_bytes(), secret.mac_key().as_slice())?;
                (pc.commitment, challenge, response, None, None, Some(pc.randomness))
            }
            Algorithm::Schnorr => {
                let sp = schnorr::prove(&secret, public_value.as_bytes())?;
                (
                    sp.commitment,
                    sp.challenge,
                    sp.response,
                    Some(sp.nonce_hash),
                    Some(sp.public_key),
                    None,
                )
            }
        };

        let disclosed_fields = if options.disclosure_fields.is_empty() {
            None
        } else {
            let fields: Vec<&str> = options.disclosure_fields.iter().map(String::as_str).collect();
            Some(SelectiveDisclosure::create(address, &fields))
        };

        let data = ProofData {
            proof_id: Uuid::new_v4(),
            public_value,
            commitment,
            challenge,
            response,
            nonce_hash,
            public_key,
            disclosed_fields,
            verified_at: now,
            expires_at,
        };
        let signature = mac(CanonicalBytes::new(&data)?.as_bytes(), secret.mac_key().as_slice())?;

        tracing::debug!(
            proof_id = %data.proof_id,
            algorithm = %algorithm,
            expires_at = %data.expires_at,
            "created address proof"
        );

        Ok(IssuedProof {
            proof: ZkpAddressProof {
                proof_type: PROOF_TYPE.to_string(),
                version: PROOF_VERSION,
                algorithm,
                data,
                signature,
            },
            secret,
            opening,
        })
    }
}

/// Verifier inputs beyond the proof itself.
#[derive(Default, Clone, Copy)]
pub struct VerifyOptions<'a> {
    pub secret: Option<&'a Secret>,
    pub now: Option<Timestamp>,
    pub replay_guard: Option<&'a dyn ReplayGuard>,
}

impl<'a> VerifyOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret: &'a Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Evaluate expiry as of `now` instead of the wall clock.
    pub fn at(mut self, now: Timestamp) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_replay_guard(mut self, guard: &'a dyn ReplayGuard) -> Self {
        self.replay_guard = Some(guard);
        self
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.now.unwrap_or_else(Timestamp::now)
    }
}

impl std::fmt::Debug for VerifyOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyOptions")
            .field("secret", &self.secret.map(|_| "<redacted>"))
            .field("now", &self.now)
            .field("replay_guard", &self.replay_guard.is_some())
            .finish()
    }
}

/// Outcome of verifying an address proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<VerifyFailure>,
    /// Revealed fields that matched their committed hashes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclosed_fields: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_id: Option<Uuid>,
}

impl VerificationResult {
    pub(crate) fn failure(error: VerifyFailure, proof_id: Option<Uuid>) -> Self {
        tracing::warn!(
            failure = %error,
            proof_id = ?proof_id,
            "address proof rejected"
        );
        Self {
            valid: false,
            expired: error == VerifyFailure::Expired,
            error: Some(error),
            disclosed_fields: None,
            proof_id,
        }
    }

    pub(crate) fn success(
        proof_id: Option<Uuid>,
        disclosed_fields: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            valid: true,
            expired: false,
            error: None,
            disclosed_fields,
            proof_id,
        }
    }
}

fn algorithm_holds(proof: &ZkpAddressProof, secret: &Secret) -> bool {
    let d = &proof.data;
    match proof.algorithm {
        Algorithm::Pedersen => {
            pedersen_challenge(&d.commitment, &d.public_value) == d.challenge
                && verify_mac(d.challenge.as_bytes(), &d.response, secret.mac_key().as_slice())
        }
        Algorithm::Schnorr => {
            let (Some(nonce_hash), Some(public_key)) = (d.nonce_hash, d.public_key) else {
                return false;
            };
            let sp = SchnorrProof {
                commitment: d.commitment,
                challenge: d.challenge,
                response: d.response,
                nonce_hash,
                public_key,
            };
            SecretVerifier::new(secret).verify(&sp, d.public_value.as_bytes())
        }
    }
}

/// Verify a v2 proof. Never returns `Err`; every failure is data.
pub fn verify_address_proof(proof: &ZkpAddressProof, options: &VerifyOptions<'_>) -> VerificationResult {
    let id = Some(proof.data.proof_id);

    if proof.proof_type != PROOF_TYPE || proof.version != PROOF_VERSION {
        return VerificationResult::failure(VerifyFailure::UnsupportedFormat, id);
    }
    if options.now() >= proof.data.expires_at {
        return VerificationResult::failure(VerifyFailure::Expired, id);
    }
    let Some(secret) = options.secret else {
        return VerificationResult::failure(VerifyFailure::SecretRequired, id);
    };
    let signed = match CanonicalBytes::new(&proof.data) {
        Ok(cb) => cb,
        Err(_) => return VerificationResult::failure(VerifyFailure::UnsupportedFormat, id),
    };
    if !verify_mac(signed.as_bytes(), &proof.signature, secret.mac_key().as_slice()) {
        return VerificationResult::failure(VerifyFailure::InvalidSignature, id);
    }
    if !algorithm_holds(proof, secret) {
        return VerificationResult::failure(VerifyFailure::InvalidProof, id);
    }

    let disclosed = match &proof.data.disclosed_fields {
        Some(d) => {
            let check = d.verify();
            if !check.valid {
                return VerificationResult::failure(VerifyFailure::InvalidDisclosure, id);
            }
            let revealed = d.revealed_fields();
            Some(
                check
                    .verified
                    .into_iter()
                    .filter_map(|k| revealed.get(&k).map(|v| (k.clone(), v.clone())))
                    .collect(),
            )
        }
        None => None,
    };

    if let Some(guard) = options.replay_guard {
        if !guard.check_and_record(&proof.data.proof_id) {
            return VerificationResult::failure(VerifyFailure::Replayed, id);
        }
    }

    tracing::debug!(proof_id = %proof.data.proof_id, "address proof verified");
    VerificationResult::success(id, disclosed)
}
