//! # Legacy Address Proofs (v1)
//!
//! The pre-ZKP envelope: a plain SHA-256 of the canonical address, MACed
//! with the secret. Kept so that proofs already in circulation still verify.
//!
//! ```text
//! { "type": "address_proof", "version": 1,
//!   "data": { "address_hash", "verified_at", "expires_at" },
//!   "signature": HMAC-SHA256(JCS(data), mac_key(secret)) }
//! ```
//!
//! `address_hash` is unsalted. Anyone who can guess the address can confirm
//! it. New proofs should be v2.

use serde::{Deserialize, Serialize};

use addrzk_core::{sha256_digest, AddressInput, CanonicalBytes, HexDigest, Timestamp};
use addrzk_crypto::hash::{mac, verify_mac};
use addrzk_crypto::Secret;

use crate::address_proof::{VerificationResult, VerifyOptions};
use crate::error::{VerifyFailure, ZkpError};

pub const LEGACY_PROOF_TYPE: &str = "address_proof";
pub const LEGACY_PROOF_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyProofData {
    pub address_hash: HexDigest,
    pub verified_at: Timestamp,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAddressProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub version: u32,
    pub data: LegacyProofData,
    pub signature: HexDigest,
}

impl LegacyAddressProof {
    /// Build a v1 proof valid for `expires_in` seconds from `now`.
    pub fn create_at(
        address: &AddressInput,
        secret: &Secret,
        expires_in: i64,
        now: Timestamp,
    ) -> Result<Self, ZkpError> {
        let expires_at = now
            .checked_add_secs(expires_in)
            .map_err(|e| ZkpError::InvalidExpiry(e.to_string()))?;
        let data = LegacyProofData {
            address_hash: sha256_digest(&address.canonical_bytes()?),
            verified_at: now,
            expires_at,
        };
        let signature = mac(CanonicalBytes::new(&data)?.as_bytes(), secret.mac_key().as_slice())?;
        Ok(Self {
            proof_type: LEGACY_PROOF_TYPE.to_string(),
            version: LEGACY_PROOF_VERSION,
            data,
            signature,
        })
    }

    pub fn create(address: &AddressInput, secret: &Secret, expires_in: i64) -> Result<Self, ZkpError> {
        Self::create_at(address, secret, expires_in, Timestamp::now())
    }

    /// Whether `address` is the one this proof hashes.
    pub fn matches_address(&self, address: &AddressInput) -> bool {
        address
            .canonical_bytes()
            .map(|cb| sha256_digest(&cb) == self.data.address_hash)
            .unwrap_or(false)
    }

    /// format → expiry → secret present → signature. The replay guard in
    /// `options` is ignored: v1 proofs carry no identifier.
    pub fn verify(&self, options: &VerifyOptions<'_>) -> VerificationResult {
        if self.proof_type != LEGACY_PROOF_TYPE || self.version != LEGACY_PROOF_VERSION {
            return VerificationResult::failure(VerifyFailure::UnsupportedFormat, None);
        }
        if options.now() >= self.data.expires_at {
            return VerificationResult::failure(VerifyFailure::Expired, None);
        }
        let Some(secret) = options.secret else {
            return VerificationResult::failure(VerifyFailure::SecretRequired, None);
        };
        let valid = CanonicalBytes::new(&self.data)
            .map(|cb| verify_mac(cb.as_bytes(), &self.signature, secret.mac_key().as_slice()))
            .unwrap_or(false);
        if !valid {
            return VerificationResult::failure(VerifyFailure::InvalidSignature, None);
        }
        VerificationResult::success(None, None)
    }

    pub fn to_json(&self) -> Result<String, ZkpError> {
        Ok(serde_json::to_string(self)?)
    }
}
