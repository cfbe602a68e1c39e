//! # Schnorr Proof of Knowledge over Ristretto255
//!
//! Non-interactive (Fiat–Shamir) proof that the prover knows the discrete
//! log `x` of its public key `X = x·G`, bound to a caller-chosen
//! `public_value`.
//!
//! ```text
//! x = H_s("key", secret)          X = x·G
//! k  <- random                    R = k·G
//! c = H_s("challenge", R, X, public_value)
//! s = k + c·x
//! nonce_hash = H("nonce", R)
//! ```
//!
//! A verifier accepts when the challenge recomputes, `s·G == R + c·X` holds
//! and `nonce_hash` matches `R`.
//!
//! ## Secret-aware verification
//!
//! [`SecretVerifier`] is the only way to run the stronger check that pins
//! the proof to a particular secret. It can only be constructed from a
//! [`Secret`], so holding the capability means holding the key.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use addrzk_core::HexDigest;

use crate::error::CryptoError;
use crate::group::{
    decode_point, decode_scalar, encode_point, encode_scalar, generator_g, hash_to_scalar,
    random_scalar,
};
use crate::hash::hash_parts;
use crate::secret::Secret;

const KEY_DOMAIN: &str = "addrzk/schnorr/key/v1";
const CHALLENGE_DOMAIN: &str = "addrzk/schnorr/challenge/v1";
const NONCE_DOMAIN: &str = "addrzk/schnorr/nonce/v1";

/// A Schnorr proof. Every field is a 32-byte hex value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchnorrProof {
    /// Nonce commitment `R`.
    pub commitment: HexDigest,
    /// Fiat–Shamir challenge scalar `c`.
    pub challenge: HexDigest,
    /// Response scalar `s`.
    pub response: HexDigest,
    /// `H(R)`, kept for consistency checks by callers that log or index
    /// proofs by nonce.
    pub nonce_hash: HexDigest,
    /// Prover public key `X`.
    pub public_key: HexDigest,
}

fn secret_scalar(secret: &Secret) -> Scalar {
    hash_to_scalar(KEY_DOMAIN, &[secret.as_bytes()])
}

fn challenge(r: &HexDigest, x: &HexDigest, public_value: &[u8]) -> Scalar {
    hash_to_scalar(CHALLENGE_DOMAIN, &[r.as_bytes(), x.as_bytes(), public_value])
}

fn nonce_hash(r: &HexDigest) -> HexDigest {
    hash_parts(NONCE_DOMAIN, &[r.as_bytes()])
}

/// Public key `X` for `secret`.
pub fn public_key_for(secret: &Secret) -> HexDigest {
    let mut x = secret_scalar(secret);
    let key = encode_point(&(generator_g() * x));
    x.zeroize();
    key
}

/// Prove knowledge of `secret` bound to `public_value`.
pub fn prove(secret: &Secret, public_value: &[u8]) -> Result<SchnorrProof, CryptoError> {
    let mut x = secret_scalar(secret);
    let mut k = random_scalar()?;

    let public_key = encode_point(&(generator_g() * x));
    let commitment = encode_point(&(generator_g() * k));
    let c = challenge(&commitment, &public_key, public_value);
    let s = k + c * x;

    x.zeroize();
    k.zeroize();

    Ok(SchnorrProof {
        nonce_hash: nonce_hash(&commitment),
        commitment,
        challenge: encode_scalar(&c),
        response: encode_scalar(&s),
        public_key,
    })
}

struct Decoded {
    r: RistrettoPoint,
    x: RistrettoPoint,
    c: Scalar,
    s: Scalar,
}

// Structural checks shared by both verification paths: canonical encodings,
// challenge recomputation and nonce hash.
fn decode_checked(proof: &SchnorrProof, public_value: &[u8]) -> Option<Decoded> {
    let r = decode_point(&proof.commitment).ok()?;
    let x = decode_point(&proof.public_key).ok()?;
    let c = decode_scalar(&proof.challenge).ok()?;
    let s = decode_scalar(&proof.response).ok()?;

    let expected_c = challenge(&proof.commitment, &proof.public_key, public_value);
    if encode_scalar(&expected_c) != proof.challenge {
        return None;
    }
    if nonce_hash(&proof.commitment) != proof.nonce_hash {
        return None;
    }
    Some(Decoded { r, x, c, s })
}

/// Verify `proof` against `public_value`. Returns `false` on any mismatch.
pub fn verify(proof: &SchnorrProof, public_value: &[u8]) -> bool {
    match decode_checked(proof, public_value) {
        Some(d) => generator_g() * d.s == d.r + d.x * d.c,
        None => false,
    }
}

/// Capability to verify a proof against a known secret.
///
/// Passes only if the proof verifies publicly, its `public_key` is the key
/// derived from this secret, and the nonce recovered as `k = s - c·x`
/// reproduces `R`.
pub struct SecretVerifier {
    x: Scalar,
    public_key: HexDigest,
}

impl SecretVerifier {
    pub fn new(secret: &Secret) -> Self {
        let x = secret_scalar(secret);
        Self {
            public_key: encode_point(&(generator_g() * x)),
            x,
        }
    }

    pub fn public_key(&self) -> &HexDigest {
        &self.public_key
    }

    pub fn verify(&self, proof: &SchnorrProof, public_value: &[u8]) -> bool {
        if proof.public_key != self.public_key {
            return false;
        }
        let Some(d) = decode_checked(proof, public_value) else {
            return false;
        };
        let mut k = d.s - d.c * self.x;
        let ok = encode_point(&(generator_g() * k)) == proof.commitment;
        k.zeroize();
        ok
    }
}

impl Drop for SecretVerifier {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

impl std::fmt::Debug for SecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretVerifier")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
