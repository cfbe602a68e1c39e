//! # Hash, MAC and Randomness Primitives
//!
//! The leaf layer every other module builds on.
//!
//! - [`hash()`] is plain SHA-256 over raw bytes.
//! - [`hash_parts()`] is the transcript hash used wherever a construction
//!   says `hash(a || b || ...)`. It hashes a domain tag followed by every
//!   part, each prefixed with its big-endian `u64` length.
//! - [`mac()`] / [`verify_mac()`] are HMAC-SHA-256. Verification compares
//!   in constant time.
//! - [`random_bytes()`] draws from the operating system CSPRNG and reports
//!   failure instead of panicking.
//!
//! ## Security Invariant
//!
//! Callers must draw fresh randomness for every commitment and every proof
//! nonce. Reusing a Schnorr nonce across two challenges reveals the key.

use hmac::{Hmac, Mac};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use addrzk_core::{HexDigest, Sha256Accumulator};

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of raw bytes.
pub fn hash(data: &[u8]) -> HexDigest {
    HexDigest::from_bytes(Sha256::digest(data).into())
}

/// Domain-separated, length-prefixed SHA-256 over `parts`.
pub fn hash_parts(domain: &str, parts: &[&[u8]]) -> HexDigest {
    let mut acc = Sha256Accumulator::domain(domain);
    for part in parts {
        acc.field(part);
    }
    acc.finalize()
}

/// HMAC-SHA-256 of `message` under `key`.
pub fn mac(message: &[u8], key: &[u8]) -> Result<HexDigest, CryptoError> {
    let mut m =
        HmacSha256::new_from_slice(key).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    m.update(message);
    Ok(HexDigest::from_bytes(m.finalize().into_bytes().into()))
}

/// Recompute the MAC and compare against `tag` in constant time.
pub fn verify_mac(message: &[u8], tag: &HexDigest, key: &[u8]) -> bool {
    match mac(message, key) {
        Ok(expected) => expected.as_bytes().ct_eq(tag.as_bytes()).into(),
        Err(_) => false,
    }
}

/// `n` bytes from the operating system CSPRNG.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::Rng(e.to_string()))?;
    Ok(buf)
}

/// `n` random bytes, hex encoded.
pub fn random_hex(n: usize) -> Result<String, CryptoError> {
    random_bytes(n).map(hex::encode)
}
