//! # Ristretto255 Helpers
//!
//! Shared group plumbing for [`crate::pedersen`] and [`crate::schnorr`]:
//! hash-to-scalar, the second Pedersen generator, CSPRNG scalars and the
//! 32-byte hex wire encodings of points and scalars.
//!
//! ## Security Invariant
//!
//! - `H` is derived by hash-to-point from a fixed tag. Nobody knows
//!   `log_G(H)`, which is what makes Pedersen commitments binding.
//! - Decoding is strict. Non-canonical scalars and invalid point encodings
//!   are rejected, so a proof has exactly one valid wire form.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};

use addrzk_core::HexDigest;

use crate::error::CryptoError;
use crate::hash::random_bytes;

const PEDERSEN_H_TAG: &[u8] = b"addrzk/pedersen/H/v1";

/// The standard Ristretto basepoint `G`.
pub fn generator_g() -> RistrettoPoint {
    RISTRETTO_BASEPOINT_POINT
}

/// The second Pedersen generator `H`.
pub fn generator_h() -> RistrettoPoint {
    RistrettoPoint::hash_from_bytes::<Sha512>(PEDERSEN_H_TAG)
}

/// Domain-separated hash to a scalar. Parts are length-prefixed.
pub fn hash_to_scalar(domain: &str, parts: &[&[u8]]) -> Scalar {
    let mut h = Sha512::new();
    h.update((domain.len() as u64).to_be_bytes());
    h.update(domain.as_bytes());
    for part in parts {
        h.update((part.len() as u64).to_be_bytes());
        h.update(part);
    }
    Scalar::from_hash(h)
}

/// Uniform scalar from 64 CSPRNG bytes.
pub fn random_scalar() -> Result<Scalar, CryptoError> {
    let bytes = random_bytes(64)?;
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&bytes);
    Ok(Scalar::from_bytes_mod_order_wide(&wide))
}

pub fn encode_point(p: &RistrettoPoint) -> HexDigest {
    HexDigest::from_bytes(p.compress().to_bytes())
}

pub fn encode_scalar(s: &Scalar) -> HexDigest {
    HexDigest::from_bytes(s.to_bytes())
}

/// Decode a compressed Ristretto point.
pub fn decode_point(d: &HexDigest) -> Result<RistrettoPoint, CryptoError> {
    CompressedRistretto(*d.as_bytes())
        .decompress()
        .ok_or_else(|| CryptoError::InvalidEncoding {
            what: "point",
            reason: "not a valid Ristretto encoding".into(),
        })
}

/// Decode a canonical scalar.
pub fn decode_scalar(d: &HexDigest) -> Result<Scalar, CryptoError> {
    Option::from(Scalar::from_canonical_bytes(*d.as_bytes())).ok_or_else(|| {
        CryptoError::InvalidEncoding {
            what: "scalar",
            reason: "not reduced modulo the group order".into(),
        }
    })
}
