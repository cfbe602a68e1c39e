//! # Pedersen Commitments over Ristretto255
//!
//! `C = m·G + r·H`, where `m` is the hash-to-scalar of the message and `r`
//! is the blinding scalar. The commitment is the 32-byte compressed point.
//!
//! ## Security Invariant
//!
//! - **Hiding.** With fresh uniform `r`, `C` is uniform in the group and
//!   says nothing about `m`.
//! - **Binding.** Opening `C` to a second `(m', r')` requires `log_G(H)`.
//! - [`verify()`] is a predicate. Any mismatch, including an undecodable
//!   commitment, yields `false`.

use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use addrzk_core::HexDigest;

use crate::error::CryptoError;
use crate::group::{
    decode_scalar, encode_point, encode_scalar, generator_g, generator_h, hash_to_scalar,
    random_scalar,
};

const MESSAGE_DOMAIN: &str = "addrzk/pedersen/message/v1";

/// Blinding scalar `r`. Hex on the wire, redacted in `Debug`, zeroized on
/// drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Blinding(Scalar);

impl Blinding {
    pub fn random() -> Result<Self, CryptoError> {
        random_scalar().map(Self)
    }

    /// Parse a 64-char hex canonical scalar.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let d = HexDigest::from_hex(s)?;
        decode_scalar(&d).map(Self)
    }

    pub fn to_hex(&self) -> String {
        encode_scalar(&self.0).to_hex()
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }
}

impl Drop for Blinding {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for Blinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Blinding(<redacted>)")
    }
}

impl Serialize for Blinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Blinding {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A commitment together with its opening randomness.
///
/// Only `commitment` is public. `randomness` stays with the prover until it
/// chooses to open the commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenCommitment {
    pub commitment: HexDigest,
    pub randomness: Blinding,
}

fn commitment_point(message: &[u8], r: &Scalar) -> HexDigest {
    let m = hash_to_scalar(MESSAGE_DOMAIN, &[message]);
    encode_point(&(generator_g() * m + generator_h() * r))
}

/// Commit to `message`. Fresh randomness is drawn when none is supplied.
pub fn commit(
    message: &[u8],
    randomness: Option<Blinding>,
) -> Result<PedersenCommitment, CryptoError> {
    let randomness = match randomness {
        Some(r) => r,
        None => Blinding::random()?,
    };
    Ok(PedersenCommitment {
        commitment: commitment_point(message, randomness.scalar()),
        randomness,
    })
}

/// Check that `(message, randomness)` opens `commitment`.
pub fn verify(commitment: &HexDigest, message: &[u8], randomness: &Blinding) -> bool {
    commitment_point(message, randomness.scalar()) == *commitment
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn opens_only_to_committed_message(
            m in prop::collection::vec(any::<u8>(), 0..64),
            m2 in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let c = commit(&m, None).unwrap();
            prop_assert!(verify(&c.commitment, &m, &c.randomness));
            if m != m2 {
                prop_assert!(!verify(&c.commitment, &m2, &c.randomness));
            }
        }

        #[test]
        fn same_opening_same_commitment(m in prop::collection::vec(any::<u8>(), 0..64)) {
            let r = Blinding::random().unwrap();
            let a = commit(&m, Some(r.clone())).unwrap();
            let b = commit(&m, Some(r)).unwrap();
            prop_assert_eq!(a.commitment, b.commitment);
        }
    }
}
