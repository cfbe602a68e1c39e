//! # Digests — Fixed-Length Hex Hashes
//!
//! Defines [`HexDigest`], the 32-byte value used for every public hash in a
//! proof object (commitments, challenges, Merkle nodes, MAC tags), and
//! [`Sha256Accumulator`], the incremental hasher used to build
//! domain-separated, length-prefixed transcripts.
//!
//! ## Security Invariant
//!
//! - `HexDigest` equality is constant-time (`subtle`), so comparing a
//!   recomputed tag against an attacker-supplied one leaks no prefix length.
//! - Structured data reaches SHA-256 only through [`sha256_digest()`], which
//!   accepts `&CanonicalBytes` and nothing else.
//! - Multi-part hashes use [`Sha256Accumulator::field()`], which prefixes
//!   each part with its big-endian `u64` length. `H(a ‖ b)` can therefore
//!   never collide with `H(a' ‖ b')` for a different split of the same bytes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::canonical::CanonicalBytes;
use crate::error::CoreError;

/// Length in bytes of every digest in the workspace.
pub const DIGEST_LEN: usize = 32;

/// A 32-byte digest that serializes as 64 lowercase hex characters.
#[derive(Clone, Copy)]
pub struct HexDigest([u8; DIGEST_LEN]);

impl HexDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string (case-insensitive, surrounding
    /// whitespace ignored).
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let s = s.trim();
        if s.len() != DIGEST_LEN * 2 {
            return Err(CoreError::InvalidDigest(format!(
                "expected {} hex chars, got {}",
                DIGEST_LEN * 2,
                s.len()
            )));
        }
        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut out)
            .map_err(|e| CoreError::InvalidDigest(format!("invalid hex: {e}")))?;
        Ok(Self(out))
    }

    /// Parse from a raw byte slice, which must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| {
            CoreError::InvalidDigest(format!(
                "expected {DIGEST_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

impl PartialEq for HexDigest {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for HexDigest {}

impl PartialOrd for HexDigest {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexDigest {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::hash::Hash for HexDigest {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl AsRef<[u8]> for HexDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for HexDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexDigest({})", self.to_hex())
    }
}

impl std::fmt::Display for HexDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for HexDigest {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for HexDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute the SHA-256 digest of canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> HexDigest {
    let mut acc = Sha256Accumulator::new();
    acc.update(data.as_bytes());
    acc.finalize()
}

/// Incremental SHA-256 hasher.
///
/// `update()` feeds raw bytes. `field()` feeds a length-prefixed part and is
/// what every multi-part hash in the workspace uses. `domain()` starts a
/// transcript with a tag so that hashes for different purposes never share
/// an input space.
#[derive(Clone, Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Create an accumulator whose first field is `tag`.
    pub fn domain(tag: &str) -> Self {
        let mut acc = Self::new();
        acc.field(tag.as_bytes());
        acc
    }

    /// Feed raw bytes.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.hasher.update(data);
        self
    }

    /// Feed a length-prefixed field.
    pub fn field(&mut self, data: &[u8]) -> &mut Self {
        self.hasher.update((data.len() as u64).to_be_bytes());
        self.hasher.update(data);
        self
    }

    /// Consume the accumulator and return the digest.
    pub fn finalize(self) -> HexDigest {
        HexDigest(self.hasher.finalize().into())
    }

    /// Consume the accumulator and return the digest as hex.
    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha256_vector() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_empty_accumulator_is_sha256_of_empty() {
        assert_eq!(
            Sha256Accumulator::new().finalize_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_field_prefix_disambiguates_splits() {
        let mut a = Sha256Accumulator::new();
        a.field(b"ab").field(b"c");
        let mut b = Sha256Accumulator::new();
        b.field(b"a").field(b"bc");
        assert_ne!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_domain_separates() {
        let mut a = Sha256Accumulator::domain("one");
        a.field(b"x");
        let mut b = Sha256Accumulator::domain("two");
        b.field(b"x");
        assert_ne!(a.finalize(), b.finalize());
    }

    #[test]
    fn test_hex_roundtrip_and_case() {
        let d = sha256_digest(&CanonicalBytes::new(&"pid").unwrap());
        let upper = d.to_hex().to_uppercase();
        assert_eq!(HexDigest::from_hex(&upper).unwrap(), d);
        assert_eq!(d.to_string().len(), 64);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(HexDigest::from_hex("abcd").is_err());
        assert!(HexDigest::from_hex(&"zz".repeat(32)).is_err());
        assert!(HexDigest::from_slice(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let d = HexDigest::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: HexDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<HexDigest>("\"00\"").is_err());
    }
}
