//! # Prover Secrets
//!
//! A [`Secret`] keys the proof MAC and derives the prover's Schnorr key.
//! The MAC is never keyed with the raw bytes: HMAC zero-pads short keys and
//! pre-hashes long ones, so `K` and `K‖0x00` would share a tag.
//! [`Secret::mac_key()`] hashes the secret with its length first.
//!
//! It zeroizes its buffer on drop, does not implement `Serialize`, and
//! prints as `Secret(<redacted>)`. Handing it to another party is an
//! explicit act through [`Secret::expose_hex()`].

use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::hash::{hash_parts, random_bytes};

const MAC_KEY_DOMAIN: &str = "addrzk/secret/mac-key/v1";

/// Number of random bytes in a generated secret.
pub const SECRET_LEN: usize = 32;

/// Opaque prover secret.
#[derive(Clone)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    /// Generate a fresh 32-byte secret from the OS CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(Zeroizing::new(random_bytes(SECRET_LEN)?)))
    }

    /// Use caller-supplied key material. Any non-empty byte string is
    /// accepted, so passphrase-style secrets work too.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(CryptoError::InvalidEncoding {
                what: "secret",
                reason: "must not be empty".into(),
            });
        }
        Ok(Self(bytes))
    }

    /// Decode a hex-encoded secret, e.g. one previously exported with
    /// [`Secret::expose_hex()`].
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim()).map_err(|e| CryptoError::InvalidEncoding {
            what: "secret",
            reason: e.to_string(),
        })?;
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Fixed-length HMAC key for this secret. Distinct secrets give
    /// distinct keys.
    pub fn mac_key(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(*hash_parts(MAC_KEY_DOMAIN, &[self.as_bytes()]).as_bytes())
    }

    /// Hex encoding of the key material. The caller owns the result.
    pub fn expose_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0.as_slice()))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_random() {
        let a = Secret::generate().unwrap();
        let b = Secret::generate().unwrap();
        assert_eq!(a.as_bytes().len(), SECRET_LEN);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_debug_redacted() {
        let s = Secret::from_bytes(b"hunter2".to_vec()).unwrap();
        assert_eq!(format!("{s:?}"), "Secret(<redacted>)");
    }

    #[test]
    fn test_hex_roundtrip() {
        let s = Secret::generate().unwrap();
        let back = Secret::from_hex(&s.expose_hex()).unwrap();
        assert_eq!(s.as_bytes(), back.as_bytes());
    }

    #[test]
    fn test_mac_key_separates_zero_padded_secrets() {
        let a = Secret::from_bytes(b"A".to_vec()).unwrap();
        let padded = Secret::from_bytes(b"A\0".to_vec()).unwrap();
        assert_ne!(*a.mac_key(), *padded.mac_key());

        let long = Secret::from_bytes(vec![7u8; 100]).unwrap();
        let prehashed = Secret::from_bytes(crate::hash::hash(&[7u8; 100]).as_bytes().to_vec()).unwrap();
        assert_ne!(*long.mac_key(), *prehashed.mac_key());

        assert_eq!(*a.mac_key(), *Secret::from_bytes(b"A".to_vec()).unwrap().mac_key());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Secret::from_bytes(Vec::new()).is_err());
        assert!(Secret::from_hex("").is_err());
        assert!(Secret::from_hex("zz").is_err());
    }
}
