//! # Canonical Serialization — JCS Byte Production
//!
//! `CanonicalBytes` is the sole construction path for structured bytes that
//! are hashed or MACed anywhere in the workspace: address records, proof
//! data blocks before signing, circuit descriptors, disclosure hash maps.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only constructor runs the coercion
//! pipeline (float rejection) and then RFC 8785 JCS serialization, so a
//! proof serialized by one process and re-parsed by another canonicalizes
//! to exactly the bytes the prover signed. Field order in the transport
//! JSON is irrelevant.
//!
//! Rules:
//!
//! 1. **Reject floats.** JCS number formatting has edge cases; proof data
//!    only ever carries strings, integers and booleans.
//! 2. **Sorted keys, compact separators**, UTF-8 output (via `serde_jcs`).

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// JCS-canonical bytes of a float-free JSON value.
///
/// Built only by [`CanonicalBytes::new()`] or [`CanonicalBytes::from_value()`],
/// both of which reject floats before serializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// [`CanonicalizationError::FloatRejected`] on the first float found,
    /// [`CanonicalizationError::SerializationFailed`] if `serde_json` or
    /// `serde_jcs` fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Self::from_value(serde_json::to_value(obj)?)
    }

    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        reject_floats(&value)?;
        Ok(Self(serde_jcs::to_vec(&value)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Depth-first walk that fails on the first non-integer number.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) if !(n.is_i64() || n.is_u64()) => Err(
            CanonicalizationError::FloatRejected(n.as_f64().unwrap_or(f64::NAN)),
        ),
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
        _ => Ok(()),
    }
}
