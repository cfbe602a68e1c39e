//! # Selective Disclosure
//!
//! Per-field hash commitments over an [`AddressInput`]. Every field's hash is
//! public. A subset of fields can additionally be revealed in plaintext, and a
//! verifier checks each revealed value against its committed hash.
//!
//! Field hashes bind the field name: `H("disclosure/field", name, value)`.
//! A revealed `country` value therefore cannot be replayed under `city`.
//!
//! ## Known limitation
//!
//! Unrevealed fields are protected only by their hash. Low-entropy values
//! (country, postal code) can be recovered by brute force from the public
//! hash. Callers who need hiding for such fields must not include them in
//! the disclosure at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use addrzk_core::{AddressInput, HexDigest};

use crate::error::CryptoError;
use crate::hash::hash_parts;

const FIELD_DOMAIN: &str = "addrzk/disclosure/field/v1";

/// Hash committing to `value` under field `name`.
pub fn field_hash(name: &str, value: &str) -> HexDigest {
    hash_parts(FIELD_DOMAIN, &[name.as_bytes(), value.as_bytes()])
}

/// Public commitments over a record plus an optional revealed subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectiveDisclosure {
    /// Every committed field name, sorted.
    pub fields: Vec<String>,
    /// Field name to committed hash.
    pub hashes: BTreeMap<String, HexDigest>,
    /// Revealed plaintext values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed: Option<BTreeMap<String, String>>,
}

/// Outcome of [`SelectiveDisclosure::verify()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureVerification {
    pub valid: bool,
    /// Revealed fields whose value matched the committed hash.
    pub verified: Vec<String>,
}

impl SelectiveDisclosure {
    /// Commit to every field of `record` and reveal those named in
    /// `always_reveal`. Names absent from the record are ignored.
    pub fn create(record: &AddressInput, always_reveal: &[&str]) -> Self {
        let hashes: BTreeMap<String, HexDigest> = record
            .fields()
            .map(|(k, v)| (k.to_string(), field_hash(k, v)))
            .collect();
        let revealed: BTreeMap<String, String> = always_reveal
            .iter()
            .filter_map(|name| record.get(name).map(|v| (name.to_string(), v.to_string())))
            .collect();
        Self {
            fields: hashes.keys().cloned().collect(),
            hashes,
            revealed: (!revealed.is_empty()).then_some(revealed),
        }
    }

    /// A new disclosure that additionally reveals `fields` from `record`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::UnknownField`] if a field was never committed, and
    /// [`CryptoError::FieldMismatch`] if the record's value does not open
    /// the committed hash.
    pub fn reveal(&self, record: &AddressInput, fields: &[&str]) -> Result<Self, CryptoError> {
        let mut revealed = self.revealed.clone().unwrap_or_default();
        for name in fields {
            let committed = self
                .hashes
                .get(*name)
                .ok_or_else(|| CryptoError::UnknownField(name.to_string()))?;
            let value = record
                .get(name)
                .ok_or_else(|| CryptoError::FieldMismatch(name.to_string()))?;
            if field_hash(name, value) != *committed {
                return Err(CryptoError::FieldMismatch(name.to_string()));
            }
            revealed.insert(name.to_string(), value.to_string());
        }
        Ok(Self {
            fields: self.fields.clone(),
            hashes: self.hashes.clone(),
            revealed: (!revealed.is_empty()).then_some(revealed),
        })
    }

    /// Check every revealed value against its committed hash.
    ///
    /// `valid` is false if any revealed value mismatches, a revealed field
    /// has no committed hash, or `fields` disagrees with the hash map keys.
    pub fn verify(&self) -> DisclosureVerification {
        let mut valid = self.fields.iter().eq(self.hashes.keys());
        let mut verified = Vec::new();
        if let Some(revealed) = &self.revealed {
            for (name, value) in revealed {
                match self.hashes.get(name) {
                    Some(h) if field_hash(name, value) == *h => verified.push(name.clone()),
                    _ => valid = false,
                }
            }
        }
        DisclosureVerification { valid, verified }
    }

    /// Revealed values, empty when nothing is revealed.
    pub fn revealed_fields(&self) -> BTreeMap<String, String> {
        self.revealed.clone().unwrap_or_default()
    }
}
