//! # Address Records
//!
//! `AddressInput` is the private witness of an address proof: a flat map of
//! named string fields (`recipient`, `street_address`, `city`, `province`,
//! `postal_code`, `country`, ...). No field set is enforced; callers supply
//! whatever the normalization service produced.
//!
//! The map is ordered, and [`AddressInput::canonical_bytes()`] goes through
//! JCS, so the binding hash of an address does not depend on insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// A flat record of named address fields.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressInput(BTreeMap<String, String>);

impl AddressInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate fields in sorted key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JCS bytes of the record.
    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(&self.0)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AddressInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// Field values are personal data; only the field names are printed.
impl std::fmt::Debug for AddressInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressInput")
            .field("fields", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}
