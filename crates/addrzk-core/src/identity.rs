//! # Identifier Newtypes
//!
//! `Pid`, `CountryCode` and `FacilityId` are distinct types so a facility ID
//! can never be hashed into a membership leaf where a PID was expected, and
//! a country code can never be substituted for a PID component.
//!
//! A PID is opaque to this workspace. It is produced by an external
//! normalization service and is only split on `-` by the structure pattern.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Hierarchical place identifier, e.g. `JP-13-113-01`.
///
/// `Debug` is redacted: a PID is a witness and must not end up in logs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pid(String);

impl Pid {
    /// Separator between hierarchy components.
    pub const SEPARATOR: char = '-';

    /// Wrap a PID string. Rejects empty or all-whitespace input.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::InvalidIdentifier {
                kind: "pid",
                reason: "must not be empty".into(),
            });
        }
        Ok(Self(value))
    }

    /// The raw PID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into hierarchy components.
    pub fn components(&self) -> Vec<&str> {
        self.0.split(Self::SEPARATOR).collect()
    }
}

impl std::fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pid(<redacted>)")
    }
}

impl TryFrom<String> for Pid {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Pid {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Pid> for String {
    fn from(pid: Pid) -> Self {
        pid.0
    }
}

/// ISO 3166-1 alpha-2 country code. Stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a two-letter code. Lowercase input is normalized.
    pub fn new(value: &str) -> Result<Self, CoreError> {
        let v = value.trim();
        if v.len() != 2 || !v.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidIdentifier {
                kind: "country code",
                reason: format!("expected two ASCII letters, got {v:?}"),
            });
        }
        Ok(Self(v.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(c: CountryCode) -> Self {
        c.0
    }
}

/// Public identifier of a locker facility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FacilityId(String);

impl FacilityId {
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::InvalidIdentifier {
                kind: "facility id",
                reason: "must not be empty".into(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FacilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FacilityId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FacilityId> for String {
    fn from(f: FacilityId) -> Self {
        f.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_components() {
        let pid = Pid::new("JP-13-113-01").unwrap();
        assert_eq!(pid.components(), vec!["JP", "13", "113", "01"]);
    }

    #[test]
    fn test_pid_rejects_empty() {
        assert!(Pid::new("").is_err());
        assert!(Pid::new("   ").is_err());
    }

    #[test]
    fn test_pid_debug_is_redacted() {
        let pid = Pid::new("JP-13-113-01").unwrap();
        assert!(!format!("{pid:?}").contains("113"));
    }

    #[test]
    fn test_pid_serde_transparent() {
        let pid = Pid::new("US-CA-94105").unwrap();
        assert_eq!(serde_json::to_string(&pid).unwrap(), "\"US-CA-94105\"");
        assert!(serde_json::from_str::<Pid>("\"\"").is_err());
    }

    #[test]
    fn test_country_code_normalizes() {
        assert_eq!(CountryCode::new("jp").unwrap().as_str(), "JP");
        assert!(CountryCode::new("JPN").is_err());
        assert!(CountryCode::new("J1").is_err());
    }

    #[test]
    fn test_facility_id() {
        let f = FacilityId::new("FAC-SHIBUYA-01").unwrap();
        assert_eq!(f.to_string(), "FAC-SHIBUYA-01");
        assert!(FacilityId::new("").is_err());
    }
}
