//! # Proof Configuration
//!
//! Explicit configuration threaded into provers and verifiers. There is no
//! global registry and nothing is read from the environment. A host that
//! wants file or env configuration deserializes a [`ProofConfig`] itself.

use serde::{Deserialize, Serialize};

use addrzk_core::{CountryCode, Pid};

use crate::backend::policy::PolicyMode;
use crate::error::ZkpError;

/// Proof-of-knowledge construction used inside a v2 address proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Pedersen commitment to the address plus a MAC response.
    Pedersen,
    /// Schnorr proof of knowledge of the prover key over the binding.
    #[default]
    Schnorr,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Pedersen => "pedersen",
            Algorithm::Schnorr => "schnorr",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints a PID must satisfy before a structure proof is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyRules {
    /// Longest allowed component.
    pub max_component_len: usize,
    /// Require the first component to equal the declared country code.
    pub first_component_is_country: bool,
}

impl Default for HierarchyRules {
    fn default() -> Self {
        Self {
            max_component_len: 32,
            first_component_is_country: true,
        }
    }
}

impl HierarchyRules {
    /// Check `pid` against the rules and return its components.
    pub fn check<'p>(
        &self,
        pid: &'p Pid,
        country: &CountryCode,
        depth: usize,
    ) -> Result<Vec<&'p str>, ZkpError> {
        let components = pid.components();
        if components.len() != depth {
            return Err(ZkpError::StructureViolation(format!(
                "expected {depth} components, found {}",
                components.len()
            )));
        }
        for (i, c) in components.iter().enumerate() {
            if c.is_empty() {
                return Err(ZkpError::StructureViolation(format!("component {i} is empty")));
            }
            if c.len() > self.max_component_len {
                return Err(ZkpError::StructureViolation(format!(
                    "component {i} exceeds {} characters",
                    self.max_component_len
                )));
            }
            if !c.chars().all(|ch| ch.is_ascii_alphanumeric()) {
                return Err(ZkpError::StructureViolation(format!(
                    "component {i} is not ASCII alphanumeric"
                )));
            }
        }
        if self.first_component_is_country && components.first() != Some(&country.as_str()) {
            return Err(ZkpError::StructureViolation(
                "first component does not match country code".into(),
            ));
        }
        Ok(components)
    }
}

/// Configuration for provers and verifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    /// Algorithm used when the caller does not choose one.
    pub algorithm: Algorithm,
    /// Expiry offset in seconds when the caller does not choose one. May be
    /// zero or negative.
    pub default_expiry_secs: i64,
    /// Whether mock-backed proofs are acceptable.
    pub policy: PolicyMode,
    pub hierarchy: HierarchyRules,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Schnorr,
            default_expiry_secs: 3600,
            policy: PolicyMode::Development,
            hierarchy: HierarchyRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> Pid {
        Pid::new(s).unwrap()
    }

    fn jp() -> CountryCode {
        CountryCode::new("JP").unwrap()
    }

    #[test]
    fn defaults() {
        let c = ProofConfig::default();
        assert_eq!(c.algorithm, Algorithm::Schnorr);
        assert_eq!(c.default_expiry_secs, 3600);
        assert_eq!(c.policy, PolicyMode::Development);
        assert_eq!(c.hierarchy.max_component_len, 32);
        assert!(c.hierarchy.first_component_is_country);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: ProofConfig =
            serde_json::from_str(r#"{"algorithm":"pedersen","policy":"production"}"#).unwrap();
        assert_eq!(c.algorithm, Algorithm::Pedersen);
        assert_eq!(c.policy, PolicyMode::Production);
        assert_eq!(c.default_expiry_secs, 3600);
    }

    #[test]
    fn unknown_algorithm_rejected() {
        assert!(serde_json::from_str::<ProofConfig>(r#"{"algorithm":"groth16"}"#).is_err());
    }

    #[test]
    fn hierarchy_accepts_well_formed_pid() {
        let rules = HierarchyRules::default();
        let p = pid("JP-13-113-01");
        assert_eq!(rules.check(&p, &jp(), 4).unwrap(), vec!["JP", "13", "113", "01"]);
    }

    #[test]
    fn hierarchy_rejects_wrong_depth() {
        let rules = HierarchyRules::default();
        assert!(rules.check(&pid("JP-13-113-01"), &jp(), 3).is_err());
    }

    #[test]
    fn hierarchy_rejects_wrong_country() {
        let rules = HierarchyRules::default();
        assert!(rules.check(&pid("US-13-113-01"), &jp(), 4).is_err());
        let lax = HierarchyRules {
            first_component_is_country: false,
            ..HierarchyRules::default()
        };
        assert!(lax.check(&pid("US-13-113-01"), &jp(), 4).is_ok());
    }

    #[test]
    fn hierarchy_rejects_bad_components() {
        let rules = HierarchyRules {
            max_component_len: 3,
            ..HierarchyRules::default()
        };
        assert!(rules.check(&pid("JP-13-1130-01"), &jp(), 4).is_err());
        assert!(rules.check(&pid("JP--113-01"), &jp(), 4).is_err());
        assert!(rules.check(&pid("JP-1_3-113-01"), &jp(), 4).is_err());
    }
}
