//! # Proof Backend Policy
//!
//! Decides whether a proof produced by a given backend may be accepted.
//! The mock backend's "proofs" can be forged by anyone, so a production
//! verifier must reject them regardless of whether they recompute.
//!
//! The mode comes from [`ProofConfig::policy`](crate::config::ProofConfig).
//! It is never inferred from the environment or the build profile.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from policy enforcement.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("proof rejected: production mode requires a real proof backend ({backend})")]
    MockProofRejected { backend: &'static str },
}

/// The backend that produced a circuit proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofBackend {
    /// In-tree SHA-256 placeholder.
    Mock,
    /// An external proving service behind [`ProofSystem`](super::traits::ProofSystem).
    External,
}

impl ProofBackend {
    /// Whether this backend provides real soundness.
    pub fn is_real(self) -> bool {
        matches!(self, ProofBackend::External)
    }

    pub fn name(self) -> &'static str {
        match self {
            ProofBackend::Mock => "mock-sha256",
            ProofBackend::External => "external",
        }
    }
}

/// Policy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Reject mock proofs.
    Production,
    /// Accept mock proofs.
    #[default]
    Development,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofPolicy {
    mode: PolicyMode,
}

impl ProofPolicy {
    pub fn new(mode: PolicyMode) -> Self {
        Self { mode }
    }

    pub fn production() -> Self {
        Self::new(PolicyMode::Production)
    }

    pub fn development() -> Self {
        Self::new(PolicyMode::Development)
    }

    /// Accept or reject `backend` under this policy.
    pub fn validate(&self, backend: ProofBackend) -> Result<(), PolicyError> {
        match (self.mode, backend.is_real()) {
            (PolicyMode::Production, false) => Err(PolicyError::MockProofRejected {
                backend: backend.name(),
            }),
            _ => Ok(()),
        }
    }

    pub fn mode(&self) -> PolicyMode {
        self.mode
    }
}

impl From<PolicyMode> for ProofPolicy {
    fn from(mode: PolicyMode) -> Self {
        Self::new(mode)
    }
}
