//! # Circuit Descriptors
//!
//! A [`CircuitDescriptor`] names the statement a pattern proof is about.
//! Every pattern proof records the descriptor's digest and every pattern
//! verifier compares it against the descriptor the verifier expects. A
//! membership proof therefore cannot be replayed as a locker proof, and a
//! proof made under circuit version 1 is rejected by a version 2 verifier.

use serde::{Deserialize, Serialize};

use addrzk_core::{HexDigest, Sha256Accumulator};

use crate::error::ZkpError;

const DESCRIPTOR_DOMAIN: &str = "addrzk/circuit/v1";

/// The statement family of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitKind {
    Membership,
    Structure,
    SelectiveReveal,
    Version,
    Locker,
}

impl CircuitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CircuitKind::Membership => "membership",
            CircuitKind::Structure => "structure",
            CircuitKind::SelectiveReveal => "selective_reveal",
            CircuitKind::Version => "version",
            CircuitKind::Locker => "locker",
        }
    }
}

impl std::fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a circuit: kind, version and an optional verification key
/// published by an external proving service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitDescriptor {
    pub kind: CircuitKind,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_key: Option<String>,
}

impl CircuitDescriptor {
    pub fn new(kind: CircuitKind, version: u32) -> Self {
        Self {
            kind,
            version,
            verification_key: None,
        }
    }

    pub fn with_verification_key(mut self, vk: impl Into<String>) -> Self {
        self.verification_key = Some(vk.into());
        self
    }

    /// Digest identifying this descriptor.
    pub fn digest(&self) -> HexDigest {
        let mut acc = Sha256Accumulator::domain(DESCRIPTOR_DOMAIN);
        acc.field(self.kind.as_str().as_bytes())
            .field(&self.version.to_be_bytes());
        match &self.verification_key {
            Some(vk) => acc.field(&[1]).field(vk.as_bytes()),
            None => acc.field(&[0]),
        };
        acc.finalize()
    }

    /// Fail unless this descriptor is of kind `expected`.
    pub fn require_kind(&self, expected: CircuitKind) -> Result<(), ZkpError> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(ZkpError::CircuitKind {
                expected,
                found: self.kind,
            })
        }
    }
}
