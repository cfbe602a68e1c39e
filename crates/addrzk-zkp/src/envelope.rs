//! Version dispatch for serialized address proofs.
//!
//! Verifiers receive JSON and do not know in advance whether it is a v1 or
//! v2 envelope. [`AddressProof::from_json`] reads the `version` field and
//! parses into the matching type.

use serde_json::Value;

use crate::address_proof::{verify_address_proof, VerificationResult, VerifyOptions, ZkpAddressProof};
use crate::error::ZkpError;
use crate::legacy::LegacyAddressProof;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressProof {
    V1(LegacyAddressProof),
    V2(ZkpAddressProof),
}

impl AddressProof {
    /// Parse a v1 or v2 envelope.
    ///
    /// # Errors
    ///
    /// [`ZkpError::UnsupportedVersion`] for any other version number, and
    /// [`ZkpError::InvalidFormat`] for malformed JSON or a missing version.
    pub fn from_json(json: &str) -> Result<Self, ZkpError> {
        let value: Value = serde_json::from_str(json)?;
        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| ZkpError::InvalidFormat("missing numeric version".into()))?;
        match version {
            1 => Ok(AddressProof::V1(serde_json::from_value(value)?)),
            2 => Ok(AddressProof::V2(serde_json::from_value(value)?)),
            other => Err(ZkpError::UnsupportedVersion(other)),
        }
    }

    pub fn to_json(&self) -> Result<String, ZkpError> {
        match self {
            AddressProof::V1(p) => p.to_json(),
            AddressProof::V2(p) => p.to_json(),
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            AddressProof::V1(p) => p.version,
            AddressProof::V2(p) => p.version,
        }
    }

    pub fn verify(&self, options: &VerifyOptions<'_>) -> VerificationResult {
        match self {
            AddressProof::V1(p) => p.verify(options),
            AddressProof::V2(p) => verify_address_proof(p, options),
        }
    }
}

impl From<LegacyAddressProof> for AddressProof {
    fn from(p: LegacyAddressProof) -> Self {
        AddressProof::V1(p)
    }
}

impl From<ZkpAddressProof> for AddressProof {
    fn from(p: ZkpAddressProof) -> Self {
        AddressProof::V2(p)
    }
}
