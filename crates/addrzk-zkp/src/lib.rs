//! # addrzk-zkp — Address Privacy Proofs
//!
//! Proves facts about a postal address, or the PID that identifies it,
//! without handing the address to the verifier.
//!
//! ## Address proofs
//!
//! - [`ZkpAddressProver`] builds v2 envelopes ([`ZkpAddressProof`]) bound to
//!   a secret, with an optional selective disclosure of address fields.
//! - [`verify_address_proof`] checks expiry, signature, the algorithm
//!   transcript, disclosure and, if a [`ReplayGuard`] is supplied, single use.
//! - [`LegacyAddressProof`] is the v1 envelope. [`AddressProof::from_json`]
//!   accepts either version.
//!
//! ## Pattern proofs
//!
//! See [`patterns`]: membership, structure, selective reveal, version
//! continuity and locker access.
//!
//! ## Proof-System Seam
//!
//! [`backend::ProofSystem`] is the interface to a general circuit prover.
//! The in-tree [`backend::MockProofSystem`] is a transparent placeholder used
//! by the structure pattern. [`backend::ProofPolicy`] in production mode
//! refuses mock-backed proofs.
//!
//! ## Crate Policy
//!
//! - Verification never returns `Err`. Failures are [`VerifyFailure`] values.
//! - Configuration is an explicit [`ProofConfig`]; no global state.
//! - Secrets, PIDs, locker IDs and address values are never logged.

pub mod address_proof;
pub mod backend;
pub mod circuit;
pub mod config;
pub mod envelope;
pub mod error;
pub mod legacy;
pub mod patterns;
pub mod replay;

pub use address_proof::{
    verify_address_proof, IssuedProof, ProofData, ProofOptions, VerificationResult,
    VerifyOptions, ZkpAddressProof, ZkpAddressProver,
};
pub use circuit::{CircuitDescriptor, CircuitKind};
pub use config::{Algorithm, HierarchyRules, ProofConfig};
pub use envelope::AddressProof;
pub use error::{VerifyFailure, ZkpError};
pub use legacy::LegacyAddressProof;
pub use patterns::PatternVerification;
pub use replay::{MemoryReplayGuard, ReplayGuard};
