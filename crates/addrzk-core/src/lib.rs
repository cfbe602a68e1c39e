//! # addrzk-core — Foundational Types for Address Privacy Proofs
//!
//! The leaf of the workspace dependency graph. Every proof object produced
//! by `addrzk-crypto` and `addrzk-zkp` is built out of the types defined here.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** Every structured value that is hashed or
//!    MACed flows through `CanonicalBytes::new()` (JCS, RFC 8785). Prover and
//!    verifier therefore recompute byte-identical inputs regardless of which
//!    process serialized the proof for transport.
//!
//! 2. **`HexDigest` for every public hash.** A fixed 32-byte value that
//!    serializes as 64 lowercase hex characters and compares in constant time.
//!
//! 3. **UTC-only timestamps.** `Timestamp` is second-precision with a `Z`
//!    suffix, so `verified_at` / `expires_at` canonicalize deterministically.
//!
//! 4. **Newtypes for identifiers.** `Pid`, `CountryCode` and `FacilityId`
//!    cannot be confused with one another or with free-form address fields.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `addrzk-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use address::AddressInput;
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, HexDigest, Sha256Accumulator, DIGEST_LEN};
pub use error::{CanonicalizationError, CoreError};
pub use identity::{CountryCode, FacilityId, Pid};
pub use temporal::Timestamp;
