//! # addrzk-crypto — Cryptographic Primitives
//!
//! The building blocks every address proof is made from:
//!
//! - **Hash / MAC / randomness** ([`hash`]): SHA-256, domain-separated
//!   transcripts, HMAC-SHA-256 with constant-time verification, and an OS
//!   CSPRNG that reports failure instead of panicking.
//! - **Pedersen commitments** ([`pedersen`]) over Ristretto255.
//! - **Schnorr proofs of knowledge** ([`schnorr`]) over the same group, with
//!   secret-aware verification gated behind [`SecretVerifier`].
//! - **Merkle membership** ([`merkle`]) with `0x00`/`0x01` leaf/node
//!   domain separation.
//! - **Selective disclosure** ([`disclosure`]) of address fields.
//!
//! ## Crate Policy
//!
//! - Depends only on `addrzk-core` internally.
//! - Verification functions are predicates: they return `bool` (or a
//!   verification struct) and never `Err` for adversarial input.
//! - No mocking of cryptographic operations in tests.

pub mod disclosure;
pub mod error;
pub mod group;
pub mod hash;
pub mod merkle;
pub mod pedersen;
pub mod schnorr;
pub mod secret;

pub use disclosure::{DisclosureVerification, SelectiveDisclosure};
pub use error::CryptoError;
pub use hash::{hash, hash_parts, mac, random_bytes, random_hex, verify_mac};
pub use merkle::{MerkleProof, MerkleTree, Side};
pub use pedersen::{Blinding, PedersenCommitment};
pub use schnorr::{SchnorrProof, SecretVerifier};
pub use secret::Secret;
