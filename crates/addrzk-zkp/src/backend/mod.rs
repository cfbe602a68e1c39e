//! Circuit proving backends: the [`ProofSystem`] seam, the in-tree mock,
//! and the policy that decides which backends a verifier accepts.

pub mod mock;
pub mod policy;
pub mod traits;

pub use mock::{MockCircuit, MockProof, MockProofSystem, MockProvingKey, MockVerifyingKey};
pub use policy::{PolicyError, PolicyMode, ProofBackend, ProofPolicy};
pub use traits::{ProofError, ProofSystem, VerifyError};
