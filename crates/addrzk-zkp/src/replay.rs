//! # Replay Protection
//!
//! A v2 proof carries a random `proof_id` inside its signed data. A verifier
//! that wants single-use semantics passes a [`ReplayGuard`]. The guard is
//! consulted only after every other check has passed, so a forged proof
//! cannot burn a genuine proof's ID.
//!
//! Persistence across processes is the host's concern. Implement the trait
//! over a shared store for that; [`MemoryReplayGuard`] covers one process.

use std::collections::HashSet;

use parking_lot::Mutex;
use uuid::Uuid;

/// Records proof IDs that have been accepted.
pub trait ReplayGuard: Send + Sync {
    /// Record `proof_id`. Returns `true` if it had not been seen before.
    fn check_and_record(&self, proof_id: &Uuid) -> bool;
}

/// In-memory replay guard.
#[derive(Debug, Default)]
pub struct MemoryReplayGuard {
    seen: Mutex<HashSet<Uuid>>,
}

impl MemoryReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}

impl ReplayGuard for MemoryReplayGuard {
    fn check_and_record(&self, proof_id: &Uuid) -> bool {
        self.seen.lock().insert(*proof_id)
    }
}
