//! # Merkle Membership Trees
//!
//! Binary SHA-256 Merkle trees with domain-separated hashing:
//!
//! - Leaf: `SHA256(0x00 || data)` via [`leaf_hash()`]. Patterns hash their
//!   set members through this before building a tree.
//! - Node: `SHA256(0x01 || left || right)` via [`node_hash()`].
//!
//! ## Tree shape
//!
//! - An unpaired node at any level is combined with itself (duplicate-last).
//! - A single leaf is its own root.
//! - The empty tree has root `SHA256("")`.
//!
//! Duplicate-last means `[a, b, c]` and `[a, b, c, c]` share a root. Set
//! membership is unaffected, since `c` is a member of both.
//!
//! ## Positions
//!
//! `positions[i]` says where the running node sits at level `i`:
//! [`Side::Left`] (`0`) means the sibling `proof[i]` is on the right and the
//! parent is `node_hash(current, sibling)`. [`Side::Right`] (`1`) is the
//! mirror. Generation and verification share [`combine()`], so the order
//! cannot drift between them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use addrzk_core::HexDigest;

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// `SHA256(0x00 || data)`.
pub fn leaf_hash(data: &[u8]) -> HexDigest {
    let mut h = Sha256::new();
    h.update([LEAF_PREFIX]);
    h.update(data);
    HexDigest::from_bytes(h.finalize().into())
}

/// `SHA256(0x01 || left || right)`.
pub fn node_hash(left: &HexDigest, right: &HexDigest) -> HexDigest {
    let mut h = Sha256::new();
    h.update([NODE_PREFIX]);
    h.update(left.as_bytes());
    h.update(right.as_bytes());
    HexDigest::from_bytes(h.finalize().into())
}

/// Root of the empty tree.
pub fn empty_root() -> HexDigest {
    HexDigest::from_bytes(Sha256::digest(b"").into())
}

/// Position of the running node at one level of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Running node is the left child. Serialized as `0`.
    Left,
    /// Running node is the right child. Serialized as `1`.
    Right,
}

impl Serialize for Side {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Side::Left => 0,
            Side::Right => 1,
        })
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            other => Err(serde::de::Error::custom(format!(
                "merkle position must be 0 or 1, got {other}"
            ))),
        }
    }
}

fn combine(current: &HexDigest, sibling: &HexDigest, side: Side) -> HexDigest {
    match side {
        Side::Left => node_hash(current, sibling),
        Side::Right => node_hash(sibling, current),
    }
}

/// An inclusion proof for `leaf` under `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub leaf: HexDigest,
    pub root: HexDigest,
    pub proof: Vec<HexDigest>,
    pub positions: Vec<Side>,
}

impl MerkleProof {
    /// Verify against the root carried in the proof.
    pub fn verify(&self) -> bool {
        verify_proof(&self.leaf, &self.root, &self.proof, &self.positions)
    }

    /// Verify against an externally published root.
    pub fn verify_against(&self, expected_root: &HexDigest) -> bool {
        self.root == *expected_root && self.verify()
    }
}

/// A Merkle tree that keeps every level, for repeated proof generation over
/// the same leaf set.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    // levels[0] = leaves, last = [root]. Empty when there are no leaves.
    levels: Vec<Vec<HexDigest>>,
}

impl MerkleTree {
    pub fn new(leaves: &[HexDigest]) -> Self {
        if leaves.is_empty() {
            return Self { levels: Vec::new() };
        }
        let mut levels = vec![leaves.to_vec()];
        while let Some(level) = levels.last() {
            if level.len() == 1 {
                break;
            }
            let next: Vec<HexDigest> = level
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    node_hash(left, pair.get(1).unwrap_or(left))
                })
                .collect();
            levels.push(next);
        }
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn root(&self) -> HexDigest {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_else(empty_root)
    }

    /// Proof for the leaf at `index`, or `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<MerkleProof> {
        let leaf = *self.levels.first()?.get(index)?;
        let mut proof = Vec::new();
        let mut positions = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let (sibling_idx, side) = if idx % 2 == 0 {
                (idx + 1, Side::Left)
            } else {
                (idx - 1, Side::Right)
            };
            // Duplicate-last: an unpaired node is its own sibling.
            let sibling = *level.get(sibling_idx).or_else(|| level.get(idx))?;
            proof.push(sibling);
            positions.push(side);
            idx /= 2;
        }
        Some(MerkleProof {
            leaf,
            root: self.root(),
            proof,
            positions,
        })
    }

    /// Proof for the first occurrence of `leaf`, or `None` if absent.
    pub fn proof_for(&self, leaf: &HexDigest) -> Option<MerkleProof> {
        let index = self.levels.first()?.iter().position(|l| l == leaf)?;
        self.proof(index)
    }
}

/// Root of the tree over `leaves`.
pub fn calculate_root(leaves: &[HexDigest]) -> HexDigest {
    MerkleTree::new(leaves).root()
}

/// Inclusion proof for `target`, or `None` when it is not in `leaves`.
pub fn generate_proof(target: &HexDigest, leaves: &[HexDigest]) -> Option<MerkleProof> {
    MerkleTree::new(leaves).proof_for(target)
}

/// Recompute the root from `leaf` along `proof`/`positions` and compare.
pub fn verify_proof(
    leaf: &HexDigest,
    root: &HexDigest,
    proof: &[HexDigest],
    positions: &[Side],
) -> bool {
    if proof.len() != positions.len() {
        return false;
    }
    let computed = proof
        .iter()
        .zip(positions)
        .fold(*leaf, |cur, (sibling, side)| combine(&cur, sibling, *side));
    computed == *root
}
