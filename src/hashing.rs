//! Stable key hashing shared by both placement strategies.
//!
//! Placement must reproduce bit-identically across runs and processes,
//! so the default hasher is seahash rather than the std `DefaultHasher`,
//! whose output is seeded per process.

use crate::ids::{ChunkId, WorkerId};

/// A deterministic, process-stable mapping from a key to a 64-bit value.
///
/// The canonical key forms are the decimal id for a single worker or
/// chunk and `"{chunk}:{worker}"` for the combined rendezvous key.
/// Changing either the key format or the hash changes every placement,
/// so treat them as versioned.
pub trait KeyHasher: Send + Sync {
    fn hash_key(&self, key: &str) -> u64;

    /// Combined hash used by rendezvous scoring.
    fn hash_pair(&self, chunk: ChunkId, worker: WorkerId) -> u64 {
        self.hash_key(&format!("{chunk}:{worker}"))
    }

    fn hash_chunk(&self, chunk: ChunkId) -> u64 {
        self.hash_key(&chunk.to_string())
    }

    fn hash_worker(&self, worker: WorkerId) -> u64 {
        self.hash_key(&worker.to_string())
    }
}

/// seahash-backed hasher, the crate's placement hash v1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaKeyHasher;

impl KeyHasher for SeaKeyHasher {
    fn hash_key(&self, key: &str) -> u64 {
        seahash::hash(key.as_bytes())
    }
}
