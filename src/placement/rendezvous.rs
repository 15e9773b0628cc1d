//! Rendezvous (highest-random-weight) placement.

use crate::error::{PlacementError, PlacementResult};
use crate::hashing::KeyHasher;
use crate::ids::{ChunkId, WorkerId};

use super::PlacementStrategy;

/// Scores every worker against the chunk and keeps the workers with the
/// smallest combined hashes.
///
/// Removing or adding one worker only disturbs chunks whose winning set
/// included (or comes to include) that worker; every other chunk keeps
/// its placement byte for byte.
pub struct RendezvousHashing<H> {
    workers: Vec<WorkerId>,
    hasher: H,
}

impl<H: KeyHasher> RendezvousHashing<H> {
    pub fn new(workers: &[WorkerId], hasher: H) -> PlacementResult<Self> {
        if workers.is_empty() {
            return Err(PlacementError::EmptyWorkerSet);
        }
        let mut workers = workers.to_vec();
        workers.sort_unstable();
        workers.dedup();
        Ok(Self { workers, hasher })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

impl<H: KeyHasher> PlacementStrategy for RendezvousHashing<H> {
    fn place(&self, chunk: ChunkId, replica_count: usize) -> Vec<WorkerId> {
        let mut scored: Vec<(u64, WorkerId)> = self
            .workers
            .iter()
            .map(|&w| (self.hasher.hash_pair(chunk, w), w))
            .collect();
        // Tuple order breaks hash ties by worker id, so selection stays
        // deterministic even under collisions.
        scored.sort_unstable();
        scored.truncate(replica_count.min(self.workers.len()));
        scored.into_iter().map(|(_, w)| w).collect()
    }
}
