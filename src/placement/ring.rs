//! Consistent-hash ring placement.

use crate::error::{PlacementError, PlacementResult};
use crate::hashing::KeyHasher;
use crate::ids::{ChunkId, WorkerId};

use super::PlacementStrategy;

/// Maps workers onto a circular 64-bit hash space and assigns each
/// chunk to the workers found walking clockwise from its own hash.
///
/// The ring is built at construction; a new worker set means a new
/// ring, which is how each planning cycle uses it anyway.
pub struct ConsistentHashRing<H> {
    // Sorted (hash, worker) positions; each distinct worker appears once.
    ring: Vec<(u64, WorkerId)>,
    distinct_workers: usize,
    hasher: H,
}

impl<H: KeyHasher> ConsistentHashRing<H> {
    pub fn new(workers: &[WorkerId], hasher: H) -> PlacementResult<Self> {
        if workers.is_empty() {
            return Err(PlacementError::EmptyWorkerSet);
        }
        let mut workers = workers.to_vec();
        workers.sort_unstable();
        workers.dedup();
        let mut ring: Vec<(u64, WorkerId)> = workers
            .iter()
            .map(|&w| (hasher.hash_worker(w), w))
            .collect();
        ring.sort_unstable();
        Ok(Self {
            distinct_workers: workers.len(),
            ring,
            hasher,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.distinct_workers
    }
}

impl<H: KeyHasher> PlacementStrategy for ConsistentHashRing<H> {
    fn place(&self, chunk: ChunkId, replica_count: usize) -> Vec<WorkerId> {
        // Never hand out more copies than there are distinct workers;
        // walking further would only revisit them.
        let want = replica_count.min(self.distinct_workers);
        let mut chosen: Vec<WorkerId> = Vec::with_capacity(want);
        if want == 0 {
            return chosen;
        }

        let key = self.hasher.hash_chunk(chunk);
        // First position at or past the chunk's hash, wrapping to 0.
        let start = self.ring.partition_point(|&(h, _)| h < key) % self.ring.len();

        let mut idx = start;
        while chosen.len() < want {
            let (_, worker) = self.ring[idx];
            if !chosen.contains(&worker) {
                chosen.push(worker);
            }
            idx = (idx + 1) % self.ring.len();
        }
        chosen
    }
}
