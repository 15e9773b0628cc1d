//! The two-view placement index handed to downstream consumers.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ids::{ChunkId, WorkerId};

/// Immutable result of one planning cycle.
///
/// The forward view says what each worker should host; the reverse view
/// is derived from it by a single inversion pass at construction and
/// the two can never drift apart: worker `w` appears in
/// `workers_for(c)` exactly when `c` appears in `chunks_for(w)`.
///
/// A new planning cycle builds a brand-new `Assignment`; consumers that
/// care about changes diff the new value against the one they kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    workers: BTreeMap<WorkerId, BTreeSet<ChunkId>>,
    chunks: BTreeMap<ChunkId, BTreeSet<WorkerId>>,
}

impl Assignment {
    /// Build both views from the forward map in one inversion pass.
    pub fn from_forward(workers: BTreeMap<WorkerId, BTreeSet<ChunkId>>) -> Self {
        let mut chunks: BTreeMap<ChunkId, BTreeSet<WorkerId>> = BTreeMap::new();
        for (&worker, held) in &workers {
            for &chunk in held {
                chunks.entry(chunk).or_default().insert(worker);
            }
        }
        Self { workers, chunks }
    }

    /// Target chunk set for one worker. `None` means the cycle assigned
    /// it nothing, which the reconciler treats as an empty target.
    pub fn chunks_for(&self, worker: WorkerId) -> Option<&BTreeSet<ChunkId>> {
        self.workers.get(&worker)
    }

    /// Workers that should hold the given chunk. This is what the query
    /// router picks from.
    pub fn workers_for(&self, chunk: ChunkId) -> Option<&BTreeSet<WorkerId>> {
        self.chunks.get(&chunk)
    }

    pub fn workers(&self) -> &BTreeMap<WorkerId, BTreeSet<ChunkId>> {
        &self.workers
    }

    pub fn chunks(&self) -> &BTreeMap<ChunkId, BTreeSet<WorkerId>> {
        &self.chunks
    }

    /// Total number of (worker, chunk) placements.
    pub fn placement_count(&self) -> usize {
        self.workers.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}
