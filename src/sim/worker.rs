//! Simulated worker node holding a chunk set between epochs.

use std::collections::BTreeSet;

use crate::ids::{ChunkId, WorkerId};

/// What reconciling one worker against its new target set cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub fetched: usize,
    pub dropped: usize,
}

pub struct SimWorker {
    id: WorkerId,
    chunks: BTreeSet<ChunkId>,
}

impl SimWorker {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            chunks: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    pub fn held(&self) -> &BTreeSet<ChunkId> {
        &self.chunks
    }

    /// Diff the target against the held set, then adopt the target.
    pub fn apply(&mut self, target: BTreeSet<ChunkId>) -> ReconcileOutcome {
        let fetched = target.difference(&self.chunks).count();
        let dropped = self.chunks.difference(&target).count();
        self.chunks = target;
        ReconcileOutcome { fetched, dropped }
    }

    /// Serve one query. The router only sends queries for chunks the
    /// worker was assigned; that contract is checked here, not in the
    /// placement core.
    pub fn serve(&self, chunk: ChunkId) {
        debug_assert!(
            self.chunks.contains(&chunk),
            "worker {} was routed chunk {} it does not hold",
            self.id,
            chunk
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_set(ids: &[u64]) -> BTreeSet<ChunkId> {
        ids.iter().map(|&c| ChunkId(c)).collect()
    }

    #[test]
    fn test_first_assignment_fetches_everything() {
        let mut worker = SimWorker::new(WorkerId(0));
        let outcome = worker.apply(chunk_set(&[1, 2, 3]));
        assert_eq!(
            outcome,
            ReconcileOutcome {
                fetched: 3,
                dropped: 0
            }
        );
        assert_eq!(worker.held(), &chunk_set(&[1, 2, 3]));
    }

    #[test]
    fn test_reconcile_diffs_both_ways() {
        let mut worker = SimWorker::new(WorkerId(0));
        worker.apply(chunk_set(&[1, 2, 3]));
        // Keep 2 and 3, drop 1, fetch 4 and 5.
        let outcome = worker.apply(chunk_set(&[2, 3, 4, 5]));
        assert_eq!(
            outcome,
            ReconcileOutcome {
                fetched: 2,
                dropped: 1
            }
        );
    }

    #[test]
    fn test_identical_target_is_free() {
        let mut worker = SimWorker::new(WorkerId(0));
        worker.apply(chunk_set(&[7, 8]));
        let outcome = worker.apply(chunk_set(&[7, 8]));
        assert_eq!(
            outcome,
            ReconcileOutcome {
                fetched: 0,
                dropped: 0
            }
        );
    }
}
