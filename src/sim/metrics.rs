//! Per-epoch reconciliation and query metrics.

use std::collections::BTreeMap;

use crate::ids::{ChunkId, WorkerId};

/// Counters for one epoch, reset after each summary.
#[derive(Debug, Default)]
pub struct Metrics {
    fetched_by_worker: BTreeMap<WorkerId, usize>,
    dropped_total: usize,
    queries_processed: usize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_worker_fetched(&mut self, worker: WorkerId, fetched: usize, dropped: usize) {
        *self.fetched_by_worker.entry(worker).or_insert(0) += fetched;
        self.dropped_total += dropped;
    }

    pub fn report_query_processed(&mut self, _worker: WorkerId, _chunk: ChunkId) {
        self.queries_processed += 1;
    }

    pub fn queries_processed(&self) -> usize {
        self.queries_processed
    }

    pub fn fetches_for(&self, worker: WorkerId) -> usize {
        self.fetched_by_worker.get(&worker).copied().unwrap_or(0)
    }

    /// Log the epoch summary: how much the fleet had to fetch and how
    /// evenly the fetching spread across workers.
    pub fn dump(&self, epoch: usize) {
        let total: usize = self.fetched_by_worker.values().sum();
        let max = self
            .fetched_by_worker
            .values()
            .copied()
            .max()
            .unwrap_or(0);
        let mean = if self.fetched_by_worker.is_empty() {
            0.0
        } else {
            total as f64 / self.fetched_by_worker.len() as f64
        };
        tracing::info!(
            epoch,
            queries = self.queries_processed,
            fetches_total = total,
            fetches_mean = mean,
            fetches_max = max,
            dropped = self.dropped_total,
            "epoch summary"
        );
    }

    pub fn reset(&mut self) {
        self.fetched_by_worker.clear();
        self.dropped_total = 0;
        self.queries_processed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_counts_accumulate_per_worker() {
        let mut metrics = Metrics::new();
        metrics.report_worker_fetched(WorkerId(0), 5, 1);
        metrics.report_worker_fetched(WorkerId(0), 2, 0);
        metrics.report_worker_fetched(WorkerId(1), 3, 0);
        assert_eq!(metrics.fetches_for(WorkerId(0)), 7);
        assert_eq!(metrics.fetches_for(WorkerId(1)), 3);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut metrics = Metrics::new();
        metrics.report_worker_fetched(WorkerId(0), 5, 2);
        metrics.report_query_processed(WorkerId(0), ChunkId(1));
        metrics.reset();
        assert_eq!(metrics.fetches_for(WorkerId(0)), 0);
        assert_eq!(metrics.queries_processed(), 0);
    }
}
