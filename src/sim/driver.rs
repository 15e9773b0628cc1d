//! Discrete-epoch simulation loop.

use std::collections::BTreeMap;

use indicatif::ProgressBar;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::PlacementResult;
use crate::ids::{AccessLog, ChunkId, WorkerId};
use crate::placement::{compute_assignment, PlacementConfig};

use super::client;
use super::metrics::Metrics;
use super::worker::SimWorker;

#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub workers_num: usize,
    pub chunks_num: usize,
    pub clients_num: usize,
    pub epochs: usize,
    pub new_chunks_per_epoch: usize,
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            workers_num: 100,
            chunks_num: 100_000,
            clients_num: 1000,
            epochs: 10,
            new_chunks_per_epoch: 0,
            seed: 42,
        }
    }
}

/// Run the full simulation: replan, reconcile, query, evolve.
///
/// The access log is the only state that survives from one epoch to the
/// next, so query traffic observed in epoch `e` biases the replica
/// counts planned in epoch `e + 1`.
pub fn simulate(params: &SimulationParams, config: &PlacementConfig) -> PlacementResult<()> {
    let mut metrics = Metrics::new();
    let worker_ids: Vec<WorkerId> = (0..params.workers_num as u64).map(WorkerId).collect();
    let mut workers: BTreeMap<WorkerId, SimWorker> = worker_ids
        .iter()
        .map(|&id| (id, SimWorker::new(id)))
        .collect();
    let mut chunks: Vec<ChunkId> = (0..params.chunks_num as u64).map(ChunkId).collect();
    let mut access_log = AccessLog::new();
    let mut rng = StdRng::seed_from_u64(params.seed);

    let bar = ProgressBar::new(params.epochs as u64);
    for epoch in 0..params.epochs {
        tracing::debug!(epoch, "generating assignment");
        let assignment = compute_assignment(&worker_ids, &chunks, &access_log, config)?;

        tracing::debug!(epoch, "assigning chunks to workers");
        for (&id, worker) in workers.iter_mut() {
            let target = assignment.chunks_for(id).cloned().unwrap_or_default();
            let outcome = worker.apply(target);
            metrics.report_worker_fetched(id, outcome.fetched, outcome.dropped);
        }

        tracing::debug!(epoch, "simulating client requests");
        for _ in 0..params.clients_num {
            for chunk in client::generate_query(&chunks, &mut rng) {
                let Some(holders) = assignment.workers_for(chunk) else {
                    continue;
                };
                // Uniform pick among the chunk's current holders.
                if let Some(&winner) = holders.iter().choose(&mut rng) {
                    if let Some(worker) = workers.get(&winner) {
                        worker.serve(chunk);
                        metrics.report_query_processed(winner, chunk);
                    }
                }
                access_log.record(chunk);
            }
        }

        metrics.dump(epoch);
        metrics.reset();

        tracing::debug!(epoch, "simulating environment changes");
        let next = chunks.len() as u64;
        chunks.extend((next..next + params.new_chunks_per_epoch as u64).map(ChunkId));
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(())
}
