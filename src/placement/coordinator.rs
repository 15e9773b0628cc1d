//! One planning cycle: plan replica counts, place every chunk, invert.

use std::collections::{BTreeMap, BTreeSet};

use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PlacementResult;
use crate::hashing::SeaKeyHasher;
use crate::ids::{AccessLog, ChunkId, WorkerId};

use super::planner::plan_replica_counts;
use super::rendezvous::RendezvousHashing;
use super::ring::ConsistentHashRing;
use super::{Assignment, PlacementStrategy};

/// Which placement scheme a planning cycle uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Rendezvous,
    ConsistentRing,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Rendezvous => write!(f, "rendezvous"),
            StrategyKind::ConsistentRing => write!(f, "consistent-ring"),
        }
    }
}

/// Tunables for one planning cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub strategy: StrategyKind,
    /// Requested mean replica count across the whole chunk population.
    pub replication_factor_average: f64,
    /// Minimum replicas per chunk.
    pub lower_bound: usize,
    /// Maximum replicas per chunk; naturally at most the worker count.
    pub upper_bound: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Rendezvous,
            replication_factor_average: 2.0,
            lower_bound: 1,
            upper_bound: 3,
        }
    }
}

/// Compute a fresh [`Assignment`] for one planning cycle.
///
/// Every cycle recomputes from scratch; nothing carries over from a
/// previous assignment. Access weights are read from the log, with
/// missing entries counting as zero.
pub fn compute_assignment(
    workers: &[WorkerId],
    chunks: &[ChunkId],
    access_log: &AccessLog,
    config: &PlacementConfig,
) -> PlacementResult<Assignment> {
    let weights: Vec<u64> = chunks.iter().map(|&c| access_log.frequency(c)).collect();
    let plan = plan_replica_counts(
        chunks,
        &weights,
        config.replication_factor_average,
        config.lower_bound,
        config.upper_bound,
    )?;

    let strategy: Box<dyn PlacementStrategy> = match config.strategy {
        StrategyKind::Rendezvous => Box::new(RendezvousHashing::new(workers, SeaKeyHasher)?),
        StrategyKind::ConsistentRing => Box::new(ConsistentHashRing::new(workers, SeaKeyHasher)?),
    };

    // Placement is pure per chunk, so the loop parallelizes cleanly and
    // the result is independent of scheduling.
    let placed: Vec<(ChunkId, Vec<WorkerId>)> = chunks
        .par_iter()
        .map(|&chunk| {
            let count = plan.get(&chunk).copied().unwrap_or(config.lower_bound);
            (chunk, strategy.place(chunk, count))
        })
        .collect();

    let mut forward: BTreeMap<WorkerId, BTreeSet<ChunkId>> = BTreeMap::new();
    for (chunk, hosts) in placed {
        for worker in hosts {
            forward.entry(worker).or_default().insert(chunk);
        }
    }

    tracing::debug!(
        workers = workers.len(),
        chunks = chunks.len(),
        placements = forward.values().map(BTreeSet::len).sum::<usize>(),
        strategy = %config.strategy,
        "assignment computed"
    );
    Ok(Assignment::from_forward(forward))
}
