//! Weighted replica-count planning (water-filling).

use std::collections::HashMap;

use crate::error::{PlacementError, PlacementResult};
use crate::ids::ChunkId;

/// Target replica count per chunk for one planning cycle.
pub type ReplicaPlan = HashMap<ChunkId, usize>;

/// Decide how many replicas each chunk should get.
///
/// `weights` are observed access counts, index-aligned with `chunk_ids`.
/// The population mean stays close to `average` while every count is
/// held inside `[lower_bound, upper_bound]`; replicas above the floor
/// are handed out in proportion to weight. Precedence:
///
/// 1. `average <= lower_bound`: every chunk gets the floor.
/// 2. `average >= upper_bound`: every chunk gets the ceiling.
/// 3. zero total weight: every chunk gets `round(average)`, unclamped.
/// 4. water-filling over the remaining budget, clamped to the ceiling
///    if any count overflows it.
pub fn plan_replica_counts(
    chunk_ids: &[ChunkId],
    weights: &[u64],
    average: f64,
    lower_bound: usize,
    upper_bound: usize,
) -> PlacementResult<ReplicaPlan> {
    if weights.len() != chunk_ids.len() {
        return Err(PlacementError::WeightsLengthMismatch {
            chunks: chunk_ids.len(),
            weights: weights.len(),
        });
    }
    if lower_bound > upper_bound {
        return Err(PlacementError::InvalidBounds {
            lower: lower_bound,
            upper: upper_bound,
        });
    }

    if average <= lower_bound as f64 {
        return Ok(chunk_ids.iter().map(|&c| (c, lower_bound)).collect());
    }
    if average >= upper_bound as f64 {
        return Ok(chunk_ids.iter().map(|&c| (c, upper_bound)).collect());
    }

    let total_weight: u64 = weights.iter().sum();
    if total_weight == 0 {
        // Kept anomaly: the rounded average is not clamped back into
        // the bounds. See DESIGN.md before changing this.
        tracing::warn!(
            average,
            "zero total access weight; assigning round(average) to every chunk, unclamped"
        );
        let count = average.round() as usize;
        return Ok(chunk_ids.iter().map(|&c| (c, count)).collect());
    }

    // Water-filling: every chunk starts at the floor, and the replica
    // budget above it is split proportionally to weight.
    let n = chunk_ids.len();
    let budget = average * n as f64 - (lower_bound * n) as f64;
    let per_weight = budget / total_weight as f64;

    let mut plan: ReplicaPlan = chunk_ids
        .iter()
        .zip(weights)
        .map(|(&c, &w)| (c, lower_bound + (w as f64 * per_weight).round() as usize))
        .collect();

    if plan.values().any(|&count| count > upper_bound) {
        tracing::warn!(
            upper_bound,
            "replica budget overflow; clamping counts to the upper bound, proportionality to access weight is lost"
        );
        for count in plan.values_mut() {
            *count = (*count).min(upper_bound);
        }
    }

    Ok(plan)
}
