//! Synthetic client query generation.

use rand::prelude::*;

use crate::ids::ChunkId;

/// Queries each client issues per epoch.
pub const QUERIES_PER_BATCH: usize = 50;

/// Draw one client's batch of uniform-random chunk queries.
pub fn generate_query<R: Rng>(chunks: &[ChunkId], rng: &mut R) -> Vec<ChunkId> {
    (0..QUERIES_PER_BATCH)
        .filter_map(|_| chunks.choose(rng).copied())
        .collect()
}
