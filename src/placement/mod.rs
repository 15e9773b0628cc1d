//! Replica planning and chunk-to-worker placement.
//!
//! A planning cycle runs the replica-count planner over the access log,
//! places every chunk with the configured strategy, and inverts the
//! results into an immutable [`Assignment`].

pub mod assignment;
pub mod coordinator;
pub mod planner;
pub mod rendezvous;
pub mod ring;

pub use assignment::Assignment;
pub use coordinator::{compute_assignment, PlacementConfig, StrategyKind};
pub use planner::{plan_replica_counts, ReplicaPlan};
pub use rendezvous::RendezvousHashing;
pub use ring::ConsistentHashRing;

use crate::ids::{ChunkId, WorkerId};

/// One placement scheme: pick the workers that should host a chunk.
///
/// A strategy value is built once per planning cycle from the live
/// worker set and a [`crate::hashing::KeyHasher`]. `place` is a pure
/// function of that state: same workers, chunk, replica count and hash
/// always give the same answer. The returned set holds
/// `min(replica_count, distinct workers)` entries with no duplicates.
pub trait PlacementStrategy: Send + Sync {
    fn place(&self, chunk: ChunkId, replica_count: usize) -> Vec<WorkerId>;
}
