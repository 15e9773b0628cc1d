pub mod error;
pub mod hashing;
pub mod ids;
pub mod placement;
pub mod sim;

pub use error::{PlacementError, PlacementResult};
pub use hashing::{KeyHasher, SeaKeyHasher};
pub use ids::{AccessLog, ChunkId, WorkerId};
pub use placement::{
    compute_assignment, Assignment, PlacementConfig, PlacementStrategy, StrategyKind,
};
