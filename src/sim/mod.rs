//! Discrete-epoch simulation around the placement core.
//!
//! Each epoch replans the whole assignment, reconciles every simulated
//! worker against its new target set, routes synthetic client queries
//! through the reverse map, and feeds the resulting access counts back
//! into the next epoch's planner.

pub mod client;
pub mod driver;
pub mod metrics;
pub mod worker;

pub use driver::{simulate, SimulationParams};
pub use metrics::Metrics;
pub use worker::{ReconcileOutcome, SimWorker};
