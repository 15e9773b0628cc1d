//! Core identifiers and the externally-owned access log.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a worker node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct WorkerId(pub u64);

/// Identifies a data chunk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ChunkId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-chunk access counters, owned and mutated by the query-simulation
/// side. The planner only reads it; a chunk with no entry counts as zero.
///
/// This is the one piece of state that survives across planning cycles.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    access_frequencies: HashMap<ChunkId, u64>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one access against a chunk.
    pub fn record(&mut self, chunk: ChunkId) {
        *self.access_frequencies.entry(chunk).or_insert(0) += 1;
    }

    pub fn frequency(&self, chunk: ChunkId) -> u64 {
        self.access_frequencies.get(&chunk).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.access_frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.access_frequencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_reads_as_zero() {
        let log = AccessLog::new();
        assert_eq!(log.frequency(ChunkId(42)), 0);
    }

    #[test]
    fn test_record_accumulates() {
        let mut log = AccessLog::new();
        log.record(ChunkId(7));
        log.record(ChunkId(7));
        log.record(ChunkId(9));
        assert_eq!(log.frequency(ChunkId(7)), 2);
        assert_eq!(log.frequency(ChunkId(9)), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(WorkerId(3).to_string(), "3");
        assert_eq!(ChunkId(1234).to_string(), "1234");
    }
}
