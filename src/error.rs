use thiserror::Error;

/// Configuration errors abort a planning cycle before any placement
/// work begins; there is no partial output to salvage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("No workers available for placement")]
    EmptyWorkerSet,

    #[error("Invalid replica bounds: lower {lower} > upper {upper}")]
    InvalidBounds { lower: usize, upper: usize },

    #[error("Weights length {weights} does not match chunk count {chunks}")]
    WeightsLengthMismatch { chunks: usize, weights: usize },
}

pub type PlacementResult<T> = Result<T, PlacementError>;

impl serde::Serialize for PlacementError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
