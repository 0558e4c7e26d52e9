//! Scout Core - Video metadata normalization and educational-value ranking

pub mod duration;
pub mod raw;
pub mod metadata;
pub mod scoring;

pub use duration::ContentDuration;
pub use raw::{RawContentDetails, RawSnippet, RawStatistics, RawVideoRecord, VideoResource};
pub use metadata::{normalize_batch, normalize_record, NormalizedVideo};
pub use scoring::{
    RankedBatch, ScoreWeights, ScoredVideo, Scorer, ScoringConfig, SCORE_WEIGHTS,
};

/// Result type for Scout Core operations
pub type Result<T> = std::result::Result<T, ScoutCoreError>;

/// Error types for Scout Core operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScoutCoreError {
    /// A raw record lacks a required field or carries a value that cannot be read.
    #[error("Malformed record #{index} ({video_id}): bad or missing field `{field}`")]
    MalformedRecord {
        index: usize,
        video_id: String,
        field: &'static str,
    },

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}
