//! Tube Scout
//!
//! Finds videos for a topic, scores their educational value from engagement
//! and recency signals, and ranks them relative to the rest of the batch.

pub mod config;
pub mod export;
pub mod pipeline;
pub mod report;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder, ExportFormat};
pub use crate::export::export_run;
pub use crate::pipeline::{ScoutPipeline, ScoutRun};
pub use scout_core::{NormalizedVideo, RankedBatch, ScoredVideo, Scorer, ScoringConfig};
pub use scout_youtube::{ProviderConfig, ProviderType, VideoSearchProvider};
