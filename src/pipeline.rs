use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use scout_core::{normalize_batch, RankedBatch, Scorer};
use scout_youtube::{create_provider, VideoSearchProvider};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::config::Config;

/// Result of one topic query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutRun {
    pub topic: String,
    pub batch: RankedBatch,
}

impl ScoutRun {
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}

/// Search → fetch → normalize → score → rank, one topic at a time
pub struct ScoutPipeline {
    provider: Box<dyn VideoSearchProvider>,
    scorer: Scorer,
    max_results: u32,
}

impl ScoutPipeline {
    /// Build a pipeline with the provider described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.youtube.provider_config())
            .context("Failed to initialize video search provider")?;
        Ok(Self::new(provider, config))
    }

    pub fn new(provider: Box<dyn VideoSearchProvider>, config: &Config) -> Self {
        info!(
            "🔧 Pipeline using {:?} provider, {} results per query",
            provider.provider_type(),
            config.youtube.max_results
        );

        Self {
            provider,
            scorer: Scorer::new(config.scoring),
            max_results: config.youtube.max_results,
        }
    }

    /// Run a query, observing the clock once for the whole batch
    pub async fn run(&self, topic: &str) -> Result<ScoutRun> {
        let observed_at = Utc::now().naive_utc();
        self.run_at(topic, observed_at).await
    }

    /// Run a query against a fixed observation instant.
    ///
    /// Provider failures give an empty run; a malformed record is an error.
    pub async fn run_at(&self, topic: &str, observed_at: NaiveDateTime) -> Result<ScoutRun> {
        let start_time = Instant::now();
        info!("🚀 Scouting videos for '{}'", topic);

        let empty = || ScoutRun {
            topic: topic.to_string(),
            batch: RankedBatch::empty(observed_at),
        };

        let video_ids = match self.provider.search(topic, self.max_results).await {
            Ok(ids) => ids,
            Err(e) => {
                error!("Search failed for '{}': {}", topic, e);
                return Ok(empty());
            }
        };

        if video_ids.is_empty() {
            warn!("No videos found for '{}'", topic);
            return Ok(empty());
        }

        let records = match self.provider.fetch_details(&video_ids).await {
            Ok(records) => records,
            Err(e) => {
                error!("Fetching video details failed: {}", e);
                return Ok(empty());
            }
        };

        let videos = normalize_batch(&records)
            .with_context(|| format!("Video metadata for '{}' did not match the expected schema", topic))?;

        let batch = self.scorer.rank_batch(&videos, observed_at);

        info!(
            "📊 Ranked {} of {} videos in {:.2}s",
            batch.len(),
            videos.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(ScoutRun {
            topic: topic.to_string(),
            batch,
        })
    }
}
