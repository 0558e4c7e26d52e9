//! Educational-value scoring and ranking of a video batch
//!
//! Scoring is relative to the batch: each rate metric is min-max scaled
//! against the other videos of the same query, the scaled metrics are
//! combined with fixed weights, short-form clips are dropped and the
//! survivors are re-ranked.

use crate::NormalizedVideo;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Offset added to the duration (minutes) before dividing comments by it
const COMMENT_RATE_DURATION_OFFSET: f64 = 0.1;

/// Offset added to the age (days) before dividing views by it
const VIEW_RATE_AGE_OFFSET: i64 = 1;

/// Scale applied to the weighted sum so scores read as 0..10
const SCORE_SCALE: f64 = 10.0;

/// Default number of podium entries
pub const PODIUM_SIZE: usize = 3;

/// Default number of suggestions shown after the podium
pub const RUNNERS_UP_SIZE: usize = 2;

/// Weights of the four normalized signals in the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub likes_per_view: f64,
    pub comments_per_minute: f64,
    pub views_per_day: f64,
    pub views: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.likes_per_view + self.comments_per_minute + self.views_per_day + self.views
    }
}

pub const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
    likes_per_view: 0.3,
    comments_per_minute: 0.2,
    views_per_day: 0.3,
    views: 0.2,
};

/// Tunable constants of the scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Videos shorter than this many minutes are dropped after scoring
    pub duration_threshold_minutes: f64,

    /// Added to `max - min` so an all-equal column scales to 0
    pub normalization_epsilon: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            duration_threshold_minutes: 1.01,
            normalization_epsilon: 1e-9,
        }
    }
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration_threshold(mut self, minutes: f64) -> Self {
        self.duration_threshold_minutes = minutes;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.normalization_epsilon = epsilon;
        self
    }
}

/// A normalized video with its derived metrics, composite score and rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVideo {
    #[serde(flatten)]
    pub video: NormalizedVideo,

    /// Whole days between publishing and the observation instant
    pub age_in_days: i64,

    /// `likes / views`; NaN or infinite when `views == 0`
    pub likes_per_view: f64,
    pub comments_per_minute: f64,
    pub views_per_day: f64,

    pub norm_likes_per_view: f64,
    pub norm_comments_per_minute: f64,
    pub norm_views_per_day: f64,
    pub norm_views: f64,

    pub final_score: f64,

    /// 1 = best. Zero until the batch has been filtered and ranked.
    pub rank: u32,
}

impl ScoredVideo {
    pub fn has_finite_score(&self) -> bool {
        self.final_score.is_finite()
    }
}

/// Filtered, ranked output of one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBatch {
    /// Instant used for every recency calculation in the batch
    pub observed_at: NaiveDateTime,

    /// Ranked videos, best first
    pub videos: Vec<ScoredVideo>,

    /// How many videos the duration filter removed
    pub excluded_short_form: usize,
}

impl RankedBatch {
    pub fn empty(observed_at: NaiveDateTime) -> Self {
        Self {
            observed_at,
            videos: Vec::new(),
            excluded_short_form: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// The best `n` videos (fewer if the batch is smaller)
    pub fn top(&self, n: usize) -> &[ScoredVideo] {
        &self.videos[..n.min(self.videos.len())]
    }

    /// `n` videos after skipping the first `skip`
    pub fn window(&self, skip: usize, n: usize) -> &[ScoredVideo] {
        let start = skip.min(self.videos.len());
        let end = skip.saturating_add(n).min(self.videos.len());
        &self.videos[start..end]
    }

    pub fn podium(&self) -> &[ScoredVideo] {
        self.top(PODIUM_SIZE)
    }

    pub fn runners_up(&self) -> &[ScoredVideo] {
        self.window(PODIUM_SIZE, RUNNERS_UP_SIZE)
    }

    /// Score of the rank 1 video, if there is one
    pub fn best_score(&self) -> Option<f64> {
        self.videos.first().map(|v| v.final_score)
    }
}

/// Batch scorer and ranker
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score, filter and rank a batch against one observation instant
    pub fn rank_batch(&self, videos: &[NormalizedVideo], observed_at: NaiveDateTime) -> RankedBatch {
        let scored = self.score_batch(videos, observed_at);
        let before = scored.len();

        // Filtering happens after scoring: short clips still shape the
        // min/max of every normalized column.
        let kept = self.filter_short_form(scored);
        let excluded_short_form = before - kept.len();

        let videos = rank(kept);
        debug!(
            "Ranked {} videos ({} short-form excluded)",
            videos.len(),
            excluded_short_form
        );

        RankedBatch {
            observed_at,
            videos,
            excluded_short_form,
        }
    }

    /// Compute the derived metrics, batch-normalized metrics and composite
    /// score of every video. Input order is kept and ranks are left at 0.
    pub fn score_batch(&self, videos: &[NormalizedVideo], observed_at: NaiveDateTime) -> Vec<ScoredVideo> {
        let epsilon = self.config.normalization_epsilon;

        let mut scored: Vec<ScoredVideo> = videos
            .iter()
            .map(|video| derive_metrics(video, observed_at))
            .collect();

        let non_finite = scored.iter().filter(|v| !v.likes_per_view.is_finite()).count();
        if non_finite > 0 {
            warn!("{} video(s) have no views; their scores rank last", non_finite);
        }

        let columns = [
            column(&scored, |v| v.likes_per_view),
            column(&scored, |v| v.comments_per_minute),
            column(&scored, |v| v.views_per_day),
            column(&scored, |v| v.video.views as f64),
        ]
        .map(|values| min_max_normalize(&values, epsilon));

        for (i, video) in scored.iter_mut().enumerate() {
            video.norm_likes_per_view = columns[0][i];
            video.norm_comments_per_minute = columns[1][i];
            video.norm_views_per_day = columns[2][i];
            video.norm_views = columns[3][i];
            video.final_score = composite_score(video);
        }

        scored
    }

    /// Drop videos shorter than the duration threshold
    pub fn filter_short_form(&self, videos: Vec<ScoredVideo>) -> Vec<ScoredVideo> {
        let threshold = self.config.duration_threshold_minutes;
        videos
            .into_iter()
            .filter(|v| v.video.duration_minutes >= threshold)
            .collect()
    }
}

fn derive_metrics(video: &NormalizedVideo, observed_at: NaiveDateTime) -> ScoredVideo {
    let age_in_days = age_in_days(video.published_at, observed_at);
    let views = video.views as f64;

    ScoredVideo {
        video: video.clone(),
        age_in_days,
        likes_per_view: video.likes as f64 / views,
        comments_per_minute: video.comments as f64
            / (video.duration_minutes + COMMENT_RATE_DURATION_OFFSET),
        views_per_day: views / (age_in_days + VIEW_RATE_AGE_OFFSET) as f64,
        norm_likes_per_view: 0.0,
        norm_comments_per_minute: 0.0,
        norm_views_per_day: 0.0,
        norm_views: 0.0,
        final_score: 0.0,
        rank: 0,
    }
}

/// Floored whole days from `published_at` to `observed_at`, never negative
pub fn age_in_days(published_at: NaiveDateTime, observed_at: NaiveDateTime) -> i64 {
    observed_at
        .signed_duration_since(published_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
        .max(0)
}

fn column(videos: &[ScoredVideo], metric: impl Fn(&ScoredVideo) -> f64) -> Vec<f64> {
    videos.iter().map(metric).collect()
}

/// `(value - min) / (max - min + epsilon)` with the bounds taken over every
/// non-NaN value of the column, infinities included. An infinite bound
/// collapses the finite values of the column to 0. Non-finite values map to
/// NaN; an all-equal column maps to 0.
pub fn min_max_normalize(values: &[f64], epsilon: f64) -> Vec<f64> {
    let bounds = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    let Some((min, max)) = bounds else {
        return vec![f64::NAN; values.len()];
    };

    values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                (v - min) / (max - min + epsilon)
            } else {
                f64::NAN
            }
        })
        .collect()
}

fn composite_score(video: &ScoredVideo) -> f64 {
    let w = SCORE_WEIGHTS;
    (video.norm_likes_per_view * w.likes_per_view
        + video.norm_comments_per_minute * w.comments_per_minute
        + video.norm_views_per_day * w.views_per_day
        + video.norm_views * w.views)
        * SCORE_SCALE
}

/// Ranking order of two scores: finite scores descending, then every
/// non-finite score. Equal keys compare `Equal` so a stable sort keeps
/// input order.
pub fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Stable-sort by score and number the result 1..=N
pub fn rank(mut videos: Vec<ScoredVideo>) -> Vec<ScoredVideo> {
    videos.sort_by(|a, b| compare_scores(a.final_score, b.final_score));
    for (position, video) in videos.iter_mut().enumerate() {
        video.rank = position as u32 + 1;
    }
    videos
}
