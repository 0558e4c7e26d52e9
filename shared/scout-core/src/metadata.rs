//! Normalized video metadata and the raw-record normalizer

use crate::{ContentDuration, Result, ScoutCoreError, VideoResource};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
const THUMBNAIL_URL_PREFIX: &str = "https://img.youtube.com/vi/";

/// Canonical per-video record used for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedVideo {
    pub video_id: String,
    pub title: String,
    pub channel: String,

    /// Publish time with any UTC offset dropped
    pub published_at: NaiveDateTime,

    pub views: u64,
    pub likes: u64,
    pub comments: u64,

    /// Content length in minutes, rounded to two decimals
    pub duration_minutes: f64,

    /// `H:MM:SS` / `M:SS` rendering of the duration, display only
    pub duration_label: String,

    pub url: String,
}

impl NormalizedVideo {
    /// Create a normalized video; `url` and `duration_label` are derived
    pub fn new(
        video_id: impl Into<String>,
        title: impl Into<String>,
        channel: impl Into<String>,
        published_at: NaiveDateTime,
        views: u64,
        likes: u64,
        comments: u64,
        duration: ContentDuration,
    ) -> Self {
        let video_id = video_id.into();
        Self {
            url: watch_url(&video_id),
            video_id,
            title: title.into(),
            channel: channel.into(),
            published_at,
            views,
            likes,
            comments,
            duration_minutes: round_to_hundredths(duration.minutes()),
            duration_label: duration.display(),
        }
    }

    /// Preview image for the video
    pub fn thumbnail_url(&self) -> String {
        format!("{}{}/0.jpg", THUMBNAIL_URL_PREFIX, self.video_id)
    }
}

/// Watch page for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, video_id)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize a whole batch, preserving input order.
///
/// The first malformed record aborts the batch; no partial output is returned.
pub fn normalize_batch<R: VideoResource>(records: &[R]) -> Result<Vec<NormalizedVideo>> {
    let videos = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record))
        .collect::<Result<Vec<_>>>()?;

    debug!("Normalized {} video records", videos.len());
    Ok(videos)
}

/// Normalize one record; `index` is its position in the batch and is only
/// used for error reporting
pub fn normalize_record<R: VideoResource>(index: usize, record: &R) -> Result<NormalizedVideo> {
    let malformed = |field: &'static str| ScoutCoreError::MalformedRecord {
        index,
        video_id: record.id().to_string(),
        field,
    };

    let snippet = record.snippet().ok_or_else(|| malformed("snippet"))?;
    let content_details = record
        .content_details()
        .ok_or_else(|| malformed("contentDetails"))?;

    let title = snippet.title.as_deref().ok_or_else(|| malformed("snippet.title"))?;
    let channel = snippet
        .channel_title
        .as_deref()
        .ok_or_else(|| malformed("snippet.channelTitle"))?;
    let published_at = snippet
        .published_at
        .as_deref()
        .and_then(parse_published_at)
        .ok_or_else(|| malformed("snippet.publishedAt"))?;

    let duration = content_details
        .duration
        .as_deref()
        .ok_or_else(|| malformed("contentDetails.duration"))
        .and_then(|raw| {
            ContentDuration::parse(raw).map_err(|_| malformed("contentDetails.duration"))
        })?;

    let stats = record.statistics();
    let count = |value: Option<&String>, field: &'static str| -> Result<u64> {
        match value {
            None => Ok(0),
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| malformed(field)),
        }
    };
    let views = count(stats.and_then(|s| s.view_count.as_ref()), "statistics.viewCount")?;
    let likes = count(stats.and_then(|s| s.like_count.as_ref()), "statistics.likeCount")?;
    let comments = count(
        stats.and_then(|s| s.comment_count.as_ref()),
        "statistics.commentCount",
    )?;

    Ok(NormalizedVideo::new(
        record.id(),
        title,
        channel,
        published_at,
        views,
        likes,
        comments,
        duration,
    ))
}

/// Parse a publish timestamp and drop its offset, keeping the wall-clock
/// part as written. The platform emits UTC (`Z`) timestamps, so this is a
/// UTC-naive value in practice.
pub fn parse_published_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawStatistics, RawVideoRecord};
    use chrono::NaiveDate;

    fn record() -> RawVideoRecord {
        RawVideoRecord::new(
            "vid1",
            "Intro to Rust",
            "Rust Channel",
            "2024-05-01T08:30:00Z",
            "PT10M30S",
        )
        .with_statistics(1000, 50, 5)
    }

    #[test]
    fn test_normalize_complete_record() {
        let video = normalize_record(0, &record()).unwrap();

        assert_eq!(video.video_id, "vid1");
        assert_eq!(video.title, "Intro to Rust");
        assert_eq!(video.channel, "Rust Channel");
        assert_eq!(
            video.published_at,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!((video.views, video.likes, video.comments), (1000, 50, 5));
        assert_eq!(video.duration_minutes, 10.5);
        assert_eq!(video.duration_label, "10:30");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=vid1");
        assert_eq!(video.thumbnail_url(), "https://img.youtube.com/vi/vid1/0.jpg");
    }

    #[test]
    fn test_missing_statistics_default_to_zero() {
        let mut raw = record();
        raw.statistics = Some(RawStatistics {
            view_count: Some("42".to_string()),
            like_count: None,
            comment_count: None,
        });
        let video = normalize_record(0, &raw).unwrap();
        assert_eq!((video.views, video.likes, video.comments), (42, 0, 0));

        raw.statistics = None;
        let video = normalize_record(0, &raw).unwrap();
        assert_eq!((video.views, video.likes, video.comments), (0, 0, 0));
    }

    #[test]
    fn test_duration_rounded_to_hundredths() {
        let mut raw = record();
        raw.content_details.as_mut().unwrap().duration = Some("PT1M1S".to_string());
        let video = normalize_record(0, &raw).unwrap();
        assert_eq!(video.duration_minutes, 1.02);
    }

    #[test]
    fn test_offset_is_dropped_not_converted() {
        let parsed = parse_published_at("2024-05-01T08:30:00+05:00").unwrap();
        assert_eq!(parsed.to_string(), "2024-05-01 08:30:00");

        let naive = parse_published_at("2024-05-01T08:30:00").unwrap();
        assert_eq!(parsed, naive);

        assert!(parse_published_at("yesterday").is_none());
    }

    #[test]
    fn test_missing_snippet_is_malformed() {
        let mut raw = record();
        raw.snippet = None;
        let err = normalize_record(3, &raw).unwrap_err();
        assert_eq!(
            err,
            ScoutCoreError::MalformedRecord {
                index: 3,
                video_id: "vid1".to_string(),
                field: "snippet",
            }
        );
    }

    #[test]
    fn test_bad_fields_name_the_field() {
        let mut raw = record();
        raw.content_details = None;
        assert!(matches!(
            normalize_record(0, &raw),
            Err(ScoutCoreError::MalformedRecord { field: "contentDetails", .. })
        ));

        let mut raw = record();
        raw.content_details.as_mut().unwrap().duration = Some("five minutes".to_string());
        assert!(matches!(
            normalize_record(0, &raw),
            Err(ScoutCoreError::MalformedRecord { field: "contentDetails.duration", .. })
        ));

        let mut raw = record();
        raw.statistics.as_mut().unwrap().like_count = Some("many".to_string());
        assert!(matches!(
            normalize_record(0, &raw),
            Err(ScoutCoreError::MalformedRecord { field: "statistics.likeCount", .. })
        ));
    }

    #[test]
    fn test_batch_preserves_order_and_fails_whole_batch() {
        let a = record();
        let mut b = record();
        b.id = "vid2".to_string();
        let videos = normalize_batch(&[a.clone(), b.clone()]).unwrap();
        let ids: Vec<_> = videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["vid1", "vid2"]);

        b.snippet = None;
        let err = normalize_batch(&[a, b]).unwrap_err();
        assert!(matches!(err, ScoutCoreError::MalformedRecord { index: 1, .. }));
    }

    #[test]
    fn test_empty_batch_is_not_an_error() {
        let records: Vec<RawVideoRecord> = Vec::new();
        assert!(normalize_batch(&records).unwrap().is_empty());
    }
}
