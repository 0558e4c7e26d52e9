//! Spreadsheet export: one row per ranked video with every metric.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pipeline::ScoutRun;

pub const CSV_FILE_NAME: &str = "top_videos_scored.csv";

const HEADER: [&str; 19] = [
    "rank",
    "title",
    "channel",
    "published_at",
    "views",
    "likes",
    "comments",
    "duration_minutes",
    "duration",
    "video_id",
    "url",
    "likes_per_view",
    "comments_per_minute",
    "views_per_day",
    "norm_likes_per_view",
    "norm_comments_per_minute",
    "norm_views_per_day",
    "norm_views",
    "final_score",
];

/// Exports the ranked batch to a CSV file.
///
/// Non-finite metrics are written as `NaN` / `inf`.
pub fn export_csv(run: &ScoutRun, path: &Path) -> Result<PathBuf> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_csv(run, file)?;
    Ok(path.to_path_buf())
}

/// Writes the CSV rows to any writer; returns the number of records written
pub fn write_csv<W: Write>(run: &ScoutRun, output: W) -> Result<usize> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(HEADER)?;

    for scored in &run.batch.videos {
        let video = &scored.video;
        writer.write_record([
            scored.rank.to_string(),
            video.title.clone(),
            video.channel.clone(),
            video.published_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            video.views.to_string(),
            video.likes.to_string(),
            video.comments.to_string(),
            video.duration_minutes.to_string(),
            video.duration_label.clone(),
            video.video_id.clone(),
            video.url.clone(),
            scored.likes_per_view.to_string(),
            scored.comments_per_minute.to_string(),
            scored.views_per_day.to_string(),
            scored.norm_likes_per_view.to_string(),
            scored.norm_comments_per_minute.to_string(),
            scored.norm_views_per_day.to_string(),
            scored.norm_views.to_string(),
            scored.final_score.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(run.batch.videos.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scout_core::RankedBatch;

    #[test]
    fn test_header_only_for_empty_run() {
        let observed_at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let run = ScoutRun {
            topic: "nothing".to_string(),
            batch: RankedBatch::empty(observed_at),
        };

        let mut buffer = Vec::new();
        assert_eq!(write_csv(&run, &mut buffer).unwrap(), 0);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with("norm_views,final_score\n"));
    }
}
