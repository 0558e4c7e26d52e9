//! Markdown summary of the podium.

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::pipeline::ScoutRun;
use crate::report::{podium_top_score, star_rating};

pub const MARKDOWN_FILE_NAME: &str = "top_3_summary.md";

pub fn render_markdown(run: &ScoutRun) -> String {
    let mut summary = format!("# Top 3 YouTube Videos for '{}'\n\n", run.topic);

    let podium = run.batch.podium();
    if podium.is_empty() {
        summary.push_str("_No videos found._\n");
        return summary;
    }

    let top_score = podium_top_score(podium);
    for video in podium {
        let rating = star_rating(video.final_score, top_score);
        let _ = writeln!(
            summary,
            "#{} — **{}** by *{}*",
            video.rank, video.video.title, video.video.channel
        );
        let _ = writeln!(summary, "🔗 [Watch here]({})", video.video.url);
        let _ = writeln!(summary, "⭐ Score: {:.2} / 5\n", rating);
    }

    summary
}

pub fn export_markdown(run: &ScoutRun, path: &Path) -> Result<PathBuf> {
    std::fs::write(path, render_markdown(run))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
