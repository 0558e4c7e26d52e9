use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::pipeline::ScoutRun;

pub const JSON_FILE_NAME: &str = "top_videos_scored.json";

/// Exports the whole run, observation instant included, as pretty JSON.
/// serde_json writes non-finite scores as `null`.
pub fn export_json(run: &ScoutRun, path: &Path) -> Result<PathBuf> {
    let json_data = serde_json::to_string_pretty(run)?;
    std::fs::write(path, json_data)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}
