//! Export of a ranked run to files.
//!
//! Exporters only read the ranked batch; none of them feed back into scoring.

mod csv;
mod json;
mod markdown;

pub use self::csv::{export_csv, write_csv, CSV_FILE_NAME};
pub use self::json::{export_json, JSON_FILE_NAME};
pub use self::markdown::{export_markdown, render_markdown, MARKDOWN_FILE_NAME};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ExportFormat;
use crate::pipeline::ScoutRun;

/// Write `run` in every requested format into `output_dir`.
///
/// Returns the paths written, in the order of `formats`.
pub fn export_run(run: &ScoutRun, output_dir: &Path, formats: &[ExportFormat]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = match format {
            ExportFormat::Csv => export_csv(run, &output_dir.join(CSV_FILE_NAME))?,
            ExportFormat::Markdown => export_markdown(run, &output_dir.join(MARKDOWN_FILE_NAME))?,
            ExportFormat::Json => export_json(run, &output_dir.join(JSON_FILE_NAME))?,
        };
        info!("📁 Exported {:?} to {}", format, path.display());
        written.push(path);
    }

    Ok(written)
}
