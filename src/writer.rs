//! Rendering summaries for the console and writing `.summary` files

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{FileReport, Summary};

/// Suffix appended to the source file name for summary files
pub const DEFAULT_SUMMARY_SUFFIX: &str = ".summary";

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One entry per line, year first
    Text,
    /// One JSON object per file
    Json { pretty: bool },
}

/// Path of the summary file for a source file: the source name plus `suffix`
///
/// `baby1990.html` becomes `baby1990.html.summary`.
pub fn summary_path(source: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = source.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Write the newline-joined result sequence next to the source file
///
/// Returns the path that was written.
pub fn write_summary_file(source: &Path, summary: &Summary, suffix: &str) -> Result<PathBuf> {
    let target = summary_path(source, suffix);
    std::fs::write(&target, summary.to_string())
        .with_context(|| format!("Failed to write summary file {}", target.display()))?;
    log::info!("Wrote {} ({} names)", target.display(), summary.names.len());
    Ok(target)
}

/// Render one file's summary for the console
pub fn render(source: &Path, summary: &Summary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.to_string()),
        OutputFormat::Json { pretty } => {
            let report = FileReport {
                path: source.to_path_buf(),
                summary: summary.clone(),
            };
            let json = if pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            };
            json.context("Failed to serialize summary to JSON")
        }
    }
}

/// Render and write a summary to `out`, followed by a newline
pub fn print_summary<W: Write>(
    out: &mut W,
    source: &Path,
    summary: &Summary,
    format: OutputFormat,
) -> Result<()> {
    let rendered = render(source, summary, format)?;
    writeln!(out, "{}", rendered).context("Failed to write to output")?;
    Ok(())
}
