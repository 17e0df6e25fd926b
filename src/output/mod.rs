// Output formatting: terminal display and report files.
//
// The engine keeps full floating-point precision; rounding to the
// configured number of digits happens only here, at presentation time.

pub mod csv;
pub mod json;
pub mod markdown;
pub mod pdf;
pub mod terminal;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::pipeline::ComparisonSet;
use crate::source::FileSummary;

/// Version string stamped into reports.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Md,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Md => "md",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "md" | "markdown" => Ok(ReportFormat::Md),
            "pdf" => Ok(ReportFormat::Pdf),
            other => anyhow::bail!("Unknown report format {other:?} (expected csv, json, md or pdf)"),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Everything a reporter needs for one run.
pub struct Report<'a> {
    pub generated_at: DateTime<Local>,
    pub files: &'a [FileSummary],
    pub comparison: &'a ComparisonSet,
    pub precision: usize,
}

impl<'a> Report<'a> {
    pub fn new(files: &'a [FileSummary], comparison: &'a ComparisonSet, precision: usize) -> Self {
        Self {
            generated_at: Local::now(),
            files,
            comparison,
            precision,
        }
    }

    /// Format a score with the report's precision.
    pub fn score(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}

/// Where a report ended up, and in which format.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub format: ReportFormat,
}

/// Write `report` in `format` next to `base` (extension appended).
///
/// PDF falls back to Markdown when pandoc or every PDF engine fails; the
/// returned format says which one was written.
pub async fn write_report(
    report: &Report<'_>,
    format: ReportFormat,
    base: &Path,
    pandoc: &str,
) -> Result<WrittenReport> {
    let path = match format {
        ReportFormat::Csv => csv::write(report, base)?,
        ReportFormat::Json => json::write(report, base)?,
        ReportFormat::Md => markdown::write(report, base)?,
        ReportFormat::Pdf => return pdf::write(report, base, pandoc).await,
    };
    Ok(WrittenReport { path, format })
}

/// Append `.ext` to a base path without touching dots already in it.
pub fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Round to `digits` decimal places.
pub fn round_to(value: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Final path component of a file identifier, for compact display.
pub fn display_name(id: &str) -> &str {
    Path::new(id)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(id)
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so it never panics on multi-byte
/// file names.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
