// JSON report: metadata, files, comparisons and statistics in one document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{round_to, Report, TOOL_VERSION};
use crate::source::Language;

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: Metadata,
    files: Vec<JsonFile<'a>>,
    comparisons: Vec<JsonComparison<'a>>,
    statistics: JsonStatistics,
}

#[derive(Serialize)]
struct Metadata {
    generated_at: String,
    version: &'static str,
    files_processed: usize,
    pairs_evaluated: usize,
    threshold: f64,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    name: &'a str,
    path: &'a str,
    language: Language,
    tokens: usize,
    distinct_tokens: usize,
}

#[derive(Serialize)]
struct JsonComparison<'a> {
    file_a: &'a str,
    file_b: &'a str,
    cosine: f64,
    jaccard: f64,
    levenshtein: f64,
}

#[derive(Serialize)]
struct JsonStatistics {
    total_comparisons: usize,
    cosine_mean: f64,
    cosine_max: f64,
    cosine_min: f64,
    jaccard_mean: f64,
    jaccard_max: f64,
    jaccard_min: f64,
    levenshtein_mean: f64,
    levenshtein_max: f64,
    levenshtein_min: f64,
}

/// Render the pretty-printed JSON document.
pub fn render(report: &Report<'_>) -> Result<String> {
    let p = report.precision;
    let stats = report.comparison.statistics();

    let doc = JsonReport {
        metadata: Metadata {
            generated_at: report.generated_at.to_rfc3339(),
            version: TOOL_VERSION,
            files_processed: report.files.len(),
            pairs_evaluated: report.comparison.evaluated(),
            threshold: report.comparison.threshold(),
        },
        files: report
            .files
            .iter()
            .map(|f| JsonFile {
                name: super::display_name(&f.id),
                path: &f.id,
                language: f.language,
                tokens: f.token_count,
                distinct_tokens: f.distinct_tokens,
            })
            .collect(),
        comparisons: report
            .comparison
            .pairs()
            .iter()
            .map(|pair| JsonComparison {
                file_a: &pair.left,
                file_b: &pair.right,
                cosine: round_to(pair.cosine, p),
                jaccard: round_to(pair.jaccard, p),
                levenshtein: round_to(pair.levenshtein, p),
            })
            .collect(),
        statistics: JsonStatistics {
            total_comparisons: stats.count,
            cosine_mean: round_to(stats.cosine.mean, p),
            cosine_max: round_to(stats.cosine.max, p),
            cosine_min: round_to(stats.cosine.min, p),
            jaccard_mean: round_to(stats.jaccard.mean, p),
            jaccard_max: round_to(stats.jaccard.max, p),
            jaccard_min: round_to(stats.jaccard.min, p),
            levenshtein_mean: round_to(stats.levenshtein.mean, p),
            levenshtein_max: round_to(stats.levenshtein.max, p),
            levenshtein_min: round_to(stats.levenshtein.min, p),
        },
    };

    serde_json::to_string_pretty(&doc).context("Failed to serialize JSON report")
}

/// Write `<base>.json` and return its path.
pub fn write(report: &Report<'_>, base: &Path) -> Result<PathBuf> {
    let path = super::with_extension(base, "json");
    fs::write(&path, render(report)?)
        .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    Ok(path)
}
