// CSV report: one row per retained pair, then a statistics block.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Report;
use crate::pipeline::Metric;

const HEADER: [&str; 5] = ["File A", "File B", "Cosine", "Jaccard", "Levenshtein"];

/// Render the CSV document.
pub fn render(report: &Report<'_>) -> Result<String> {
    let mut buf = Vec::new();
    write_pairs(report, &mut buf).context("Failed to render CSV pair rows")?;
    buf.write_all(b"\n")?;
    write_statistics(report, &mut buf).context("Failed to render CSV statistics")?;
    String::from_utf8(buf).context("CSV report is not valid UTF-8")
}

/// Write `<base>.csv` and return its path.
pub fn write(report: &Report<'_>, base: &Path) -> Result<PathBuf> {
    let path = super::with_extension(base, "csv");
    fs::write(&path, render(report)?)
        .with_context(|| format!("Failed to write CSV report to {}", path.display()))?;
    Ok(path)
}

fn write_pairs<W: Write>(report: &Report<'_>, out: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out);
    writer.write_record(HEADER)?;

    for pair in report.comparison.pairs() {
        writer.write_record([
            pair.left.as_str(),
            pair.right.as_str(),
            &report.score(pair.cosine),
            &report.score(pair.jaccard),
            &report.score(pair.levenshtein),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Marker line, then `key,value` rows.
fn write_statistics<W: Write>(report: &Report<'_>, out: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out);
    let stats = report.comparison.statistics();

    writer.write_record(["=== STATISTICS ==="])?;
    writer.write_record(["Total Comparisons", &stats.count.to_string()])?;
    for metric in Metric::ALL {
        let summary = stats.summary(metric);
        let name = capitalize(metric.as_str());
        writer.write_record([format!("{name} Mean"), report.score(summary.mean)])?;
        writer.write_record([format!("{name} Max"), report.score(summary.max)])?;
        writer.write_record([format!("{name} Min"), report.score(summary.min)])?;
    }
    writer.flush()?;
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
