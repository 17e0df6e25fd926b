// Markdown report: the long-form human report, and the input for PDF.
//
// Sections: run info, executive summary, analyzed files, similarity matrix
// (cosine, only when more than 3 files), detailed comparisons, statistics,
// high-similarity pairs, interpretation scale, methodology, conclusions.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{display_name, Report, TOOL_VERSION};
use crate::pipeline::{Agreement, Metric, PairResult, SimilarityLevel};

/// Best-score cutoff for the "high similarity" section and the conclusions.
pub const HIGH_SIMILARITY: f64 = 0.7;

/// The matrix is only worth its width beyond this many files.
const MATRIX_MIN_FILES: usize = 4;

const BAR_WIDTH: f64 = 20.0;

/// Render the full Markdown report.
pub fn render(report: &Report<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

/// Write `<base>.md` and return its path.
pub fn write(report: &Report<'_>, base: &Path) -> Result<PathBuf> {
    let path = super::with_extension(base, "md");
    fs::write(&path, render(report))
        .with_context(|| format!("Failed to write Markdown report to {}", path.display()))?;
    Ok(path)
}

fn write_report(out: &mut String, report: &Report<'_>) -> std::fmt::Result {
    let set = report.comparison;
    let stats = set.statistics();

    writeln!(out, "# Source Code Similarity Report\n")?;
    writeln!(out, "**Token-level similarity analysis of source files**\n")?;
    writeln!(out, "---\n")?;

    writeln!(out, "## Analysis Info\n")?;
    writeln!(
        out,
        "- **Generated:** {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "- **Tool version:** {TOOL_VERSION}")?;
    writeln!(out, "- **Files analyzed:** {}", report.files.len())?;
    writeln!(out, "- **Pairs evaluated:** {}", set.evaluated())?;
    writeln!(out, "- **Pairs reported:** {}", set.pairs().len())?;
    writeln!(out, "- **Threshold:** {}", report.score(set.threshold()))?;
    writeln!(out, "- **Metrics:** Cosine, Jaccard, Levenshtein\n")?;

    if !set.is_empty() {
        let overall = stats.overall_mean();
        let level = stats.level();
        writeln!(out, "## Executive Summary\n")?;
        writeln!(
            out,
            "- **Overall similarity level:** **{}** ({})",
            level.as_str().to_uppercase(),
            report.score(overall)
        )?;
        writeln!(out, "- **Interpretation:** {}", level_interpretation(level))?;
        writeln!(
            out,
            "- **Most discriminating metric:** {}",
            stats.most_discriminating().display_name()
        )?;
        if let Some(best) = set.most_similar() {
            writeln!(
                out,
                "- **Most similar pair:** `{}` and `{}` ({})",
                display_name(&best.left),
                display_name(&best.right),
                report.score(best.best_score())
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Analyzed Files\n")?;
    for (i, file) in report.files.iter().enumerate() {
        writeln!(
            out,
            "{}. `{}` ({}, {} tokens)",
            i + 1,
            display_name(&file.id),
            file.language,
            file.token_count
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Similarity Results\n")?;
    if report.files.len() >= MATRIX_MIN_FILES {
        writeln!(out, "### Similarity Matrix (Cosine)\n")?;
        write_matrix(out, report)?;
        writeln!(out)?;
    }

    writeln!(out, "### Detailed Comparisons\n")?;
    if set.is_empty() {
        writeln!(out, "No pairs reached the threshold.\n")?;
    } else {
        writeln!(out, "| File A | File B | Cosine | Jaccard | Levenshtein |")?;
        writeln!(out, "|--------|--------|--------|---------|-------------|")?;
        for pair in set.pairs() {
            writeln!(
                out,
                "| `{}` | `{}` | {} | {} | {} |",
                display_name(&pair.left),
                display_name(&pair.right),
                report.score(pair.cosine),
                report.score(pair.jaccard),
                report.score(pair.levenshtein)
            )?;
        }
        writeln!(out)?;
    }

    if !set.is_empty() {
        writeln!(out, "## Summary Statistics\n")?;
        writeln!(out, "### Cosine Distribution\n")?;
        writeln!(out, "```")?;
        writeln!(out, "Min  {} {}", report.score(stats.cosine.min), bar(stats.cosine.min))?;
        writeln!(out, "Mean {} {}", report.score(stats.cosine.mean), bar(stats.cosine.mean))?;
        writeln!(out, "Max  {} {}", report.score(stats.cosine.max), bar(stats.cosine.max))?;
        writeln!(out, "```\n")?;

        writeln!(out, "### Per-Metric Statistics\n")?;
        writeln!(out, "| Metric | Min | Mean | Max |")?;
        writeln!(out, "|--------|-----|------|-----|")?;
        for metric in Metric::ALL {
            let s = stats.summary(metric);
            writeln!(
                out,
                "| **{}** | {} | {} | {} |",
                metric.display_name(),
                report.score(s.min),
                report.score(s.mean),
                report.score(s.max)
            )?;
        }
        writeln!(out)?;

        let high = set.high_similarity(HIGH_SIMILARITY);
        if !high.is_empty() {
            writeln!(out, "### High Similarity Detected\n")?;
            writeln!(
                out,
                "These pairs reach at least {HIGH_SIMILARITY} on one or more metrics:\n"
            )?;
            for pair in high {
                writeln!(
                    out,
                    "- `{}` ↔ `{}`: **{}**",
                    display_name(&pair.left),
                    display_name(&pair.right),
                    report.score(pair.best_score())
                )?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "## Interpreting Scores\n")?;
    writeln!(out, "- **0.0 - 0.3:** low similarity (very different code)")?;
    writeln!(out, "- **0.3 - 0.7:** moderate similarity (some shared elements)")?;
    writeln!(out, "- **0.7 - 0.9:** high similarity (very alike)")?;
    writeln!(out, "- **0.9 - 1.0:** very high similarity (possible duplication)\n")?;

    writeln!(out, "## Methodology\n")?;
    writeln!(
        out,
        "Files are split into lexical tokens (identifiers, literals, operators). Three scores are computed per pair:\n"
    )?;
    writeln!(
        out,
        "1. **Cosine similarity:** angle between token frequency vectors (Salton, Wong & Yang, 1975)"
    )?;
    writeln!(
        out,
        "2. **Jaccard index:** shared distinct tokens over all distinct tokens (Jaccard, 1912)"
    )?;
    writeln!(
        out,
        "3. **Levenshtein ratio:** token-level edit distance normalized by the longer file (Levenshtein, 1966; Wagner & Fischer, 1974)\n"
    )?;

    if !set.is_empty() {
        write_conclusions(out, report)?;
    }

    writeln!(out, "---")?;
    writeln!(out, "*Generated by codesim {TOOL_VERSION}*")?;
    Ok(())
}

/// Upper-triangle cosine matrix. Filtered pairs show `-`.
fn write_matrix(out: &mut String, report: &Report<'_>) -> std::fmt::Result {
    let files = report.files;
    let mut by_pair: HashMap<(&str, &str), &PairResult> = HashMap::new();
    for pair in report.comparison.pairs() {
        by_pair.insert((pair.left.as_str(), pair.right.as_str()), pair);
        by_pair.insert((pair.right.as_str(), pair.left.as_str()), pair);
    }

    write!(out, "| |")?;
    for file in files {
        write!(out, " `{}` |", display_name(&file.id))?;
    }
    writeln!(out)?;
    writeln!(out, "|{}", "-|".repeat(files.len() + 1))?;

    for (i, a) in files.iter().enumerate() {
        write!(out, "| `{}` |", display_name(&a.id))?;
        for (j, b) in files.iter().enumerate() {
            if i == j {
                write!(out, " **{}** |", report.score(1.0))?;
            } else if i < j {
                match by_pair.get(&(a.id.as_str(), b.id.as_str())) {
                    Some(pair) => write!(
                        out,
                        " {} {} |",
                        indicator(pair.cosine),
                        report.score(pair.cosine)
                    )?,
                    None => write!(out, " - |")?,
                }
            } else {
                write!(out, " |")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_conclusions(out: &mut String, report: &Report<'_>) -> std::fmt::Result {
    let set = report.comparison;
    let overall = set.statistics().overall_mean();

    writeln!(out, "## Conclusions\n")?;

    writeln!(out, "### Main Finding\n")?;
    let finding = match SimilarityLevel::from_score(overall) {
        SimilarityLevel::High => {
            "**Significant similarity:** the files share structural and lexical patterns that suggest a common origin or code reuse."
        }
        SimilarityLevel::Medium => {
            "**Moderate similarity:** some overlap exists, possibly from shared conventions or similar functionality."
        }
        SimilarityLevel::Low => {
            "**Diverse files:** the code differs substantially, suggesting independent implementations."
        }
    };
    writeln!(out, "- {finding}\n")?;

    writeln!(out, "### Metric Agreement\n")?;
    let agreement = match set.metric_agreement(HIGH_SIMILARITY) {
        Agreement::Strong => {
            "**Strong:** all three metrics flag high similarity, which makes the finding more reliable."
        }
        Agreement::Partial => "**Partial:** two metrics agree on the main findings.",
        Agreement::Divergent => {
            "**Divergent:** the metrics capture different aspects of similarity; inspect pairs individually."
        }
    };
    writeln!(out, "- {agreement}\n")?;

    writeln!(out, "### Recommendations\n")?;
    if overall >= 0.8 {
        writeln!(
            out,
            "- **Review needed:** inspect the highly similar files manually for duplication or plagiarism."
        )?;
        writeln!(
            out,
            "- **Refactor:** consider extracting shared code into reusable modules.\n"
        )?;
    } else if overall >= 0.6 {
        writeln!(
            out,
            "- **Monitor:** keep an eye on how these similarities evolve."
        )?;
        writeln!(
            out,
            "- **Document:** record why the similar files are alike if it is intentional.\n"
        )?;
    } else {
        writeln!(
            out,
            "- **No action:** the observed variability is expected for independently written code.\n"
        )?;
    }
    Ok(())
}

fn level_interpretation(level: SimilarityLevel) -> &'static str {
    match level {
        SimilarityLevel::High => "Significant similarities were found that need attention.",
        SimilarityLevel::Medium => "Moderate similarities appear between some files.",
        SimilarityLevel::Low => "The files differ considerably in structure.",
    }
}

/// Color marker for a matrix cell.
fn indicator(score: f64) -> &'static str {
    if score >= 0.8 {
        "🔴"
    } else if score >= 0.6 {
        "🟡"
    } else if score >= 0.4 {
        "🟢"
    } else {
        "⚪"
    }
}

fn bar(score: f64) -> String {
    "█".repeat((score.clamp(0.0, 1.0) * BAR_WIDTH) as usize)
}
