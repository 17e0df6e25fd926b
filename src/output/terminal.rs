// Colored terminal output for comparison tables and statistics.
//
// This module handles all terminal-specific formatting: colors, column
// alignment, the token dump. The main.rs commands delegate here.

use colored::Colorize;

use super::{display_name, truncate_chars};
use crate::pipeline::{ComparisonSet, SimilarityLevel, Statistics};
use crate::source::{FileSummary, SourceFile};

/// Width of the "File A <-> File B" column.
const PAIR_COLUMN: usize = 56;

/// Display the banner at the start of a comparison run.
pub fn display_banner() {
    println!("{}", "=".repeat(80).dimmed());
    println!("{}", "  SOURCE CODE SIMILARITY ANALYZER".bold());
    println!("{}", "=".repeat(80).dimmed());
}

/// One line per accepted file.
pub fn display_file(summary: &FileSummary) {
    println!(
        "  {} {} ({} tokens, {} distinct, language: {})",
        "ok".green(),
        summary.id,
        summary.token_count,
        summary.distinct_tokens,
        summary.language,
    );
}

/// Display the retained pairs as an aligned table.
pub fn display_comparisons(set: &ComparisonSet) {
    if set.is_empty() {
        println!(
            "\n  No pairs reached the threshold {:.2} ({} evaluated)",
            set.threshold(),
            set.evaluated()
        );
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Comparisons ({} of {} pairs) ===",
            set.pairs().len(),
            set.evaluated()
        )
        .bold()
    );
    println!();
    println!(
        "  {:<width$} {:>7}  {:>7}  {:>7}",
        "Comparison".dimmed(),
        "Cosine".dimmed(),
        "Jaccard".dimmed(),
        "Leven.".dimmed(),
        width = PAIR_COLUMN,
    );
    println!("  {}", "-".repeat(PAIR_COLUMN + 27).dimmed());

    for pair in set.pairs() {
        let label = format!(
            "{} <-> {}",
            display_name(&pair.left),
            display_name(&pair.right)
        );
        let label = truncate_chars(&label, PAIR_COLUMN - 3);
        let level = SimilarityLevel::from_score(pair.best_score());

        println!(
            "  {:<width$} {:>7.3}  {:>7.3}  {:>7.3}  {}",
            label,
            pair.cosine,
            pair.jaccard,
            pair.levenshtein,
            colorize_level(level),
            width = PAIR_COLUMN,
        );
    }
}

/// Display mean/max per metric for the retained pairs.
pub fn display_statistics(stats: &Statistics) {
    if stats.count == 0 {
        return;
    }

    println!("\n{}", "=== Statistics ===".bold());
    println!("  Total comparisons: {}", stats.count);
    println!(
        "  Cosine      - mean: {:.3}, max: {:.3}",
        stats.cosine.mean, stats.cosine.max
    );
    println!(
        "  Jaccard     - mean: {:.3}, max: {:.3}",
        stats.jaccard.mean, stats.jaccard.max
    );
    println!(
        "  Levenshtein - mean: {:.3}, max: {:.3}",
        stats.levenshtein.mean, stats.levenshtein.max
    );
    println!(
        "  Overall level: {} ({:.3})",
        colorize_level(stats.level()),
        stats.overall_mean()
    );
}

/// Dump a file's tokens, for checking what the tokenizer sees.
pub fn display_tokens(file: &SourceFile, limit: Option<usize>) {
    let summary = file.summary();
    println!(
        "\n{}",
        format!("=== Tokens for {} ===", summary.id).bold()
    );
    println!(
        "  Language: {}  |  Tokens: {}  |  Distinct: {}",
        summary.language, summary.token_count, summary.distinct_tokens
    );
    println!();

    let shown = limit.unwrap_or(file.tokens().len()).min(file.tokens().len());
    for (i, token) in file.tokens().iter().take(shown).enumerate() {
        println!("  {:>6}  {}", i + 1, token);
    }
    if shown < file.tokens().len() {
        println!(
            "  {}",
            format!("... {} more", file.tokens().len() - shown).dimmed()
        );
    }
}

/// Colorize a similarity level.
fn colorize_level(level: SimilarityLevel) -> colored::ColoredString {
    match level {
        SimilarityLevel::High => level.as_str().red().bold(),
        SimilarityLevel::Medium => level.as_str().yellow(),
        SimilarityLevel::Low => level.as_str().green(),
    }
}
