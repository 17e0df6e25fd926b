// Pairwise aggregation over all unordered file pairs.
//
// Pairs are enumerated in input order (i < j) and scored on the rayon pool.
// Each worker keeps its own Levenshtein workspace; the indexed collect puts
// results back in enumeration order, so reports are deterministic no matter
// how the work was scheduled.
//
// The threshold only decides membership: a pair is kept when any one of its
// three scores reaches it. Scores themselves are never touched.

use rayon::prelude::*;
use tracing::info;

use super::stats::{Agreement, Metric, Statistics};
use crate::error::{CompareError, Result};
use crate::metrics::{cosine, jaccard, LevenshteinWorkspace};
use crate::source::SourceFile;

/// Scores for one unordered file pair. `left` is the file that came first
/// in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct PairResult {
    pub left: String,
    pub right: String,
    pub cosine: f64,
    pub jaccard: f64,
    pub levenshtein: f64,
}

impl PairResult {
    pub fn score(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => self.cosine,
            Metric::Jaccard => self.jaccard,
            Metric::Levenshtein => self.levenshtein,
        }
    }

    /// Highest of the three scores. The threshold is tested against this.
    pub fn best_score(&self) -> f64 {
        self.cosine.max(self.jaccard).max(self.levenshtein)
    }

    /// True when this result is for the pair {a, b}, in either order.
    pub fn is_pair(&self, a: &str, b: &str) -> bool {
        (self.left == a && self.right == b) || (self.left == b && self.right == a)
    }
}

/// Retained pairs plus their statistics. Built once by `aggregate`.
#[derive(Debug, Clone)]
pub struct ComparisonSet {
    pairs: Vec<PairResult>,
    statistics: Statistics,
    evaluated: usize,
    threshold: f64,
}

impl ComparisonSet {
    pub fn pairs(&self) -> &[PairResult] {
        &self.pairs
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Number of pairs scored before the threshold filter.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the result for {a, b} regardless of order.
    pub fn find(&self, a: &str, b: &str) -> Option<&PairResult> {
        self.pairs.iter().find(|p| p.is_pair(a, b))
    }

    /// The retained pair with the highest single score. First one wins ties.
    pub fn most_similar(&self) -> Option<&PairResult> {
        self.pairs.iter().fold(None, |best: Option<&PairResult>, p| match best {
            Some(b) if b.best_score() >= p.best_score() => Some(b),
            _ => Some(p),
        })
    }

    /// Retained pairs whose best score reaches `cutoff`.
    pub fn high_similarity(&self, cutoff: f64) -> Vec<&PairResult> {
        self.pairs
            .iter()
            .filter(|p| p.best_score() >= cutoff)
            .collect()
    }

    /// How many metrics flag at least one pair at or above `cutoff`.
    pub fn metric_agreement(&self, cutoff: f64) -> Agreement {
        let flagged = Metric::ALL
            .iter()
            .filter(|&&m| self.pairs.iter().any(|p| p.score(m) >= cutoff))
            .count();
        Agreement::from_flagged(flagged)
    }
}

/// Score one pair with a caller-owned workspace.
pub fn compare_pair(
    workspace: &mut LevenshteinWorkspace,
    a: &SourceFile,
    b: &SourceFile,
) -> PairResult {
    PairResult {
        left: a.id().to_string(),
        right: b.id().to_string(),
        cosine: cosine(a.vector(), b.vector()),
        jaccard: jaccard(a.set(), b.set()),
        levenshtein: workspace.ratio(a.tokens(), b.tokens()),
    }
}

/// Compare every unordered pair of `files` and keep those whose best score
/// reaches `threshold`.
///
/// Fails when fewer than 2 files are given or the threshold is outside
/// [0.0, 1.0].
pub fn aggregate(files: &[SourceFile], threshold: f64) -> Result<ComparisonSet> {
    aggregate_with_progress(files, threshold, || {})
}

/// Same as `aggregate`, calling `on_pair` once after each pair is scored.
/// Calls may come from any worker thread.
pub fn aggregate_with_progress<F>(
    files: &[SourceFile],
    threshold: f64,
    on_pair: F,
) -> Result<ComparisonSet>
where
    F: Fn() + Sync,
{
    if files.len() < 2 {
        return Err(CompareError::InsufficientInput { found: files.len() });
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CompareError::InvalidThreshold(threshold));
    }

    let n = files.len();
    let indices: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let scored: Vec<PairResult> = indices
        .par_iter()
        .map_init(LevenshteinWorkspace::new, |workspace, &(i, j)| {
            let result = compare_pair(workspace, &files[i], &files[j]);
            on_pair();
            result
        })
        .collect();

    let evaluated = scored.len();
    let pairs: Vec<PairResult> = scored
        .into_iter()
        .filter(|p| p.best_score() >= threshold)
        .collect();
    let statistics = Statistics::from_pairs(&pairs);

    info!(
        files = n,
        evaluated,
        retained = pairs.len(),
        threshold,
        "Pairwise comparison complete"
    );

    Ok(ComparisonSet {
        pairs,
        statistics,
        evaluated,
        threshold,
    })
}
