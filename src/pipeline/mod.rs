// Pairwise comparison pipeline: score every file pair once, filter by
// threshold, summarize what survived.

pub mod aggregate;
pub mod stats;

pub use aggregate::{aggregate, aggregate_with_progress, compare_pair, ComparisonSet, PairResult};
pub use stats::{Agreement, Metric, MetricSummary, SimilarityLevel, Statistics};
