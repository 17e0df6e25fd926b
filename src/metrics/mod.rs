// Similarity metrics: three independent, symmetric scores in [0.0, 1.0].
//
//   cosine       angle between token frequency vectors
//   jaccard      shared fraction of distinct tokens
//   levenshtein  token-level edit distance, normalized

pub mod cosine;
pub mod jaccard;
pub mod levenshtein;

pub use cosine::cosine;
pub use jaccard::jaccard;
pub use levenshtein::{levenshtein_distance, levenshtein_ratio, LevenshteinWorkspace};
