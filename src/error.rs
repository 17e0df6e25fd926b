use thiserror::Error;

/// Conditions the similarity engine itself reports.
///
/// Degenerate inputs (empty token sequences) are not errors; every metric
/// has a defined value for them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("At least 2 valid files are needed to compare, got {found}")]
    InsufficientInput { found: usize },
    #[error("Threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, CompareError>;
