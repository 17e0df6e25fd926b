// codesim: token-level similarity analysis for source code files.
//
// This is the library root. Each module corresponds to one stage of the
// comparison: load -> tokenize -> score pairs -> report.

pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod tokens;

pub use error::CompareError;
