use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::output::ReportFormat;

/// Default base name (no extension) for written reports.
pub const DEFAULT_OUTPUT: &str = "similarity_report";

/// Default number of decimal digits for scores in reports.
pub const DEFAULT_PRECISION: usize = 4;

/// Run configuration.
///
/// Values come from environment variables (a .env file is loaded at
/// startup via dotenvy); command-line flags override them. Nothing here is
/// global: the value is passed explicitly to the pipeline and reporters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum best-score for a pair to be kept (CODESIM_THRESHOLD)
    pub threshold: f64,
    /// Report format (CODESIM_FORMAT)
    pub format: ReportFormat,
    /// Report base name without extension (CODESIM_OUTPUT)
    pub output: PathBuf,
    /// Decimal digits for scores in reports (CODESIM_PRECISION)
    pub precision: usize,
    /// pandoc executable used for PDF output (CODESIM_PANDOC)
    pub pandoc: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            format: ReportFormat::Csv,
            output: PathBuf::from(DEFAULT_OUTPUT),
            precision: DEFAULT_PRECISION,
            pandoc: "pandoc".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Unset variables fall back to defaults; set-but-unparseable ones are
    /// an error rather than being silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let threshold = match lookup("CODESIM_THRESHOLD") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                anyhow::anyhow!("CODESIM_THRESHOLD is not a number: {raw:?}")
            })?,
            None => defaults.threshold,
        };

        let format = match lookup("CODESIM_FORMAT") {
            Some(raw) => raw.parse::<ReportFormat>()?,
            None => defaults.format,
        };

        let precision = match lookup("CODESIM_PRECISION") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                anyhow::anyhow!("CODESIM_PRECISION is not a non-negative integer: {raw:?}")
            })?,
            None => defaults.precision,
        };

        let config = Self {
            threshold,
            format,
            output: lookup("CODESIM_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
            precision,
            pandoc: lookup("CODESIM_PANDOC").unwrap_or(defaults.pandoc),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Call again after applying CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!(
                "Threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            );
        }
        if self.precision > 10 {
            anyhow::bail!("Precision must be at most 10 digits, got {}", self.precision);
        }
        Ok(())
    }
}
