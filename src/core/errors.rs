//! Shared error types for the scoring core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for debtrisk operations
#[derive(Debug, Error)]
pub enum Error {
    /// A metric key with no registered normalization rule.
    ///
    /// Fatal to the whole run: an unregistered key means the collectors and
    /// the scoring configuration disagree about the metric schema, and
    /// dropping the value silently would corrupt scores without signal.
    #[error("unknown metric `{metric}` in record for {file}: no normalization rule registered")]
    UnknownMetric { metric: String, file: PathBuf },

    /// A negative (or non-finite) weight in the configuration.
    #[error(
        "invalid weight {weight} for metric `{metric}`: weights must be finite and non-negative"
    )]
    InvalidWeight { metric: String, weight: f64 },

    /// Every weight in the configuration is zero, so no file could ever
    /// outrank another.
    #[error("weight configuration carries no non-zero weight")]
    EmptyConfiguration,

    /// A file whose record has no scorable metrics.
    ///
    /// Recovered per file: the file is reported as unscored instead of being
    /// assigned a misleading score of zero.
    #[error("no scorable metrics for {file}")]
    NoMetricsAvailable { file: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown-metric error for a record.
    pub fn unknown_metric(metric: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self::UnknownMetric {
            metric: metric.into(),
            file: file.into(),
        }
    }

    /// Create an invalid-weight error.
    pub fn invalid_weight(metric: impl Into<String>, weight: f64) -> Self {
        Self::InvalidWeight {
            metric: metric.into(),
            weight,
        }
    }

    /// Create a per-file no-metrics error.
    pub fn no_metrics(file: impl Into<PathBuf>) -> Self {
        Self::NoMetricsAvailable { file: file.into() }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
