//! Scoring configuration for risk aggregation
//!
//! Covers the caller-facing knobs of a run: per-metric weights, the absence
//! handling policy, and the severity threshold used for ranking tie-breaks.

use crate::core::{metric_keys, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named mapping from metric key to non-negative weight.
///
/// Metric keys appearing in a record but not here are ignored (weight 0);
/// keys here but absent from a record are handled by the run's
/// [`AbsencePolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightConfig {
    pub weights: BTreeMap<String, f64>,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            weights: default_weights(),
        }
    }
}

impl WeightConfig {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self { weights }
    }

    /// Builder-style weight assignment.
    pub fn with_weight(mut self, metric: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(metric.into(), weight);
        self
    }

    /// Configured weight for a metric, defaulting to 0 for unknown keys.
    pub fn weight(&self, metric: &str) -> f64 {
        self.weights.get(metric).copied().unwrap_or(0.0)
    }

    /// Validate the configuration without normalizing it.
    ///
    /// Any negative or non-finite weight fails with
    /// [`Error::InvalidWeight`]; a configuration whose weights are all zero
    /// (or empty) fails with [`Error::EmptyConfiguration`] since it could
    /// never rank one file above another.
    pub fn validate(&self) -> Result<()> {
        for (metric, &weight) in &self.weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::invalid_weight(metric, weight));
            }
        }
        if self.weights.values().all(|&w| w == 0.0) {
            return Err(Error::EmptyConfiguration);
        }
        Ok(())
    }

    /// Validate and convert into a normalized distribution summing to 1.0.
    ///
    /// Normalization happens once per run, never per file, so composite
    /// scores stay comparable in [0, 1] regardless of how many metrics are
    /// enabled.
    pub fn normalized(&self) -> Result<NormalizedWeights> {
        self.validate()?;
        let sum: f64 = self.weights.values().sum();
        let weights = self
            .weights
            .iter()
            .map(|(metric, &weight)| (metric.clone(), weight / sum))
            .collect();
        Ok(NormalizedWeights { weights })
    }
}

/// Weight distribution summing to 1.0, produced by [`WeightConfig::normalized`].
///
/// Read-only for the lifetime of a run; shared freely across parallel
/// per-file scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedWeights {
    weights: BTreeMap<String, f64>,
}

impl NormalizedWeights {
    /// Normalized weight for a metric, defaulting to 0 for unknown keys.
    pub fn weight(&self, metric: &str) -> f64 {
        self.weights.get(metric).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, &w)| (k.as_str(), w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// How a metric that is absent for a file affects that file's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsencePolicy {
    /// Shift the absent metric's weight mass proportionally onto the
    /// metrics that are present for the file, so the file still sums the
    /// full weight mass. The default: absence must never silently read as
    /// "no risk".
    #[default]
    Redistribute,
    /// Let absent metrics contribute nothing. Understates risk, so it has
    /// to be selected explicitly.
    TreatAsZeroRisk,
}

/// Full scoring configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: WeightConfig,

    #[serde(default)]
    pub absence_policy: AbsencePolicy,

    /// Normalized value above which a metric counts as severe for ranking
    /// tie-breaks (0.0-1.0).
    #[serde(default = "default_severity_threshold")]
    pub severity_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            absence_policy: AbsencePolicy::default(),
            severity_threshold: default_severity_threshold(),
        }
    }
}

impl ScoringConfig {
    /// Validate everything that must hold before any scoring begins.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.severity_threshold) {
            return Err(Error::Configuration(format!(
                "severity threshold {} must be between 0.0 and 1.0",
                self.severity_threshold
            )));
        }
        Ok(())
    }
}

pub fn default_severity_threshold() -> f64 {
    0.7
}

/// Default weights over the stock metric set.
///
/// Rebalanced from the original analyzer's factor weights (complexity
/// heaviest, churn next, ratios and aging lighter); callers tune these per
/// project.
pub fn default_weights() -> BTreeMap<String, f64> {
    BTreeMap::from([
        (metric_keys::CHANGE_FREQUENCY.to_string(), 0.20),
        (metric_keys::CYCLOMATIC_COMPLEXITY.to_string(), 0.25),
        (metric_keys::DEAD_CODE_RATIO.to_string(), 0.10),
        (metric_keys::LINT_SMELL_COUNT.to_string(), 0.10),
        (metric_keys::COVERAGE_RATIO.to_string(), 0.15),
        (metric_keys::AGING_DAYS.to_string(), 0.10),
        (metric_keys::MAINTAINABILITY_INDEX.to_string(), 0.10),
    ])
}
