//! Metric normalization onto the common [0, 1] risk-contribution scale
//!
//! Rules form a closed set dispatched through a lookup table keyed by metric
//! name, so the supported metric shapes stay explicit and exhaustively
//! testable.

use crate::core::{metric_keys, Error, MetricRecord, NormalizedRecord, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalization rule for one metric key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum NormalizationRule {
    /// `(value - min) / (max - min)`, clamped to [0, 1].
    ///
    /// A descending range (`min > max`) inverts the metric; that is how
    /// bounded higher-is-better metrics such as maintainability index map
    /// onto the risk scale.
    LinearClamp { min: f64, max: f64 },
    /// `1 / (1 + exp(-(value - midpoint) / scale))`, for metrics with
    /// unbounded right tails (change frequency, complexity, smell counts).
    Logistic { midpoint: f64, scale: f64 },
    /// Value already in [0, 1]; passed through with a clamp for safety.
    RatioIdentity,
    /// `1 - value` after clamping, for ratios where higher raw value means
    /// lower risk (coverage).
    InverseRatioIdentity,
}

impl NormalizationRule {
    /// Map a raw value onto [0, 1].
    pub fn apply(&self, raw: f64) -> f64 {
        match *self {
            Self::LinearClamp { min, max } => {
                let span = max - min;
                if span == 0.0 {
                    // Degenerate range; nothing can be scaled against it.
                    0.0
                } else {
                    clamp_unit((raw - min) / span)
                }
            }
            Self::Logistic { midpoint, scale } => {
                clamp_unit(1.0 / (1.0 + (-(raw - midpoint) / scale).exp()))
            }
            Self::RatioIdentity => clamp_unit(raw),
            Self::InverseRatioIdentity => 1.0 - clamp_unit(raw),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Lookup table from metric key to normalization rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizerRegistry {
    rules: BTreeMap<String, NormalizationRule>,
}

impl NormalizerRegistry {
    /// Empty registry; every metric key must be registered before use.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Builder-style rule registration.
    pub fn with_rule(mut self, metric: impl Into<String>, rule: NormalizationRule) -> Self {
        self.rules.insert(metric.into(), rule);
        self
    }

    pub fn register(&mut self, metric: impl Into<String>, rule: NormalizationRule) {
        self.rules.insert(metric.into(), rule);
    }

    pub fn rule(&self, metric: &str) -> Option<&NormalizationRule> {
        self.rules.get(metric)
    }

    /// Normalize one record.
    ///
    /// Fails with [`Error::UnknownMetric`] on any key with no registered
    /// rule; an unregistered key is a collector/configuration mismatch and
    /// must surface rather than being silently dropped. Absent values pass
    /// through as absent, untouched.
    pub fn normalize(&self, record: &MetricRecord) -> Result<NormalizedRecord> {
        let mut values = BTreeMap::new();
        for (metric, raw) in &record.values {
            let rule = self
                .rules
                .get(metric)
                .ok_or_else(|| Error::unknown_metric(metric.clone(), record.file.clone()))?;
            values.insert(metric.clone(), raw.map(|v| rule.apply(v)));
        }
        Ok(NormalizedRecord {
            file: record.file.clone(),
            values,
        })
    }
}

impl Default for NormalizerRegistry {
    /// Registry covering the stock metric set.
    ///
    /// Shapes follow the metric semantics: logistic curves for unbounded
    /// counts, identity/inverse for ratios, a descending linear clamp for
    /// maintainability index (0-100, higher is better). Constants are a
    /// default policy, tunable per project.
    fn default() -> Self {
        Self::empty()
            .with_rule(
                metric_keys::CHANGE_FREQUENCY,
                NormalizationRule::Logistic {
                    midpoint: 10.0,
                    scale: 5.0,
                },
            )
            .with_rule(
                metric_keys::CYCLOMATIC_COMPLEXITY,
                NormalizationRule::Logistic {
                    midpoint: 10.0,
                    scale: 5.0,
                },
            )
            .with_rule(
                metric_keys::LINT_SMELL_COUNT,
                NormalizationRule::Logistic {
                    midpoint: 5.0,
                    scale: 3.0,
                },
            )
            .with_rule(
                metric_keys::AGING_DAYS,
                NormalizationRule::Logistic {
                    midpoint: 180.0,
                    scale: 90.0,
                },
            )
            .with_rule(metric_keys::DEAD_CODE_RATIO, NormalizationRule::RatioIdentity)
            .with_rule(
                metric_keys::COVERAGE_RATIO,
                NormalizationRule::InverseRatioIdentity,
            )
            .with_rule(
                metric_keys::MAINTAINABILITY_INDEX,
                NormalizationRule::LinearClamp {
                    min: 100.0,
                    max: 0.0,
                },
            )
    }
}

/// Shared instance of the default registry.
pub fn default_registry() -> &'static NormalizerRegistry {
    static REGISTRY: Lazy<NormalizerRegistry> = Lazy::new(NormalizerRegistry::default);
    &REGISTRY
}
