pub mod errors;

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use errors::{Error, Result, ResultExt};

/// Well-known metric keys emitted by the stock collectors.
///
/// The scoring core accepts any key for which a normalization rule is
/// registered; these constants only name the ones the default registry and
/// default weights cover.
pub mod metric_keys {
    pub const CHANGE_FREQUENCY: &str = "change_frequency";
    pub const CYCLOMATIC_COMPLEXITY: &str = "cyclomatic_complexity";
    pub const DEAD_CODE_RATIO: &str = "dead_code_ratio";
    pub const LINT_SMELL_COUNT: &str = "lint_smell_count";
    pub const COVERAGE_RATIO: &str = "coverage_ratio";
    pub const AGING_DAYS: &str = "aging_days";
    pub const MAINTAINABILITY_INDEX: &str = "maintainability_index";
}

/// Raw per-file measurement bundle produced by an external collector.
///
/// `Some(v)` is a raw measurement; `None` records that the collector ran but
/// could not compute the metric for this file (e.g. the coverage tool had no
/// data). A key missing from the map entirely is equally absent for scoring.
/// Absence is never conflated with a raw value of zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub file: PathBuf,
    pub values: BTreeMap<String, Option<f64>>,
}

impl MetricRecord {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insertion; `None` marks an explicit absence.
    pub fn with_value(mut self, metric: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        self.values.insert(metric.into(), value.into());
        self
    }

    /// Raw value for a metric, if present and computed.
    pub fn present(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied().flatten()
    }
}

/// A [`MetricRecord`] mapped onto the common [0, 1] risk-contribution scale.
///
/// Derived deterministically by [`crate::scoring::NormalizerRegistry::normalize`];
/// every `Some(v)` lies in [0, 1], and absences pass through unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub file: PathBuf,
    pub values: BTreeMap<String, Option<f64>>,
}

impl NormalizedRecord {
    /// Normalized value for a metric, if present.
    pub fn present(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied().flatten()
    }
}

/// One explainability term of a composite score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub metric: String,
    /// Effective weight applied for this file (after any absence
    /// redistribution), not the raw configured weight.
    pub weight: f64,
    pub normalized_value: f64,
    pub weighted: f64,
}

/// Composite risk score for one file, with its contribution breakdown.
///
/// Contributions are ordered descending by weighted contribution (ties by
/// metric key) so the dominant factor reads first and output is byte-stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub file: PathBuf,
    pub score: f64,
    pub contributions: Vec<Contribution>,
    /// Count of metrics whose normalized value exceeds the severity
    /// threshold; used as the first ranking tie-break.
    pub severe_metric_count: usize,
}

/// Which collectors fed a run, and when it was produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunProvenance {
    pub collectors: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl RunProvenance {
    pub fn new(collectors: Vec<String>) -> Self {
        Self {
            collectors,
            generated_at: Utc::now(),
        }
    }
}

/// Complete output of one analysis run.
///
/// Either the caller gets this in full — ranked scores plus an explicit
/// unscored list — or the run fails with a single fatal error. There is no
/// partially-silent middle ground.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Scores in total rank order: descending score, then descending severe
    /// metric count, then path.
    pub ranked: Vector<RiskScore>,
    /// Files excluded from ranking because no metric was scorable, in path
    /// order. Never assigned a score.
    pub unscored: Vector<PathBuf>,
    /// The normalized weight distribution the run actually used.
    pub weights: crate::config::NormalizedWeights,
    pub provenance: RunProvenance,
}

/// Merge per-collector record batches into one record per file.
///
/// Collectors each emit their own sequence keyed by file path; the scorer
/// wants a single key-wise union per file. On a duplicate key for the same
/// file the later batch wins and the overwrite is logged, since collectors
/// are expected to use disjoint metric keys.
pub fn merge_records<I>(batches: I) -> Vec<MetricRecord>
where
    I: IntoIterator<Item = Vec<MetricRecord>>,
{
    let mut merged: BTreeMap<PathBuf, BTreeMap<String, Option<f64>>> = BTreeMap::new();

    for batch in batches {
        for record in batch {
            let values = merged.entry(record.file.clone()).or_default();
            for (metric, value) in record.values {
                if let Some(previous) = values.insert(metric.clone(), value) {
                    log::warn!(
                        "metric `{}` for {} supplied by more than one collector; keeping the later value (was {:?})",
                        metric,
                        record.file.display(),
                        previous,
                    );
                }
            }
        }
    }

    merged
        .into_iter()
        .map(|(file, values)| MetricRecord { file, values })
        .collect()
}
