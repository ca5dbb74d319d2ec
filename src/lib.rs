// Export modules for library usage
pub mod config;
pub mod core;
pub mod risk;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    merge_records, metric_keys, AnalysisReport, Contribution, Error, MetricRecord,
    NormalizedRecord, Result, RiskScore, RunProvenance,
};

pub use crate::config::{
    load_config, load_config_from, AbsencePolicy, DebtriskConfig, NormalizedWeights,
    ScoringConfig, WeightConfig,
};

pub use crate::scoring::{default_registry, NormalizationRule, NormalizerRegistry};

pub use crate::risk::{analyze, rank_scores, score_record, AnalysisRun};
