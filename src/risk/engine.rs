//! Batch analysis driver
//!
//! One [`AnalysisRun`] takes an already-collected batch of raw records
//! through validation, normalization, per-file scoring, and final ranking.
//! Configuration errors fail the run before any scoring begins; per-file
//! errors are isolated into the unscored list.

use crate::config::ScoringConfig;
use crate::core::{
    AnalysisReport, Error, MetricRecord, Result, RiskScore, RunProvenance,
};
use crate::risk::{aggregator, ranking};
use crate::scoring::NormalizerRegistry;
use im::Vector;
use rayon::prelude::*;
use std::path::PathBuf;

enum Outcome {
    Scored(RiskScore),
    Unscored(PathBuf),
}

/// One scoring invocation over a batch of collector records.
///
/// Holds only read-only state: the normalization registry and the scoring
/// configuration are fixed at construction and shared across the parallel
/// per-file map.
pub struct AnalysisRun {
    registry: NormalizerRegistry,
    config: ScoringConfig,
    collectors: Vec<String>,
}

impl AnalysisRun {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            registry: NormalizerRegistry::default(),
            config,
            collectors: Vec::new(),
        }
    }

    /// Replace the default normalization registry.
    pub fn with_registry(mut self, registry: NormalizerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Record a collector's identity in the run provenance.
    pub fn with_collector(mut self, name: impl Into<String>) -> Self {
        self.collectors.push(name.into());
        self
    }

    /// Execute the run.
    ///
    /// Fails fast on configuration errors ([`Error::InvalidWeight`],
    /// [`Error::EmptyConfiguration`]) and on any unregistered metric key
    /// ([`Error::UnknownMetric`]); files with nothing scorable are recovered
    /// into the unscored list without aborting the batch.
    pub fn execute(&self, records: &[MetricRecord]) -> Result<AnalysisReport> {
        self.config.validate()?;
        // Weight normalization happens once per run, never per file.
        let weights = self.config.weights.normalized()?;

        // Per-file work is independent: each outcome depends only on the
        // file's own record plus the read-only weights and registry.
        let outcomes = records
            .par_iter()
            .map(|record| {
                let normalized = self.registry.normalize(record)?;
                match aggregator::score_record(
                    &normalized,
                    &weights,
                    self.config.absence_policy,
                    self.config.severity_threshold,
                ) {
                    Ok(score) => Ok(Outcome::Scored(score)),
                    Err(Error::NoMetricsAvailable { file }) => Ok(Outcome::Unscored(file)),
                    Err(e) => Err(e),
                }
            })
            .collect::<Result<Vec<Outcome>>>()?;

        let mut scored = Vec::new();
        let mut unscored = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Scored(score) => scored.push(score),
                Outcome::Unscored(file) => unscored.push(file),
            }
        }

        // Computation order was arbitrary; re-impose the total order here.
        let ranked = ranking::rank_scores(scored);
        unscored.sort();

        log::debug!(
            "scored {} files, {} unscored, {} weighted metrics",
            ranked.len(),
            unscored.len(),
            weights.len()
        );

        Ok(AnalysisReport {
            ranked: Vector::from(ranked),
            unscored: Vector::from(unscored),
            weights,
            provenance: RunProvenance::new(self.collectors.clone()),
        })
    }
}

/// Score a batch under a configuration, with the default registry.
pub fn analyze(records: &[MetricRecord], config: ScoringConfig) -> Result<AnalysisReport> {
    AnalysisRun::new(config).execute(records)
}
