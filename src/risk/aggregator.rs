//! Per-file composite scoring
//!
//! Combines a normalized record with the run-wide weight distribution under
//! an absence policy, keeping the weighted contribution of every metric for
//! explainability.

use crate::config::{AbsencePolicy, NormalizedWeights};
use crate::core::{Contribution, Error, NormalizedRecord, Result, RiskScore};

/// Score one file.
///
/// Only metrics that are present in the record and carry non-zero weight
/// participate. Under [`AbsencePolicy::Redistribute`] the weight mass of
/// absent metrics shifts proportionally onto the present ones, so the file
/// still sums the full normalized weight mass; under
/// [`AbsencePolicy::TreatAsZeroRisk`] absent metrics simply contribute
/// nothing.
///
/// Fails with [`Error::NoMetricsAvailable`] when nothing is scorable for the
/// file (no present values, or every present value carries zero weight).
/// Such files are excluded from ranking and reported as unscored; scoring
/// them 0 would misleadingly read as zero risk.
pub fn score_record(
    record: &NormalizedRecord,
    weights: &NormalizedWeights,
    policy: AbsencePolicy,
    severity_threshold: f64,
) -> Result<RiskScore> {
    let present: Vec<(&str, f64, f64)> = record
        .values
        .iter()
        .filter_map(|(metric, value)| {
            value.and_then(|v| {
                let weight = weights.weight(metric);
                (weight > 0.0).then_some((metric.as_str(), v, weight))
            })
        })
        .collect();

    if present.is_empty() {
        return Err(Error::no_metrics(record.file.clone()));
    }

    let present_mass: f64 = present.iter().map(|(_, _, w)| w).sum();

    let mut contributions: Vec<Contribution> = present
        .iter()
        .map(|&(metric, value, weight)| {
            let effective_weight = match policy {
                // present_mass > 0 is guaranteed by the filter above.
                AbsencePolicy::Redistribute => weight / present_mass,
                AbsencePolicy::TreatAsZeroRisk => weight,
            };
            Contribution {
                metric: metric.to_string(),
                weight: effective_weight,
                normalized_value: value,
                weighted: effective_weight * value,
            }
        })
        .collect();

    // Dominant factor first; key as the final tie-break keeps output stable.
    contributions.sort_by(|a, b| {
        b.weighted
            .total_cmp(&a.weighted)
            .then_with(|| a.metric.cmp(&b.metric))
    });

    let score: f64 = contributions.iter().map(|c| c.weighted).sum();
    let severe_metric_count = present
        .iter()
        .filter(|&&(_, value, _)| value > severity_threshold)
        .count();

    Ok(RiskScore {
        file: record.file.clone(),
        score,
        contributions,
        severe_metric_count,
    })
}
