use debtrisk::{
    analyze, merge_records, metric_keys, AbsencePolicy, AnalysisRun, Error, MetricRecord,
    NormalizationRule, NormalizerRegistry, ScoringConfig, WeightConfig,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn weight_config(pairs: &[(&str, f64)]) -> WeightConfig {
    WeightConfig::new(
        pairs
            .iter()
            .map(|(k, w)| (k.to_string(), *w))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn identity_registry(keys: &[&str]) -> NormalizerRegistry {
    keys.iter().fold(NormalizerRegistry::empty(), |reg, key| {
        reg.with_rule(*key, NormalizationRule::RatioIdentity)
    })
}

#[test]
fn two_file_weighted_scenario_ranks_as_expected() {
    // File1: complexity 0.8, dead_code 0.2; File2: complexity 0.3, dead_code 0.9
    // weights: complexity 0.6, dead_code 0.4 -> 0.56 vs 0.54
    let records = vec![
        MetricRecord::new("file1.rs")
            .with_value("complexity", 0.8)
            .with_value("dead_code", 0.2),
        MetricRecord::new("file2.rs")
            .with_value("complexity", 0.3)
            .with_value("dead_code", 0.9),
    ];
    let config = ScoringConfig {
        weights: weight_config(&[("complexity", 0.6), ("dead_code", 0.4)]),
        ..Default::default()
    };

    let report = AnalysisRun::new(config)
        .with_registry(identity_registry(&["complexity", "dead_code"]))
        .execute(&records)
        .unwrap();

    assert_eq!(report.ranked.len(), 2);
    assert_eq!(report.ranked[0].file, PathBuf::from("file1.rs"));
    assert!((report.ranked[0].score - 0.56).abs() < 1e-12);
    assert_eq!(report.ranked[1].file, PathBuf::from("file2.rs"));
    assert!((report.ranked[1].score - 0.54).abs() < 1e-12);
    assert!(report.unscored.is_empty());
}

#[test]
fn absence_policies_differ_exactly_as_specified() {
    // metric a present (0.9, weight 0.5), metric b absent (weight 0.5):
    // redistribute -> 0.9, treat_as_zero_risk -> 0.45
    let records = vec![MetricRecord::new("file.rs")
        .with_value("a", 0.9)
        .with_value("b", None)];
    let registry = identity_registry(&["a", "b"]);

    let redistribute = AnalysisRun::new(ScoringConfig {
        weights: weight_config(&[("a", 0.5), ("b", 0.5)]),
        absence_policy: AbsencePolicy::Redistribute,
        ..Default::default()
    })
    .with_registry(registry.clone())
    .execute(&records)
    .unwrap();
    assert!((redistribute.ranked[0].score - 0.9).abs() < 1e-12);

    let zero_risk = AnalysisRun::new(ScoringConfig {
        weights: weight_config(&[("a", 0.5), ("b", 0.5)]),
        absence_policy: AbsencePolicy::TreatAsZeroRisk,
        ..Default::default()
    })
    .with_registry(registry)
    .execute(&records)
    .unwrap();
    assert!((zero_risk.ranked[0].score - 0.45).abs() < 1e-12);
}

#[test]
fn unscored_files_appear_exactly_once_and_never_ranked() {
    let records = vec![
        MetricRecord::new("scored.rs").with_value(metric_keys::DEAD_CODE_RATIO, 0.4),
        MetricRecord::new("empty.rs").with_value(metric_keys::COVERAGE_RATIO, None),
    ];
    let config = ScoringConfig {
        weights: weight_config(&[
            (metric_keys::DEAD_CODE_RATIO, 0.5),
            (metric_keys::COVERAGE_RATIO, 0.5),
        ]),
        ..Default::default()
    };

    let report = analyze(&records, config).unwrap();

    let ranked_files: Vec<_> = report.ranked.iter().map(|s| s.file.clone()).collect();
    assert_eq!(ranked_files, vec![PathBuf::from("scored.rs")]);
    let unscored: Vec<_> = report.unscored.iter().cloned().collect();
    assert_eq!(unscored, vec![PathBuf::from("empty.rs")]);
}

#[test]
fn all_zero_weights_produce_no_scores() {
    let records = vec![MetricRecord::new("a.rs").with_value(metric_keys::DEAD_CODE_RATIO, 0.4)];
    let config = ScoringConfig {
        weights: weight_config(&[
            (metric_keys::DEAD_CODE_RATIO, 0.0),
            (metric_keys::COVERAGE_RATIO, 0.0),
        ]),
        ..Default::default()
    };

    assert!(matches!(
        analyze(&records, config),
        Err(Error::EmptyConfiguration)
    ));
}

#[test]
fn negative_weight_fails_before_any_scoring() {
    let records = vec![MetricRecord::new("a.rs").with_value(metric_keys::DEAD_CODE_RATIO, 0.4)];
    let config = ScoringConfig {
        weights: weight_config(&[(metric_keys::DEAD_CODE_RATIO, -0.5)]),
        ..Default::default()
    };

    assert!(matches!(
        analyze(&records, config),
        Err(Error::InvalidWeight { .. })
    ));
}

#[test]
fn end_to_end_with_default_registry_and_merged_collectors() {
    let git_batch = vec![
        MetricRecord::new("src/hot.rs")
            .with_value(metric_keys::CHANGE_FREQUENCY, 40.0)
            .with_value(metric_keys::AGING_DAYS, 20.0),
        MetricRecord::new("src/stale.rs")
            .with_value(metric_keys::CHANGE_FREQUENCY, 0.0)
            .with_value(metric_keys::AGING_DAYS, 900.0),
    ];
    let static_batch = vec![
        MetricRecord::new("src/hot.rs")
            .with_value(metric_keys::CYCLOMATIC_COMPLEXITY, 35.0)
            .with_value(metric_keys::DEAD_CODE_RATIO, 0.1)
            .with_value(metric_keys::COVERAGE_RATIO, 0.2)
            .with_value(metric_keys::LINT_SMELL_COUNT, 12.0)
            .with_value(metric_keys::MAINTAINABILITY_INDEX, 30.0),
        MetricRecord::new("src/stale.rs")
            .with_value(metric_keys::CYCLOMATIC_COMPLEXITY, 2.0)
            .with_value(metric_keys::DEAD_CODE_RATIO, 0.0)
            .with_value(metric_keys::COVERAGE_RATIO, None)
            .with_value(metric_keys::LINT_SMELL_COUNT, 0.0)
            .with_value(metric_keys::MAINTAINABILITY_INDEX, 85.0),
    ];

    let records = merge_records([git_batch, static_batch]);
    let report = AnalysisRun::new(ScoringConfig::default())
        .with_collector("git-activity")
        .with_collector("static-analysis")
        .execute(&records)
        .unwrap();

    assert_eq!(report.ranked.len(), 2);
    // Hot, complex, poorly covered code outranks stale-but-simple code.
    assert_eq!(report.ranked[0].file, PathBuf::from("src/hot.rs"));
    for score in report.ranked.iter() {
        assert!((0.0..=1.0).contains(&score.score));
        assert!(!score.contributions.is_empty());
        let sum: f64 = score.contributions.iter().map(|c| c.weighted).sum();
        assert!((sum - score.score).abs() < 1e-12);
    }
    assert_eq!(
        report.provenance.collectors,
        vec!["git-activity".to_string(), "static-analysis".to_string()]
    );
}

#[test]
fn report_serializes_to_json() {
    let records = vec![MetricRecord::new("a.rs").with_value(metric_keys::DEAD_CODE_RATIO, 0.4)];
    let config = ScoringConfig {
        weights: weight_config(&[(metric_keys::DEAD_CODE_RATIO, 1.0)]),
        ..Default::default()
    };

    let report = analyze(&records, config).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"ranked\""));
    assert!(json.contains("\"unscored\""));
    assert!(json.contains("dead_code_ratio"));
}
