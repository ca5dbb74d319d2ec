//! Deterministic total ordering of scored files
//!
//! Reports must come out identical regardless of input order, so the sort
//! key is total: composite score descending, then severe metric count
//! descending, then file path ascending.

use crate::core::RiskScore;
use std::cmp::Ordering;

/// Compare two scores under the ranking order.
pub fn rank_order(a: &RiskScore, b: &RiskScore) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.severe_metric_count.cmp(&a.severe_metric_count))
        .then_with(|| a.file.cmp(&b.file))
}

/// Sort scores into rank order.
pub fn rank_scores(mut scores: Vec<RiskScore>) -> Vec<RiskScore> {
    scores.sort_by(rank_order);
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn score(file: &str, value: f64, severe: usize) -> RiskScore {
        RiskScore {
            file: PathBuf::from(file),
            score: value,
            contributions: Vec::new(),
            severe_metric_count: severe,
        }
    }

    #[test]
    fn higher_score_ranks_first() {
        let ranked = rank_scores(vec![score("a.rs", 0.54, 0), score("b.rs", 0.56, 0)]);
        assert_eq!(ranked[0].file, PathBuf::from("b.rs"));
    }

    #[test]
    fn ties_break_on_severe_metric_count_then_path() {
        let ranked = rank_scores(vec![
            score("c.rs", 0.5, 1),
            score("a.rs", 0.5, 1),
            score("b.rs", 0.5, 2),
        ]);
        let files: Vec<_> = ranked.iter().map(|s| s.file.clone()).collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("b.rs"),
                PathBuf::from("a.rs"),
                PathBuf::from("c.rs"),
            ]
        );
    }

    #[test]
    fn ranking_is_insensitive_to_input_order() {
        let forward = rank_scores(vec![
            score("a.rs", 0.2, 0),
            score("b.rs", 0.9, 1),
            score("c.rs", 0.9, 1),
        ]);
        let backward = rank_scores(vec![
            score("c.rs", 0.9, 1),
            score("b.rs", 0.9, 1),
            score("a.rs", 0.2, 0),
        ]);
        assert_eq!(forward, backward);
    }
}
