pub mod aggregator;
pub mod engine;
pub mod ranking;

pub use aggregator::score_record;
pub use engine::{analyze, AnalysisRun};
pub use ranking::{rank_order, rank_scores};
