// Sub-modules
mod loader;
mod scoring;

use serde::{Deserialize, Serialize};

// Re-export scoring configuration types
pub use scoring::{
    default_severity_threshold, default_weights, AbsencePolicy, NormalizedWeights, ScoringConfig,
    WeightConfig,
};

// Re-export loader entry points
pub use loader::{load_config, load_config_from, parse_and_validate_config};

/// Top-level `.debtrisk.toml` structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtriskConfig {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl DebtriskConfig {
    /// Effective scoring configuration: the file's section, or defaults.
    pub fn scoring_config(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}
