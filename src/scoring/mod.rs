pub mod normalizer;

pub use normalizer::{default_registry, NormalizationRule, NormalizerRegistry};
