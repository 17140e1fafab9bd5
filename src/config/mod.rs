//! Configuration for the analysis pipeline

mod analysis;
mod scoring;

pub use analysis::{
    AnalysisConfig, AnalysisConfigBuilder, BandpassConfig, DamageBands, DEFAULT_SAMPLE_RATE_HZ,
};
pub use scoring::{FaultRules, ScoreWeights, ScoringConfig};
