//! VibroCheck - Machine vibration fault analysis
//!
//! Conditions a raw vibration waveform, derives time- and frequency-domain
//! statistics, scores them against field-tuned baselines, and maps the result
//! to a damage level, candidate fault types, and maintenance advice.
//!
//! ## Pipeline
//!
//! Loader → Preprocessor → Feature Extractor → Fault Classifier →
//! Recommendation Generator. Every stage is a pure function of its input;
//! concurrent analyses share nothing but the read-only configuration.
//!
//! ## Module Structure
//!
//! - `core` - Loading, conditioning, feature extraction, classification
//! - `config` - Immutable per-analysis configuration and scoring constants
//! - `cli` - Terminal and JSON output formatting
//! - `testgen` - Synthetic gearbox signals for demos and validation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vibrocheck::{AnalysisConfig, VibrationAnalyzer};
//!
//! let config = AnalysisConfig::builder()
//!     .sample_rate_hz(12_000.0)
//!     .fault_threshold(0.5)
//!     .build()?;
//!
//! let analyzer = VibrationAnalyzer::new(config)?;
//! let report = analyzer.analyze(&samples)?;
//!
//! println!("{} (score {:.0}%)", report.damage_level.label(), report.fault_score * 100.0);
//! for advice in &report.recommendations {
//!     println!("  {advice}");
//! }
//! ```
//!
//! ## Damage Levels
//!
//! | Level    | Fault score | Action                              |
//! |----------|-------------|-------------------------------------|
//! | healthy  | 0.0 – 0.2   | Routine monitoring                  |
//! | slight   | 0.2 – 0.4   | Increase monitoring frequency       |
//! | moderate | 0.4 – 0.6   | Inspect within 2–4 weeks            |
//! | severe   | 0.6 – 0.8   | Immediate inspection, reduce load   |
//! | critical | 0.8 – 1.0   | Shutdown recommended                |

// Core analysis pipeline
pub mod core;

// Command-line interface helpers
pub mod cli;

// Configuration and scoring constants
pub mod config;

// Error taxonomy
pub mod error;

// Synthetic signal generation
pub mod testgen;

// Re-export commonly used types at crate root for convenience
pub use config::{AnalysisConfig, AnalysisConfigBuilder, DamageBands, ScoringConfig};
pub use core::{
    AnalysisReport, DamageLevel, FaultAssessment, FaultIndication, FaultType, FeatureSet,
    FreqFeatures, TimeFeatures, VibrationAnalyzer, Waveform,
};
pub use error::AnalysisError;
