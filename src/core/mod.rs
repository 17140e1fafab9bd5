//! Core analysis pipeline modules

pub mod classifier;
pub mod dsp;
pub mod features;
pub mod loader;
pub mod pipeline;
pub mod preprocess;
pub mod recommend;

pub use classifier::{DamageLevel, FaultAssessment, FaultIndication, FaultType};
pub use features::{BandPowers, FeatureSet, FreqFeatures, TimeFeatures};
pub use loader::{load_waveform, SignalFormat, Waveform};
pub use pipeline::{AnalysisReport, VibrationAnalyzer};
pub use preprocess::ConditionedSignal;
