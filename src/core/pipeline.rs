// src/core/pipeline.rs
//
// High-level analysis API chaining conditioning, feature extraction,
// classification, and recommendations. Each call is a pure function of the
// input plus the immutable configuration; no state crosses invocations.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AnalysisConfig;
use crate::core::classifier::{self, DamageLevel, FaultAssessment, FaultIndication};
use crate::core::features::{self, FeatureSet, FreqFeatures, TimeFeatures};
use crate::core::loader::Waveform;
use crate::core::preprocess;
use crate::core::recommend;
use crate::error::AnalysisError;

/// Complete result of one analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub sample_rate_hz: f64,
    pub sample_count: usize,
    pub duration_secs: f64,
    pub fault_score: f64,
    pub damage_level: DamageLevel,
    pub is_faulty: bool,
    pub fault_types: Vec<FaultIndication>,
    pub recommendations: Vec<String>,
    pub time_features: TimeFeatures,
    pub freq_features: FreqFeatures,
}

/// Vibration analysis pipeline bound to a validated configuration.
pub struct VibrationAnalyzer {
    config: AnalysisConfig,
}

impl VibrationAnalyzer {
    /// The configuration is validated up front; processing never starts on a
    /// bad config.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze raw samples captured at the configured sampling rate.
    pub fn analyze(&self, samples: &[f64]) -> Result<AnalysisReport, AnalysisError> {
        let waveform = Waveform {
            samples: samples.to_vec(),
            sample_rate_hz: self.config.sample_rate_hz,
        };
        self.analyze_waveform(&waveform)
    }

    /// Analyze a loaded waveform; its own sampling rate wins over the
    /// configured default and is re-checked against the bandpass cutoffs.
    pub fn analyze_waveform(&self, waveform: &Waveform) -> Result<AnalysisReport, AnalysisError> {
        let config = self.config_for_rate(waveform.sample_rate_hz)?;
        debug!(
            "analyzing {} samples at {} Hz",
            waveform.samples.len(),
            waveform.sample_rate_hz
        );

        let (features, assessment) = run_pipeline(waveform, &config)?;
        let recommendations = recommend::recommend(assessment.damage_level, &assessment.fault_types);

        Ok(AnalysisReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            sample_rate_hz: waveform.sample_rate_hz,
            sample_count: waveform.samples.len(),
            duration_secs: waveform.samples.len() as f64 / waveform.sample_rate_hz,
            fault_score: assessment.fault_score,
            damage_level: assessment.damage_level,
            is_faulty: assessment.is_faulty,
            fault_types: assessment.fault_types,
            recommendations,
            time_features: features.time,
            freq_features: features.freq,
        })
    }

    /// Run the pipeline up to the assessment, without report metadata.
    ///
    /// Useful for callers comparing results: the output carries no ids or
    /// timestamps, so identical input yields identical output.
    pub fn assess(
        &self,
        samples: &[f64],
    ) -> Result<(FeatureSet, FaultAssessment), AnalysisError> {
        let waveform = Waveform {
            samples: samples.to_vec(),
            sample_rate_hz: self.config.sample_rate_hz,
        };
        run_pipeline(&waveform, &self.config)
    }

    fn config_for_rate(&self, sample_rate_hz: f64) -> Result<AnalysisConfig, AnalysisError> {
        if sample_rate_hz == self.config.sample_rate_hz {
            return Ok(self.config.clone());
        }
        let mut config = self.config.clone();
        config.sample_rate_hz = sample_rate_hz;
        config.validate()?;
        Ok(config)
    }
}

impl Default for VibrationAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn run_pipeline(
    waveform: &Waveform,
    config: &AnalysisConfig,
) -> Result<(FeatureSet, FaultAssessment), AnalysisError> {
    let signal = preprocess::condition(waveform, config)?;
    let features = features::extract(&signal)?;
    let assessment = classifier::classify(&features, config)?;
    Ok((features, assessment))
}
