// src/config/scoring.rs
//
// Scoring constants for the heuristic fault classifier.
//
// The reference baselines, weights, and rule thresholds are field-tuned
// values carried over from gearbox monitoring practice. They are
// configuration, not learned parameters, and no derivation exists for them
// beyond that calibration.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Weights combining per-feature deviations into the fault score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub rms: f64,
    pub kurtosis: f64,
    pub crest: f64,
    pub band_imbalance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rms: 0.3,
            kurtosis: 0.3,
            crest: 0.2,
            band_imbalance: 0.2,
        }
    }
}

/// Trigger thresholds and confidences for the per-fault-type rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultRules {
    /// Excess kurtosis above which impulsive bearing damage is suspected.
    pub bearing_kurtosis: f64,
    /// Peak frequency below which rotor unbalance is suspected (Hz).
    pub unbalance_peak_hz: f64,
    pub unbalance_confidence: f64,
    /// High/low band power ratio above which misalignment is suspected.
    pub misalignment_band_ratio: f64,
    pub misalignment_confidence: f64,
    /// Gear-mesh frequency window for the spectral peak (Hz).
    pub gear_band_low_hz: f64,
    pub gear_band_high_hz: f64,
    pub gear_confidence: f64,
    /// RMS above which otherwise-unexplained vibration counts as abnormal.
    pub abnormal_rms: f64,
    pub abnormal_confidence: f64,
}

impl Default for FaultRules {
    fn default() -> Self {
        Self {
            bearing_kurtosis: 5.0,
            unbalance_peak_hz: 100.0,
            unbalance_confidence: 0.6,
            misalignment_band_ratio: 0.5,
            misalignment_confidence: 0.5,
            gear_band_low_hz: 500.0,
            gear_band_high_hz: 2000.0,
            gear_confidence: 0.6,
            abnormal_rms: 5.0,
            abnormal_confidence: 0.5,
        }
    }
}

/// Complete scoring configuration for one classifier invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Healthy-baseline span for RMS; deviations are value / reference.
    pub rms_reference: f64,
    /// Healthy-baseline span for |kurtosis|.
    pub kurtosis_reference: f64,
    /// Healthy-baseline span for crest factor.
    pub crest_reference: f64,
    pub weights: ScoreWeights,
    pub rules: FaultRules,
    /// Fault findings below this confidence are not reported.
    pub min_report_confidence: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rms_reference: 10.0,
            kurtosis_reference: 10.0,
            crest_reference: 10.0,
            weights: ScoreWeights::default(),
            rules: FaultRules::default(),
            min_report_confidence: 0.3,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (name, reference) in [
            ("rms_reference", self.rms_reference),
            ("kurtosis_reference", self.kurtosis_reference),
            ("crest_reference", self.crest_reference),
        ] {
            if !(reference.is_finite() && reference > 0.0) {
                return Err(AnalysisError::Configuration(format!(
                    "{name} must be positive, got {reference}"
                )));
            }
        }
        for (name, weight) in [
            ("rms weight", self.weights.rms),
            ("kurtosis weight", self.weights.kurtosis),
            ("crest weight", self.weights.crest),
            ("band imbalance weight", self.weights.band_imbalance),
        ] {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(AnalysisError::Configuration(format!(
                    "{name} must be non-negative, got {weight}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.min_report_confidence) {
            return Err(AnalysisError::Configuration(format!(
                "min_report_confidence must be within [0, 1], got {}",
                self.min_report_confidence
            )));
        }
        Ok(())
    }
}
