// src/core/classifier.rs
//
// Heuristic fault classification over the extracted feature set.
// Deviations from the healthy baseline are clamped to [0, 1], combined by a
// fixed weighted sum, then bucketed into damage levels. Fault-type rules run
// independently of the score and may co-occur.

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, DamageBands, ScoringConfig};
use crate::core::dsp::stats;
use crate::core::features::{BandPowers, FeatureSet};
use crate::error::AnalysisError;

/// Discrete severity bucket derived from the fault score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageLevel {
    Healthy,
    Slight,
    Moderate,
    Severe,
    Critical,
}

impl DamageLevel {
    /// Bucket a fault score using the configured band edges.
    ///
    /// Edges are closed below: a score sitting exactly on an edge takes the
    /// higher band.
    pub fn from_score(score: f64, bands: &DamageBands) -> Self {
        if score < bands.slight {
            DamageLevel::Healthy
        } else if score < bands.moderate {
            DamageLevel::Slight
        } else if score < bands.severe {
            DamageLevel::Moderate
        } else if score < bands.critical {
            DamageLevel::Severe
        } else {
            DamageLevel::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DamageLevel::Healthy => "healthy",
            DamageLevel::Slight => "slight",
            DamageLevel::Moderate => "moderate",
            DamageLevel::Severe => "severe",
            DamageLevel::Critical => "critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DamageLevel::Healthy => "✓",
            DamageLevel::Slight => "·",
            DamageLevel::Moderate => "⚠",
            DamageLevel::Severe => "✗",
            DamageLevel::Critical => "✗",
        }
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            DamageLevel::Healthy => "\x1b[32m",  // green
            DamageLevel::Slight => "\x1b[36m",   // cyan
            DamageLevel::Moderate => "\x1b[33m", // yellow
            DamageLevel::Severe => "\x1b[31m",   // red
            DamageLevel::Critical => "\x1b[31m", // red
        }
    }
}

/// Fault categories the rule set can flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultType {
    BearingFault,
    Unbalance,
    Misalignment,
    GearFault,
    GeneralAbnormality,
}

impl FaultType {
    pub fn label(&self) -> &'static str {
        match self {
            FaultType::BearingFault => "bearing_fault",
            FaultType::Unbalance => "unbalance",
            FaultType::Misalignment => "misalignment",
            FaultType::GearFault => "gear_fault",
            FaultType::GeneralAbnormality => "general_abnormality",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FaultType::BearingFault => "Possible bearing defect detected",
            FaultType::Unbalance => "Possible rotor unbalance detected",
            FaultType::Misalignment => "Possible shaft misalignment detected",
            FaultType::GearFault => "Possible gear mesh fault detected",
            FaultType::GeneralAbnormality => "Abnormal vibration levels detected",
        }
    }
}

/// One triggered fault rule with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultIndication {
    #[serde(rename = "type")]
    pub fault_type: FaultType,
    pub confidence: f64,
    pub description: String,
}

impl FaultIndication {
    fn new(fault_type: FaultType, confidence: f64) -> Self {
        Self {
            fault_type,
            confidence: confidence.clamp(0.0, 1.0),
            description: fault_type.description().to_string(),
        }
    }
}

/// Complete assessment for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultAssessment {
    /// Combined severity in [0, 1].
    pub fault_score: f64,
    pub damage_level: DamageLevel,
    pub is_faulty: bool,
    /// Triggered fault rules, strongest confidence first.
    pub fault_types: Vec<FaultIndication>,
}

/// Score a feature set and detect candidate fault types.
///
/// A malformed feature set (non-finite value) is a ValidationError; the
/// classifier never substitutes defaults and returns no partial assessment.
pub fn classify(
    features: &FeatureSet,
    config: &AnalysisConfig,
) -> Result<FaultAssessment, AnalysisError> {
    features.validate()?;

    let fault_score = fault_score(features, &config.scoring);
    let damage_level = DamageLevel::from_score(fault_score, &config.damage_bands);
    // Inclusive: a score sitting exactly on the threshold counts as faulty
    let is_faulty = fault_score >= config.fault_threshold;
    let fault_types = detect_fault_types(features, &config.scoring);

    Ok(FaultAssessment {
        fault_score,
        damage_level,
        is_faulty,
        fault_types,
    })
}

fn fault_score(features: &FeatureSet, scoring: &ScoringConfig) -> f64 {
    let time = &features.time;

    let rms_dev = deviation(time.rms, scoring.rms_reference);
    let kurtosis_dev = deviation(time.kurtosis.abs(), scoring.kurtosis_reference);
    // An undefined crest factor (silent signal) contributes nothing
    let crest_dev = time
        .crest_factor
        .map_or(0.0, |crest| deviation(crest, scoring.crest_reference));
    let band_dev = band_imbalance(&features.freq.frequency_bands);

    let weights = &scoring.weights;
    let score = weights.rms * rms_dev
        + weights.kurtosis * kurtosis_dev
        + weights.crest * crest_dev
        + weights.band_imbalance * band_dev;
    score.clamp(0.0, 1.0)
}

/// Deviation of a value from its healthy-baseline span, clamped to [0, 1].
fn deviation(value: f64, reference: f64) -> f64 {
    (value / reference).clamp(0.0, 1.0)
}

/// Spread of energy across the three bands relative to an even split.
fn band_imbalance(bands: &BandPowers) -> f64 {
    let total = bands.total();
    if total <= stats::EPSILON {
        return 0.0;
    }
    let values = [bands.low, bands.mid, bands.high];
    (stats::std_dev(&values) / (total / 3.0)).clamp(0.0, 1.0)
}

fn detect_fault_types(features: &FeatureSet, scoring: &ScoringConfig) -> Vec<FaultIndication> {
    let rules = &scoring.rules;
    let time = &features.time;
    let freq = &features.freq;
    let bands = &freq.frequency_bands;
    let mut findings = Vec::new();

    // Impulsive energy points at rolling-element damage
    if time.kurtosis > rules.bearing_kurtosis {
        findings.push(FaultIndication::new(
            FaultType::BearingFault,
            time.kurtosis / scoring.kurtosis_reference,
        ));
    }

    // A dominant sub-rotational component points at rotor unbalance
    if freq.peak_frequency < rules.unbalance_peak_hz {
        findings.push(FaultIndication::new(
            FaultType::Unbalance,
            rules.unbalance_confidence,
        ));
    }

    // Elevated high-band energy relative to the low band points at misalignment
    if bands.high > bands.low * rules.misalignment_band_ratio {
        findings.push(FaultIndication::new(
            FaultType::Misalignment,
            rules.misalignment_confidence,
        ));
    }

    // Spectral peak inside the gear-mesh window
    if freq.peak_frequency > rules.gear_band_low_hz && freq.peak_frequency < rules.gear_band_high_hz
    {
        findings.push(FaultIndication::new(
            FaultType::GearFault,
            rules.gear_confidence,
        ));
    }

    // Elevated energy with no matching signature
    if findings.is_empty() && time.rms > rules.abnormal_rms {
        findings.push(FaultIndication::new(
            FaultType::GeneralAbnormality,
            rules.abnormal_confidence,
        ));
    }

    findings.retain(|f| f.confidence >= scoring.min_report_confidence);
    // Stable sort keeps rule order for equal confidences
    findings.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::{FreqFeatures, TimeFeatures};

    fn features(
        rms: f64,
        kurtosis: f64,
        crest: Option<f64>,
        bands: (f64, f64, f64),
        peak_frequency: f64,
    ) -> FeatureSet {
        FeatureSet {
            time: TimeFeatures {
                mean: 0.0,
                std: rms,
                rms,
                peak: crest.map_or(0.0, |c| c * rms),
                peak_to_peak: 2.0 * rms,
                crest_factor: crest,
                kurtosis,
                skewness: 0.0,
            },
            freq: FreqFeatures {
                peak_frequency,
                spectral_power: bands.0 + bands.1 + bands.2,
                frequency_bands: BandPowers {
                    low: bands.0,
                    mid: bands.1,
                    high: bands.2,
                },
            },
        }
    }

    #[test]
    fn test_band_edges_classify_upward() {
        let bands = DamageBands::default();
        assert_eq!(DamageLevel::from_score(0.0, &bands), DamageLevel::Healthy);
        assert_eq!(DamageLevel::from_score(0.19, &bands), DamageLevel::Healthy);
        assert_eq!(DamageLevel::from_score(0.2, &bands), DamageLevel::Slight);
        assert_eq!(DamageLevel::from_score(0.39, &bands), DamageLevel::Slight);
        assert_eq!(DamageLevel::from_score(0.4, &bands), DamageLevel::Moderate);
        assert_eq!(DamageLevel::from_score(0.6, &bands), DamageLevel::Severe);
        assert_eq!(DamageLevel::from_score(0.8, &bands), DamageLevel::Critical);
        assert_eq!(DamageLevel::from_score(1.0, &bands), DamageLevel::Critical);
    }

    #[test]
    fn test_fault_threshold_is_inclusive() {
        // rms and crest deviations saturate, the rest contribute nothing:
        // 0.3 * 1.0 + 0.3 * 0.0 + 0.2 * 1.0 + 0.2 * 0.0 = 0.5
        let features = features(10.0, 0.0, Some(10.0), (0.0, 0.0, 0.0), 250.0);
        let assessment = classify(&features, &AnalysisConfig::default()).unwrap();

        assert_eq!(assessment.fault_score, 0.5);
        assert!(assessment.is_faulty);
        assert_eq!(assessment.damage_level, DamageLevel::Moderate);
    }

    #[test]
    fn test_silent_signal_scores_zero() {
        let features = features(0.0, 0.0, None, (0.0, 0.0, 0.0), 250.0);
        let assessment = classify(&features, &AnalysisConfig::default()).unwrap();
        assert_eq!(assessment.fault_score, 0.0);
        assert_eq!(assessment.damage_level, DamageLevel::Healthy);
        assert!(!assessment.is_faulty);
    }

    #[test]
    fn test_bearing_rule_confidence_scales_with_kurtosis() {
        let features = features(1.0, 8.0, Some(3.0), (1.0, 1.0, 1.0), 250.0);
        let assessment = classify(&features, &AnalysisConfig::default()).unwrap();

        let bearing = assessment
            .fault_types
            .iter()
            .find(|f| f.fault_type == FaultType::BearingFault)
            .expect("bearing fault expected");
        assert!((bearing.confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_findings_are_ordered_by_confidence() {
        // Kurtosis 8 yields bearing at 0.8; peak at 50 Hz yields unbalance at 0.6
        let features = features(1.0, 8.0, Some(3.0), (4.0, 0.5, 0.5), 50.0);
        let assessment = classify(&features, &AnalysisConfig::default()).unwrap();

        assert!(assessment.fault_types.len() >= 2);
        assert_eq!(assessment.fault_types[0].fault_type, FaultType::BearingFault);
        assert_eq!(assessment.fault_types[1].fault_type, FaultType::Unbalance);
        let confidences: Vec<f64> = assessment
            .fault_types
            .iter()
            .map(|f| f.confidence)
            .collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_low_confidence_findings_are_dropped() {
        let mut config = AnalysisConfig::default();
        config.scoring.min_report_confidence = 0.55;

        // Misalignment (0.5) falls below the reporting threshold
        let features = features(1.0, 0.0, Some(3.0), (1.0, 0.5, 2.0), 250.0);
        let assessment = classify(&features, &config).unwrap();
        assert!(assessment
            .fault_types
            .iter()
            .all(|f| f.fault_type != FaultType::Misalignment));
    }

    #[test]
    fn test_general_abnormality_requires_no_other_finding() {
        let features = features(7.0, 0.0, Some(2.0), (0.0, 0.0, 0.0), 250.0);
        let assessment = classify(&features, &AnalysisConfig::default()).unwrap();
        assert_eq!(assessment.fault_types.len(), 1);
        assert_eq!(
            assessment.fault_types[0].fault_type,
            FaultType::GeneralAbnormality
        );
    }

    #[test]
    fn test_non_finite_feature_is_rejected() {
        let features = features(1.0, f64::NAN, Some(3.0), (1.0, 1.0, 1.0), 250.0);
        let result = classify(&features, &AnalysisConfig::default());
        match result {
            Err(AnalysisError::Validation(msg)) => assert!(msg.contains("kurtosis")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
