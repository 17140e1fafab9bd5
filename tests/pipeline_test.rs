// tests/pipeline_test.rs
//
// End-to-end pipeline properties on analytic signals.

use std::f64::consts::PI;

use vibrocheck::config::AnalysisConfig;
use vibrocheck::core::{DamageLevel, FaultType, VibrationAnalyzer};
use vibrocheck::error::AnalysisError;

fn sine(freq: f64, amplitude: f64, rate: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / rate).sin())
        .collect()
}

fn analyzer() -> VibrationAnalyzer {
    VibrationAnalyzer::with_defaults()
}

#[test]
fn all_zero_signal_reports_healthy() {
    let report = analyzer().analyze(&vec![0.0; 4096]).unwrap();

    assert_eq!(report.time_features.rms, 0.0);
    assert!(report.time_features.crest_factor.is_none());
    assert_eq!(report.fault_score, 0.0);
    assert_eq!(report.damage_level, DamageLevel::Healthy);
    assert!(!report.is_faulty);
    assert!(report.fault_types.is_empty());
    assert_eq!(report.recommendations.len(), 1);
}

#[test]
fn pure_100hz_tone_peaks_in_low_band() {
    let rate = 12_000.0;
    let report = analyzer().analyze(&sine(100.0, 1.0, rate, 12_000)).unwrap();

    // One FFT bin is 1 Hz at this length and rate
    assert!((report.freq_features.peak_frequency - 100.0).abs() <= 1.5);

    let bands = &report.freq_features.frequency_bands;
    assert!(bands.low > bands.mid);
    assert!(bands.low > bands.high);
    assert!(bands.low > 0.9 * report.freq_features.spectral_power);
}

#[test]
fn amplitude_scaling_is_proportional_and_crest_invariant() {
    let rate = 12_000.0;
    let analyzer = analyzer();
    let (small, _) = analyzer.assess(&sine(100.0, 1.0, rate, 12_000)).unwrap();
    let (large, _) = analyzer.assess(&sine(100.0, 2.0, rate, 12_000)).unwrap();

    assert!((large.time.rms / small.time.rms - 2.0).abs() < 1e-9);
    assert!((large.time.peak / small.time.peak - 2.0).abs() < 1e-9);

    let small_crest = small.time.crest_factor.unwrap();
    let large_crest = large.time.crest_factor.unwrap();
    assert!((small_crest - large_crest).abs() < 1e-9);
}

#[test]
fn crest_factor_is_at_least_one_for_live_signals() {
    let analyzer = analyzer();
    for freq in [30.0, 100.0, 1000.0, 3000.0] {
        let (features, _) = analyzer.assess(&sine(freq, 0.7, 12_000.0, 12_000)).unwrap();
        assert!(features.time.rms >= 0.0);
        let crest = features.time.crest_factor.unwrap();
        assert!(crest >= 1.0, "crest {crest} for {freq} Hz");
    }
}

#[test]
fn analysis_is_deterministic() {
    let signal = sine(250.0, 1.3, 12_000.0, 8192);
    let analyzer = analyzer();

    let (features_a, assessment_a) = analyzer.assess(&signal).unwrap();
    let (features_b, assessment_b) = analyzer.assess(&signal).unwrap();

    assert_eq!(features_a, features_b);
    assert_eq!(assessment_a, assessment_b);
}

#[test]
fn low_frequency_tone_reports_unbalance() {
    let report = analyzer().analyze(&sine(30.0, 3.0, 12_000.0, 12_000)).unwrap();

    assert!((report.freq_features.peak_frequency - 30.0).abs() <= 1.5);
    assert!(report
        .fault_types
        .iter()
        .any(|f| f.fault_type == FaultType::Unbalance));
    // The unbalance advisory follows the damage-level advisory
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("rotor balance")));
}

#[test]
fn mid_band_tone_reports_gear_fault() {
    let report = analyzer()
        .analyze(&sine(1000.0, 2.0, 12_000.0, 12_000))
        .unwrap();

    assert!(report
        .fault_types
        .iter()
        .any(|f| f.fault_type == FaultType::GearFault));
}

#[test]
fn high_band_tone_reports_misalignment() {
    let report = analyzer()
        .analyze(&sine(3000.0, 2.0, 12_000.0, 12_000))
        .unwrap();

    assert!(report
        .fault_types
        .iter()
        .any(|f| f.fault_type == FaultType::Misalignment));
}

#[test]
fn single_sample_is_rejected() {
    let result = analyzer().analyze(&[0.5]);
    assert!(matches!(result, Err(AnalysisError::Validation(_))));
}

#[test]
fn non_finite_sample_is_rejected() {
    let result = analyzer().analyze(&[0.0, f64::NAN, 1.0, 0.5]);
    assert!(matches!(result, Err(AnalysisError::Validation(_))));
}

#[test]
fn sampling_rate_below_passband_is_rejected() {
    let result = AnalysisConfig::builder().sample_rate_hz(15.0).build();
    assert!(matches!(result, Err(AnalysisError::Configuration(_))));
}

#[test]
fn report_metadata_reflects_input() {
    let rate = 12_000.0;
    let report = analyzer().analyze(&sine(100.0, 1.0, rate, 6000)).unwrap();
    assert_eq!(report.sample_count, 6000);
    assert_eq!(report.sample_rate_hz, rate);
    assert!((report.duration_secs - 0.5).abs() < 1e-12);
}
