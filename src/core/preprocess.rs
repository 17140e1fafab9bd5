// src/core/preprocess.rs
//
// Signal conditioning ahead of feature extraction: DC removal followed by a
// zero-phase bandpass into the analysis band.

use log::debug;

use crate::config::AnalysisConfig;
use crate::core::dsp::filters::{remove_dc, BandpassFilter};
use crate::core::loader::Waveform;
use crate::error::AnalysisError;

/// Shortest signal the pipeline accepts.
pub const MIN_SIGNAL_LEN: usize = 2;

/// Signals at or below this length skip the bandpass; the filter transient
/// would dominate the output.
const MIN_FILTER_LEN: usize = 100;

/// DC-free, band-limited signal ready for feature extraction.
#[derive(Debug, Clone)]
pub struct ConditionedSignal {
    pub samples: Vec<f64>,
    pub sample_rate_hz: f64,
}

/// Condition a waveform: validate, remove DC bias, bandpass.
///
/// Deterministic and side-effect free; identical input produces identical
/// output.
pub fn condition(
    waveform: &Waveform,
    config: &AnalysisConfig,
) -> Result<ConditionedSignal, AnalysisError> {
    validate_signal(&waveform.samples)?;

    let mut samples = remove_dc(&waveform.samples);
    if samples.len() > MIN_FILTER_LEN {
        let filter = BandpassFilter::design(
            config.bandpass.low_hz,
            config.effective_high_hz(),
            config.sample_rate_hz,
        )?;
        samples = filter.apply_zero_phase(&samples);
    } else {
        debug!(
            "signal of {} samples is too short to bandpass, applying DC removal only",
            samples.len()
        );
    }

    Ok(ConditionedSignal {
        samples,
        sample_rate_hz: waveform.sample_rate_hz,
    })
}

fn validate_signal(samples: &[f64]) -> Result<(), AnalysisError> {
    if samples.len() < MIN_SIGNAL_LEN {
        return Err(AnalysisError::Validation(format!(
            "signal too short: {} samples (minimum {MIN_SIGNAL_LEN})",
            samples.len()
        )));
    }
    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(AnalysisError::Validation(format!(
            "non-finite sample at index {index}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dsp::stats;
    use std::f64::consts::PI;

    fn waveform(samples: Vec<f64>) -> Waveform {
        Waveform {
            samples,
            sample_rate_hz: 12_000.0,
        }
    }

    #[test]
    fn test_dc_offset_is_removed() {
        let samples: Vec<f64> = (0..8192)
            .map(|i| 3.0 + (2.0 * PI * 100.0 * i as f64 / 12_000.0).sin())
            .collect();
        let signal = condition(&waveform(samples), &AnalysisConfig::default()).unwrap();
        assert!(stats::mean(&signal.samples).abs() < 1e-6);
    }

    #[test]
    fn test_short_signal_skips_filter_but_not_dc_removal() {
        let signal = condition(&waveform(vec![1.0; 50]), &AnalysisConfig::default()).unwrap();
        assert_eq!(signal.samples.len(), 50);
        assert!(signal.samples.iter().all(|s| s.abs() < 1e-12));
    }

    #[test]
    fn test_empty_signal_is_rejected() {
        let result = condition(&waveform(vec![]), &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_single_sample_is_rejected() {
        let result = condition(&waveform(vec![0.5]), &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_nan_sample_is_rejected() {
        let mut samples = vec![0.0; 256];
        samples[17] = f64::NAN;
        let result = condition(&waveform(samples), &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::Validation(_))));
    }
}
