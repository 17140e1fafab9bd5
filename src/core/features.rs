// src/core/features.rs
//
// Feature extraction: a fixed set of time- and frequency-domain statistics
// computed from the conditioned signal.

use serde::{Deserialize, Serialize};

use crate::core::dsp::{spectrum, stats};
use crate::core::preprocess::ConditionedSignal;
use crate::error::AnalysisError;

/// Analysis band edges in Hz. Bands falling above Nyquist come back empty.
pub const BAND_LOW_HZ: (f64, f64) = (0.0, 500.0);
pub const BAND_MID_HZ: (f64, f64) = (500.0, 2000.0);
pub const BAND_HIGH_HZ: (f64, f64) = (2000.0, 5000.0);

/// Time-domain statistics of the conditioned signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeFeatures {
    pub mean: f64,
    pub std: f64,
    pub rms: f64,
    pub peak: f64,
    pub peak_to_peak: f64,
    /// Peak over RMS; `None` when the signal is effectively silent.
    pub crest_factor: Option<f64>,
    pub kurtosis: f64,
    pub skewness: f64,
}

/// Energy split across the fixed analysis bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandPowers {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl BandPowers {
    pub fn total(&self) -> f64 {
        self.low + self.mid + self.high
    }
}

/// Frequency-domain features from the one-sided magnitude spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreqFeatures {
    /// Frequency of the strongest bin, excluding DC (Hz).
    pub peak_frequency: f64,
    /// Sum of squared magnitudes across the spectrum.
    pub spectral_power: f64,
    pub frequency_bands: BandPowers,
}

/// Complete feature set for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub time: TimeFeatures,
    pub freq: FreqFeatures,
}

impl FeatureSet {
    /// Check that every required feature is present and finite.
    ///
    /// The classifier refuses to substitute defaults for broken features, so
    /// this runs before any scoring.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let required = [
            ("mean", self.time.mean),
            ("std", self.time.std),
            ("rms", self.time.rms),
            ("peak", self.time.peak),
            ("peak_to_peak", self.time.peak_to_peak),
            ("kurtosis", self.time.kurtosis),
            ("skewness", self.time.skewness),
            ("peak_frequency", self.freq.peak_frequency),
            ("spectral_power", self.freq.spectral_power),
            ("band_low", self.freq.frequency_bands.low),
            ("band_mid", self.freq.frequency_bands.mid),
            ("band_high", self.freq.frequency_bands.high),
        ];
        for (name, value) in required {
            if !value.is_finite() {
                return Err(AnalysisError::Validation(format!(
                    "feature '{name}' is not finite"
                )));
            }
        }
        if let Some(crest) = self.time.crest_factor {
            if !crest.is_finite() {
                return Err(AnalysisError::Validation(
                    "feature 'crest_factor' is not finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Extract the full feature set from a conditioned signal.
pub fn extract(signal: &ConditionedSignal) -> Result<FeatureSet, AnalysisError> {
    let samples = &signal.samples;
    // Conditioning already validated length; keep the guard for direct callers.
    if samples.len() < 2 {
        return Err(AnalysisError::Validation(format!(
            "signal too short: {} samples",
            samples.len()
        )));
    }

    let time = TimeFeatures {
        mean: stats::mean(samples),
        std: stats::std_dev(samples),
        rms: stats::rms(samples),
        peak: stats::peak(samples),
        peak_to_peak: stats::peak_to_peak(samples),
        crest_factor: stats::crest_factor(samples),
        kurtosis: stats::kurtosis(samples),
        skewness: stats::skewness(samples),
    };

    let magnitudes = spectrum::magnitude_spectrum(samples)?;
    let n = samples.len();
    let rate = signal.sample_rate_hz;

    let peak_bin = magnitudes
        .iter()
        .enumerate()
        .skip(1) // DC carries no fault information
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(bin, _)| bin)
        .unwrap_or(1);

    let freq = FreqFeatures {
        peak_frequency: spectrum::bin_frequency(peak_bin, n, rate),
        spectral_power: magnitudes.iter().map(|m| m * m).sum(),
        frequency_bands: BandPowers {
            low: band_power(&magnitudes, n, rate, BAND_LOW_HZ),
            mid: band_power(&magnitudes, n, rate, BAND_MID_HZ),
            high: band_power(&magnitudes, n, rate, BAND_HIGH_HZ),
        },
    };

    Ok(FeatureSet { time, freq })
}

/// Sum of squared magnitude over [low, high) Hz.
fn band_power(magnitudes: &[f64], n: usize, sample_rate_hz: f64, band: (f64, f64)) -> f64 {
    magnitudes
        .iter()
        .enumerate()
        .filter(|(bin, _)| {
            let freq = spectrum::bin_frequency(*bin, n, sample_rate_hz);
            freq >= band.0 && freq < band.1
        })
        .map(|(_, m)| m * m)
        .sum()
}
