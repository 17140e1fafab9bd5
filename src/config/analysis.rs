// src/config/analysis.rs
//
// Immutable per-analysis configuration with fail-fast validation.

use serde::{Deserialize, Serialize};

use super::scoring::ScoringConfig;
use crate::error::AnalysisError;

/// Default sampling rate for gearbox vibration captures (Hz).
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 12_000.0;

/// Bandpass cutoffs for the conditioning stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandpassConfig {
    /// Low cutoff in Hz.
    pub low_hz: f64,
    /// High cutoff in Hz; clipped below Nyquist at design time.
    pub high_hz: f64,
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self {
            low_hz: 10.0,
            high_hz: 5000.0,
        }
    }
}

/// Damage-level band edges over the fault score.
///
/// Bands are closed below and open above, so a score sitting exactly on an
/// edge falls into the higher band. The top band is closed at 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageBands {
    pub slight: f64,
    pub moderate: f64,
    pub severe: f64,
    pub critical: f64,
}

impl Default for DamageBands {
    fn default() -> Self {
        Self {
            slight: 0.2,
            moderate: 0.4,
            severe: 0.6,
            critical: 0.8,
        }
    }
}

impl DamageBands {
    fn validate(&self) -> Result<(), AnalysisError> {
        let edges = [self.slight, self.moderate, self.severe, self.critical];
        let ascending = edges.windows(2).all(|w| w[0] < w[1]);
        if !ascending || edges[0] <= 0.0 || edges[3] >= 1.0 {
            return Err(AnalysisError::Configuration(format!(
                "damage band edges must ascend strictly within (0, 1), got {edges:?}"
            )));
        }
        Ok(())
    }
}

/// Complete configuration consumed by one pipeline invocation.
///
/// A config is an immutable value passed into each call; the pipeline holds
/// no process-wide mutable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Sampling rate assumed for containers that do not carry one (Hz).
    pub sample_rate_hz: f64,
    pub bandpass: BandpassConfig,
    /// Fault score at or above which a signal is flagged faulty.
    pub fault_threshold: f64,
    pub damage_bands: DamageBands,
    pub scoring: ScoringConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            bandpass: BandpassConfig::default(),
            fault_threshold: 0.5,
            damage_bands: DamageBands::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    /// High cutoff actually used by the filter, clipped below Nyquist.
    pub fn effective_high_hz(&self) -> f64 {
        self.bandpass.high_hz.min(0.99 * self.nyquist_hz())
    }

    /// Fail-fast consistency checks, run before any processing.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "sampling rate must be positive, got {}",
                self.sample_rate_hz
            )));
        }
        if !(self.bandpass.low_hz.is_finite() && self.bandpass.low_hz > 0.0) {
            return Err(AnalysisError::Configuration(format!(
                "bandpass low cutoff must be positive, got {}",
                self.bandpass.low_hz
            )));
        }
        if self.bandpass.high_hz <= self.bandpass.low_hz {
            return Err(AnalysisError::Configuration(format!(
                "bandpass high cutoff {} Hz must exceed low cutoff {} Hz",
                self.bandpass.high_hz, self.bandpass.low_hz
            )));
        }
        if self.effective_high_hz() <= self.bandpass.low_hz {
            return Err(AnalysisError::Configuration(format!(
                "sampling rate {} Hz is incompatible with the {} Hz low cutoff (Nyquist {} Hz)",
                self.sample_rate_hz,
                self.bandpass.low_hz,
                self.nyquist_hz()
            )));
        }
        if !(0.0..=1.0).contains(&self.fault_threshold) {
            return Err(AnalysisError::Configuration(format!(
                "fault threshold must be within [0, 1], got {}",
                self.fault_threshold
            )));
        }
        self.damage_bands.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}

/// Builder for analysis configurations.
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn sample_rate_hz(mut self, rate: f64) -> Self {
        self.config.sample_rate_hz = rate;
        self
    }

    pub fn bandpass(mut self, low_hz: f64, high_hz: f64) -> Self {
        self.config.bandpass = BandpassConfig { low_hz, high_hz };
        self
    }

    pub fn fault_threshold(mut self, threshold: f64) -> Self {
        self.config.fault_threshold = threshold;
        self
    }

    pub fn damage_bands(mut self, bands: DamageBands) -> Self {
        self.config.damage_bands = bands;
        self
    }

    pub fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<AnalysisConfig, AnalysisError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for AnalysisConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
