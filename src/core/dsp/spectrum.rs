//! One-sided magnitude spectrum via real-input FFT

use num_complex::Complex64;
use realfft::RealFftPlanner;

use crate::error::AnalysisError;

/// Magnitude spectrum of a real signal, bins 0..=n/2.
pub fn magnitude_spectrum(samples: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    if samples.len() < 2 {
        return Err(AnalysisError::Validation(format!(
            "signal too short for spectrum: {} samples",
            samples.len()
        )));
    }

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut input = samples.to_vec();
    let mut spectrum: Vec<Complex64> = fft.make_output_vec();
    fft.process(&mut input, &mut spectrum)
        .map_err(|e| AnalysisError::Validation(format!("fft failed: {e}")))?;

    Ok(spectrum.iter().map(|c| c.norm()).collect())
}

/// Center frequency in Hz of bin `bin` for a length-`n` signal.
pub fn bin_frequency(bin: usize, n: usize, sample_rate_hz: f64) -> f64 {
    bin as f64 * sample_rate_hz / n as f64
}
