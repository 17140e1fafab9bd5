//! Signal conditioning filters
//!
//! The bandpass is built from cascaded second-order Butterworth sections and
//! applied forward then backward, so the passband keeps zero phase shift and
//! feature timing is not distorted.

use std::f64::consts::PI;

use crate::error::AnalysisError;

/// Q values splitting a 4th-order Butterworth response into two biquads.
const BUTTERWORTH_Q: [f64; 2] = [0.541_196_100_146_197, 1.306_562_964_876_377];

/// Samples of odd reflection added at each end before filtering,
/// capped at signal length - 1.
const EDGE_PAD: usize = 27;

/// Subtract the arithmetic mean from every sample (DC removal)
pub fn remove_dc(samples: &[f64]) -> Vec<f64> {
    let mean = super::stats::mean(samples);
    samples.iter().map(|s| s - mean).collect()
}

/// One second-order IIR section, direct form II transposed.
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    fn lowpass(cutoff_hz: f64, sample_rate_hz: f64, q: f64) -> Self {
        let w0 = 2.0 * PI * cutoff_hz / sample_rate_hz;
        let alpha = w0.sin() / (2.0 * q);
        let cos_w0 = w0.cos();
        let a0 = 1.0 + alpha;
        Self {
            b0: ((1.0 - cos_w0) / 2.0) / a0,
            b1: (1.0 - cos_w0) / a0,
            b2: ((1.0 - cos_w0) / 2.0) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    fn highpass(cutoff_hz: f64, sample_rate_hz: f64, q: f64) -> Self {
        let w0 = 2.0 * PI * cutoff_hz / sample_rate_hz;
        let alpha = w0.sin() / (2.0 * q);
        let cos_w0 = w0.cos();
        let a0 = 1.0 + alpha;
        Self {
            b0: ((1.0 + cos_w0) / 2.0) / a0,
            b1: (-(1.0 + cos_w0)) / a0,
            b2: ((1.0 + cos_w0) / 2.0) / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }

    /// Run the section over the buffer in place, starting from rest.
    fn run(&self, samples: &mut [f64]) {
        let mut z1 = 0.0;
        let mut z2 = 0.0;
        for s in samples.iter_mut() {
            let x = *s;
            let y = self.b0 * x + z1;
            z1 = self.b1 * x - self.a1 * y + z2;
            z2 = self.b2 * x - self.a2 * y;
            *s = y;
        }
    }
}

/// Zero-phase Butterworth-style bandpass filter.
pub struct BandpassFilter {
    sections: Vec<Biquad>,
}

impl BandpassFilter {
    /// Design a bandpass for the given cutoffs.
    ///
    /// Both cutoffs must sit strictly inside (0, Nyquist); anything else is a
    /// configuration the filter cannot realize.
    pub fn design(
        low_hz: f64,
        high_hz: f64,
        sample_rate_hz: f64,
    ) -> Result<Self, AnalysisError> {
        let nyquist = sample_rate_hz / 2.0;
        if !(low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist) {
            return Err(AnalysisError::Configuration(format!(
                "bandpass {low_hz}-{high_hz} Hz is not realizable at {sample_rate_hz} Hz sampling"
            )));
        }

        let mut sections = Vec::with_capacity(2 * BUTTERWORTH_Q.len());
        for q in BUTTERWORTH_Q {
            sections.push(Biquad::highpass(low_hz, sample_rate_hz, q));
        }
        for q in BUTTERWORTH_Q {
            sections.push(Biquad::lowpass(high_hz, sample_rate_hz, q));
        }
        Ok(Self { sections })
    }

    /// Filter forward and backward so the output has no phase shift.
    ///
    /// The input is extended at both ends by odd reflection to suppress the
    /// startup transient, and the extension is stripped from the result.
    pub fn apply_zero_phase(&self, samples: &[f64]) -> Vec<f64> {
        if samples.len() < 2 {
            return samples.to_vec();
        }
        let pad = EDGE_PAD.min(samples.len() - 1);
        let mut buffer = reflect_pad(samples, pad);

        for section in &self.sections {
            section.run(&mut buffer);
        }
        buffer.reverse();
        for section in &self.sections {
            section.run(&mut buffer);
        }
        buffer.reverse();

        buffer[pad..pad + samples.len()].to_vec()
    }
}

/// Extend a signal by `pad` samples of odd reflection around each endpoint.
fn reflect_pad(samples: &[f64], pad: usize) -> Vec<f64> {
    let n = samples.len();
    let first = samples[0];
    let last = samples[n - 1];

    let mut out = Vec::with_capacity(n + 2 * pad);
    for i in (1..=pad).rev() {
        out.push(2.0 * first - samples[i]);
    }
    out.extend_from_slice(samples);
    for i in ((n - 1 - pad)..(n - 1)).rev() {
        out.push(2.0 * last - samples[i]);
    }
    out
}
