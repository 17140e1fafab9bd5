//! Time-domain statistics over sample sequences

/// Magnitudes below this are treated as zero when normalizing.
pub const EPSILON: f64 = 1e-12;

/// Arithmetic mean
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mean = mean(samples);
    let variance =
        samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

/// Root mean square
pub fn rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Maximum absolute amplitude
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0f64, f64::max)
}

/// Peak-to-peak span (max minus min)
pub fn peak_to_peak(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let max = samples.iter().fold(f64::MIN, |a, &b| a.max(b));
    let min = samples.iter().fold(f64::MAX, |a, &b| a.min(b));
    max - min
}

/// Crest factor = peak / RMS, `None` when the signal is effectively silent
pub fn crest_factor(samples: &[f64]) -> Option<f64> {
    let rms = rms(samples);
    if rms < EPSILON {
        return None;
    }
    Some(peak(samples) / rms)
}

/// Adjusted sample excess kurtosis (a normal distribution scores 0)
pub fn kurtosis(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 4 {
        return 0.0;
    }
    let mean = mean(samples);
    let std = std_dev(samples);
    if std < EPSILON {
        return 0.0;
    }
    let n = n as f64;
    let fourth_moment: f64 = samples.iter().map(|s| ((s - mean) / std).powi(4)).sum();
    (n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0))) * fourth_moment
        - 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0))
}

/// Adjusted sample skewness (third standardized moment)
pub fn skewness(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 3 {
        return 0.0;
    }
    let mean = mean(samples);
    let std = std_dev(samples);
    if std < EPSILON {
        return 0.0;
    }
    let n = n as f64;
    let third_moment: f64 = samples.iter().map(|s| ((s - mean) / std).powi(3)).sum();
    (n / ((n - 1.0) * (n - 2.0))) * third_moment
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, amplitude: f64, rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn test_rms_square_wave() {
        let samples = vec![1.0, -1.0, 1.0, -1.0];
        assert!((rms(&samples) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rms_of_sine() {
        let samples = sine(10.0, 2.0, 4800.0, 4800);
        assert!((rms(&samples) - 2.0 / 2.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_crest_factor_of_sine() {
        let samples = sine(10.0, 1.0, 4800.0, 4800);
        let crest = crest_factor(&samples).unwrap();
        assert!((crest - 2.0f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_crest_factor_of_silence_is_undefined() {
        assert!(crest_factor(&[0.0; 64]).is_none());
    }

    #[test]
    fn test_kurtosis_of_sine() {
        // A sine distribution has excess kurtosis -1.5
        let samples = sine(10.0, 1.0, 4800.0, 4800);
        assert!((kurtosis(&samples) + 1.5).abs() < 0.05);
    }

    #[test]
    fn test_kurtosis_of_constant_is_zero() {
        assert_eq!(kurtosis(&[3.0; 100]), 0.0);
    }

    #[test]
    fn test_kurtosis_short_input() {
        assert_eq!(kurtosis(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_skewness_of_symmetric_signal() {
        let samples = sine(10.0, 1.0, 4800.0, 4800);
        assert!(skewness(&samples).abs() < 0.01);
    }

    #[test]
    fn test_peak_to_peak() {
        assert!((peak_to_peak(&[-0.5, 0.25, 0.75, -0.25]) - 1.25).abs() < 1e-12);
    }
}
