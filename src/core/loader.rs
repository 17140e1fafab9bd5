// src/core/loader.rs
//
// Waveform loading from tabular text and binary containers.
// The analysis pipeline never parses files itself; everything enters through
// this module as plain samples plus a sampling rate.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::AnalysisError;

/// Raw waveform: amplitude samples plus the rate they were captured at.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Vec<f64>,
    pub sample_rate_hz: f64,
}

/// Supported waveform container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalFormat {
    /// Comma-separated values, optional header row; first numeric column wins.
    Csv,
    /// Whitespace-separated plain-text samples.
    Text,
    /// RIFF WAVE; the header's sampling rate overrides the configured default.
    Wav,
    /// Raw little-endian f32 samples.
    RawF32,
    /// Raw little-endian f64 samples.
    RawF64,
}

impl SignalFormat {
    /// Infer the container format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => Some(Self::Csv),
            Some("txt") | Some("dat") => Some(Self::Text),
            Some("wav") => Some(Self::Wav),
            Some("f32") | Some("bin") | Some("raw") => Some(Self::RawF32),
            Some("f64") => Some(Self::RawF64),
            _ => None,
        }
    }

    /// Extensions the batch collector picks up.
    pub fn extensions() -> &'static [&'static str] {
        &["csv", "txt", "dat", "wav", "f32", "bin", "raw", "f64"]
    }
}

/// Load a waveform, inferring the container from the file extension.
///
/// `default_rate_hz` applies to containers that do not carry a sampling rate
/// of their own; a WAV header overrides it.
pub fn load_waveform(path: &Path, default_rate_hz: f64) -> Result<Waveform, AnalysisError> {
    let format = SignalFormat::from_path(path).ok_or_else(|| {
        AnalysisError::Validation(format!("unsupported file format: {}", path.display()))
    })?;
    debug!("loading {} as {:?}", path.display(), format);

    let waveform = match format {
        SignalFormat::Csv => Waveform {
            samples: parse_csv(&fs::read_to_string(path)?)?,
            sample_rate_hz: default_rate_hz,
        },
        SignalFormat::Text => Waveform {
            samples: parse_text(&fs::read_to_string(path)?)?,
            sample_rate_hz: default_rate_hz,
        },
        SignalFormat::Wav => load_wav(path)?,
        SignalFormat::RawF32 => Waveform {
            samples: parse_raw_f32(&fs::read(path)?)?,
            sample_rate_hz: default_rate_hz,
        },
        SignalFormat::RawF64 => Waveform {
            samples: parse_raw_f64(&fs::read(path)?)?,
            sample_rate_hz: default_rate_hz,
        },
    };

    if waveform.samples.len() < 2 {
        return Err(AnalysisError::Validation(format!(
            "{}: waveform too short ({} samples)",
            path.display(),
            waveform.samples.len()
        )));
    }
    debug!(
        "loaded {} samples at {} Hz",
        waveform.samples.len(),
        waveform.sample_rate_hz
    );
    Ok(waveform)
}

/// Parse CSV content, reading the first column that holds numbers.
///
/// A leading row with no numeric field is treated as a header and skipped.
fn parse_csv(content: &str) -> Result<Vec<f64>, AnalysisError> {
    let mut samples = Vec::new();
    let mut column: Option<usize> = None;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let col = match column {
            Some(col) => col,
            None => match fields.iter().position(|f| f.parse::<f64>().is_ok()) {
                Some(col) => {
                    column = Some(col);
                    col
                }
                None if samples.is_empty() => continue, // header row
                None => {
                    return Err(AnalysisError::Validation(format!(
                        "csv line {}: no numeric field",
                        lineno + 1
                    )));
                }
            },
        };

        let field = fields.get(col).ok_or_else(|| {
            AnalysisError::Validation(format!(
                "csv line {}: missing column {}",
                lineno + 1,
                col + 1
            ))
        })?;
        let value = field.parse::<f64>().map_err(|_| {
            AnalysisError::Validation(format!(
                "csv line {}: invalid number '{}'",
                lineno + 1,
                field
            ))
        })?;
        samples.push(value);
    }

    Ok(samples)
}

fn parse_text(content: &str) -> Result<Vec<f64>, AnalysisError> {
    content
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| AnalysisError::Validation(format!("invalid number '{token}'")))
        })
        .collect()
}

/// Read the first channel of a WAV file, normalized to [-1, 1] for integer
/// encodings.
fn load_wav(path: &Path) -> Result<Waveform, AnalysisError> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| AnalysisError::Validation(format!("{}: {e}", path.display())))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .map_err(|e| AnalysisError::Validation(format!("{}: {e}", path.display())))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| AnalysisError::Validation(format!("{}: {e}", path.display())))?
        }
    };

    Ok(Waveform {
        samples,
        sample_rate_hz: spec.sample_rate as f64,
    })
}

fn parse_raw_f32(bytes: &[u8]) -> Result<Vec<f64>, AnalysisError> {
    if bytes.len() % 4 != 0 {
        return Err(AnalysisError::Validation(format!(
            "raw f32 payload of {} bytes is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
        .collect())
}

fn parse_raw_f64(bytes: &[u8]) -> Result<Vec<f64>, AnalysisError> {
    if bytes.len() % 8 != 0 {
        return Err(AnalysisError::Validation(format!(
            "raw f64 payload of {} bytes is not a multiple of 8",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_csv_with_header() {
        let samples = parse_csv("vibration\n0.1\n-0.2\n0.3\n").unwrap();
        assert_eq!(samples, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_csv_first_numeric_column() {
        let samples = parse_csv("label,value\na,1.5\nb,2.5\n").unwrap();
        assert_eq!(samples, vec![1.5, 2.5]);
    }

    #[test]
    fn test_csv_bad_row_is_rejected() {
        let result = parse_csv("0.1\n0.2\nnot-a-number\n");
        assert!(matches!(result, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_text_samples() {
        let samples = parse_text("0.5 -0.5\n1.0\t-1.0").unwrap();
        assert_eq!(samples, vec![0.5, -0.5, 1.0, -1.0]);
    }

    #[test]
    fn test_raw_f32_roundtrip() {
        let values = [0.25f32, -0.75, 1.5];
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let samples = parse_raw_f32(&bytes).unwrap();
        assert_eq!(samples, vec![0.25, -0.75, 1.5]);
    }

    #[test]
    fn test_raw_f32_truncated_payload() {
        assert!(parse_raw_f32(&[0u8; 6]).is_err());
    }

    #[test]
    fn test_load_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "signal.csv", b"vibration\n0.1\n0.2\n0.3\n");
        let waveform = load_waveform(&path, 12_000.0).unwrap();
        assert_eq!(waveform.samples.len(), 3);
        assert_eq!(waveform.sample_rate_hz, 12_000.0);
    }

    #[test]
    fn test_load_wav_uses_header_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..64i16 {
            writer.write_sample(i * 256).unwrap();
        }
        writer.finalize().unwrap();

        let waveform = load_waveform(&path, 12_000.0).unwrap();
        assert_eq!(waveform.sample_rate_hz, 48_000.0);
        assert_eq!(waveform.samples.len(), 64);
        assert!(waveform.samples.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "signal.xyz", b"0.1 0.2");
        assert!(matches!(
            load_waveform(&path, 12_000.0),
            Err(AnalysisError::Validation(_))
        ));
    }

    #[test]
    fn test_too_short_waveform() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "signal.txt", b"0.5");
        assert!(matches!(
            load_waveform(&path, 12_000.0),
            Err(AnalysisError::Validation(_))
        ));
    }
}
