//! Error types for the analysis pipeline

use thiserror::Error;

/// Errors surfaced by waveform loading and analysis.
///
/// The pipeline is deterministic, so a failing input fails identically on
/// every call; nothing is retried internally and no partial results are
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Malformed or insufficient input data.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Inconsistent configuration, rejected before any processing starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Failure reading a waveform container.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
