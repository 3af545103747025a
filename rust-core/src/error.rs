//! Error types for frame analysis
//!
//! Every failure is terminal for a run: input errors (unreadable or
//! undecodable audio), parameter errors and numerical errors from the LPC fit.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SpectraError>;

#[derive(Error, Debug)]
pub enum SpectraError {
    /// Input path could not be opened
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio stream is not valid WAV data
    #[error("failed to decode audio: {0}")]
    Decode(#[from] hound::Error),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("audio contains no samples")]
    EmptySignal,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// LPC fit or transform failed (frame too short, silent or unstable)
    #[error("numerical error: {0}")]
    Numerical(String),

    #[error("session file error: {0}")]
    Session(#[from] serde_json::Error),

    /// No path provider yielded an audio path
    #[error("no audio path supplied (tried {0})")]
    NoAudioPath(String),
}

impl SpectraError {
    /// Decode errors from hound, with the unsupported-format case split out
    pub(crate) fn from_wav(err: hound::Error) -> Self {
        match err {
            hound::Error::Unsupported => {
                Self::UnsupportedFormat("WAV encoding not supported".to_string())
            }
            other => Self::Decode(other),
        }
    }
}
