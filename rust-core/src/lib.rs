//! Frame Spectra - single-frame spectral analysis
//!
//! Extracts one centered, windowed frame from an audio file and estimates its
//! spectrum two ways: a zero-padded FFT magnitude spectrum and an LPC
//! spectral envelope, both as dB curves normalized to a 0 dB peak.

// PyO3 macro expansion emits non-local impls
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod audio;
pub mod config;
pub mod error;
pub mod filters;
pub mod lpc;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use audio::Signal;
pub use config::{AnalysisConfig, Session};
pub use error::{Result, SpectraError};
pub use filters::WindowType;
pub use lpc::{LpcCoefficients, LpcMethod};
pub use pipeline::{analyze_file, analyze_signal, FrameAnalysis};
pub use render::{CurveRenderer, TerminalRenderer};
pub use spectrum::{FrequencyAxis, SpectralCurve};
