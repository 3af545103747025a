//! Spectral analysis with FFT

pub mod analysis;
pub mod curve;
pub mod fft;
pub mod windowing;

pub use analysis::{AnalyzerConfig, SpectrumAnalyzer, MAX_FRAME_LENGTH, OVERSAMPLING};
pub use curve::{FrequencyAxis, SpectralCurve};
pub use fft::FftEngine;
pub use windowing::{apply_window, WindowedFrame};
