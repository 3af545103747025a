//! Frame analysis pipeline
//!
//! load -> centered windowed frame -> {FFT spectrum, LPC envelope}
//!
//! Both branches run eagerly on the same windowed frame and share one
//! frequency axis. If either fails the whole run fails; no partial result is
//! returned.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::audio::Signal;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::lpc::{EnvelopeConfig, LpcCoefficients, LpcEnvelope};
use crate::spectrum::analysis::{AnalyzerConfig, SpectrumAnalyzer};
use crate::spectrum::curve::SpectralCurve;
use crate::spectrum::windowing::WindowedFrame;

/// Everything computed for one frame
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// Sample rate of the source in Hz
    pub sample_rate: u32,

    /// First sample of the frame within the source signal
    pub frame_start: usize,

    /// Actual frame length (shorter than requested for short signals)
    pub frame_len: usize,

    /// FFT size after zero-padding
    pub n_fft: usize,

    /// Zero-padded FFT magnitude spectrum, peak at 0 dB
    pub spectrum: SpectralCurve,

    /// LPC spectral envelope, peak at 0 dB
    pub envelope: SpectralCurve,

    pub lpc: LpcCoefficients,
}

/// Analyze the centered frame of an in-memory signal
///
/// # Errors
/// - `InvalidParameter` for a zero frame length or LPC order
/// - `Numerical` if the LPC fit fails
pub fn analyze_signal(signal: &Signal, config: &AnalysisConfig) -> Result<FrameAnalysis> {
    config.validate()?;

    let frame = WindowedFrame::extract(signal, config.frame_length, config.window);

    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        frame_length: config.frame_length,
        sample_rate: signal.sample_rate(),
        axis: config.axis,
    })?;
    let spectrum = analyzer.analyze(frame.samples())?;

    let envelope = LpcEnvelope::estimate(
        frame.samples(),
        analyzer.frequency_axis(),
        &EnvelopeConfig {
            order: config.lpc_order,
            method: config.lpc_method,
            sample_rate: signal.sample_rate(),
        },
    )?;

    debug!(
        n_fft = analyzer.fft_size(),
        points = spectrum.len(),
        window = %config.window,
        "computed spectrum and envelope"
    );

    Ok(FrameAnalysis {
        sample_rate: signal.sample_rate(),
        frame_start: frame.start(),
        frame_len: frame.len(),
        n_fft: analyzer.fft_size(),
        spectrum,
        envelope: envelope.curve,
        lpc: envelope.coefficients,
    })
}

/// Load `path` at its native sample rate and analyze its centered frame
///
/// Parameters are validated before the file is touched.
#[instrument(
    skip_all,
    fields(
        path = %path.display(),
        frame_length = config.frame_length,
        lpc_order = config.lpc_order,
    )
)]
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<FrameAnalysis> {
    config.validate()?;

    let signal = Signal::from_file(path)?;
    let analysis = analyze_signal(&signal, config)?;

    info!(
        frame_start = analysis.frame_start,
        frame_len = analysis.frame_len,
        "frame analyzed"
    );

    Ok(analysis)
}
