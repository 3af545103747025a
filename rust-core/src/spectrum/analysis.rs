//! Zero-padded FFT magnitude spectrum of a windowed frame

use super::curve::{FrequencyAxis, SpectralCurve};
use super::fft::FftEngine;
use crate::error::{Result, SpectraError};

/// Zero-padding factor: the FFT is `OVERSAMPLING` times the requested frame length
pub const OVERSAMPLING: usize = 4;

/// Largest accepted frame length (n_fft = 4M points)
pub const MAX_FRAME_LENGTH: usize = 1 << 20;

/// FFT size for a requested frame length
///
/// Uses the requested length, so a clamped (shorter) frame is still padded to
/// the nominal size.
///
/// # Errors
/// `InvalidParameter` if the frame length is zero or above `MAX_FRAME_LENGTH`.
pub fn fft_size_for(frame_length: usize) -> Result<usize> {
    if frame_length == 0 || frame_length > MAX_FRAME_LENGTH {
        return Err(SpectraError::InvalidParameter(format!(
            "frame_length must be between 1 and {MAX_FRAME_LENGTH}, got {frame_length}"
        )));
    }
    frame_length.checked_mul(OVERSAMPLING).ok_or_else(|| {
        SpectraError::InvalidParameter(format!("frame_length {frame_length} is too large"))
    })
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    /// Requested frame length; sets n_fft = frame_length * OVERSAMPLING
    pub frame_length: usize,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Frequency axis layout
    pub axis: FrequencyAxis,
}

/// FFT branch: windowed frame -> normalized dB spectrum
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: FftEngine,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    ///
    /// # Errors
    /// `InvalidParameter` if the sample rate is zero or the frame length is
    /// outside `1..=MAX_FRAME_LENGTH`.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        if config.sample_rate == 0 {
            return Err(SpectraError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }

        let fft_engine = FftEngine::new(fft_size_for(config.frame_length)?);

        Ok(Self { config, fft_engine })
    }

    /// Number of curve points (n_fft / 2; the Nyquist bin is dropped)
    pub fn num_points(&self) -> usize {
        self.fft_engine.fft_size() / 2
    }

    /// Frequencies of the curve points in Hz
    pub fn frequency_axis(&self) -> Vec<f64> {
        self.config
            .axis
            .frequencies(self.num_points(), f64::from(self.config.sample_rate))
    }

    /// Analyze an already-windowed frame
    ///
    /// # Returns
    /// `n_fft / 2` points of `20*log10(|X[k]| + 1e-12)` shifted so the peak is 0 dB
    pub fn analyze(&mut self, windowed: &[f64]) -> Result<SpectralCurve> {
        let magnitude = self.fft_engine.compute_magnitude(windowed)?;
        let points = self.num_points();

        Ok(SpectralCurve::from_magnitudes(
            self.frequency_axis(),
            &magnitude[..points],
        ))
    }

    pub fn fft_size(&self) -> usize {
        self.fft_engine.fft_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::windows::WindowType;
    use crate::spectrum::windowing::apply_window;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_analyzer_basic() {
        let config = AnalyzerConfig {
            frame_length: 1024,
            sample_rate: 48000,
            axis: FrequencyAxis::Linspace,
        };

        let mut analyzer = SpectrumAnalyzer::new(config).unwrap();
        assert_eq!(analyzer.fft_size(), 4096);

        let frame = apply_window(&sine(1000.0, 48000.0, 1024), WindowType::Hann);
        let curve = analyzer.analyze(&frame).unwrap();

        assert_eq!(curve.len(), 2048);
        assert_eq!(curve.frequencies()[0], 0.0);
        assert_eq!(*curve.frequencies().last().unwrap(), 24000.0);

        let (peak_freq, peak_db) = curve.peak().unwrap();
        assert_eq!(peak_db, 0.0);
        assert!((peak_freq - 1000.0).abs() < 48000.0 / 4096.0 + 1e-9);
    }

    #[test]
    fn test_short_frame_still_uses_nominal_size() {
        let config = AnalyzerConfig {
            frame_length: 2048,
            sample_rate: 16000,
            axis: FrequencyAxis::Bins,
        };
        let mut analyzer = SpectrumAnalyzer::new(config).unwrap();

        let frame = apply_window(&sine(500.0, 16000.0, 300), WindowType::Hann);
        let curve = analyzer.analyze(&frame).unwrap();

        assert_eq!(curve.len(), 4096);
        assert_eq!(curve.frequencies()[1], 16000.0 / 8192.0);
    }

    #[test]
    fn test_zero_frame_length_rejected() {
        let config = AnalyzerConfig {
            frame_length: 0,
            sample_rate: 16000,
            axis: FrequencyAxis::Linspace,
        };
        assert!(matches!(
            SpectrumAnalyzer::new(config),
            Err(SpectraError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fft_size_bounds() {
        assert_eq!(fft_size_for(2048).unwrap(), 8192);
        assert_eq!(fft_size_for(MAX_FRAME_LENGTH).unwrap(), MAX_FRAME_LENGTH * 4);

        for frame_length in [MAX_FRAME_LENGTH + 1, usize::MAX / 2, usize::MAX] {
            assert!(matches!(
                fft_size_for(frame_length),
                Err(SpectraError::InvalidParameter(_))
            ));
        }
    }
}
