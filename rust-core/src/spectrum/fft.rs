//! FFT engine using realfft for real-valued signals

use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use crate::error::{Result, SpectraError};

/// FFT engine for real-valued signals with zero-padding
pub struct FftEngine {
    /// FFT size (number of samples after zero-padding)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (also used as scratch by realfft)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute FFT and return magnitude spectrum
    ///
    /// # Arguments
    /// * `signal` - Input signal, zero-padded to `fft_size`
    ///
    /// # Returns
    /// Magnitude spectrum |X[k]| for k = 0..=fft_size/2
    ///
    /// # Errors
    /// `InvalidParameter` if the signal is longer than the FFT size.
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.len() > self.fft_size {
            return Err(SpectraError::InvalidParameter(format!(
                "frame of {} samples exceeds FFT size {}",
                signal.len(),
                self.fft_size
            )));
        }

        self.input_buffer[..signal.len()].copy_from_slice(signal);
        self.input_buffer[signal.len()..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| SpectraError::Numerical(format!("FFT failed: {e}")))?;

        Ok(self.output_buffer.iter().map(|c| c.norm()).collect())
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);

        // DC signal, zero-padded
        let signal = vec![1.0; 100];
        let spectrum = fft.compute_magnitude(&signal).unwrap();

        assert_eq!(fft.fft_size(), 1024);
        assert_eq!(spectrum.len(), 513);
        assert!((spectrum[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1024);

        // Exactly on bin 64 (0.125 cycles/sample)
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 64.0 * n as f64 / 1024.0).sin())
            .collect();

        let spectrum = fft.compute_magnitude(&signal).unwrap();

        let (peak_bin, &peak_mag) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();

        assert_eq!(peak_bin, 64);
        // N/2 for a unit sine
        assert!((peak_mag - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_reuse_clears_padding() {
        let mut fft = FftEngine::new(64);
        fft.compute_magnitude(&vec![1.0; 64]).unwrap();

        let spectrum = fft.compute_magnitude(&[1.0]).unwrap();
        // Single impulse: flat magnitude
        assert!(spectrum.iter().all(|&m| (m - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_oversized_signal_rejected() {
        let mut fft = FftEngine::new(16);
        assert!(fft.compute_magnitude(&[0.0; 17]).is_err());
    }
}
