//! LPC branch: windowed frame -> normalized dB spectral envelope

use super::fit::{fit_lpc, LpcCoefficients, LpcMethod};
use super::response::all_pole_magnitude;
use crate::error::Result;
use crate::spectrum::curve::SpectralCurve;

/// Envelope estimator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    /// Model order p (p + 1 coefficients)
    pub order: usize,

    pub method: LpcMethod,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

/// LPC fit together with its envelope curve
#[derive(Debug, Clone)]
pub struct LpcEnvelope {
    pub coefficients: LpcCoefficients,
    pub curve: SpectralCurve,
}

impl LpcEnvelope {
    /// Fit the model and evaluate `|1/A|` at `frequencies` (Hz)
    ///
    /// The envelope is evaluated at exactly the given frequencies, so it can
    /// share the FFT curve's axis point for point.
    pub fn estimate(
        windowed: &[f64],
        frequencies: Vec<f64>,
        config: &EnvelopeConfig,
    ) -> Result<Self> {
        let coefficients = fit_lpc(windowed, config.order, config.method)?;
        let magnitude = all_pole_magnitude(
            coefficients.coefficients(),
            &frequencies,
            f64::from(config.sample_rate),
        );

        Ok(Self {
            coefficients,
            curve: SpectralCurve::from_magnitudes(frequencies, &magnitude),
        })
    }
}
