//! LPC coefficient estimation
//!
//! Fits an all-pole model `1 / A(z)`, `A(z) = 1 + a1 z^-1 + ... + ap z^-p`,
//! to a windowed frame. Two estimators are available: the autocorrelation
//! method (Levinson-Durbin recursion) and Burg's method.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, SpectraError};

/// Frames with less energy than this are treated as silent
pub const MIN_FRAME_ENERGY: f64 = 1e-20;

/// White-noise correction for the autocorrelation method: R[0] is scaled by
/// `1 + WHITE_NOISE_CORRECTION`, a noise floor 40 dB below the frame energy.
/// Without it a pure tone makes the Toeplitz system singular and the
/// envelope peak splits around the tone.
pub const WHITE_NOISE_CORRECTION: f64 = 1e-4;

/// LPC estimation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LpcMethod {
    /// Autocorrelation method solved by Levinson-Durbin
    #[default]
    Autocorrelation,

    /// Burg's recursion on forward/backward prediction errors
    Burg,
}

impl LpcMethod {
    pub fn name(&self) -> &'static str {
        match self {
            LpcMethod::Autocorrelation => "autocorrelation",
            LpcMethod::Burg => "burg",
        }
    }
}

impl fmt::Display for LpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LpcMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "autocorrelation" | "autocorr" | "levinson" => Ok(LpcMethod::Autocorrelation),
            "burg" => Ok(LpcMethod::Burg),
            other => Err(format!(
                "unknown LPC method '{other}' (expected autocorrelation or burg)"
            )),
        }
    }
}

/// Coefficients of `A(z)`; `coefficients()[0]` is always 1
#[derive(Debug, Clone, PartialEq)]
pub struct LpcCoefficients {
    coefficients: Vec<f64>,
    prediction_error: f64,
}

impl LpcCoefficients {
    /// `[1, a1, ..., ap]`
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Residual prediction error energy after the final order
    pub fn prediction_error(&self) -> f64 {
        self.prediction_error
    }
}

/// Fit LPC coefficients of `order` to `frame`
///
/// # Errors
/// - `InvalidParameter` if `order` is zero
/// - `Numerical` if the frame has fewer than `order + 1` samples, carries no
///   energy, or the recursion produces an unstable or non-finite model
pub fn fit_lpc(frame: &[f64], order: usize, method: LpcMethod) -> Result<LpcCoefficients> {
    if order == 0 {
        return Err(SpectraError::InvalidParameter(
            "lpc_order must be positive".to_string(),
        ));
    }
    if frame.len() < order + 1 {
        return Err(SpectraError::Numerical(format!(
            "frame of {} samples is too short for LPC order {order} (need at least {})",
            frame.len(),
            order + 1
        )));
    }

    let lpc = match method {
        LpcMethod::Autocorrelation => {
            let mut r = autocorrelation(frame, order);
            r[0] *= 1.0 + WHITE_NOISE_CORRECTION;
            levinson_durbin(&r, order)?
        }
        LpcMethod::Burg => burg(frame, order)?,
    };

    debug!(
        method = %method,
        order,
        prediction_error = lpc.prediction_error,
        "fitted LPC model"
    );

    Ok(lpc)
}

/// Autocorrelation of `signal` for lags 0..=max_lag
///
/// R[k] = sum_{n=0}^{N-1-k} x[n] * x[n+k]
pub fn autocorrelation(signal: &[f64], max_lag: usize) -> Vec<f64> {
    (0..=max_lag)
        .map(|k| {
            if k >= signal.len() {
                return 0.0;
            }
            signal[..signal.len() - k]
                .iter()
                .zip(&signal[k..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

/// Levinson-Durbin recursion on autocorrelation values R[0..=order]
///
/// # Errors
/// `Numerical` if R[0] carries no energy or a reflection coefficient reaches
/// magnitude 1 (prediction error no longer positive).
pub fn levinson_durbin(r: &[f64], order: usize) -> Result<LpcCoefficients> {
    if r.len() < order + 1 {
        return Err(SpectraError::Numerical(format!(
            "need {} autocorrelation lags, got {}",
            order + 1,
            r.len()
        )));
    }
    check_energy(r[0])?;

    let mut a = vec![0.0; order + 1];
    let mut a_prev = vec![0.0; order + 1];
    a[0] = 1.0;
    let mut error = r[0];

    for i in 1..=order {
        let acc: f64 = r[i] + (1..i).map(|j| a[j] * r[i - j]).sum::<f64>();
        let k = -acc / error;

        a_prev[..i].copy_from_slice(&a[..i]);
        a[i] = k;
        for j in 1..i {
            a[j] = a_prev[j] + k * a_prev[i - j];
        }

        error *= 1.0 - k * k;
        if !(error.is_finite() && error > 0.0) {
            return Err(SpectraError::Numerical(format!(
                "unstable LPC fit at order {i} (reflection coefficient {k:.6})"
            )));
        }
    }

    Ok(LpcCoefficients {
        coefficients: a,
        prediction_error: error,
    })
}

/// Burg's method
///
/// Estimates each reflection coefficient from the forward and backward
/// prediction errors of the frame itself rather than from an autocorrelation
/// estimate.
///
/// # Errors
/// `Numerical` if the frame carries no energy, or the prediction error becomes
/// non-positive or non-finite.
pub fn burg(frame: &[f64], order: usize) -> Result<LpcCoefficients> {
    if frame.len() < order + 1 {
        return Err(SpectraError::Numerical(format!(
            "frame of {} samples is too short for Burg order {order}",
            frame.len()
        )));
    }

    let energy: f64 = frame.iter().map(|x| x * x).sum();
    check_energy(energy)?;

    let mut a = vec![0.0; order + 1];
    let mut a_prev = vec![0.0; order + 1];
    a[0] = 1.0;

    let mut fwd: Vec<f64> = frame[1..].to_vec();
    let mut bwd: Vec<f64> = frame[..frame.len() - 1].to_vec();
    let mut error = energy;

    for i in 0..order {
        // Summed directly each stage so that |k| <= 1
        let den: f64 = fwd.iter().chain(bwd.iter()).map(|x| x * x).sum();
        if !(den.is_finite() && den > 0.0) {
            return Err(SpectraError::Numerical(format!(
                "Burg recursion ran out of signal energy at order {}",
                i + 1
            )));
        }
        let num: f64 = bwd.iter().zip(&fwd).map(|(b, f)| b * f).sum();
        let k = -2.0 * num / den;

        a_prev[..=i].copy_from_slice(&a[..=i]);
        for j in 1..=i + 1 {
            a[j] = a_prev[j] + k * a_prev[i + 1 - j];
        }

        for (f, b) in fwd.iter_mut().zip(bwd.iter_mut()) {
            let f_old = *f;
            *f += k * *b;
            *b += k * f_old;
        }

        error *= 1.0 - k * k;
        if !(error.is_finite() && error > 0.0) {
            return Err(SpectraError::Numerical(format!(
                "unstable Burg fit at order {} (reflection coefficient {k:.6})",
                i + 1
            )));
        }

        // Shrink the error windows by one sample each
        fwd.remove(0);
        bwd.pop();
    }

    if !a.iter().all(|c| c.is_finite()) {
        return Err(SpectraError::Numerical(
            "Burg recursion produced non-finite coefficients (ill-conditioned frame)".to_string(),
        ));
    }

    Ok(LpcCoefficients {
        coefficients: a,
        prediction_error: error,
    })
}

fn check_energy(energy: f64) -> Result<()> {
    if !energy.is_finite() {
        return Err(SpectraError::Numerical("frame energy is not finite".to_string()));
    }
    if energy < MIN_FRAME_ENERGY {
        return Err(SpectraError::Numerical(
            "frame has no energy (silent or all-zero)".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::windows::WindowType;
    use crate::spectrum::windowing::apply_window;

    /// Deterministic pseudo-noise in [-0.5, 0.5)
    fn noise(len: usize, mut state: u64) -> Vec<f64> {
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
            })
            .collect()
    }

    /// Filter noise through a known AR(2) resonator
    fn ar2(a1: f64, a2: f64, len: usize) -> Vec<f64> {
        let e = noise(len, 7);
        let mut x = vec![0.0; len];
        for n in 0..len {
            let x1 = if n >= 1 { x[n - 1] } else { 0.0 };
            let x2 = if n >= 2 { x[n - 2] } else { 0.0 };
            x[n] = e[n] - a1 * x1 - a2 * x2;
        }
        x
    }

    #[test]
    fn test_autocorrelation() {
        let r = autocorrelation(&[1.0, 2.0, 3.0], 3);
        assert_eq!(r, vec![14.0, 8.0, 3.0, 0.0]);
    }

    #[test]
    fn test_levinson_first_order() {
        // R = [1, 0.5] -> a1 = -0.5, error = 0.75
        let lpc = levinson_durbin(&[1.0, 0.5], 1).unwrap();
        assert_eq!(lpc.coefficients(), &[1.0, -0.5]);
        assert!((lpc.prediction_error() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_leading_coefficient_is_one() {
        let frame = apply_window(&noise(512, 3), WindowType::Hann);
        for method in [LpcMethod::Autocorrelation, LpcMethod::Burg] {
            let lpc = fit_lpc(&frame, 16, method).unwrap();
            assert_eq!(lpc.coefficients().len(), 17);
            assert_eq!(lpc.order(), 16);
            assert_eq!(lpc.coefficients()[0], 1.0);
            assert!(lpc.prediction_error() > 0.0);
        }
    }

    #[test]
    fn test_recovers_ar2_process() {
        let (a1, a2) = (-1.6, 0.81);
        let x = ar2(a1, a2, 8000);

        for method in [LpcMethod::Autocorrelation, LpcMethod::Burg] {
            let lpc = fit_lpc(&x, 2, method).unwrap();
            let c = lpc.coefficients();
            assert!((c[1] - a1).abs() < 0.05, "{method}: a1 = {}", c[1]);
            assert!((c[2] - a2).abs() < 0.05, "{method}: a2 = {}", c[2]);
        }
    }

    #[test]
    fn test_order_not_below_frame_length_is_error() {
        let frame = noise(16, 1);
        for method in [LpcMethod::Autocorrelation, LpcMethod::Burg] {
            assert!(matches!(
                fit_lpc(&frame, 16, method),
                Err(SpectraError::Numerical(_))
            ));
            assert!(matches!(
                fit_lpc(&frame, 40, method),
                Err(SpectraError::Numerical(_))
            ));
            assert!(fit_lpc(&frame, 8, method).is_ok());
        }
    }

    #[test]
    fn test_burg_stops_when_error_windows_run_dry() {
        // The only nonzero sample leaves the backward window after four stages
        let frame = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert!(burg(&frame, 4).is_ok());
        assert!(matches!(burg(&frame, 5), Err(SpectraError::Numerical(_))));
    }

    #[test]
    fn test_burg_reflection_stays_bounded_on_pure_tone() {
        let sine: Vec<f64> = (0..2048)
            .map(|n| (2.0 * std::f64::consts::PI * 1000.0 * n as f64 / 16000.0).sin())
            .collect();
        let frame = apply_window(&sine, WindowType::Hann);

        match burg(&frame, 64) {
            Ok(lpc) => {
                assert!(lpc.prediction_error() > 0.0);
                assert!(lpc.coefficients().iter().all(|c| c.is_finite()));
            }
            Err(err) => assert!(matches!(err, SpectraError::Numerical(_)), "{err}"),
        }
    }

    #[test]
    fn test_silent_frame_is_error() {
        let frame = vec![0.0; 2048];
        for method in [LpcMethod::Autocorrelation, LpcMethod::Burg] {
            assert!(matches!(
                fit_lpc(&frame, 16, method),
                Err(SpectraError::Numerical(_))
            ));
        }
    }

    #[test]
    fn test_zero_order_is_parameter_error() {
        assert!(matches!(
            fit_lpc(&[1.0, 2.0], 0, LpcMethod::Autocorrelation),
            Err(SpectraError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_levinson_rejects_unstable_autocorrelation() {
        // |R[1]| > R[0] is not a valid autocorrelation
        assert!(matches!(
            levinson_durbin(&[1.0, 1.5], 1),
            Err(SpectraError::Numerical(_))
        ));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!("Burg".parse::<LpcMethod>(), Ok(LpcMethod::Burg));
        assert_eq!("levinson".parse::<LpcMethod>(), Ok(LpcMethod::Autocorrelation));
        assert!("covariance".parse::<LpcMethod>().is_err());
    }
}
