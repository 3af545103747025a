//! Frequency response of the all-pole LPC filter `1 / A(z)`

use num_complex::Complex64;
use std::f64::consts::PI;

/// Evaluate `A(e^jω) = sum_n a[n] e^{-jωn}` at each frequency
///
/// # Arguments
/// * `a` - Polynomial coefficients a[0..=p]
/// * `frequencies_hz` - Evaluation frequencies in Hz
/// * `sample_rate` - Sample rate in Hz
pub fn polynomial_response(a: &[f64], frequencies_hz: &[f64], sample_rate: f64) -> Vec<Complex64> {
    frequencies_hz
        .iter()
        .map(|&f| {
            let omega = 2.0 * PI * f / sample_rate;
            a.iter()
                .enumerate()
                .map(|(n, &a_n)| a_n * Complex64::from_polar(1.0, -omega * n as f64))
                .sum()
        })
        .collect()
}

/// Complex response `H(e^jω) = 1 / A(e^jω)` of the all-pole filter
pub fn all_pole_response(a: &[f64], frequencies_hz: &[f64], sample_rate: f64) -> Vec<Complex64> {
    polynomial_response(a, frequencies_hz, sample_rate)
        .into_iter()
        .map(|den| den.inv())
        .collect()
}

/// Magnitude `|1 / A(e^jω)|` at each frequency
pub fn all_pole_magnitude(a: &[f64], frequencies_hz: &[f64], sample_rate: f64) -> Vec<f64> {
    all_pole_response(a, frequencies_hz, sample_rate)
        .iter()
        .map(|h| h.norm())
        .collect()
}
