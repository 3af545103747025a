//! Tapering windows applied to a frame before spectral estimation

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window function types
///
/// All windows are symmetric: w[n] = f(2πn/(M-1)) for n = 0..M-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    /// Zero at both ends, 1 at the center. Sidelobes ~31 dB down.
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Sidelobes ~43 dB down, endpoints 0.08
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    /// Sidelobes ~58 dB down, wider mainlobe
    Blackman,

    /// Rectangular window (no tapering)
    Rectangular,
}

impl WindowType {
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::Rectangular => "rectangular",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Ok(WindowType::Hann),
            "hamming" => Ok(WindowType::Hamming),
            "blackman" => Ok(WindowType::Blackman),
            "rectangular" | "rect" | "boxcar" => Ok(WindowType::Rectangular),
            other => Err(format!(
                "unknown window '{other}' (expected hann, hamming, blackman or rectangular)"
            )),
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1. A length-1 window is
/// `[1.0]` and a length-0 window is empty, so the (M-1) divisor is never zero.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    match length {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }

    let denom = (length - 1) as f64;

    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / denom;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_generation() {
        let length = 161;

        let hann = generate_window(WindowType::Hann, length);
        let hamming = generate_window(WindowType::Hamming, length);
        let blackman = generate_window(WindowType::Blackman, length);

        assert_eq!(hann.len(), length);
        assert_eq!(hamming.len(), length);
        assert_eq!(blackman.len(), length);

        // Symmetric
        for i in 0..length / 2 {
            assert!((hann[i] - hann[length - 1 - i]).abs() < 1e-12);
            assert!((blackman[i] - blackman[length - 1 - i]).abs() < 1e-12);
        }

        let center = length / 2;
        assert!((hann[center] - 1.0).abs() < 1e-10);
        assert!((hamming[center] - 1.0).abs() < 1e-10);
        assert!((blackman[center] - 1.0).abs() < 1e-10);

        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);
    }

    #[test]
    fn test_hann_endpoints_are_zero() {
        let hann = generate_window(WindowType::Hann, 2048);
        assert_eq!(hann[0], 0.0);
        assert!(hann[2047].abs() < 1e-15);
        assert!(hann.iter().all(|&w| (0.0..=1.0).contains(&w)));
    }

    #[test]
    fn test_degenerate_lengths() {
        for window_type in [
            WindowType::Hann,
            WindowType::Hamming,
            WindowType::Blackman,
            WindowType::Rectangular,
        ] {
            assert!(generate_window(window_type, 0).is_empty());
            assert_eq!(generate_window(window_type, 1), vec![1.0]);
        }

        let two = generate_window(WindowType::Hann, 2);
        assert_eq!(two.len(), 2);
        assert!(two.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_rectangular_window() {
        let window = generate_window(WindowType::Rectangular, 100);
        assert_eq!(window.len(), 100);
        assert!(window.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_parse_window_names() {
        assert_eq!("Hann".parse::<WindowType>(), Ok(WindowType::Hann));
        assert_eq!("hanning".parse::<WindowType>(), Ok(WindowType::Hann));
        assert_eq!("boxcar".parse::<WindowType>(), Ok(WindowType::Rectangular));
        assert!("kaiser".parse::<WindowType>().is_err());
        assert_eq!(WindowType::Blackman.to_string(), "blackman");
    }
}
