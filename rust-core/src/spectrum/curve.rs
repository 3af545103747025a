//! Normalized dB-over-frequency curves
//!
//! Both the FFT spectrum and the LPC envelope end up as a [`SpectralCurve`]:
//! frequencies in Hz over [0, sample_rate/2] and magnitudes in dB with the
//! peak shifted to exactly 0 dB.

use std::fmt;
use std::str::FromStr;

/// Guard added to magnitudes before taking the log
pub const DB_EPSILON: f64 = 1e-12;

/// How the frequency axis of a curve is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyAxis {
    /// `points` evenly spaced values from 0 to sample_rate/2 inclusive.
    ///
    /// Point k is labelled `k * (sr/2) / (points - 1)` although FFT bin k
    /// sits at `k * sr / n_fft`; the two differ by at most one bin.
    #[default]
    Linspace,

    /// Exact bin frequencies `k * sample_rate / n_fft`, ending one bin short
    /// of Nyquist.
    Bins,
}

impl FrequencyAxis {
    /// Frequencies in Hz for `points` values, where `points = n_fft / 2`
    pub fn frequencies(&self, points: usize, sample_rate: f64) -> Vec<f64> {
        let nyquist = sample_rate / 2.0;
        match self {
            FrequencyAxis::Linspace => linspace(0.0, nyquist, points),
            FrequencyAxis::Bins => {
                let n_fft = (2 * points) as f64;
                (0..points)
                    .map(|k| k as f64 * sample_rate / n_fft)
                    .collect()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FrequencyAxis::Linspace => "linspace",
            FrequencyAxis::Bins => "bins",
        }
    }
}

impl fmt::Display for FrequencyAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrequencyAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linspace" | "linear" => Ok(FrequencyAxis::Linspace),
            "bins" | "exact" => Ok(FrequencyAxis::Bins),
            other => Err(format!(
                "unknown frequency axis '{other}' (expected linspace or bins)"
            )),
        }
    }
}

/// `n` evenly spaced values over `[start, end]`, endpoints included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (n - 1) as f64;
            (0..n).map(|i| start + span * (i as f64 / last)).collect()
        }
    }
}

/// Convert linear magnitudes to dB: `20 * log10(mag + DB_EPSILON)`
pub fn magnitude_to_db(magnitudes: &[f64]) -> Vec<f64> {
    magnitudes
        .iter()
        .map(|&mag| 20.0 * (mag + DB_EPSILON).log10())
        .collect()
}

/// Shift dB values so the maximum is exactly 0 dB
pub fn normalize_peak(db: &mut [f64]) {
    let max = db.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() {
        for v in db.iter_mut() {
            *v -= max;
        }
    }
}

/// Frequency/dB pairs with the peak at 0 dB
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralCurve {
    frequencies: Vec<f64>,
    magnitudes_db: Vec<f64>,
}

impl SpectralCurve {
    /// Build a curve from linear magnitudes, converting to normalized dB
    ///
    /// # Arguments
    /// * `frequencies` - Frequency of each point in Hz
    /// * `magnitudes` - Linear magnitudes; extra values beyond the axis length are ignored
    pub fn from_magnitudes(frequencies: Vec<f64>, magnitudes: &[f64]) -> Self {
        let points = frequencies.len().min(magnitudes.len());
        let mut magnitudes_db = magnitude_to_db(&magnitudes[..points]);
        normalize_peak(&mut magnitudes_db);

        let mut frequencies = frequencies;
        frequencies.truncate(points);

        Self {
            frequencies,
            magnitudes_db,
        }
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn magnitudes_db(&self) -> &[f64] {
        &self.magnitudes_db
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// (frequency, dB) pairs in ascending frequency order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes_db.iter().copied())
    }

    /// Global maximum as (frequency, dB); the first one wins on ties
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points()
            .fold(None, |best: Option<(f64, f64)>, p| match best {
                Some(b) if b.1 >= p.1 => Some(b),
                _ => Some(p),
            })
    }

    /// Strict local maxima at or above `min_db`, by ascending frequency
    ///
    /// For an LPC envelope these are the formant-like resonances.
    pub fn local_peaks(&self, min_db: f64) -> Vec<(f64, f64)> {
        let db = &self.magnitudes_db;
        (1..db.len().saturating_sub(1))
            .filter(|&i| db[i] > db[i - 1] && db[i] >= db[i + 1] && db[i] >= min_db)
            .map(|i| (self.frequencies[i], db[i]))
            .collect()
    }
}
