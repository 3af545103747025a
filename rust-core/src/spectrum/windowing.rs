//! Frame extraction and windowing
//!
//! Pulls a single frame centered on the middle of the signal and tapers it
//! before spectral estimation.

use ndarray::s;
use tracing::{debug, warn};

use crate::audio::Signal;
use crate::filters::windows::{generate_window, WindowType};

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal of the same length
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Sample range `[start, end)` of the frame centered on the signal midpoint
///
/// `start = max(0, len/2 - frame_length/2)`, `end = min(len, start + frame_length)`.
/// Frames are clamped to the signal, never padded: a signal shorter than
/// `frame_length` yields a frame covering the whole signal.
pub fn centered_frame_bounds(signal_len: usize, frame_length: usize) -> (usize, usize) {
    let center = signal_len / 2;
    let start = center.saturating_sub(frame_length / 2);
    let end = signal_len.min(start + frame_length);
    (start, end)
}

/// A windowed analysis frame
#[derive(Debug, Clone)]
pub struct WindowedFrame {
    samples: Vec<f64>,
    start: usize,
}

impl WindowedFrame {
    /// Extract the centered frame from `signal` and apply `window`
    ///
    /// # Arguments
    /// * `signal` - Source signal
    /// * `frame_length` - Requested frame length (L)
    /// * `window` - Taper applied over the extracted frame's actual length
    pub fn extract(signal: &Signal, frame_length: usize, window: WindowType) -> Self {
        let (start, end) = centered_frame_bounds(signal.len(), frame_length);

        if end - start < frame_length {
            warn!(
                requested = frame_length,
                available = end - start,
                "signal shorter than frame length, frame clamped"
            );
        }

        let frame = signal.samples().slice(s![start..end]).to_vec();
        let samples = apply_window(&frame, window);

        debug!(start, end, window = %window, "extracted frame");

        Self {
            samples,
            start,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Actual frame length (may be shorter than requested)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the first frame sample within the source signal
    pub fn start(&self) -> usize {
        self.start
    }

}
