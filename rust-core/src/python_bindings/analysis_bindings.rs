//! Python bindings for frame analysis

use std::path::PathBuf;

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::audio::Signal;
use crate::config::{AnalysisConfig, DEFAULT_FRAME_LENGTH, DEFAULT_LPC_ORDER};
use crate::filters::WindowType;
use crate::lpc::LpcMethod;
use crate::pipeline::{self, FrameAnalysis};
use crate::spectrum::FrequencyAxis;

/// (fft_freqs, fft_db, lpc_freqs, lpc_db)
type CurveArrays<'py> = (
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
    &'py PyArray1<f64>,
);

fn build_config(
    frame_length: usize,
    lpc_order: usize,
    window: &str,
    lpc_method: &str,
    axis: &str,
) -> PyResult<AnalysisConfig> {
    Ok(AnalysisConfig {
        frame_length,
        lpc_order,
        window: window.parse::<WindowType>().map_err(PyValueError::new_err)?,
        lpc_method: lpc_method.parse::<LpcMethod>().map_err(PyValueError::new_err)?,
        axis: axis.parse::<FrequencyAxis>().map_err(PyValueError::new_err)?,
    })
}

fn to_arrays<'py>(py: Python<'py>, analysis: &FrameAnalysis) -> CurveArrays<'py> {
    (
        PyArray1::from_slice(py, analysis.spectrum.frequencies()),
        PyArray1::from_slice(py, analysis.spectrum.magnitudes_db()),
        PyArray1::from_slice(py, analysis.envelope.frequencies()),
        PyArray1::from_slice(py, analysis.envelope.magnitudes_db()),
    )
}

/// Analyze the centered frame of a WAV file
///
/// Args:
///     path: WAV file, loaded at its native sample rate
///     frame_length: Frame length in samples
///     lpc_order: LPC model order
///     window: "hann", "hamming", "blackman" or "rectangular"
///     lpc_method: "autocorrelation" or "burg"
///     axis: "linspace" or "bins"
///
/// Returns:
///     (fft_freqs, fft_db, lpc_freqs, lpc_db) as numpy arrays, dB peak at 0
#[pyfunction]
#[pyo3(signature = (
    path,
    frame_length = DEFAULT_FRAME_LENGTH,
    lpc_order = DEFAULT_LPC_ORDER,
    window = "hann",
    lpc_method = "autocorrelation",
    axis = "linspace",
))]
pub fn analyze_file<'py>(
    py: Python<'py>,
    path: PathBuf,
    frame_length: usize,
    lpc_order: usize,
    window: &str,
    lpc_method: &str,
    axis: &str,
) -> PyResult<CurveArrays<'py>> {
    let config = build_config(frame_length, lpc_order, window, lpc_method, axis)?;
    let analysis = py.allow_threads(|| pipeline::analyze_file(&path, &config))?;
    Ok(to_arrays(py, &analysis))
}

/// Analyze the centered frame of in-memory samples
///
/// Args:
///     samples: Mono signal as numpy float64 array
///     sample_rate: Sample rate in Hz
///
/// Returns:
///     (fft_freqs, fft_db, lpc_freqs, lpc_db) as numpy arrays, dB peak at 0
#[pyfunction]
#[pyo3(signature = (
    samples,
    sample_rate,
    frame_length = DEFAULT_FRAME_LENGTH,
    lpc_order = DEFAULT_LPC_ORDER,
    window = "hann",
    lpc_method = "autocorrelation",
    axis = "linspace",
))]
#[allow(clippy::too_many_arguments)]
pub fn analyze_samples<'py>(
    py: Python<'py>,
    samples: PyReadonlyArray1<f64>,
    sample_rate: u32,
    frame_length: usize,
    lpc_order: usize,
    window: &str,
    lpc_method: &str,
    axis: &str,
) -> PyResult<CurveArrays<'py>> {
    let config = build_config(frame_length, lpc_order, window, lpc_method, axis)?;
    let signal = Signal::new(samples.as_array().to_owned(), sample_rate)?;
    let analysis = pipeline::analyze_signal(&signal, &config)?;
    Ok(to_arrays(py, &analysis))
}
