//! PyO3 bindings for Python integration
//!
//! A Python front end acts as the renderer: it calls into the pipeline and
//! plots the returned numpy arrays.

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::SpectraError;

mod analysis_bindings;

impl From<SpectraError> for PyErr {
    fn from(err: SpectraError) -> Self {
        match err {
            SpectraError::Read { .. } | SpectraError::Io(_) | SpectraError::NoAudioPath(_) => {
                PyIOError::new_err(err.to_string())
            }
            SpectraError::Numerical(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python module definition
#[pymodule]
fn frame_spectra(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analysis_bindings::analyze_file, m)?)?;
    m.add_function(wrap_pyfunction!(analysis_bindings::analyze_samples, m)?)?;

    Ok(())
}
