//! Python bindings for the LPC analysis primitives

use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::analysis::{self, MAX_ORDER};

/// Normalized autocorrelation of a signal block
///
/// Args:
///     signal: Analysis block as numpy array
///     lags: Number of lags (at most the block length)
#[pyfunction]
pub fn autocorrelation<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f32>,
    lags: usize,
) -> PyResult<&'py PyArray1<f32>> {
    let signal = signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    if lags > signal.len() {
        return Err(PyValueError::new_err("more lags than samples"));
    }

    let mut acf = vec![0.0; lags];
    analysis::autocorrelation(signal, &mut acf);
    Ok(PyArray1::from_vec(py, acf))
}

/// LPC coefficients from normalized autocorrelation
///
/// Args:
///     r: Autocorrelation r[0..=order]
///     k_max: Reflection-coefficient bound
///
/// Returns:
///     Tuple of (coefficients, residual power)
#[pyfunction]
#[pyo3(signature = (r, k_max=0.99))]
pub fn levinson_durbin<'py>(
    py: Python<'py>,
    r: PyReadonlyArray1<f32>,
    k_max: f32,
) -> PyResult<(&'py PyArray1<f32>, f32)> {
    let r = r
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    if r.len() < 2 || r.len() - 1 > MAX_ORDER {
        return Err(PyValueError::new_err(format!(
            "order must be between 1 and {}",
            MAX_ORDER
        )));
    }

    let mut a = vec![0.0; r.len() - 1];
    let power = analysis::levinson_durbin(r, &mut a, k_max);
    Ok((PyArray1::from_vec(py, a), power))
}
