//! utils — Python-side input conversion for the PyO3 bindings.
//!
//! Accepts numpy arrays, pandas objects (via `to_numpy`), or plain Python
//! sequences and hands contiguous `f64` arrays to the embedding core. Only
//! compiled with the `python-bindings` feature.

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};

#[cfg(feature = "python-bindings")]
use crate::embedding::{errors::EmbeddingError, options::ParametersType, parallel::Parallelism};

/// Owned copy of a 1-D float input (ndarray, pandas Series, or sequence).
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro.as_array().to_owned());
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(Array1::from(vec))
}

/// Owned copy of a 2-D float input with rows = time, if `raw_data` is one.
///
/// Returns `Ok(None)` for 1-D inputs so callers can fall back to
/// [`extract_series`].
#[cfg(feature = "python-bindings")]
pub fn extract_channels<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Option<Array2<f64>>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(Some(arr_ro.as_array().to_owned()));
    }
    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            if frame_ro.ndim() == 2 {
                return Ok(Some(frame_ro.as_array().to_owned()));
            }
        }
    }
    Ok(None)
}

/// Column vector `(n, 1)` inputs are accepted as scalar series, matching the
/// shapes the Takens embedder documents.
#[cfg(feature = "python-bindings")]
pub fn extract_scalar_series<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    if let Some(matrix) = extract_channels(raw_data)? {
        if matrix.ncols() != 1 {
            return Err(EmbeddingError::InvalidParameter {
                name: "X",
                value: format!("array with {} columns (expected 1)", matrix.ncols()),
            }
            .into());
        }
        return Ok(matrix.column(0).to_owned());
    }
    extract_series(raw_data)
}

#[cfg(feature = "python-bindings")]
pub fn extract_parameters_type(parameters_type: Option<&str>) -> PyResult<ParametersType> {
    Ok(parameters_type.unwrap_or("search").parse::<ParametersType>()?)
}

#[cfg(feature = "python-bindings")]
pub fn extract_parallelism(n_jobs: Option<i64>) -> PyResult<Parallelism> {
    Ok(Parallelism::from_n_jobs(n_jobs)?)
}
