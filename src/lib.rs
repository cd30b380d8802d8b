//! rust_embedding — sliding windows and Takens delay embeddings with Python
//! bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the embedding routines to Python via the `_rust_embedding`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes and the `time_series` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core [`embedding`] module as the public crate surface.
//! - Define `#[pyclass]` wrappers ([`SlidingWindow`](PySlidingWindow) and
//!   [`TakensEmbedding`](PyTakensEmbedding)) and the `#[pymodule]`
//!   initializer.
//! - Register `rust_embedding.time_series` in `sys.modules` so dotted
//!   imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in [`embedding`]; this file performs only FFI
//!   glue, input conversion, and error mapping.
//! - Errors from core Rust code travel as [`EmbeddingError`](embedding::EmbeddingError)
//!   and become `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`embedding`] directly and can ignore
//!   the items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the `embedding` submodules and
//!   the integration suite under `tests/`.

pub mod embedding;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    embedding::{
        options::TakensOptions,
        takens::TakensEmbedding,
        window::SlidingWindow,
    },
    utils::{
        extract_channels, extract_parallelism, extract_parameters_type, extract_scalar_series,
        extract_series,
    },
};

/// SlidingWindow — Python-facing wrapper for [`SlidingWindow`].
///
/// Parameters
/// ----------
/// Constructed from Python via `SlidingWindow(width=10, stride=1)`; both must
/// be positive integers.
///
/// Notes
/// -----
/// - `transform` returns a 2-D array for 1-D input and a 3-D array of shape
///   `(n_windows, width + 1, n_channels)` for 2-D input.
/// - `fit` validates `x` and returns `self`, for pipeline compatibility.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "SlidingWindow", module = "rust_embedding.time_series")]
pub struct PySlidingWindow {
    inner: SlidingWindow,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PySlidingWindow {
    #[new]
    #[pyo3(signature = (width = 10, stride = 1), text_signature = "(width=10, stride=1)")]
    pub fn new(width: usize, stride: usize) -> PyResult<PySlidingWindow> {
        Ok(PySlidingWindow { inner: SlidingWindow::new(width, stride)? })
    }

    /// Check that `x` is a 1-D or 2-D float array long enough for one window.
    #[pyo3(signature = (x, y = None))]
    pub fn fit<'py>(
        slf: PyRef<'py, Self>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<PyRef<'py, Self>> {
        let _ = y;
        match extract_channels(x)? {
            Some(channels) => slf.inner.check_channels(channels.view())?,
            None => slf.inner.check_series(extract_series(x)?.view())?,
        }
        Ok(slf)
    }

    #[pyo3(signature = (x, y = None))]
    pub fn transform<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let _ = y;
        if let Some(channels) = extract_channels(x)? {
            let windows = self.inner.transform_multi(channels.view())?;
            return Ok(windows.into_pyarray(py).into_any());
        }
        let series = extract_series(x)?;
        Ok(self.inner.transform(series.view())?.into_pyarray(py).into_any())
    }

    #[pyo3(signature = (y, x = None))]
    pub fn resample<'py>(
        &self, py: Python<'py>, y: &Bound<'py, PyAny>, x: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let _ = x;
        let target = extract_series(y)?;
        Ok(self.inner.resample(target.view())?.into_pyarray(py))
    }

    #[getter]
    pub fn width(&self) -> usize {
        self.inner.spec().width()
    }

    #[getter]
    pub fn stride(&self) -> usize {
        self.inner.spec().stride()
    }
}

/// TakensEmbedding — Python-facing wrapper for [`TakensEmbedding`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `TakensEmbedding(parameters_type='search', time_delay=1, dimension=5,
/// stride=1, n_jobs=None)`:
/// - `parameters_type`: `'search'` or `'fixed'`.
/// - `time_delay`, `dimension`: values, or upper bounds when searching.
/// - `stride`: distance between consecutive embedded points.
/// - `n_jobs`: `None`/`1` sequential, `-1` all cores, `n > 1` threads.
///
/// Notes
/// -----
/// - `time_delay_` and `dimension_` raise `ValueError` before `fit`.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "TakensEmbedding", module = "rust_embedding.time_series")]
pub struct PyTakensEmbedding {
    inner: TakensEmbedding,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyTakensEmbedding {
    #[new]
    #[pyo3(
        signature = (parameters_type = None, time_delay = 1, dimension = 5, stride = 1, n_jobs = None),
        text_signature = "(parameters_type='search', time_delay=1, dimension=5, stride=1, n_jobs=None)"
    )]
    pub fn new(
        parameters_type: Option<&str>, time_delay: usize, dimension: usize, stride: usize,
        n_jobs: Option<i64>,
    ) -> PyResult<PyTakensEmbedding> {
        let opts = TakensOptions::new(
            extract_parameters_type(parameters_type)?,
            time_delay,
            dimension,
            stride,
        )?
        .with_parallelism(extract_parallelism(n_jobs)?)?;
        Ok(PyTakensEmbedding { inner: TakensEmbedding::new(opts) })
    }

    #[pyo3(signature = (x, y = None))]
    pub fn fit<'py>(
        mut slf: PyRefMut<'py, Self>, py: Python<'py>, x: &Bound<'py, PyAny>,
        y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<PyRefMut<'py, Self>> {
        let _ = y;
        let series = extract_scalar_series(x)?;
        let inner = &mut slf.inner;
        py.allow_threads(|| inner.fit(series.view()).map(|_| ()))?;
        Ok(slf)
    }

    #[pyo3(signature = (x, y = None))]
    pub fn transform<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let _ = y;
        let series = extract_scalar_series(x)?;
        Ok(self.inner.transform(series.view())?.into_pyarray(py))
    }

    #[pyo3(signature = (x, y = None))]
    pub fn fit_transform<'py>(
        &mut self, py: Python<'py>, x: &Bound<'py, PyAny>, y: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let _ = y;
        let series = extract_scalar_series(x)?;
        let inner = &mut self.inner;
        let cloud = py.allow_threads(|| inner.fit_transform(series.view()))?;
        Ok(cloud.into_pyarray(py))
    }

    #[pyo3(signature = (y, x = None))]
    pub fn resample<'py>(
        &self, py: Python<'py>, y: &Bound<'py, PyAny>, x: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let _ = x;
        let target = extract_series(y)?;
        Ok(self.inner.resample(target.view())?.into_pyarray(py))
    }

    #[getter(time_delay_)]
    pub fn fitted_time_delay(&self) -> PyResult<usize> {
        Ok(self.inner.time_delay()?)
    }

    #[getter(dimension_)]
    pub fn fitted_dimension(&self) -> PyResult<usize> {
        Ok(self.inner.dimension()?)
    }
}

/// _rust_embedding — PyO3 module initializer for the Python extension.
///
/// Creates the `time_series` submodule, attaches it to the parent module,
/// and registers it in `sys.modules` as `rust_embedding.time_series` so it
/// is importable via a dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_embedding<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let time_series_mod = PyModule::new(_py, "time_series")?;
    time_series(_py, m, &time_series_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_embedding.time_series", time_series_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn time_series<'py>(
    _py: Python, rust_embedding: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PySlidingWindow>()?;
    m.add_class::<PyTakensEmbedding>()?;
    rust_embedding.add_submodule(m)?;
    Ok(())
}
