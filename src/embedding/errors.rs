//! embedding::errors — error type and result alias for embedding routines.
//!
//! Purpose
//! -------
//! Provide a single error enum for window slicing, delay embedding, and the
//! Takens parameter search, together with a conversion layer to Python
//! exceptions for the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`EmbeddingError`] and [`EmbeddingResult`] as the canonical error
//!   and result types for everything under `embedding`.
//! - Attach human-readable `Display` messages that embed the offending value
//!   so diagnostics are meaningful without additional context.
//! - Implement `From<EmbeddingError> for PyErr` behind `python-bindings`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every failure is reported to the caller; nothing is silently corrected.
//! - All operations are deterministic, so an error recurs identically on
//!   retry.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// EmbeddingError — failure conditions for embedding routines.
///
/// Variants
/// --------
/// - `InvalidParameter { name, value }`
///   A hyperparameter is out of range (zero width, stride, delay, dimension
///   or bin count; non-positive threshold; unknown parameters type).
/// - `InvalidData { index, value }`
///   A sample is NaN or ±∞.
/// - `NotFitted`
///   `transform`/`resample` was called on an embedder that has not been
///   fitted successfully.
/// - `InsufficientLength { required, actual }`
///   The series is shorter than the window/embedding geometry requires.
/// - `ThreadPool(msg)`
///   The worker pool for a parallel search could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    // ---- Parameter validation ----
    InvalidParameter { name: &'static str, value: String },

    // ---- Data validation ----
    InvalidData { index: usize, value: f64 },
    InsufficientLength { required: usize, actual: usize },

    // ---- Lifecycle ----
    NotFitted,

    // ---- Execution ----
    ThreadPool(String),
}

impl EmbeddingError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl std::fmt::Display) -> Self {
        EmbeddingError::InvalidParameter { name, value: value.to_string() }
    }
}

impl std::error::Error for EmbeddingError {}

impl std::fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter {name} = {value}.")
            }
            EmbeddingError::InvalidData { index, value } => {
                write!(f, "Invalid sample at index {index}: {value}. Must be a finite number.")
            }
            EmbeddingError::InsufficientLength { required, actual } => write!(
                f,
                "Series too short: need at least {required} samples, got {actual}."
            ),
            EmbeddingError::NotFitted => {
                write!(f, "Embedder is not fitted yet. Call fit before transform or resample.")
            }
            EmbeddingError::ThreadPool(msg) => write!(f, "Failed to build worker pool: {msg}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<EmbeddingError> for PyErr {
    fn from(err: EmbeddingError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` output for each `EmbeddingError` variant, including payload
    //   embedding.
    //
    // They intentionally DO NOT cover:
    // - The PyO3 conversion, which is exercised from Python.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that parameter and data errors embed their payloads.
    //
    // Expect
    // ------
    // - The parameter name, value, and index appear in the messages.
    fn display_embeds_payloads() {
        // Arrange
        let param = EmbeddingError::invalid_parameter("stride", 0);
        let data = EmbeddingError::InvalidData { index: 7, value: f64::NAN };
        let length = EmbeddingError::InsufficientLength { required: 11, actual: 4 };

        // Act
        let param_msg = param.to_string();
        let data_msg = data.to_string();
        let length_msg = length.to_string();

        // Assert
        assert!(param_msg.contains("stride") && param_msg.contains('0'), "{param_msg}");
        assert!(data_msg.contains("index 7") && data_msg.contains("NaN"), "{data_msg}");
        assert!(length_msg.contains("11") && length_msg.contains('4'), "{length_msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the lifecycle and pool messages are informative.
    fn display_lifecycle_and_pool_messages() {
        assert!(EmbeddingError::NotFitted.to_string().contains("not fitted"));
        assert!(EmbeddingError::ThreadPool("boom".into()).to_string().contains("boom"));
    }
}
