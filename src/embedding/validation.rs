//! embedding::validation — shared input guards for embedding routines.
//!
//! Purpose
//! -------
//! Centralize the eager checks performed before any index arithmetic:
//! positivity of integer hyperparameters, finiteness of samples, and the
//! minimum series length implied by a window or embedding geometry.
//!
//! Conventions
//! -----------
//! - Guards return [`EmbeddingResult<()>`] (or the checked quantity) and never
//!   panic.
//! - Length checks are phrased as "need `required` samples" so that callers
//!   never compute `n − span` on an unsigned integer before checking.

use crate::embedding::errors::{EmbeddingError, EmbeddingResult};

/// Reject a zero-valued integer hyperparameter.
///
/// Errors
/// ------
/// - `EmbeddingError::InvalidParameter { name, .. }` when `value == 0`.
pub fn validate_positive(name: &'static str, value: usize) -> EmbeddingResult<()> {
    if value == 0 {
        return Err(EmbeddingError::invalid_parameter(name, value));
    }
    Ok(())
}

/// Reject a threshold that is non-finite or not strictly positive.
pub fn validate_positive_real(name: &'static str, value: f64) -> EmbeddingResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EmbeddingError::invalid_parameter(name, value));
    }
    Ok(())
}

/// Reject any NaN or ±∞ sample, reporting the first offending index.
pub fn validate_finite<'a, I>(data: I) -> EmbeddingResult<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    for (index, &value) in data.into_iter().enumerate() {
        if !value.is_finite() {
            return Err(EmbeddingError::InvalidData { index, value });
        }
    }
    Ok(())
}

/// Ensure a series of length `actual` holds at least `required` samples.
pub fn validate_length(required: usize, actual: usize) -> EmbeddingResult<()> {
    if actual < required {
        return Err(EmbeddingError::InsufficientLength { required, actual });
    }
    Ok(())
}
