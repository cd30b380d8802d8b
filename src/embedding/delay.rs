//! embedding::delay — time-delay embedding of a scalar series.
//!
//! Point `i` (counted from the end) of a `(τ, d, stride)` embedding collects
//! the samples `τ·(d − 1), …, τ, 0` steps before the anchor
//! `n − 1 − i·stride`. Coordinates are stored oldest first, so the last
//! coordinate of the last point is always the last sample of the series.
//!
//! The anchor arithmetic is shared with `embedding::window`: an embedded
//! point is a window of span `τ·(d − 1)` that keeps only every τ-th sample.

use crate::embedding::{
    errors::EmbeddingResult,
    validation::validate_positive,
    window::{anchor_indices, count_anchors, resample_anchored},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Delay-embedding geometry: time delay `τ`, dimension `d` and stride.
///
/// All three values are ≥ 1; use [`EmbeddingParams::new`] to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddingParams {
    time_delay: usize,
    dimension: usize,
    stride: usize,
}

impl EmbeddingParams {
    pub fn new(time_delay: usize, dimension: usize, stride: usize) -> EmbeddingResult<Self> {
        validate_positive("time_delay", time_delay)?;
        validate_positive("dimension", dimension)?;
        validate_positive("stride", stride)?;
        Ok(EmbeddingParams { time_delay, dimension, stride })
    }

    pub fn time_delay(&self) -> usize {
        self.time_delay
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Samples between the first and last coordinate of one point: `τ·(d − 1)`.
    ///
    /// Saturates at `usize::MAX`, which no series can hold, so an overflowing
    /// geometry surfaces as `InsufficientLength`.
    pub fn span(&self) -> usize {
        self.time_delay.saturating_mul(self.dimension - 1)
    }

    /// `(n − τ·(d − 1) − 1) div stride + 1`, or `InsufficientLength` when
    /// `n < τ·(d − 1) + 1`.
    pub fn num_points(&self, n: usize) -> EmbeddingResult<usize> {
        count_anchors(n, self.span(), self.stride)
    }

    /// Series index of the first (oldest) coordinate of every point.
    pub(crate) fn first_indices(&self, n: usize) -> EmbeddingResult<Vec<usize>> {
        let span = self.span();
        Ok(anchor_indices(n, span, self.stride)?.map(|anchor| anchor - span).collect())
    }
}

/// Embed `series` into a `(num_points, dimension)` point cloud.
///
/// Errors
/// ------
/// - `EmbeddingError::InsufficientLength` when `n < τ·(d − 1) + 1`.
pub fn embed(series: ArrayView1<'_, f64>, params: &EmbeddingParams) -> EmbeddingResult<Array2<f64>> {
    let firsts = params.first_indices(series.len())?;
    let tau = params.time_delay;
    Ok(Array2::from_shape_fn((firsts.len(), params.dimension), |(i, j)| series[firsts[i] + j * tau]))
}

/// Resample a target so entry `−i` lines up with the last coordinate of
/// embedded point `−i`.
pub fn resample(
    target: ArrayView1<'_, f64>, params: &EmbeddingParams,
) -> EmbeddingResult<Array1<f64>> {
    resample_anchored(target, params.span(), params.stride)
}
