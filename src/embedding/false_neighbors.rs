//! embedding::false_neighbors — false-nearest-neighbor counts for a delay
//! embedding.
//!
//! Purpose
//! -------
//! Count the points of a `(τ, d)` delay embedding whose nearest neighbor is
//! only close because `d` is too small: adding the `(d + 1)`-th delayed
//! coordinate pulls the pair far apart. The Takens search looks at how this
//! count changes with `d` to pick an embedding dimension.
//!
//! Key behaviors
//! -------------
//! - Embed the series with `embedding::delay::embed`, query the nearest
//!   other point of every embedded point through a [`NearestNeighborOracle`],
//!   and compare the extra coordinate `x[aᵢ + d·τ]` of point `i` (whose last
//!   coordinate, the anchor, sits at series index `aᵢ`) with the same
//!   coordinate of its neighbor.
//! - A point is **false** when its neighbor distance `δᵢ` satisfies
//!   `δᵢ > 0`, `|Δextra| / δᵢ > tolerance_ratio`, and
//!   `δᵢ < epsilon_scale · σ`, where `σ` is the population standard deviation
//!   of the series.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only the oldest `m − d·τ` of the `m` embedded points are scored; the
//!   most recent `d·τ` points stay in the cloud (and may serve as neighbors)
//!   but are not candidates. With stride 1 these are exactly the points
//!   whose extra coordinate lies past the end of the series. A candidate
//!   whose neighbor has no extra coordinate inside the series is not
//!   flagged.
//! - The count is a nonnegative integer; an embedding with fewer than two
//!   points scores zero.
//!
//! Conventions
//! -----------
//! - [`FalseNeighborThresholds::default`] uses the Kennel et al. constants
//!   `tolerance_ratio = 10` and `epsilon_scale = 2`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover threshold validation, a hand-built series with a known
//!   false neighbor, the degenerate short-series path, and the decreasing
//!   trend of the count on a sine wave as `d` grows.

use crate::embedding::{
    delay::{EmbeddingParams, embed},
    errors::EmbeddingResult,
    neighbors::NearestNeighborOracle,
    validation::validate_positive_real,
    window::anchor_indices,
};
use ndarray::ArrayView1;
use statrs::statistics::Statistics;

/// FalseNeighborThresholds — heuristic constants of the false-neighbor test.
///
/// Fields
/// ------
/// - `tolerance_ratio`: `f64`
///   Minimum ratio between the extra-coordinate gap and the neighbor
///   distance for a pair to count as false. Default `10.0`.
/// - `epsilon_scale`: `f64`
///   Neighbor distances at or beyond `epsilon_scale · σ(series)` are ignored
///   as too spread out to be meaningful neighbors. Default `2.0`.
///
/// Invariants
/// ----------
/// - Both values are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FalseNeighborThresholds {
    tolerance_ratio: f64,
    epsilon_scale: f64,
}

impl FalseNeighborThresholds {
    pub fn new(tolerance_ratio: f64, epsilon_scale: f64) -> EmbeddingResult<Self> {
        validate_positive_real("tolerance_ratio", tolerance_ratio)?;
        validate_positive_real("epsilon_scale", epsilon_scale)?;
        Ok(FalseNeighborThresholds { tolerance_ratio, epsilon_scale })
    }

    pub fn tolerance_ratio(&self) -> f64 {
        self.tolerance_ratio
    }

    pub fn epsilon_scale(&self) -> f64 {
        self.epsilon_scale
    }
}

impl Default for FalseNeighborThresholds {
    fn default() -> Self {
        FalseNeighborThresholds { tolerance_ratio: 10.0, epsilon_scale: 2.0 }
    }
}

/// Count false nearest neighbors of the `(τ, d, stride)` embedding of `series`.
///
/// Parameters
/// ----------
/// - `series`: scalar series, assumed finite.
/// - `params`: embedding geometry.
/// - `oracle`: nearest-neighbor backend.
/// - `thresholds`: tolerance ratio and epsilon scale.
///
/// Returns
/// -------
/// `EmbeddingResult<usize>`
///   Number of flagged points.
///
/// Errors
/// ------
/// - `EmbeddingError::InsufficientLength` when the series cannot hold a
///   single embedded point (`n < τ·(d − 1) + 1`).
/// - Any error from the oracle.
pub fn count_false_neighbors<O>(
    series: ArrayView1<'_, f64>, params: &EmbeddingParams, oracle: &O,
    thresholds: &FalseNeighborThresholds,
) -> EmbeddingResult<usize>
where
    O: NearestNeighborOracle + ?Sized,
{
    let n = series.len();
    let cloud = embed(series, params)?;
    let m = cloud.nrows();
    let look_ahead = params.dimension().saturating_mul(params.time_delay());
    let scored = m.saturating_sub(look_ahead);
    if m < 2 || scored == 0 {
        return Ok(0);
    }

    let anchors: Vec<usize> = anchor_indices(n, params.span(), params.stride())?.collect();
    let extra = |point: usize| anchors[point].checked_add(look_ahead).filter(|&k| k < n);
    let neighbors = oracle.nearest(cloud.view())?;
    let epsilon = thresholds.epsilon_scale * series.iter().population_std_dev();

    let mut count = 0;
    for (i, nn) in neighbors.iter().take(scored).enumerate() {
        let distance = nn.distance;
        if !(distance > 0.0 && distance < epsilon) {
            continue;
        }
        let (Some(own_extra), Some(neighbor_extra)) = (extra(i), extra(nn.index)) else {
            continue;
        };
        let gap = (series[own_extra] - series[neighbor_extra]).abs();
        if gap / distance > thresholds.tolerance_ratio {
            count += 1;
        }
    }
    Ok(count)
}
