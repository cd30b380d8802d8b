//! embedding::neighbors — nearest-neighbor queries over a point cloud.
//!
//! The false-nearest-neighbor scorer only needs one primitive: for every
//! point of a cloud, the index of its nearest *other* point and the
//! Euclidean distance to it. [`NearestNeighborOracle`] is that seam;
//! [`BruteForceOracle`] is the exact O(N²·d) default.

use crate::embedding::{
    errors::EmbeddingResult,
    validation::validate_length,
};
use ndarray::ArrayView2;

/// Nearest other point of a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index of the neighbor in the queried cloud.
    pub index: usize,
    /// Euclidean distance to the neighbor.
    pub distance: f64,
}

/// Nearest-neighbor query over a cloud of `N` points in `R^d` (rows = points).
///
/// Implementations must be read-only with respect to the cloud, return one
/// [`Neighbor`] per row in row order, never return a point as its own
/// neighbor, and break ties deterministically.
pub trait NearestNeighborOracle: Sync {
    /// Errors
    /// ------
    /// - `EmbeddingError::InsufficientLength` when the cloud has fewer than
    ///   two points.
    fn nearest(&self, points: ArrayView2<'_, f64>) -> EmbeddingResult<Vec<Neighbor>>;
}

/// Exact nearest neighbors by exhaustive pairwise comparison. Ties go to the
/// lowest index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BruteForceOracle;

impl NearestNeighborOracle for BruteForceOracle {
    fn nearest(&self, points: ArrayView2<'_, f64>) -> EmbeddingResult<Vec<Neighbor>> {
        let n = points.nrows();
        validate_length(2, n)?;

        let mut out = Vec::with_capacity(n);
        for (i, query) in points.outer_iter().enumerate() {
            let mut best = Neighbor { index: usize::MAX, distance: f64::INFINITY };
            for (j, candidate) in points.outer_iter().enumerate() {
                if i == j {
                    continue;
                }
                let sq: f64 =
                    query.iter().zip(candidate.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
                if sq < best.distance || best.index == usize::MAX {
                    best = Neighbor { index: j, distance: sq };
                }
            }
            best.distance = best.distance.sqrt();
            out.push(best);
        }
        Ok(out)
    }
}
