//! embedding::mutual_info — time-delayed mutual information of a series.
//!
//! Purpose
//! -------
//! Score how much a sample says about the sample `τ` steps later, via a
//! discretized (histogram) estimate of mutual information. The Takens search
//! picks the delay that minimizes this score.
//!
//! Key behaviors
//! -------------
//! - [`delayed_histogram`] bins the pairs `(xₜ, xₜ₊τ)` into an
//!   `n_bins × n_bins` contingency table. Each axis is binned uniformly
//!   between its own minimum and maximum; the last bin is closed on the
//!   right. A constant axis is widened to `[v − 0.5, v + 0.5]`.
//! - [`contingency_mutual_information`] evaluates
//!   `I = Σ p(i,j)·ln(p(i,j) / (p(i)·p(j)))` over the non-empty cells, in
//!   nats, clipped at zero.
//! - [`mutual_information`] composes the two.
//!
//! Invariants & assumptions
//! ------------------------
//! - Degenerate inputs never fail: no overlapping pairs or a zero-variance
//!   series yield `0.0`.
//! - Samples are assumed finite; the Takens embedder validates this once
//!   before the search starts.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the constant-series and no-pairs paths, a hand-checked
//!   2×2 table, and the expected ordering between a smooth signal's short
//!   and quarter-period delays.

use crate::embedding::{errors::EmbeddingResult, validation::validate_positive};
use ndarray::{Array2, ArrayView1, s};

/// Bin count used by the Takens delay search.
pub const DEFAULT_N_BINS: usize = 100;

/// Build the `n_bins × n_bins` contingency table of `(series[t], series[t + delay])`.
///
/// Errors
/// ------
/// - `EmbeddingError::InvalidParameter` when `delay == 0` or `n_bins == 0`.
pub fn delayed_histogram(
    series: ArrayView1<'_, f64>, delay: usize, n_bins: usize,
) -> EmbeddingResult<Array2<f64>> {
    validate_positive("time_delay", delay)?;
    validate_positive("n_bins", n_bins)?;

    let mut table = Array2::<f64>::zeros((n_bins, n_bins));
    if delay >= series.len() {
        return Ok(table);
    }
    let n_pairs = series.len() - delay;
    let lead = series.slice(s![..n_pairs]);
    let lag = series.slice(s![delay..]);

    let lead_bins = AxisBins::spanning(lead, n_bins);
    let lag_bins = AxisBins::spanning(lag, n_bins);
    for (&a, &b) in lead.iter().zip(lag.iter()) {
        table[[lead_bins.index(a), lag_bins.index(b)]] += 1.0;
    }
    Ok(table)
}

/// Mutual information (nats) of a contingency table of counts.
///
/// Returns `0.0` for an empty table.
pub fn contingency_mutual_information(table: &Array2<f64>) -> f64 {
    let total: f64 = table.sum();
    if total <= 0.0 {
        return 0.0;
    }
    let row_sums = table.sum_axis(ndarray::Axis(1));
    let col_sums = table.sum_axis(ndarray::Axis(0));

    let mut mi = 0.0;
    for ((i, j), &count) in table.indexed_iter() {
        if count > 0.0 {
            let p_ij = count / total;
            mi += p_ij * (count * total / (row_sums[i] * col_sums[j])).ln();
        }
    }
    mi.max(0.0)
}

/// Time-delayed mutual information of `series` at `delay`, with `n_bins`
/// bins per axis.
///
/// Errors
/// ------
/// - `EmbeddingError::InvalidParameter` when `delay == 0` or `n_bins == 0`.
///   Degenerate data never produces an error.
pub fn mutual_information(
    series: ArrayView1<'_, f64>, delay: usize, n_bins: usize,
) -> EmbeddingResult<f64> {
    let table = delayed_histogram(series, delay, n_bins)?;
    Ok(contingency_mutual_information(&table))
}

/// Uniform bins over `[lo, hi]` for one histogram axis.
struct AxisBins {
    lo: f64,
    width: f64,
    n_bins: usize,
}

impl AxisBins {
    fn spanning(values: ArrayView1<'_, f64>, n_bins: usize) -> AxisBins {
        let (mut lo, mut hi) =
            values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        AxisBins { lo, width: (hi - lo) / n_bins as f64, n_bins }
    }

    fn index(&self, value: f64) -> usize {
        let raw = ((value - self.lo) / self.width).floor();
        if raw <= 0.0 { 0 } else { (raw as usize).min(self.n_bins - 1) }
    }
}
