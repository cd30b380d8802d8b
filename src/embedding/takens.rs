//! embedding::takens — Takens delay embedding with automatic parameter search.
//!
//! Purpose
//! -------
//! Represent a scalar time series as a point cloud of delay vectors
//! `(x_{t−(d−1)τ}, …, x_{t−τ}, x_t)`, choosing the time delay `τ` and the
//! dimension `d` either from configuration or by a data-driven search.
//!
//! Key behaviors
//! -------------
//! - [`TakensEmbedding::fit`] resolves `(τ, d)`:
//!   - `Fixed`: use the configured values.
//!   - `Search`: pick `τ* = argmin_τ MI(x, τ)` over `τ ∈ [1, τ_max]`, then
//!     count false nearest neighbors `c_k` at `τ*` for the dimensions
//!     `k ∈ [1, d_max + 2]` and pick
//!     `d* = argmin_d |c_d − 2c_{d+1} + c_{d+2}| / (c_{d+1} + 1) / d` over
//!     `d ∈ [2, d_max]`.
//! - [`TakensEmbedding::transform`] embeds a series at the fitted `(τ, d)`
//!   and the configured stride; [`TakensEmbedding::resample`] aligns a
//!   target with the last coordinate of each embedded point.
//!
//! Invariants & assumptions
//! ------------------------
//! - Lifecycle is an explicit state machine: [`FitState::Unfit`] until a
//!   `fit` succeeds, then [`FitState::Fitted`] with a read-only
//!   [`SearchState`]. A new `fit` discards the previous state first, so a
//!   failed re-fit leaves the embedder unfitted.
//! - `transform`/`resample` on an unfitted embedder return
//!   `EmbeddingError::NotFitted`.
//! - `fit` takes `&mut self` and the accessors take `&self`, so the
//!   fit-then-use protocol is enforced by the borrow checker; no locks.
//! - Ties in both argmin steps resolve to the smallest candidate.
//!
//! Conventions
//! -----------
//! - Candidate sweeps run through `embedding::parallel::evaluate_ordered`
//!   with the configured [`Parallelism`](crate::embedding::parallel::Parallelism);
//!   results are gathered in candidate order before selection.
//! - Delay candidates with fewer than two overlapping pairs (`τ ≥ n − 1`)
//!   score `+∞` and are never selected unless every candidate does.
//! - When `d_max < 2` there is no variation to minimize and `d* = d_max`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the lifecycle guard, fixed-mode passthrough, refit
//!   semantics, the variation rule on synthetic counts, the dimension bound
//!   across several settings, and a search on a sampled sine wave
//!   (sequential vs parallel agreement included).

use crate::embedding::{
    delay::{self, EmbeddingParams},
    errors::{EmbeddingError, EmbeddingResult},
    false_neighbors::count_false_neighbors,
    mutual_info::mutual_information,
    neighbors::{BruteForceOracle, NearestNeighborOracle},
    options::{ParametersType, TakensOptions},
    parallel::evaluate_ordered,
    validation::{validate_finite, validate_length},
};
use ndarray::{Array1, Array2, ArrayView1};

/// SearchState — delay and dimension resolved by the last successful fit.
///
/// Fields
/// ------
/// - `time_delay_upper_bound`, `dimension_upper_bound`: configured values
///   at fit time (upper bounds in `Search` mode).
/// - `time_delay`, `dimension`: values used by `transform`/`resample`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub time_delay_upper_bound: usize,
    pub dimension_upper_bound: usize,
    pub time_delay: usize,
    pub dimension: usize,
}

/// Lifecycle of a [`TakensEmbedding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitState {
    #[default]
    Unfit,
    Fitted(SearchState),
}

/// TakensEmbedding — delay embedder with optional parameter search.
///
/// Type parameters
/// ---------------
/// - `O`: nearest-neighbor backend used by the false-neighbor scorer.
///   Defaults to [`BruteForceOracle`].
///
/// Examples
/// --------
/// ```rust
/// # use rust_embedding::embedding::{TakensEmbedding, TakensOptions, ParametersType};
/// # use ndarray::Array;
/// let series = Array::from_iter((0..200).map(|t| (t as f64 / 10.0).sin()));
/// let opts = TakensOptions::new(ParametersType::Fixed, 3, 2, 1).unwrap();
/// let mut embedder = TakensEmbedding::new(opts);
/// let cloud = embedder.fit_transform(series.view()).unwrap();
/// assert_eq!(cloud.dim(), (197, 2));
/// assert_eq!(cloud[[196, 1]], series[199]);
/// ```
#[derive(Debug, Clone)]
pub struct TakensEmbedding<O = BruteForceOracle> {
    options: TakensOptions,
    oracle: O,
    state: FitState,
}

impl TakensEmbedding<BruteForceOracle> {
    pub fn new(options: TakensOptions) -> Self {
        TakensEmbedding::with_oracle(options, BruteForceOracle)
    }
}

impl Default for TakensEmbedding<BruteForceOracle> {
    fn default() -> Self {
        TakensEmbedding::new(TakensOptions::default())
    }
}

impl<O: NearestNeighborOracle> TakensEmbedding<O> {
    pub fn with_oracle(options: TakensOptions, oracle: O) -> Self {
        TakensEmbedding { options, oracle, state: FitState::Unfit }
    }

    pub fn options(&self) -> &TakensOptions {
        &self.options
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn state(&self) -> &FitState {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, FitState::Fitted(_))
    }

    /// Fitted state, or `EmbeddingError::NotFitted`.
    pub fn search_state(&self) -> EmbeddingResult<&SearchState> {
        match &self.state {
            FitState::Fitted(state) => Ok(state),
            FitState::Unfit => Err(EmbeddingError::NotFitted),
        }
    }

    pub fn time_delay(&self) -> EmbeddingResult<usize> {
        Ok(self.search_state()?.time_delay)
    }

    pub fn dimension(&self) -> EmbeddingResult<usize> {
        Ok(self.search_state()?.dimension)
    }

    /// Resolve the embedding delay and dimension for `series`.
    ///
    /// Errors
    /// ------
    /// - `EmbeddingError::InvalidData` for a non-finite sample.
    /// - `EmbeddingError::InsufficientLength` in `Search` mode when the series
    ///   cannot hold a `(d_max + 2)`-dimensional embedding at the selected
    ///   delay.
    /// - `EmbeddingError::ThreadPool` if a parallel sweep cannot start.
    pub fn fit(&mut self, series: ArrayView1<'_, f64>) -> EmbeddingResult<&SearchState> {
        self.state = FitState::Unfit;
        validate_finite(series.iter())?;

        let opts = &self.options;
        let (time_delay, dimension) = match opts.parameters_type() {
            ParametersType::Fixed => (opts.time_delay(), opts.dimension()),
            ParametersType::Search => {
                let tau = search_time_delay(series, opts)?;
                (tau, search_dimension(series, tau, opts, &self.oracle)?)
            }
        };
        tracing::debug!(
            parameters_type = ?opts.parameters_type(),
            time_delay,
            dimension,
            "takens embedding fitted"
        );

        self.state = FitState::Fitted(SearchState {
            time_delay_upper_bound: opts.time_delay(),
            dimension_upper_bound: opts.dimension(),
            time_delay,
            dimension,
        });
        self.search_state()
    }

    fn fitted_params(&self) -> EmbeddingResult<EmbeddingParams> {
        let state = self.search_state()?;
        EmbeddingParams::new(state.time_delay, state.dimension, self.options.stride())
    }

    /// Embed `series` into a `(num_points, d)` point cloud, oldest point first.
    ///
    /// Errors
    /// ------
    /// - `EmbeddingError::NotFitted` before a successful `fit`.
    /// - `EmbeddingError::InvalidData` for a non-finite sample.
    /// - `EmbeddingError::InsufficientLength` when `n < τ·(d − 1) + 1`.
    pub fn transform(&self, series: ArrayView1<'_, f64>) -> EmbeddingResult<Array2<f64>> {
        let params = self.fitted_params()?;
        validate_finite(series.iter())?;
        delay::embed(series, &params)
    }

    /// Align `target` with the last coordinate of every embedded point.
    pub fn resample(&self, target: ArrayView1<'_, f64>) -> EmbeddingResult<Array1<f64>> {
        let params = self.fitted_params()?;
        delay::resample(target, &params)
    }

    pub fn fit_transform(&mut self, series: ArrayView1<'_, f64>) -> EmbeddingResult<Array2<f64>> {
        self.fit(series)?;
        self.transform(series)
    }
}

/// Delay in `[1, τ_max]` with the smallest time-delayed mutual information.
fn search_time_delay(series: ArrayView1<'_, f64>, opts: &TakensOptions) -> EmbeddingResult<usize> {
    let n = series.len();
    let n_bins = opts.n_bins();
    let candidates: Vec<usize> = (1..=opts.time_delay()).collect();

    let scores = evaluate_ordered(&candidates, opts.parallelism(), |&tau| {
        if tau + 2 > n { Ok(f64::INFINITY) } else { mutual_information(series, tau, n_bins) }
    })?
    .into_iter()
    .collect::<EmbeddingResult<Vec<f64>>>()?;
    tracing::debug!(?scores, "mutual information by time delay");

    Ok(candidates[first_argmin(&scores)])
}

/// Dimension in `[2, d_max]` where the false-neighbor count stops changing.
fn search_dimension<O: NearestNeighborOracle>(
    series: ArrayView1<'_, f64>, time_delay: usize, opts: &TakensOptions, oracle: &O,
) -> EmbeddingResult<usize> {
    let max_dim = opts.dimension();
    if max_dim < 2 {
        return Ok(max_dim);
    }
    let required = time_delay.saturating_mul(max_dim.saturating_add(1)).saturating_add(1);
    validate_length(required, series.len())?;

    let thresholds = opts.thresholds();
    let candidates: Vec<usize> = (1..=max_dim + 2).collect();
    let counts = evaluate_ordered(&candidates, opts.parallelism(), |&dim| {
        let params = EmbeddingParams::new(time_delay, dim, 1)?;
        count_false_neighbors(series, &params, oracle, thresholds)
    })?
    .into_iter()
    .collect::<EmbeddingResult<Vec<usize>>>()?;
    tracing::debug!(time_delay, ?counts, "false nearest neighbors by dimension");

    let variation = dimension_variation(&counts);
    Ok(first_argmin(&variation) + 2)
}

/// Damped second difference of false-neighbor counts.
///
/// `counts[k]` is the count at dimension `k + 1` for `k ∈ [0, d_max + 2)`.
/// Dimension `d ∈ [2, d_max]` is scored from `counts[d − 1..=d + 1]`, so the
/// result has `d_max − 1` entries and entry `k` is the score of dimension
/// `k + 2`.
pub(crate) fn dimension_variation(counts: &[usize]) -> Vec<f64> {
    let max_dim = counts.len().saturating_sub(2);
    (2..=max_dim)
        .map(|dim| {
            let (prev, cur, next) =
                (counts[dim - 1] as f64, counts[dim] as f64, counts[dim + 1] as f64);
            (prev - 2.0 * cur + next).abs() / (cur + 1.0) / dim as f64
        })
        .collect()
}

/// Index of the first minimum; `0` for an empty slice.
fn first_argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::parallel::Parallelism;
    use approx::assert_relative_eq;
    use ndarray::{Array, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The NotFitted guard and refit semantics.
    // - Fixed-mode passthrough and output anchoring.
    // - The variation rule and argmin tie-breaking.
    // - Search mode on a sampled sine wave, sequential and parallel.
    // -------------------------------------------------------------------------

    fn sine(n: usize, period: f64) -> Array1<f64> {
        Array::from_iter((0..n).map(|t| (std::f64::consts::TAU * t as f64 / period).sin()))
    }

    #[test]
    // Purpose
    // -------
    // A fresh embedder refuses to transform or resample.
    fn transform_before_fit_is_not_fitted() {
        let embedder: TakensEmbedding = TakensEmbedding::default();
        let series = array![1.0, 2.0, 3.0];

        assert_eq!(embedder.transform(series.view()), Err(EmbeddingError::NotFitted));
        assert_eq!(embedder.resample(series.view()), Err(EmbeddingError::NotFitted));
        assert_eq!(embedder.time_delay(), Err(EmbeddingError::NotFitted));
        assert!(!embedder.is_fitted());
    }

    #[test]
    // Purpose
    // -------
    // Fixed mode uses the configured parameters; the output and resampled
    // target both end at the last sample.
    fn fixed_mode_passthrough_and_anchoring() {
        // Arrange
        let series = Array::range(0.0, 40.0, 1.0);
        let opts = TakensOptions::new(ParametersType::Fixed, 4, 3, 5).unwrap();
        let mut embedder = TakensEmbedding::new(opts);

        // Act
        let state = *embedder.fit(series.view()).unwrap();
        let cloud = embedder.transform(series.view()).unwrap();
        let yr = embedder.resample(series.view()).unwrap();

        // Assert
        assert_eq!(
            state,
            SearchState {
                time_delay_upper_bound: 4,
                dimension_upper_bound: 3,
                time_delay: 4,
                dimension: 3
            }
        );
        // (40 − 8 − 1) div 5 + 1 = 7 points.
        assert_eq!(cloud.dim(), (7, 3));
        assert_eq!(cloud.row(6), array![31.0, 35.0, 39.0]);
        assert_eq!(yr.len(), 7);
        assert_eq!(yr[6], 39.0);
    }

    #[test]
    // Purpose
    // -------
    // A failed refit clears the previous fitted state.
    fn failed_refit_leaves_embedder_unfit() {
        let opts = TakensOptions::new(ParametersType::Fixed, 1, 2, 1).unwrap();
        let mut embedder = TakensEmbedding::new(opts);
        embedder.fit(array![1.0, 2.0, 3.0].view()).unwrap();
        assert!(embedder.is_fitted());

        let bad = array![1.0, f64::NAN, 3.0];
        assert!(matches!(
            embedder.fit(bad.view()),
            Err(EmbeddingError::InvalidData { index: 1, .. })
        ));
        assert_eq!(*embedder.state(), FitState::Unfit);
    }

    #[test]
    // Purpose
    // -------
    // Check the variation formula, its candidate range, and first-minimum
    // tie-breaking.
    //
    // Given
    // -----
    // - Counts `[100, 40, 10, 9, 9, 9]` for dimensions 1..=6, i.e. `d_max = 4`.
    //
    // Expect
    // ------
    // - One score per dimension in `[2, 4]`:
    //   v_2 = |40 − 20 + 9| / 11 / 2, v_3 = |10 − 18 + 9| / 10 / 3,
    //   v_4 = |9 − 18 + 9| / 10 / 4 = 0 → dimension 4.
    // - Equal scores resolve to the smaller dimension.
    fn variation_rule_selects_first_flat_dimension() {
        let counts = [100, 40, 10, 9, 9, 9];
        let variation = dimension_variation(&counts);

        assert_eq!(variation.len(), 3);
        assert_relative_eq!(variation[0], 29.0 / 11.0 / 2.0, epsilon = 1e-12);
        assert_relative_eq!(variation[1], 1.0 / 30.0, epsilon = 1e-12);
        assert_eq!(variation[2], 0.0);
        assert_eq!(first_argmin(&variation) + 2, 4);

        let flat = dimension_variation(&[7, 3, 3, 3, 3]);
        assert_eq!(flat.len(), 2);
        assert_eq!(first_argmin(&flat) + 2, 2);
        assert!(dimension_variation(&[5, 1, 0]).is_empty());
        assert_eq!(first_argmin(&[2.0, 1.0, 1.0]), 1);
        assert_eq!(first_argmin(&[f64::INFINITY, f64::INFINITY]), 0);
    }

    #[test]
    // Purpose
    // -------
    // Search on a clean sine stays inside the bounds, and parallel search
    // selects exactly what sequential search selects.
    fn search_on_sine_is_bounded_and_order_stable() {
        // Arrange
        let series = sine(800, 40.0);
        let base = TakensOptions::new(ParametersType::Search, 15, 4, 1).unwrap();
        let mut sequential = TakensEmbedding::new(base);
        let mut parallel =
            TakensEmbedding::new(base.with_parallelism(Parallelism::Threads(3)).unwrap());

        // Act
        let seq_state = *sequential.fit(series.view()).unwrap();
        let par_state = *parallel.fit(series.view()).unwrap();

        // Assert
        assert!((1..=15).contains(&seq_state.time_delay), "{seq_state:?}");
        assert!((2..=4).contains(&seq_state.dimension), "{seq_state:?}");
        assert_eq!(seq_state, par_state);

        let cloud = sequential.transform(series.view()).unwrap();
        assert_eq!(cloud[[cloud.nrows() - 1, seq_state.dimension - 1]], series[799]);
    }

    #[test]
    // Purpose
    // -------
    // A constant series still completes the search: every delay scores zero,
    // so the first candidate wins, and every false-neighbor count is zero.
    fn search_on_constant_series_terminates() {
        let series = Array::from_elem(60, 2.0);
        let opts = TakensOptions::new(ParametersType::Search, 5, 3, 1).unwrap();
        let mut embedder = TakensEmbedding::new(opts);

        let state = *embedder.fit(series.view()).unwrap();

        assert_eq!(state.time_delay, 1);
        assert_eq!(state.dimension, 2);
    }

    #[test]
    // Purpose
    // -------
    // The selected dimension never exceeds the configured bound.
    fn search_dimension_stays_within_bound() {
        let series = Array::from_iter((0..400).map(|t| (t as f64 / 9.0).sin()));
        for bound in 2..=5 {
            let opts = TakensOptions::new(ParametersType::Search, 4, bound, 1).unwrap();
            let mut embedder = TakensEmbedding::new(opts);

            let state = *embedder.fit(series.view()).unwrap();

            assert!((2..=bound).contains(&state.dimension), "bound {bound}: {state:?}");
            assert_eq!(state.dimension_upper_bound, bound);
        }
    }

    #[test]
    // Purpose
    // -------
    // A dimension bound of 1 resolves to dimension 1 without a sweep.
    fn search_with_unit_dimension_bound() {
        let series = sine(100, 20.0);
        let opts = TakensOptions::new(ParametersType::Search, 3, 1, 1).unwrap();
        let mut embedder = TakensEmbedding::new(opts);

        assert_eq!(embedder.fit(series.view()).unwrap().dimension, 1);
    }

    #[test]
    // Purpose
    // -------
    // Search mode rejects a series too short for the dimension sweep.
    fn search_on_short_series_is_insufficient_length() {
        let series = sine(6, 6.0);
        let opts = TakensOptions::new(ParametersType::Search, 2, 5, 1).unwrap();
        let mut embedder = TakensEmbedding::new(opts);

        assert!(matches!(
            embedder.fit(series.view()),
            Err(EmbeddingError::InsufficientLength { .. })
        ));
        assert!(!embedder.is_fitted());
    }
}
