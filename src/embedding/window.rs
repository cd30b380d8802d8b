//! embedding::window — end-anchored sliding windows over a time series.
//!
//! Purpose
//! -------
//! Turn a sequence of samples (scalars or vectors) into a sequence of
//! overlapping fixed-width windows, and resample a target series so that each
//! window is paired with the target value at its last time step.
//!
//! Key behaviors
//! -------------
//! - [`window_bounds`] computes `(start, end)` half-open ranges of length
//!   `width + 1`, in chronological order, with the last range ending at `n`.
//! - [`slice_windows`] / [`slice_windows_multi`] copy those ranges into a
//!   stacked `Array2` (scalar series) or `Array3` (multi-channel series).
//! - [`resample_target`] picks one target value per window, aligned to the
//!   window's last sample.
//! - [`SlidingWindow`] bundles a validated [`WindowSpec`] with the three
//!   operations above.
//!
//! Invariants & assumptions
//! ------------------------
//! - The **last** sample is the anchor: the last window always ends at the
//!   series' last element. When `(n − width − 1) mod stride ≠ 0`, the oldest
//!   samples are dropped.
//! - `num_windows = (n − width − 1) div stride + 1`, which requires
//!   `n ≥ width + 1`; shorter series are rejected with
//!   `EmbeddingError::InsufficientLength` before any subtraction happens.
//!
//! Conventions
//! -----------
//! - Rows are time (index 0 oldest), columns are channels.
//! - Alignment is computed by walking backwards from the end with explicit
//!   index arithmetic; no reversed copies of the input are made.
//! - [`anchor_indices`] is shared with the delay embedding in
//!   `embedding::delay`, where the "window" is the span `τ·(d − 1)`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the bounds formula, the multi-channel regression
//!   fixture (`[0..19]` as 10×2, width 2, stride 3), the `[3, 6, 9]` target
//!   resampling fixture, and the short-series error path.

use crate::embedding::{
    errors::{EmbeddingError, EmbeddingResult},
    validation::{validate_finite, validate_length, validate_positive},
};
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2};

/// WindowSpec — validated width and stride of a sliding window.
///
/// Fields
/// ------
/// - `width`: `usize`
///   Each window holds `width + 1` consecutive samples. Must be ≥ 1.
/// - `stride`: `usize`
///   Offset between the ends of consecutive windows. Must be ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    width: usize,
    stride: usize,
}

impl WindowSpec {
    /// Construct a [`WindowSpec`], rejecting a zero width or stride.
    pub fn new(width: usize, stride: usize) -> EmbeddingResult<WindowSpec> {
        validate_positive("width", width)?;
        validate_positive("stride", stride)?;
        Ok(WindowSpec { width, stride })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of windows fitting in a series of length `n`.
    ///
    /// Errors
    /// ------
    /// - `EmbeddingError::InsufficientLength` when `n < width + 1`.
    pub fn num_windows(&self, n: usize) -> EmbeddingResult<usize> {
        count_anchors(n, self.width, self.stride)
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec { width: 10, stride: 1 }
    }
}

/// Number of end-anchored positions `n − 1 − k·stride` that leave room for
/// `span` earlier samples. A `span` of `usize::MAX` never fits.
pub(crate) fn count_anchors(n: usize, span: usize, stride: usize) -> EmbeddingResult<usize> {
    validate_length(span.saturating_add(1), n)?;
    Ok((n - span - 1) / stride + 1)
}

/// Anchor indices (the last sample of each window or embedded point), oldest
/// first, ending at `n − 1`.
///
/// Parameters
/// ----------
/// - `n`: series length.
/// - `span`: number of samples each anchor reaches back (`width` for windows,
///   `τ·(d − 1)` for delay embeddings).
/// - `stride`: distance between consecutive anchors; assumed ≥ 1.
///
/// Errors
/// ------
/// - `EmbeddingError::InsufficientLength` when `n < span + 1`.
pub(crate) fn anchor_indices(
    n: usize, span: usize, stride: usize,
) -> EmbeddingResult<impl ExactSizeIterator<Item = usize>> {
    let count = count_anchors(n, span, stride)?;
    Ok((0..count).map(move |k| n - 1 - (count - 1 - k) * stride))
}

/// Compute the `(start, end)` ranges of every window over a series of
/// length `n`.
///
/// Returns
/// -------
/// `EmbeddingResult<Vec<(usize, usize)>>`
///   Half-open ranges with `end − start == width + 1`, in increasing
///   chronological order; the last range has `end == n`.
///
/// Errors
/// ------
/// - `EmbeddingError::InsufficientLength` when `n < width + 1`.
///
/// Examples
/// --------
/// ```rust
/// # use rust_embedding::embedding::window::{window_bounds, WindowSpec};
/// let spec = WindowSpec::new(2, 3).unwrap();
/// assert_eq!(window_bounds(10, &spec).unwrap(), vec![(1, 4), (4, 7), (7, 10)]);
/// ```
pub fn window_bounds(n: usize, spec: &WindowSpec) -> EmbeddingResult<Vec<(usize, usize)>> {
    let anchors = anchor_indices(n, spec.width, spec.stride)?;
    Ok(anchors.map(|last| (last - spec.width, last + 1)).collect())
}

/// Stack the windows of a scalar series into a `(num_windows, width + 1)`
/// array. Each row is a verbatim copy of its range.
///
/// Errors
/// ------
/// - `EmbeddingError::InvalidParameter` when a range has `start > end` or
///   its length differs from the first range.
/// - `EmbeddingError::InsufficientLength` when a range extends past the end
///   of `series`.
pub fn slice_windows(
    series: ArrayView1<'_, f64>, bounds: &[(usize, usize)],
) -> EmbeddingResult<Array2<f64>> {
    let window_len = check_bounds(series.len(), bounds)?;
    Ok(Array2::from_shape_fn((bounds.len(), window_len), |(k, j)| series[bounds[k].0 + j]))
}

/// Stack the windows of a multi-channel series (rows = time) into a
/// `(num_windows, width + 1, channels)` array.
pub fn slice_windows_multi(
    series: ArrayView2<'_, f64>, bounds: &[(usize, usize)],
) -> EmbeddingResult<Array3<f64>> {
    let window_len = check_bounds(series.nrows(), bounds)?;
    Ok(Array3::from_shape_fn((bounds.len(), window_len, series.ncols()), |(k, j, c)| {
        series[[bounds[k].0 + j, c]]
    }))
}

/// Common length of every `(start, end)` range, all of which must lie in
/// `[0, n)`.
fn check_bounds(n: usize, bounds: &[(usize, usize)]) -> EmbeddingResult<usize> {
    let Some(&(first_start, first_end)) = bounds.first() else {
        return Ok(0);
    };
    let window_len = first_end.checked_sub(first_start).ok_or_else(|| {
        EmbeddingError::invalid_parameter("bounds", format!("({first_start}, {first_end})"))
    })?;
    for &(start, end) in bounds {
        if end.checked_sub(start) != Some(window_len) {
            return Err(EmbeddingError::invalid_parameter(
                "bounds",
                format!("({start}, {end}) (expected ranges of length {window_len})"),
            ));
        }
        validate_length(end, n)?;
    }
    Ok(window_len)
}

/// Resample a target so that entry `−i` lines up with the last sample of
/// window `−i`.
///
/// Equivalent to reversing `target`, dropping its first `width` entries,
/// keeping every `stride`-th of the rest, and reversing back; here the picks
/// are computed directly as `n − 1 − k·stride`.
///
/// Returns
/// -------
/// `EmbeddingResult<Array1<f64>>` of length `num_windows`, whose last entry is
/// `target[n − 1]`.
///
/// Errors
/// ------
/// - `EmbeddingError::InsufficientLength` when `target.len() < width + 1`.
pub fn resample_target(
    target: ArrayView1<'_, f64>, spec: &WindowSpec,
) -> EmbeddingResult<Array1<f64>> {
    resample_anchored(target, spec.width, spec.stride)
}

pub(crate) fn resample_anchored(
    target: ArrayView1<'_, f64>, span: usize, stride: usize,
) -> EmbeddingResult<Array1<f64>> {
    let anchors = anchor_indices(target.len(), span, stride)?;
    Ok(anchors.map(|t| target[t]).collect())
}

/// SlidingWindow — transformer that slides fixed-width windows over a series.
///
/// Purpose
/// -------
/// Offer the window operations behind one validated configuration, so
/// pipelines can transform inputs and resample targets consistently.
///
/// Notes
/// -----
/// - Holds no fitted state; parameters are validated in
///   [`SlidingWindow::new`] and inputs by `check_series`/`check_channels`.
/// - `SlidingWindow::default()` uses `width = 10`, `stride = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlidingWindow {
    spec: WindowSpec,
}

impl SlidingWindow {
    pub fn new(width: usize, stride: usize) -> EmbeddingResult<SlidingWindow> {
        Ok(SlidingWindow { spec: WindowSpec::new(width, stride)? })
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// Windows of a scalar series, shape `(num_windows, width + 1)`.
    pub fn transform(&self, series: ArrayView1<'_, f64>) -> EmbeddingResult<Array2<f64>> {
        let bounds = window_bounds(series.len(), &self.spec)?;
        slice_windows(series, &bounds)
    }

    /// Windows of a multi-channel series, shape
    /// `(num_windows, width + 1, channels)`.
    pub fn transform_multi(&self, series: ArrayView2<'_, f64>) -> EmbeddingResult<Array3<f64>> {
        let bounds = window_bounds(series.nrows(), &self.spec)?;
        slice_windows_multi(series, &bounds)
    }

    /// Target values aligned to the last sample of each window.
    pub fn resample(&self, target: ArrayView1<'_, f64>) -> EmbeddingResult<Array1<f64>> {
        resample_target(target, &self.spec)
    }
    /// Check that a scalar series is finite and holds at least one window.
    ///
    /// Errors
    /// ------
    /// - `EmbeddingError::InvalidData` for a non-finite sample.
    /// - `EmbeddingError::InsufficientLength` when `n < width + 1`.
    pub fn check_series(&self, series: ArrayView1<'_, f64>) -> EmbeddingResult<()> {
        validate_finite(series.iter())?;
        self.spec.num_windows(series.len()).map(|_| ())
    }

    /// Multi-channel counterpart of [`SlidingWindow::check_series`]; rows are
    /// time steps.
    pub fn check_channels(&self, series: ArrayView2<'_, f64>) -> EmbeddingResult<()> {
        validate_finite(series.iter())?;
        self.spec.num_windows(series.nrows()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, array, s};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The window-count formula and last-window anchoring across a grid of
    //   (n, width, stride).
    // - The multi-channel slicing and target resampling fixtures.
    // - Short-series and zero-parameter rejection.
    // - Rejection of ragged or inverted caller-supplied ranges.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // For every valid (n, width, stride), the last range ends at `n`, every
    // range has length `width + 1`, ranges advance by `stride`, and the count
    // matches `(n − width − 1) div stride + 1`.
    fn window_bounds_anchor_last_sample() {
        for n in 1..40 {
            for width in 1..8 {
                for stride in 1..6 {
                    let spec = WindowSpec::new(width, stride).unwrap();
                    if n < width + 1 {
                        assert!(window_bounds(n, &spec).is_err());
                        continue;
                    }
                    let bounds = window_bounds(n, &spec).unwrap();
                    assert_eq!(bounds.len(), (n - width - 1) / stride + 1);
                    assert_eq!(bounds.last().unwrap().1, n);
                    for pair in bounds.windows(2) {
                        assert_eq!(pair[1].1 - pair[0].1, stride);
                    }
                    assert!(bounds.iter().all(|&(a, b)| b - a == width + 1));
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Regression fixture for multi-channel slicing.
    //
    // Given
    // -----
    // - `[0..19]` reshaped as 10 rows × 2 channels, width 2, stride 3.
    //
    // Expect
    // ------
    // - 3 windows of 3 rows; the first starts at row `[2, 3]` and the last is
    //   `[[14, 15], [16, 17], [18, 19]]`.
    fn transform_multi_matches_fixture() {
        // Arrange
        let series = Array::range(0.0, 20.0, 1.0).into_shape_with_order((10, 2)).unwrap();
        let windows = SlidingWindow::new(2, 3).unwrap();

        // Act
        let out = windows.transform_multi(series.view()).unwrap();

        // Assert
        assert_eq!(out.dim(), (3, 3, 2));
        assert_eq!(out.slice(s![0, .., ..]), array![[2.0, 3.0], [4.0, 5.0], [6.0, 7.0]]);
        assert_eq!(out.slice(s![2, .., ..]), array![[14.0, 15.0], [16.0, 17.0], [18.0, 19.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Scalar slicing copies contiguous ranges verbatim.
    fn transform_scalar_copies_ranges() {
        let series = Array::range(0.0, 7.0, 1.0);
        let windows = SlidingWindow::new(2, 2).unwrap();

        let out = windows.transform(series.view()).unwrap();

        assert_eq!(out, array![[0.0, 1.0, 2.0], [2.0, 3.0, 4.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    // Purpose
    // -------
    // Target resampling fixture: `[0..9]`, width 2, stride 3 → `[3, 6, 9]`.
    fn resample_matches_fixture() {
        let y = Array::range(0.0, 10.0, 1.0);
        let windows = SlidingWindow::new(2, 3).unwrap();

        let yr = windows.resample(y.view()).unwrap();

        assert_eq!(yr, array![3.0, 6.0, 9.0]);
    }

    #[test]
    // Purpose
    // -------
    // The resampled target always ends with the original last value and has
    // one entry per window.
    fn resample_keeps_last_value_and_window_count() {
        let y = Array::from_iter((0..23).map(|t| (t as f64).sin()));
        for width in 1..6 {
            for stride in 1..5 {
                let spec = WindowSpec::new(width, stride).unwrap();
                let yr = resample_target(y.view(), &spec).unwrap();
                assert_eq!(yr[yr.len() - 1], y[y.len() - 1]);
                assert_eq!(yr.len(), spec.num_windows(y.len()).unwrap());
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A series shorter than `width + 1` is rejected before slicing.
    fn short_series_is_insufficient_length() {
        let spec = WindowSpec::new(4, 1).unwrap();
        assert_eq!(
            window_bounds(4, &spec),
            Err(EmbeddingError::InsufficientLength { required: 5, actual: 4 })
        );
        let windows = SlidingWindow::new(4, 1).unwrap();
        assert!(windows.resample(array![1.0, 2.0].view()).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Zero width or stride is an invalid parameter.
    fn zero_width_or_stride_is_invalid() {
        assert!(matches!(
            SlidingWindow::new(0, 1),
            Err(EmbeddingError::InvalidParameter { name: "width", .. })
        ));
        assert!(matches!(
            SlidingWindow::new(1, 0),
            Err(EmbeddingError::InvalidParameter { name: "stride", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Caller-supplied ranges of unequal length, inverted ranges, and ranges
    // past the end are errors rather than out-of-bounds reads.
    fn slice_windows_rejects_malformed_bounds() {
        let series = Array::range(0.0, 10.0, 1.0);
        let channels = Array::range(0.0, 20.0, 1.0).into_shape_with_order((10, 2)).unwrap();

        assert!(matches!(
            slice_windows(series.view(), &[(0, 3), (8, 10)]),
            Err(EmbeddingError::InvalidParameter { name: "bounds", .. })
        ));
        assert!(matches!(
            slice_windows(series.view(), &[(4, 2)]),
            Err(EmbeddingError::InvalidParameter { name: "bounds", .. })
        ));
        assert!(matches!(
            slice_windows_multi(channels.view(), &[(0, 2), (5, 3)]),
            Err(EmbeddingError::InvalidParameter { name: "bounds", .. })
        ));
        assert_eq!(
            slice_windows(series.view(), &[(8, 11)]),
            Err(EmbeddingError::InsufficientLength { required: 11, actual: 10 })
        );
        assert_eq!(slice_windows(series.view(), &[(1, 3), (7, 9)]).unwrap(), array![
            [1.0, 2.0],
            [7.0, 8.0]
        ]);
        assert_eq!(slice_windows(series.view(), &[]).unwrap().dim(), (0, 0));
    }

    #[test]
    // Purpose
    // -------
    // A width whose `width + 1` overflows is reported as too long for the
    // series instead of wrapping.
    fn huge_width_is_insufficient_length() {
        let spec = WindowSpec::new(usize::MAX, 1).unwrap();
        assert_eq!(
            spec.num_windows(5),
            Err(EmbeddingError::InsufficientLength { required: usize::MAX, actual: 5 })
        );
        assert!(window_bounds(5, &spec).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Input checks reject non-finite samples and series shorter than one
    // window, for scalar and multi-channel inputs alike.
    fn input_checks_reject_bad_series() {
        let windows = SlidingWindow::new(2, 1).unwrap();

        assert!(windows.check_series(array![1.0, 2.0, 3.0].view()).is_ok());
        assert_eq!(
            windows.check_series(array![1.0, 2.0].view()),
            Err(EmbeddingError::InsufficientLength { required: 3, actual: 2 })
        );
        assert!(matches!(
            windows.check_series(array![1.0, f64::INFINITY, 3.0].view()),
            Err(EmbeddingError::InvalidData { index: 1, .. })
        ));

        let channels = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        assert!(windows.check_channels(channels.view()).is_ok());
        assert!(windows.check_channels(channels.slice(s![..2, ..])).is_err());
        assert!(matches!(
            windows.check_channels(array![[0.0, 1.0], [f64::NAN, 3.0], [4.0, 5.0]].view()),
            Err(EmbeddingError::InvalidData { index: 2, .. })
        ));
    }
}
