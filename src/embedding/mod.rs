//! embedding — sliding windows and Takens delay embeddings of time series.
//!
//! Purpose
//! -------
//! Convert a time series into geometric representations for downstream
//! topological or geometric analysis: stacks of overlapping windows, and
//! phase-space point clouds reconstructed from a scalar series by time-delay
//! embedding, with automatic selection of the delay and dimension.
//!
//! Key behaviors
//! -------------
//! - [`SlidingWindow`] slices scalar or multi-channel series into windows
//!   of `width + 1` samples and resamples targets to one value per window.
//! - [`TakensEmbedding`] fits `(τ, d)` (fixed, or searched by mutual
//!   information and false nearest neighbors) and embeds series at those
//!   parameters.
//! - Lower-level building blocks ([`mutual_information`],
//!   [`count_false_neighbors`], [`embed`], [`window_bounds`]) are public
//!   for callers that want a single step.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every output is anchored to the **last** sample: the last window ends
//!   at it and the last embedded point's last coordinate is it. Oldest
//!   samples are dropped when the stride does not divide evenly.
//! - All routines return [`EmbeddingError`] on invalid input rather than
//!   panicking.
//!
//! Conventions
//! -----------
//! - Series are `ndarray` views with rows = time, index 0 oldest.
//! - Outputs are freshly allocated per call; only the small
//!   [`SearchState`] is retained by a fitted embedder.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_embedding::embedding::prelude::*;
//!   ```
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own contracts; the
//!   `tests/` integration suite runs the window and Takens pipelines end to
//!   end on synthetic signals.

pub mod delay;
pub mod errors;
pub mod false_neighbors;
pub mod mutual_info;
pub mod neighbors;
pub mod options;
pub mod parallel;
pub mod takens;
pub mod validation;
pub mod window;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::delay::{EmbeddingParams, embed};
pub use self::errors::{EmbeddingError, EmbeddingResult};
pub use self::false_neighbors::{FalseNeighborThresholds, count_false_neighbors};
pub use self::mutual_info::{DEFAULT_N_BINS, mutual_information};
pub use self::neighbors::{BruteForceOracle, NearestNeighborOracle, Neighbor};
pub use self::options::{ParametersType, TakensOptions};
pub use self::parallel::{Parallelism, evaluate_ordered};
pub use self::takens::{FitState, SearchState, TakensEmbedding};
pub use self::window::{
    SlidingWindow, WindowSpec, resample_target, slice_windows, slice_windows_multi, window_bounds,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_embedding::embedding::prelude::*;
//
// to import the main embedding surface in a single line.

pub mod prelude {
    pub use super::{
        EmbeddingError, EmbeddingResult, FalseNeighborThresholds, ParametersType, Parallelism,
        SearchState, SlidingWindow, TakensEmbedding, TakensOptions, WindowSpec,
    };
}
