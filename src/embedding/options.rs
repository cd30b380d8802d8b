//! Takens options — configuration for delay-embedding fits.
//!
//! Purpose
//! -------
//! Collect the knobs of a [`TakensEmbedding`](crate::embedding::takens::TakensEmbedding)
//! in one validated value: whether the delay and dimension are fixed or
//! searched, their values or upper bounds, the output stride, the degree of
//! parallelism for the search, the histogram resolution, and the
//! false-neighbor thresholds.
//!
//! Invariants & assumptions
//! ------------------------
//! - `time_delay`, `dimension`, `stride` and `n_bins` are ≥ 1; this is
//!   enforced by [`TakensOptions::new`] and the `with_*` setters.
//! - In `Search` mode `time_delay` and `dimension` are upper bounds; in
//!   `Fixed` mode they are used as given.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults, eager rejection of zero values, and string
//!   parsing of [`ParametersType`].

use crate::embedding::{
    errors::{EmbeddingError, EmbeddingResult},
    false_neighbors::FalseNeighborThresholds,
    mutual_info::DEFAULT_N_BINS,
    parallel::Parallelism,
    validation::validate_positive,
};
use std::str::FromStr;

/// Whether a fit uses the configured delay/dimension directly or searches
/// for them below those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParametersType {
    Fixed,
    #[default]
    Search,
}

impl FromStr for ParametersType {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> EmbeddingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(ParametersType::Fixed),
            "search" => Ok(ParametersType::Search),
            other => Err(EmbeddingError::invalid_parameter("parameters_type", format!("{other:?}"))),
        }
    }
}

/// TakensOptions — validated configuration of a Takens embedding.
///
/// Fields
/// ------
/// - `parameters_type`: [`ParametersType`], default `Search`.
/// - `time_delay`: delay, or its upper bound when searching. Default `1`.
/// - `dimension`: dimension, or its upper bound when searching. Default `5`.
/// - `stride`: distance between consecutive embedded points. Default `1`.
/// - `parallelism`: worker threads for the search sweeps. Default
///   sequential.
/// - `n_bins`: histogram bins per axis for mutual information. Default `100`.
/// - `thresholds`: false-neighbor constants. Default `(10, 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakensOptions {
    parameters_type: ParametersType,
    time_delay: usize,
    dimension: usize,
    stride: usize,
    parallelism: Parallelism,
    n_bins: usize,
    thresholds: FalseNeighborThresholds,
}

impl TakensOptions {
    /// Construct options with default parallelism, bins, and thresholds.
    ///
    /// Errors
    /// ------
    /// - `EmbeddingError::InvalidParameter` when `time_delay`, `dimension`, or
    ///   `stride` is zero.
    pub fn new(
        parameters_type: ParametersType, time_delay: usize, dimension: usize, stride: usize,
    ) -> EmbeddingResult<TakensOptions> {
        validate_positive("time_delay", time_delay)?;
        validate_positive("dimension", dimension)?;
        validate_positive("stride", stride)?;
        Ok(TakensOptions { parameters_type, time_delay, dimension, stride, ..Default::default() })
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> EmbeddingResult<Self> {
        parallelism.validate()?;
        self.parallelism = parallelism;
        Ok(self)
    }

    pub fn with_n_bins(mut self, n_bins: usize) -> EmbeddingResult<Self> {
        validate_positive("n_bins", n_bins)?;
        self.n_bins = n_bins;
        Ok(self)
    }

    pub fn with_thresholds(mut self, thresholds: FalseNeighborThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn parameters_type(&self) -> ParametersType {
        self.parameters_type
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

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn thresholds(&self) -> &FalseNeighborThresholds {
        &self.thresholds
    }
}

impl Default for TakensOptions {
    fn default() -> Self {
        TakensOptions {
            parameters_type: ParametersType::Search,
            time_delay: 1,
            dimension: 5,
            stride: 1,
            parallelism: Parallelism::Sequential,
            n_bins: DEFAULT_N_BINS,
            thresholds: FalseNeighborThresholds::default(),
        }
    }
}
