//! embedding::parallel — ordered evaluation of independent candidates.
//!
//! Purpose
//! -------
//! Evaluate a pure function over a list of candidate parameter values and
//! return the results in candidate order, optionally on worker threads.
//!
//! Key behaviors
//! -------------
//! - [`Parallelism`] is passed explicitly by the caller; the rayon global
//!   pool is never configured or used. A dedicated pool is built per call
//!   when more than one worker is requested.
//! - [`evaluate_ordered`] collects through an indexed parallel iterator, so
//!   the output order always equals the input order.
//!
//! Conventions
//! -----------
//! - `Parallelism::Sequential` runs inline on the calling thread.
//! - `Parallelism::Threads(n)` requires `n ≥ 1`; `Threads(1)` is treated as
//!   sequential.
//! - `Parallelism::AllCores` lets rayon size the pool from the available
//!   parallelism.

use crate::embedding::errors::{EmbeddingError, EmbeddingResult};
use rayon::{ThreadPoolBuilder, prelude::*};
use std::str::FromStr;

/// Degree of parallelism for candidate sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Sequential,
    Threads(usize),
    AllCores,
}

impl Parallelism {
    /// Map a joblib-style `n_jobs` value: `None`/`1` → sequential,
    /// `-1` → all cores, `n > 1` → `n` threads.
    ///
    /// Errors
    /// ------
    /// - `EmbeddingError::InvalidParameter` for `0` or values below `-1`.
    pub fn from_n_jobs(n_jobs: Option<i64>) -> EmbeddingResult<Parallelism> {
        match n_jobs {
            None | Some(1) => Ok(Parallelism::Sequential),
            Some(-1) => Ok(Parallelism::AllCores),
            Some(n) if n > 1 => Ok(Parallelism::Threads(n as usize)),
            Some(n) => Err(EmbeddingError::invalid_parameter("n_jobs", n)),
        }
    }

    pub(crate) fn validate(&self) -> EmbeddingResult<()> {
        match self {
            Parallelism::Threads(0) => Err(EmbeddingError::invalid_parameter("n_jobs", 0)),
            _ => Ok(()),
        }
    }
}

impl FromStr for Parallelism {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> EmbeddingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "none" | "1" => Ok(Parallelism::Sequential),
            "all" | "-1" => Ok(Parallelism::AllCores),
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Parallelism::Threads(n)),
                _ => Err(EmbeddingError::invalid_parameter("n_jobs", other)),
            },
        }
    }
}

/// Evaluate `f` over `candidates`, returning results in candidate order.
///
/// Errors
/// ------
/// - `EmbeddingError::InvalidParameter` for `Parallelism::Threads(0)`.
/// - `EmbeddingError::ThreadPool` if rayon cannot spawn the workers.
pub fn evaluate_ordered<T, R, F>(
    candidates: &[T], parallelism: Parallelism, f: F,
) -> EmbeddingResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    parallelism.validate()?;
    let num_threads = match parallelism {
        Parallelism::Sequential | Parallelism::Threads(1) => {
            return Ok(candidates.iter().map(f).collect());
        }
        Parallelism::Threads(n) => n,
        Parallelism::AllCores => 0,
    };

    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| EmbeddingError::ThreadPool(e.to_string()))?;
    tracing::trace!(
        threads = pool.current_num_threads(),
        candidates = candidates.len(),
        "built search pool"
    );
    Ok(pool.install(|| candidates.par_iter().map(f).collect()))
}
