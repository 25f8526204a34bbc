//! Error types for the synthetic sampler.

use synth_core::types::{MatrixError, TableError};
use thiserror::Error;

/// Configuration error for [`SamplerConfig`](super::SamplerConfig).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Sample count outside the valid range [1, 10_000_000].
    #[error("Invalid sample count {0}: must be in range [1, 10_000_000]")]
    InvalidSampleCount(usize),
}

/// Errors surfaced by a synthesis request.
///
/// There is no partial-result mode: any error means no table was produced.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum SynthesisError {
    /// One or more columns are not numeric. Raised before any computation.
    #[error("Input contains non-numeric columns: {}. Only numeric data is supported", columns.join(", "))]
    NonNumericColumn {
        /// Names of the offending columns, in table order
        columns: Vec<String>,
    },

    /// The input table has no columns.
    #[error("Input table has no columns")]
    NoColumns,

    /// The correlation matrix is malformed or could not be factorised.
    ///
    /// Use [`MatrixError::is_invalid_matrix`] to tell an invalid matrix from
    /// a fatal factorisation failure.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Table assembly failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl SynthesisError {
    /// Returns `true` for a malformed correlation matrix.
    pub fn is_invalid_matrix(&self) -> bool {
        matches!(self, SynthesisError::Matrix(e) if e.is_invalid_matrix())
    }

    /// Returns `true` for a failed regularised factorisation.
    pub fn is_factorisation_failure(&self) -> bool {
        matches!(self, SynthesisError::Matrix(e) if !e.is_invalid_matrix())
    }
}
