//! Numerical building blocks.
//!
//! - [`matrix`]: row-major square matrices with symmetry validation
//! - [`cholesky`]: Cholesky factorisation with one regularised retry
//! - [`correlation`]: Pearson, Spearman and Kendall estimators

pub mod cholesky;
pub mod correlation;
pub mod matrix;

pub use cholesky::{cholesky, factorize, CholeskyFactor, REGULARISATION_JITTER};
pub use correlation::{correlation_matrix, CorrelationMethod};
pub use matrix::SquareMatrix;
