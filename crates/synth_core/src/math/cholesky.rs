//! Cholesky factorisation with a single diagonal-regularisation fallback.
//!
//! ## Mathematical Background
//!
//! Given `n` independent standard normal random variables `Z = [Z1, ..., Zn]`,
//! correlated normals `X = [X1, ..., Xn]` are obtained with:
//!
//! ```text
//! X = L * Z
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the target matrix `C`:
//! ```text
//! C = L * L^T
//! ```
//!
//! Empirical correlation matrices are frequently only positive
//! semi-definite (collinear columns, more columns than rows). When the plain
//! factorisation hits a non-positive pivot, [`factorize`] adds
//! [`REGULARISATION_JITTER`] to the diagonal and retries exactly once.
//!
//! ## Usage
//!
//! ```
//! use synth_core::math::{factorize, SquareMatrix};
//!
//! let corr = SquareMatrix::new(&[1.0_f64, 1.0, 1.0, 1.0], 2).unwrap();
//!
//! // Singular: only the regularised retry succeeds
//! let factor = factorize(&corr).unwrap();
//! assert!(factor.is_regularised());
//! assert!(factor.reconstruction_error(&corr) < 1e-6);
//!
//! let x = factor.transform(&[1.0, 0.0]);
//! assert_eq!(x.len(), 2);
//! ```

use num_traits::Float;
use tracing::{debug, warn};

use super::matrix::SquareMatrix;
use crate::types::MatrixError;

/// Diagonal perturbation applied on the single retry.
pub const REGULARISATION_JITTER: f64 = 1e-8;

/// Lower triangular factor `L` with `L * L^T ≈ C`.
#[derive(Clone, Debug)]
pub struct CholeskyFactor<T: Float> {
    /// Lower triangular matrix elements (row-major)
    data: Vec<T>,
    /// Matrix dimension
    dim: usize,
    /// Jitter added to the diagonal before factorising, zero if none
    jitter: T,
}

impl<T: Float> CholeskyFactor<T> {
    /// Get matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element at (i, j).
    ///
    /// Returns zero for upper triangular elements (j > i).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if j > i {
            T::zero()
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Diagonal jitter that was applied, zero for an exact factorisation.
    #[inline]
    pub fn jitter(&self) -> T {
        self.jitter
    }

    /// Returns `true` if the factor came from the regularised retry.
    #[inline]
    pub fn is_regularised(&self) -> bool {
        self.jitter > T::zero()
    }

    /// Computes `L * L^T`.
    pub fn reconstruct(&self) -> SquareMatrix<T> {
        SquareMatrix::from_fn(self.dim, |i, j| {
            (0..=i.min(j)).fold(T::zero(), |acc, k| acc + self.get(i, k) * self.get(j, k))
        })
    }

    /// `max |L * L^T - target|` over all entries.
    pub fn reconstruction_error(&self, target: &SquareMatrix<T>) -> T {
        self.reconstruct().max_abs_diff(target)
    }

    /// Transform independent standard normals to correlated normals.
    ///
    /// Computes `X = L * Z` for one draw `z`. Row `r` of `Z · Lᵗ` equals
    /// `transform` applied to row `r` of `Z`.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform(&self, z: &[T]) -> Vec<T> {
        assert!(
            z.len() >= self.dim,
            "Input vector length {} is less than matrix dimension {}",
            z.len(),
            self.dim
        );

        (0..self.dim)
            .map(|i| (0..=i).fold(T::zero(), |acc, j| acc + self.get(i, j) * z[j]))
            .collect()
    }

    /// Transform independent normals in place.
    ///
    /// Rows are processed bottom-up, so no scratch buffer is needed: row `i`
    /// only reads `z[..=i]`, which rows above it have not yet overwritten.
    pub fn transform_inplace(&self, z: &mut [T]) {
        assert!(
            z.len() >= self.dim,
            "Input vector length {} is less than matrix dimension {}",
            z.len(),
            self.dim
        );

        for i in (0..self.dim).rev() {
            z[i] = (0..=i).fold(T::zero(), |acc, j| acc + self.get(i, j) * z[j]);
        }
    }
}

/// Plain Cholesky–Banachiewicz factorisation.
///
/// # Errors
///
/// Returns `Err(pivot)` with the index of the first non-positive pivot.
fn cholesky_raw<T: Float>(matrix: &SquareMatrix<T>) -> Result<Vec<T>, usize> {
    let n = matrix.dim();
    let mut lower = vec![T::zero(); n * n];

    for i in 0..n {
        for j in 0..=i {
            let sum = (0..j).fold(T::zero(), |acc, k| acc + lower[i * n + k] * lower[j * n + k]);

            if j == i {
                let diag = matrix.get(i, i) - sum;
                // Negated comparison so that NaN pivots fail too.
                if !(diag > T::zero()) {
                    return Err(i);
                }
                lower[i * n + i] = diag.sqrt();
            } else {
                lower[i * n + j] = (matrix.get(i, j) - sum) / lower[j * n + j];
            }
        }
    }

    Ok(lower)
}

/// Exact Cholesky factorisation, no fallback.
///
/// # Errors
///
/// - `MatrixError::NotSymmetric` / `MatrixError::NonFinite` for invalid input
/// - `MatrixError::Factorisation` with zero jitter if not positive definite
pub fn cholesky<T: Float>(matrix: &SquareMatrix<T>) -> Result<CholeskyFactor<T>, MatrixError> {
    matrix.validate_symmetric()?;
    cholesky_raw(matrix)
        .map(|data| CholeskyFactor {
            data,
            dim: matrix.dim(),
            jitter: T::zero(),
        })
        .map_err(|pivot| MatrixError::Factorisation { pivot, jitter: 0.0 })
}

/// Factorises a symmetric matrix, regularising once if needed.
///
/// The matrix must be square and symmetric within tolerance. If it is not
/// positive definite, [`REGULARISATION_JITTER`] is added to every diagonal
/// entry and the factorisation is retried once. The jitter is never
/// escalated.
///
/// # Errors
///
/// - `MatrixError::NotSymmetric` or `MatrixError::NonFinite` if the input is invalid
/// - `MatrixError::Factorisation` if the regularised retry also fails
///
/// # Examples
///
/// ```
/// use synth_core::math::{factorize, SquareMatrix};
///
/// let m = SquareMatrix::new(&[1.0_f64, 0.5, 0.5, 1.0], 2).unwrap();
/// let l = factorize(&m).unwrap();
/// assert!(!l.is_regularised());
/// assert!((l.get(1, 1) - 0.75_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn factorize<T: Float>(matrix: &SquareMatrix<T>) -> Result<CholeskyFactor<T>, MatrixError> {
    matrix.validate_symmetric()?;
    let n = matrix.dim();

    let pivot = match cholesky_raw(matrix) {
        Ok(data) => {
            debug!(dim = n, "Cholesky factorisation succeeded");
            return Ok(CholeskyFactor {
                data,
                dim: n,
                jitter: T::zero(),
            });
        }
        Err(pivot) => pivot,
    };

    let jitter = T::from(REGULARISATION_JITTER).unwrap_or_else(T::epsilon);
    warn!(
        dim = n,
        pivot,
        jitter = REGULARISATION_JITTER,
        "Matrix not positive definite, retrying with diagonal regularisation"
    );

    let regularised = matrix.with_diagonal_jitter(jitter);
    cholesky_raw(&regularised)
        .map(|data| CholeskyFactor {
            data,
            dim: n,
            jitter,
        })
        .map_err(|pivot| MatrixError::Factorisation {
            pivot,
            jitter: REGULARISATION_JITTER,
        })
}
