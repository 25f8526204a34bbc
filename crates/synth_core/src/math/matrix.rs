//! Dense square matrices stored in row-major order.

use num_traits::Float;

use crate::types::MatrixError;

/// Relative tolerance of the symmetry check.
pub const SYMMETRY_RTOL: f64 = 1e-5;

/// Absolute tolerance of the symmetry check.
pub const SYMMETRY_ATOL: f64 = 1e-8;

/// Square matrix with row-major storage.
///
/// Used both for estimated correlation matrices and for arbitrary
/// covariance-shaped input to the factoriser. Construction only checks the
/// shape; symmetry and finiteness are checked by [`SquareMatrix::validate_symmetric`].
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix<T: Float> {
    /// Matrix elements in row-major order
    data: Vec<T>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl<T: Float> SquareMatrix<T> {
    /// Creates a matrix from a flat row-major slice.
    ///
    /// # Errors
    ///
    /// `MatrixError::NotSquare` unless `data.len() == dim * dim`.
    pub fn new(data: &[T], dim: usize) -> Result<Self, MatrixError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(MatrixError::NotSquare {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Creates a matrix by evaluating `f(i, j)` for every entry.
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(dim * dim);
        for i in 0..dim {
            for j in 0..dim {
                data.push(f(i, j));
            }
        }
        Self { data, dim }
    }

    /// Identity matrix.
    pub fn identity(dim: usize) -> Self {
        Self::from_fn(dim, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.dim + j]
    }

    /// Copy with `jitter` added to every diagonal entry.
    pub fn with_diagonal_jitter(&self, jitter: T) -> Self {
        let mut data = self.data.clone();
        for i in 0..self.dim {
            data[i * self.dim + i] = data[i * self.dim + i] + jitter;
        }
        Self {
            data,
            dim: self.dim,
        }
    }

    /// Checks every entry is finite and `a[i][j] ≈ a[j][i]`.
    ///
    /// Entries are compared with `|a_ij - a_ji| <= atol + rtol * |a_ji|`
    /// using [`SYMMETRY_RTOL`] and [`SYMMETRY_ATOL`].
    pub fn validate_symmetric(&self) -> Result<(), MatrixError> {
        let rtol = T::from(SYMMETRY_RTOL).unwrap_or_else(T::epsilon);
        let atol = T::from(SYMMETRY_ATOL).unwrap_or_else(T::epsilon);

        for i in 0..self.dim {
            for j in 0..self.dim {
                if !self.get(i, j).is_finite() {
                    return Err(MatrixError::NonFinite { i, j });
                }
            }
        }

        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                let a_ij = self.get(i, j);
                let a_ji = self.get(j, i);
                if (a_ij - a_ji).abs() > atol + rtol * a_ji.abs() {
                    return Err(MatrixError::NotSymmetric { i, j });
                }
            }
        }

        Ok(())
    }

    /// Largest absolute elementwise difference to `other`.
    ///
    /// NaN in either matrix makes the result NaN. Dimensions must agree.
    pub fn max_abs_diff(&self, other: &Self) -> T {
        debug_assert_eq!(self.dim, other.dim, "dimension mismatch");
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| (a - b).abs())
            .fold(T::zero(), |acc, d| if d.is_nan() || acc.is_nan() { T::nan() } else { acc.max(d) })
    }
}
