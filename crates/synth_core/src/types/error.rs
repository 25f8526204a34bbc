//! Error types for structured error handling.
//!
//! This module provides:
//! - `TableError`: Errors from table construction and column access
//! - `MatrixError`: Errors from matrix validation and Cholesky factorisation

use thiserror::Error;

/// Table construction and access errors.
///
/// # Examples
/// ```
/// use synth_core::types::TableError;
///
/// let err = TableError::NonNumericColumn { columns: vec!["city".to_string()] };
/// assert_eq!(format!("{}", err), "Non-numeric columns: city");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A column's length differs from the table's row count.
    #[error("Column '{column}' has {got} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column name
        column: String,
        /// Row count of the table
        expected: usize,
        /// Row count of the column
        got: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Row labels do not match the row count.
    #[error("Row index has {got} labels, expected {expected}")]
    IndexLength {
        /// Row count of the table
        expected: usize,
        /// Number of labels supplied
        got: usize,
    },

    /// One or more columns are not Integer or Float.
    #[error("Non-numeric columns: {}", columns.join(", "))]
    NonNumericColumn {
        /// Names of every non-numeric column, in table order
        columns: Vec<String>,
    },

    /// No column with the requested name.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Matrix validation and factorisation errors.
///
/// `NotSquare`, `NotSymmetric` and `NonFinite` describe an invalid input
/// matrix (see [`MatrixError::is_invalid_matrix`]); `Factorisation` is the
/// fatal outcome of a failed regularised retry.
///
/// # Examples
/// ```
/// use synth_core::types::MatrixError;
///
/// let err = MatrixError::NotSymmetric { i: 0, j: 1 };
/// assert!(err.is_invalid_matrix());
/// assert_eq!(format!("{}", err), "Invalid matrix: not symmetric at (0, 1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Element count is not `dim * dim`.
    #[error("Invalid matrix: expected {expected} elements, got {got}")]
    NotSquare {
        /// Expected number of elements
        expected: usize,
        /// Actual number of elements
        got: usize,
    },

    /// `a[i][j]` and `a[j][i]` differ beyond tolerance.
    #[error("Invalid matrix: not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row of the first offending entry
        i: usize,
        /// Column of the first offending entry
        j: usize,
    },

    /// Entry is NaN or infinite.
    #[error("Invalid matrix: non-finite entry at ({i}, {j})")]
    NonFinite {
        /// Row of the offending entry
        i: usize,
        /// Column of the offending entry
        j: usize,
    },

    /// Not positive definite, even after diagonal regularisation.
    #[error("Cholesky factorisation failed at pivot {pivot} after adding {jitter:e} to the diagonal")]
    Factorisation {
        /// Index of the first non-positive pivot on the regularised attempt
        pivot: usize,
        /// Diagonal jitter that was applied
        jitter: f64,
    },
}

impl MatrixError {
    /// Returns `true` for errors describing a malformed input matrix.
    pub fn is_invalid_matrix(&self) -> bool {
        !matches!(self, MatrixError::Factorisation { .. })
    }
}
