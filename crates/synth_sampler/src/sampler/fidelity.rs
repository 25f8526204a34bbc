//! Correlation fidelity of a synthetic table.

use std::fmt;

use synth_core::math::{correlation_matrix, CorrelationMethod, SquareMatrix};
use synth_core::types::{Table, TableError};

/// Quality signal returned with every synthetic table.
///
/// `max_abs_deviation` is the largest absolute difference between the Pearson
/// correlation matrix of the synthetic table and the target matrix. It is NaN
/// when the synthetic correlation is undefined for some pair (for instance an
/// Integer column that rounded to a constant). No threshold is applied; the
/// caller decides what is acceptable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FidelityReport {
    /// `max |corr(synthetic) - target|`.
    pub max_abs_deviation: f64,
    /// Estimator used for the target matrix.
    pub method: CorrelationMethod,
    /// Target estimated with a rank method but checked against Pearson.
    pub rank_based: bool,
    /// Factor came from the regularised retry.
    pub regularised: bool,
    /// Seed that reproduces the draw.
    pub seed: u64,
}

impl fmt::Display for FidelityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max |Δcorr| = {:.6} (method: {}, seed: {}",
            self.max_abs_deviation, self.method, self.seed
        )?;
        if self.regularised {
            f.write_str(", regularised")?;
        }
        if self.rank_based {
            f.write_str(", rank-based target")?;
        }
        f.write_str(")")
    }
}

/// Pearson correlation of `synthetic` against `target`, as max absolute deviation.
///
/// The estimator is always Pearson, whatever method produced `target`.
pub fn max_abs_deviation(synthetic: &Table, target: &SquareMatrix<f64>) -> Result<f64, TableError> {
    let achieved = correlation_matrix(synthetic, CorrelationMethod::Pearson)?;
    Ok(achieved.max_abs_diff(target))
}
