//! Pairwise correlation estimators.
//!
//! Every pair of columns is estimated on its complete observations: rows
//! where either value is NaN are skipped for that pair only. A column with
//! fewer than two observations, or with zero variance, yields NaN entries,
//! which the factoriser later rejects as an invalid matrix.

use std::fmt;
use std::str::FromStr;

use super::matrix::SquareMatrix;
use crate::types::{Table, TableError};

/// Correlation estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CorrelationMethod {
    /// Pearson product-moment correlation.
    #[default]
    Pearson,
    /// Spearman rank correlation (Pearson on average ranks).
    Spearman,
    /// Kendall tau-b.
    Kendall,
}

impl CorrelationMethod {
    /// All supported methods.
    pub const ALL: [CorrelationMethod; 3] = [
        CorrelationMethod::Pearson,
        CorrelationMethod::Spearman,
        CorrelationMethod::Kendall,
    ];

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
            CorrelationMethod::Kendall => "kendall",
        }
    }

    /// Returns `true` for rank-based estimators.
    ///
    /// A Gaussian transform driven by a rank correlation target reproduces
    /// the target only approximately, since Pearson and rank correlations of
    /// a bivariate normal differ.
    #[inline]
    pub fn is_rank_based(self) -> bool {
        !matches!(self, CorrelationMethod::Pearson)
    }

    /// Estimates the correlation of two equal-length series.
    pub fn estimate(self, x: &[f64], y: &[f64]) -> f64 {
        match self {
            CorrelationMethod::Pearson => pearson(x, y),
            CorrelationMethod::Spearman => spearman(x, y),
            CorrelationMethod::Kendall => kendall(x, y),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            "kendall" => Ok(CorrelationMethod::Kendall),
            other => Err(format!(
                "Unknown correlation method: {}. Supported: pearson, spearman, kendall",
                other
            )),
        }
    }
}

/// Computes the correlation matrix of every column of `table`.
///
/// Diagonal entries are exactly 1.0 for columns with positive variance and
/// NaN otherwise; off-diagonal entries are clamped to [-1, 1].
///
/// # Errors
///
/// `TableError::NonNumericColumn` if any column is not Integer or Float.
pub fn correlation_matrix(
    table: &Table,
    method: CorrelationMethod,
) -> Result<SquareMatrix<f64>, TableError> {
    table.ensure_numeric()?;

    let series: Vec<Vec<f64>> = table
        .columns()
        .iter()
        .filter_map(|c| c.numeric_values().map(|v| v.into_owned()))
        .collect();
    let n = series.len();

    let mut upper = vec![f64::NAN; n * n];
    for i in 0..n {
        for j in i..n {
            let value = if i == j {
                // Same series on both sides: finite iff the variance is positive
                if pearson(&series[i], &series[i]).is_finite() {
                    1.0
                } else {
                    f64::NAN
                }
            } else {
                let r = method.estimate(&series[i], &series[j]);
                if r.is_finite() {
                    r.clamp(-1.0, 1.0)
                } else {
                    r
                }
            };
            upper[i * n + j] = value;
        }
    }

    Ok(SquareMatrix::from_fn(n, |i, j| {
        if i <= j {
            upper[i * n + j]
        } else {
            upper[j * n + i]
        }
    }))
}

/// Rows where both values are present.
fn complete_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .unzip()
}

fn pearson_complete(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom > 0.0 {
        sxy / denom
    } else {
        f64::NAN
    }
}

/// Pearson correlation on complete observations.
///
/// # Examples
///
/// ```
/// use synth_core::math::correlation::pearson;
///
/// let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (a, b) = complete_pairs(x, y);
    pearson_complete(&a, &b)
}

/// Spearman rank correlation on complete observations, ties averaged.
pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    let (a, b) = complete_pairs(x, y);
    pearson_complete(&average_ranks(&a), &average_ranks(&b))
}

/// Kendall tau-b on complete observations.
///
/// Quadratic in the number of rows.
pub fn kendall(x: &[f64], y: &[f64]) -> f64 {
    let (a, b) = complete_pairs(x, y);
    let n = a.len();
    if n < 2 {
        return f64::NAN;
    }

    let mut score = 0.0_f64;
    let mut untied_x = 0.0_f64;
    let mut untied_y = 0.0_f64;
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = sign(a[i] - a[j]);
            let dy = sign(b[i] - b[j]);
            score += dx * dy;
            untied_x += dx.abs();
            untied_y += dy.abs();
        }
    }

    let denom = (untied_x * untied_y).sqrt();
    if denom > 0.0 {
        score / denom
    } else {
        f64::NAN
    }
}

#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// 1-based ranks with ties replaced by their average rank.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share the mean of ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}
