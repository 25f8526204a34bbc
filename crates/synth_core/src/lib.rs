//! # synth_core: Numerical Foundation for Correlated Synthesis
//!
//! ## Layer 1 (Foundation) Role
//!
//! synth_core is the bottom layer of the corrsynth workspace, providing:
//! - Typed tabular data: `Table`, `Column`, `ColumnType`, `RowIndex` (`types`)
//! - Pairwise correlation estimators: Pearson, Spearman, Kendall (`math::correlation`)
//! - Square matrices and Cholesky factorisation with a single
//!   diagonal-regularisation fallback (`math::matrix`, `math::cholesky`)
//! - Error types: `TableError`, `MatrixError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other corrsynth crates and performs no I/O.
//! External dependencies are kept minimal:
//! - num-traits: generic floating point for the factoriser
//! - thiserror: error derivation
//! - tracing: diagnostics on the regularisation path
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use synth_core::math::{correlation_matrix, factorize, CorrelationMethod};
//! use synth_core::types::{Column, Table};
//!
//! let table = Table::from_columns(vec![
//!     Column::float("a", vec![1.0, 2.0, 3.0, 4.0]),
//!     Column::integer("b", vec![2, 1, 4, 3]),
//! ])
//! .unwrap();
//!
//! let corr = correlation_matrix(&table, CorrelationMethod::Pearson).unwrap();
//! assert_eq!(corr.dim(), 2);
//!
//! let factor = factorize(&corr).unwrap();
//! assert!(factor.reconstruction_error(&corr) < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `CorrelationMethod` and `ColumnType`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
