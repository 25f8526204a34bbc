//! Core data types.
//!
//! - [`Table`], [`RowIndex`]: ordered equal-length columns with row labels
//! - [`Column`], [`ColumnData`], [`ColumnType`]: statically typed columns
//! - [`TableError`], [`MatrixError`]: error taxonomy

pub mod column;
pub mod error;
pub mod table;

pub use column::{Column, ColumnData, ColumnType};
pub use error::{MatrixError, TableError};
pub use table::{RowIndex, Table};
