//! Ordered collection of equal-length typed columns with a row index.

use std::collections::HashSet;

use super::column::{Column, ColumnType};
use super::error::TableError;

/// Row labels of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowIndex {
    /// Default positional labels `0..n`.
    Range(usize),
    /// Explicit labels, one per row.
    Labels(Vec<String>),
}

impl RowIndex {
    /// Number of rows described by the index.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            RowIndex::Range(n) => *n,
            RowIndex::Labels(labels) => labels.len(),
        }
    }

    /// Returns `true` if the index describes no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of `row`, or `None` if out of range.
    pub fn label(&self, row: usize) -> Option<String> {
        match self {
            RowIndex::Range(n) => (row < *n).then(|| row.to_string()),
            RowIndex::Labels(labels) => labels.get(row).cloned(),
        }
    }
}

/// A table of named, typed columns sharing one row index.
///
/// Invariants established at construction:
/// - every column has `n_rows` values
/// - column names are unique
/// - the index has `n_rows` labels
///
/// # Examples
///
/// ```
/// use synth_core::types::{Column, RowIndex, Table};
///
/// let table = Table::new(
///     RowIndex::Labels(vec!["r1".into(), "r2".into()]),
///     vec![Column::float("x", vec![0.1, 0.2]), Column::integer("y", vec![3, 4])],
/// )
/// .unwrap();
///
/// assert_eq!(table.n_rows(), 2);
/// assert_eq!(table.column_names(), vec!["x", "y"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    index: RowIndex,
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table with an explicit index.
    ///
    /// # Errors
    ///
    /// - `TableError::IndexLength` if the index and columns disagree on row count
    /// - `TableError::LengthMismatch` if columns differ in length
    /// - `TableError::DuplicateColumn` if a name repeats
    pub fn new(index: RowIndex, columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = index.len();
        let mut seen = HashSet::with_capacity(columns.len());

        for column in &columns {
            if column.len() != n_rows {
                return Err(TableError::LengthMismatch {
                    column: column.name().to_string(),
                    expected: n_rows,
                    got: column.len(),
                });
            }
            if !seen.insert(column.name()) {
                return Err(TableError::DuplicateColumn(column.name().to_string()));
            }
        }

        Ok(Self { index, columns })
    }

    /// Creates a table with a default range index sized by the first column.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map_or(0, Column::len);
        Self::new(RowIndex::Range(n_rows), columns)
    }

    /// Replaces the row index.
    ///
    /// # Errors
    ///
    /// `TableError::IndexLength` if the new index has a different row count.
    pub fn with_index(mut self, index: RowIndex) -> Result<Self, TableError> {
        if index.len() != self.n_rows() {
            return Err(TableError::IndexLength {
                expected: self.n_rows(),
                got: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    /// Row index.
    #[inline]
    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// Columns in order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(n_rows, n_columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Declared column types in order.
    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(Column::column_type).collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Names of every column that is not Integer or Float.
    pub fn non_numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.column_type().is_numeric())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Fails with `TableError::NonNumericColumn` naming every offending column.
    pub fn ensure_numeric(&self) -> Result<(), TableError> {
        let columns = self.non_numeric_columns();
        if columns.is_empty() {
            Ok(())
        } else {
            Err(TableError::NonNumericColumn { columns })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::float("a", vec![1.0, 2.0, 3.0]),
            Column::integer("b", vec![1, 2, 3]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_names() {
        let t = sample();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.column_names(), vec!["a", "b"]);
        assert_eq!(t.column_types(), vec![ColumnType::Float, ColumnType::Integer]);
        assert_eq!(t.index(), &RowIndex::Range(3));
    }

    #[test]
    fn test_length_mismatch() {
        let result = Table::from_columns(vec![
            Column::float("a", vec![1.0, 2.0]),
            Column::float("b", vec![1.0]),
        ]);
        assert!(matches!(
            result,
            Err(TableError::LengthMismatch { ref column, expected: 2, got: 1 }) if column == "b"
        ));
    }

    #[test]
    fn test_duplicate_column() {
        let result = Table::from_columns(vec![
            Column::float("a", vec![1.0]),
            Column::integer("a", vec![1]),
        ]);
        assert_eq!(result, Err(TableError::DuplicateColumn("a".to_string())));
    }

    #[test]
    fn test_with_index() {
        let labels = RowIndex::Labels(vec!["x".into(), "y".into(), "z".into()]);
        let t = sample().with_index(labels.clone()).unwrap();
        assert_eq!(t.index(), &labels);
        assert_eq!(t.index().label(1).as_deref(), Some("y"));

        let bad = sample().with_index(RowIndex::Range(5));
        assert!(matches!(bad, Err(TableError::IndexLength { expected: 3, got: 5 })));
    }

    #[test]
    fn test_ensure_numeric_names_all_offenders() {
        let t = Table::from_columns(vec![
            Column::text("name", vec!["a".into()]),
            Column::float("x", vec![1.0]),
            Column::categorical("colour", vec!["red".into()]),
        ])
        .unwrap();
        assert_eq!(
            t.ensure_numeric(),
            Err(TableError::NonNumericColumn {
                columns: vec!["name".to_string(), "colour".to_string()]
            })
        );
        assert!(sample().ensure_numeric().is_ok());
    }

    #[test]
    fn test_column_lookup() {
        let t = sample();
        assert_eq!(t.column("b").unwrap().column_type(), ColumnType::Integer);
        assert!(matches!(t.column("zzz"), Err(TableError::UnknownColumn(_))));
    }

    #[test]
    fn test_range_label() {
        let idx = RowIndex::Range(2);
        assert_eq!(idx.label(0).as_deref(), Some("0"));
        assert_eq!(idx.label(2), None);
    }
}
