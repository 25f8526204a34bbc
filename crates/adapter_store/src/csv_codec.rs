//! CSV encoding and decoding of tables.
//!
//! Column types are inferred per column from the cell text: Integer if every
//! cell parses as `i64`, otherwise Float if every non-empty cell parses as
//! `f64` (empty cells become NaN), otherwise Text.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use synth_core::types::{Column, ColumnData, RowIndex, Table, TableError};
use tracing::debug;

use crate::error::StoreError;

/// Header written for the row index column.
pub const INDEX_HEADER: &str = "index";

/// Options controlling how a CSV document is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Column to use as row labels instead of data.
    pub index_column: Option<String>,
}

impl ReadOptions {
    /// Uses `column` as the row index.
    pub fn with_index_column(column: impl Into<String>) -> Self {
        Self {
            index_column: Some(column.into()),
        }
    }
}

/// Reads a table from any CSV source with a header row.
pub fn read_table<R: Read>(source: R, options: &ReadOptions) -> Result<Table, StoreError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, value) in cells.iter_mut().zip(record.iter()) {
            column.push(value.to_string());
        }
    }

    let index_position = match &options.index_column {
        Some(name) => Some(
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TableError::UnknownColumn(name.clone()))?,
        ),
        None => None,
    };

    let mut index = None;
    let mut columns = Vec::with_capacity(headers.len());
    for (position, (name, raw)) in headers.into_iter().zip(cells).enumerate() {
        if Some(position) == index_position {
            index = Some(RowIndex::Labels(raw));
        } else {
            columns.push(Column::new(name, infer_column(raw)));
        }
    }

    let table = match index {
        Some(index) => Table::new(index, columns)?,
        None => Table::from_columns(columns)?,
    };
    debug!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "Decoded CSV table"
    );
    Ok(table)
}

/// Reads a table from a CSV file.
pub fn read_table_path(path: &Path, options: &ReadOptions) -> Result<Table, StoreError> {
    let file = File::open(path)?;
    read_table(file, options)
}

/// Writes a table as CSV, row labels first.
///
/// Range indices are written as their row positions.
pub fn write_table<W: Write>(sink: W, table: &Table) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_writer(sink);

    let mut header = Vec::with_capacity(table.n_columns() + 1);
    header.push(INDEX_HEADER);
    header.extend(table.column_names());
    writer.write_record(&header)?;

    for row in 0..table.n_rows() {
        let mut record = Vec::with_capacity(table.n_columns() + 1);
        record.push(table.index().label(row).unwrap_or_default());
        for column in table.columns() {
            record.push(column.format_value(row).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a table to a CSV file, creating parent directories.
pub fn write_table_path(path: &Path, table: &Table) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_table(file, table)
}

fn infer_column(raw: Vec<String>) -> ColumnData {
    // Header-only columns carry no evidence of a numeric type
    if raw.is_empty() {
        return ColumnData::Text(raw);
    }

    let integers: Option<Vec<i64>> = raw.iter().map(|s| s.trim().parse().ok()).collect();
    if let Some(values) = integers {
        return ColumnData::Integer(values);
    }

    let floats: Option<Vec<f64>> = raw
        .iter()
        .map(|s| {
            let s = s.trim();
            if s.is_empty() {
                Some(f64::NAN)
            } else {
                s.parse().ok()
            }
        })
        .collect();
    match floats {
        Some(values) => ColumnData::Float(values),
        None => ColumnData::Text(raw),
    }
}
