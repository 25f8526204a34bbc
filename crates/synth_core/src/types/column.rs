//! Typed table columns.
//!
//! Every column carries its [`ColumnType`] from construction onwards, so type
//! handling downstream is an exhaustive `match` rather than a runtime check.

use std::borrow::Cow;
use std::fmt;

/// Static type descriptor attached to every column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnType {
    /// 64-bit signed integers.
    Integer,
    /// 64-bit floating point; NaN marks a missing value.
    Float,
    /// Strings drawn from a small set of levels.
    Categorical,
    /// Free text.
    Text,
}

impl ColumnType {
    /// Returns `true` for Integer and Float.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Categorical => "categorical",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

/// Column storage, one variant per [`ColumnType`].
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    /// Integer values.
    Integer(Vec<i64>),
    /// Floating point values.
    Float(Vec<f64>),
    /// Categorical labels.
    Categorical(Vec<String>),
    /// Text values.
    Text(Vec<String>),
}

impl ColumnData {
    /// Type descriptor of this storage.
    #[inline]
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Categorical(_) => ColumnType::Categorical,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Categorical(v) | ColumnData::Text(v) => v.len(),
        }
    }

    /// Returns `true` if there are no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, typed column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Creates a column from name and storage.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates an Integer column.
    pub fn integer(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Integer(values))
    }

    /// Creates a Float column.
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    /// Creates a Categorical column.
    pub fn categorical(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, ColumnData::Categorical(values))
    }

    /// Creates a Text column.
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, ColumnData::Text(values))
    }

    /// Column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column storage.
    #[inline]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Declared type.
    #[inline]
    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the column has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values as `f64`, or `None` for non-numeric columns.
    ///
    /// Float columns are borrowed; Integer columns are widened into a new
    /// buffer.
    pub fn numeric_values(&self) -> Option<Cow<'_, [f64]>> {
        match &self.data {
            ColumnData::Float(v) => Some(Cow::Borrowed(v.as_slice())),
            ColumnData::Integer(v) => Some(Cow::Owned(v.iter().map(|&x| x as f64).collect())),
            ColumnData::Categorical(_) | ColumnData::Text(_) => None,
        }
    }

    /// Renders the value at `row` as a string, or `None` if out of range.
    ///
    /// Missing floats render as an empty string.
    pub fn format_value(&self, row: usize) -> Option<String> {
        match &self.data {
            ColumnData::Integer(v) => v.get(row).map(|x| x.to_string()),
            ColumnData::Float(v) => v
                .get(row)
                .map(|x| if x.is_nan() { String::new() } else { x.to_string() }),
            ColumnData::Categorical(v) | ColumnData::Text(v) => v.get(row).cloned(),
        }
    }
}
