//! Core data model types.
//!
//! Ingestion produces an in-memory [`Table`]: a [`Schema`] (an ordered list of typed, uniquely
//! named [`Field`]s) plus row-major [`Value`] storage. Column types are inferred during ingestion;
//! the only missing-value marker is [`Value::Null`].

use std::fmt;

use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};

/// Logical data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// `true` for integer and floating point columns.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
        };
        f.write_str(s)
    }
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Column data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the columns of a [`Table`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell value in a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float. Never NaN inside a [`Table`].
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value (integers widen to `f64`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    fn matches_type(&self, data_type: DataType) -> bool {
        matches!(
            (self, data_type),
            (Self::Null, _)
                | (Self::Int64(_), DataType::Int64)
                | (Self::Float64(_), DataType::Float64)
                | (Self::Bool(_), DataType::Bool)
                | (Self::Utf8(_), DataType::Utf8)
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(""),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(v) => f.write_str(v),
        }
    }
}

/// Canonical in-memory table.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Every row
/// has exactly `schema.len()` values and every non-null value matches its field's type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table, checking that column names are unique and that every row matches the
    /// schema in length and type.
    ///
    /// A table without columns has no rows.
    pub fn new(schema: Schema, mut rows: Vec<Vec<Value>>) -> IngestionResult<Self> {
        if schema.is_empty() {
            rows.clear();
        }

        for (idx, field) in schema.fields.iter().enumerate() {
            if schema.fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(invalid_table(format!("duplicate column name '{}'", field.name)));
            }
        }

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(invalid_table(format!(
                    "row {} has {} values but the table has {} columns",
                    row_idx + 1,
                    row.len(),
                    schema.len()
                )));
            }
            for (value, field) in row.iter().zip(&schema.fields) {
                if !value.matches_type(field.data_type) {
                    return Err(invalid_table(format!(
                        "row {} column '{}' holds {value:?}, expected {}",
                        row_idx + 1,
                        field.name,
                        field.data_type
                    )));
                }
                if matches!(value, Value::Float64(v) if v.is_nan()) {
                    return Err(invalid_table(format!(
                        "row {} column '{}' holds NaN; use Value::Null for missing values",
                        row_idx + 1,
                        field.name
                    )));
                }
            }
        }

        Ok(Self { schema, rows })
    }

    /// Table schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Row-major values.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.field_names().collect()
    }

    /// Iterate the values of the column at `idx`.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Values of a column by name, or `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.column_values(idx).collect())
    }

    /// A new table holding the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

fn invalid_table(message: String) -> IngestionError {
    IngestionError::ParseError {
        format: None,
        message,
    }
}
