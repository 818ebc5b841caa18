//! Column type inference.
//!
//! Parsers hand over raw cells; this module decides one [`DataType`] per column and converts
//! the cells into typed [`Value`]s:
//!
//! 1. missing cells (and untyped text equal to a null token) become [`Value::Null`]
//! 2. all remaining cells integers → [`DataType::Int64`]
//! 3. all remaining cells numbers → [`DataType::Float64`]
//! 4. all remaining cells booleans → [`DataType::Bool`]
//! 5. otherwise → [`DataType::Utf8`]
//!
//! A column without any non-missing cell is `Float64`.

use crate::error::IngestionResult;
use crate::types::{DataType, Field, Schema, Table, Value};

/// A cell as produced by a format parser, before type inference.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    /// Structurally empty (absent JSON key, JSON `null`, empty Excel cell).
    Missing,
    /// Untyped text (CSV fields, Excel text cells); may still parse as a number or bool.
    Text(String),
    /// Typed string (JSON strings, rendered Excel dates); always text.
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Scalar {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text,
}

/// Build a [`Table`] from column names and raw rows.
///
/// Every row must have exactly `headers.len()` cells.
pub(crate) fn build_table(
    headers: Vec<String>,
    rows: Vec<Vec<RawCell>>,
    null_tokens: &[String],
) -> IngestionResult<Table> {
    let types: Vec<DataType> = (0..headers.len())
        .map(|idx| {
            infer_column_type(
                rows.iter().filter_map(|row| row.get(idx)),
                null_tokens,
            )
        })
        .collect();

    let typed_rows: Vec<Vec<Value>> = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&types)
                .map(|(cell, &data_type)| convert_cell(cell, data_type, null_tokens))
                .collect::<Vec<_>>()
        })
        .collect();

    let fields = headers
        .into_iter()
        .zip(types)
        .map(|(name, data_type)| Field::new(name, data_type))
        .collect();

    Table::new(Schema::new(fields), typed_rows)
}

fn infer_column_type<'a>(
    cells: impl Iterator<Item = &'a RawCell>,
    null_tokens: &[String],
) -> DataType {
    let mut seen_any = false;
    let mut all_int = true;
    let mut all_numeric = true;
    let mut all_bool = true;

    for cell in cells {
        match classify(cell, null_tokens) {
            Scalar::Missing => continue,
            Scalar::Int(_) => all_bool = false,
            Scalar::Float(_) => {
                all_int = false;
                all_bool = false;
            }
            Scalar::Bool(_) => {
                all_int = false;
                all_numeric = false;
            }
            Scalar::Text => return DataType::Utf8,
        }
        seen_any = true;
        if !all_numeric && !all_bool {
            return DataType::Utf8;
        }
    }

    if !seen_any {
        DataType::Float64
    } else if all_int {
        DataType::Int64
    } else if all_numeric {
        DataType::Float64
    } else {
        DataType::Bool
    }
}

fn classify(cell: &RawCell, null_tokens: &[String]) -> Scalar {
    match cell {
        RawCell::Missing => Scalar::Missing,
        RawCell::Text(s) => classify_text(s, null_tokens),
        RawCell::Str(_) => Scalar::Text,
        RawCell::Int(v) => Scalar::Int(*v),
        RawCell::Float(v) if v.is_nan() => Scalar::Missing,
        RawCell::Float(v) => Scalar::Float(*v),
        RawCell::Bool(v) => Scalar::Bool(*v),
    }
}

fn classify_text(raw: &str, null_tokens: &[String]) -> Scalar {
    if is_null_token(raw, null_tokens) {
        return Scalar::Missing;
    }

    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Scalar::Int(v);
    }
    if let Some(v) = parse_float(trimmed) {
        return if v.is_nan() { Scalar::Missing } else { Scalar::Float(v) };
    }
    match parse_bool(trimmed) {
        Some(v) => Scalar::Bool(v),
        None => Scalar::Text,
    }
}

fn is_null_token(raw: &str, null_tokens: &[String]) -> bool {
    null_tokens.iter().any(|t| t == raw)
}

fn parse_float(s: &str) -> Option<f64> {
    // A lone sign stays text; "inf"/"infinity" parse as floats.
    if s.is_empty() || s == "+" || s == "-" {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn convert_cell(cell: RawCell, data_type: DataType, null_tokens: &[String]) -> Value {
    if data_type == DataType::Utf8 {
        return convert_text_cell(cell, null_tokens);
    }

    match (classify(&cell, null_tokens), data_type) {
        (Scalar::Int(v), DataType::Int64) => Value::Int64(v),
        (Scalar::Int(v), DataType::Float64) => Value::Float64(v as f64),
        (Scalar::Float(v), DataType::Float64) => Value::Float64(v),
        (Scalar::Bool(v), DataType::Bool) => Value::Bool(v),
        // Inference only picks a non-text type when every non-missing cell fits it.
        _ => Value::Null,
    }
}

fn convert_text_cell(cell: RawCell, null_tokens: &[String]) -> Value {
    match cell {
        RawCell::Missing => Value::Null,
        RawCell::Text(s) if is_null_token(&s, null_tokens) => Value::Null,
        RawCell::Text(s) | RawCell::Str(s) => Value::Utf8(s),
        RawCell::Int(v) => Value::Utf8(v.to_string()),
        RawCell::Float(v) if v.is_nan() => Value::Null,
        RawCell::Float(v) => Value::Utf8(v.to_string()),
        RawCell::Bool(v) => Value::Utf8(v.to_string()),
    }
}
