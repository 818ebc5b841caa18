//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]` (one row per element)
//! - A single JSON object: `{"a":1}` (one row)
//!
//! Nested objects are flattened into dotted column names (`{"user":{"name":"Ada"}}` becomes the
//! column `user.name`). Columns appear in order of first appearance across records; a key absent
//! from a record is missing in that row.

use std::collections::HashMap;

use serde_json::Map;

use crate::error::{IngestionError, IngestionResult};
use crate::types::Table;

use super::infer::{build_table, RawCell};
use super::unified::{IngestionFormat, IngestionOptions};

/// Ingest JSON bytes into an in-memory [`Table`].
pub fn ingest_json_from_bytes(bytes: &[u8], options: &IngestionOptions) -> IngestionResult<Table> {
    let root: serde_json::Value = serde_json::from_slice(bytes)?;
    ingest_json_value(&root, options)
}

/// Ingest JSON from an in-memory string into a [`Table`].
pub fn ingest_json_from_str(input: &str, options: &IngestionOptions) -> IngestionResult<Table> {
    ingest_json_from_bytes(input.as_bytes(), options)
}

fn ingest_json_value(root: &serde_json::Value, options: &IngestionOptions) -> IngestionResult<Table> {
    let records: Vec<&Map<String, serde_json::Value>> = match root {
        serde_json::Value::Object(obj) => vec![obj],
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx0, item)| {
                item.as_object().ok_or_else(|| {
                    IngestionError::parse(
                        IngestionFormat::Json,
                        format!("row {} is not a json object", idx0 + 1),
                    )
                })
            })
            .collect::<IngestionResult<_>>()?,
        _ => {
            return Err(IngestionError::parse(
                IngestionFormat::Json,
                "json must be an object or an array of objects",
            ));
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut column_idx: HashMap<String, usize> = HashMap::new();
    let mut sparse_rows: Vec<Vec<(usize, RawCell)>> = Vec::with_capacity(records.len());

    for record in records {
        let mut flat = Vec::new();
        flatten_object("", record, &mut flat);

        let mut sparse = Vec::with_capacity(flat.len());
        for (name, cell) in flat {
            let idx = match column_idx.get(&name) {
                Some(&idx) => idx,
                None => {
                    let idx = columns.len();
                    column_idx.insert(name.clone(), idx);
                    columns.push(name);
                    idx
                }
            };
            sparse.push((idx, cell));
        }
        sparse_rows.push(sparse);
    }

    let width = columns.len();
    let rows: Vec<Vec<RawCell>> = sparse_rows
        .into_iter()
        .map(|sparse| {
            let mut row = vec![RawCell::Missing; width];
            for (idx, cell) in sparse {
                row[idx] = cell;
            }
            row
        })
        .collect();

    build_table(columns, rows, &options.null_tokens)
}

fn flatten_object(
    prefix: &str,
    obj: &Map<String, serde_json::Value>,
    out: &mut Vec<(String, RawCell)>,
) {
    for (key, value) in obj {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            serde_json::Value::Object(nested) if !nested.is_empty() => {
                flatten_object(&name, nested, out)
            }
            other => out.push((name, convert_json_value(other))),
        }
    }
}

fn convert_json_value(v: &serde_json::Value) -> RawCell {
    match v {
        serde_json::Value::Null => RawCell::Missing,
        serde_json::Value::Object(_) => RawCell::Missing,
        serde_json::Value::Bool(b) => RawCell::Bool(*b),
        serde_json::Value::String(s) => RawCell::Str(s.clone()),
        serde_json::Value::Array(_) => RawCell::Str(v.to_string()),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => RawCell::Int(i),
            None => n.as_f64().map(RawCell::Float).unwrap_or(RawCell::Missing),
        },
    }
}
