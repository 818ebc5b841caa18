//! Duplicate-row detection.

use std::collections::HashSet;

use crate::types::{Table, Value};

/// Hashable view of a [`Value`].
///
/// `Null` equals `Null`; floats compare by bit pattern with `-0.0` folded into `0.0` (tables
/// never hold NaN).
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Int64(v) => Self::Int(*v),
            Value::Float64(v) if *v == 0.0 => Self::Float(0f64.to_bits()),
            Value::Float64(v) => Self::Float(v.to_bits()),
            Value::Bool(v) => Self::Bool(*v),
            Value::Utf8(v) => Self::Str(v),
        }
    }
}

/// Count rows whose full value tuple repeats an earlier row.
///
/// The first occurrence of each distinct row is not counted, so the result equals
/// `row_count - distinct rows`.
pub fn count_duplicate_rows(table: &Table) -> usize {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(table.row_count());
    table
        .rows()
        .iter()
        .filter(|row| !seen.insert(row.iter().map(CellKey::from).collect()))
        .count()
}
