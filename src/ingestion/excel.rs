#![cfg(feature = "excel")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};
use chrono::NaiveTime;

use crate::error::{IngestionError, IngestionResult};
use crate::types::Table;

use super::header::normalize_headers;
use super::infer::{build_table, RawCell};
use super::unified::{ExcelSheetSelection, IngestionFormat, IngestionOptions};

/// Ingest an Excel workbook (`.xlsx`, `.xls`) held in memory into a [`Table`].
///
/// Behavior:
/// - Picks the sheet named by `options.excel_sheet_selection`; by default the first sheet
/// - Detects the first non-empty row as the header row
/// - Reads remaining rows as data, skipping rows where every cell is empty
/// - Integral float cells count as integers; error cells are missing
pub fn ingest_excel_from_bytes(bytes: &[u8], options: &IngestionOptions) -> IngestionResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet_names = workbook.sheet_names();
    let sheet = match &options.excel_sheet_selection {
        ExcelSheetSelection::First => sheet_names.first().cloned().ok_or_else(|| {
            IngestionError::parse(IngestionFormat::Excel, "workbook has no sheets")
        })?,
        ExcelSheetSelection::Sheet(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(IngestionError::parse(
                    IngestionFormat::Excel,
                    format!("sheet '{name}' not found. sheets={sheet_names:?}"),
                ));
            }
            name.clone()
        }
    };

    let range = workbook.worksheet_range(&sheet)?;
    ingest_sheet_range(&sheet, &range, options)
}

fn ingest_sheet_range(
    sheet: &str,
    range: &calamine::Range<Data>,
    options: &IngestionOptions,
) -> IngestionResult<Table> {
    let mut data_rows = range.rows().skip_while(|row| is_blank_row(row));

    let header_cells = data_rows.next().ok_or_else(|| {
        IngestionError::parse(
            IngestionFormat::Excel,
            format!("sheet '{sheet}' has no non-empty rows (no header row found)"),
        )
    })?;
    let columns = normalize_headers(header_cells.iter().map(cell_to_header_string));

    let rows: Vec<Vec<RawCell>> = data_rows
        .filter(|row| !is_blank_row(row))
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .collect();

    build_table(columns, rows, &options.null_tokens)
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|c| matches!(c, Data::Empty))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => match integral_float(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => render_excel_datetime(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn convert_cell(c: &Data) -> RawCell {
    match c {
        Data::Empty | Data::Error(_) => RawCell::Missing,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => match integral_float(*f) {
            Some(i) => RawCell::Int(i),
            None => RawCell::Float(*f),
        },
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::Str(render_excel_datetime(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Str(s.clone()),
    }
}

/// ISO text for a date cell: `2024-03-15` at midnight, `2024-03-15T10:30:00` otherwise.
/// Durations (and serials outside chrono's range) keep calamine's own rendering.
fn render_excel_datetime(dt: &ExcelDateTime) -> String {
    let parsed = dt.is_datetime().then(|| dt.as_datetime()).flatten();
    match parsed {
        Some(value) if Some(value.time()) == NaiveTime::from_hms_opt(0, 0, 0) => {
            value.format("%Y-%m-%d").to_string()
        }
        Some(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

fn integral_float(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
