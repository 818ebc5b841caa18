#![cfg(feature = "excel_test_writer")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use upload_insights::ingestion::excel::ingest_excel_from_bytes;
use upload_insights::ingestion::{ingest_from_path, ingest_upload, ExcelSheetSelection, IngestionOptions};
use upload_insights::types::{DataType, Value};
use upload_insights::upload::RawUpload;
use upload_insights::IngestionError;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("upload-insights-{name}-{nanos}.xlsx"))
}

fn people_workbook() -> Workbook {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("People").unwrap();

    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_string(0, 2, "score").unwrap();
    ws.write_string(0, 3, "active").unwrap();

    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "Ada").unwrap();
    ws.write_number(1, 2, 98.5).unwrap();
    ws.write_boolean(1, 3, true).unwrap();

    // score left blank
    ws.write_number(2, 0, 2).unwrap();
    ws.write_string(2, 1, "Grace").unwrap();
    ws.write_boolean(2, 3, false).unwrap();

    let extra = wb.add_worksheet();
    extra.set_name("Extra").unwrap();
    extra.write_string(0, 0, "code").unwrap();
    extra.write_string(1, 0, "NA").unwrap();
    extra.write_string(2, 0, "x1").unwrap();

    wb
}

fn people_xlsx_bytes() -> Vec<u8> {
    people_workbook().save_to_buffer().unwrap()
}

#[test]
fn ingest_excel_first_sheet_infers_types() {
    let table = ingest_excel_from_bytes(&people_xlsx_bytes(), &IngestionOptions::default()).unwrap();

    assert_eq!(table.column_names(), vec!["id", "name", "score", "active"]);
    let types: Vec<DataType> = table.schema().fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![DataType::Int64, DataType::Utf8, DataType::Float64, DataType::Bool]
    );
    assert_eq!(
        table.rows()[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
        ]
    );
    assert_eq!(table.rows()[1][2], Value::Null);
}

#[test]
fn ingest_excel_named_sheet_applies_null_tokens() {
    let opts = IngestionOptions {
        excel_sheet_selection: ExcelSheetSelection::Sheet("Extra".to_string()),
        ..Default::default()
    };
    let table = ingest_excel_from_bytes(&people_xlsx_bytes(), &opts).unwrap();

    assert_eq!(table.column_names(), vec!["code"]);
    assert_eq!(table.rows(), &[vec![Value::Null], vec![Value::Utf8("x1".to_string())]]);
}

#[test]
fn ingest_excel_unknown_sheet_is_a_parse_error() {
    let opts = IngestionOptions {
        excel_sheet_selection: ExcelSheetSelection::Sheet("Nope".to_string()),
        ..Default::default()
    };
    let err = ingest_excel_from_bytes(&people_xlsx_bytes(), &opts).unwrap_err();
    assert!(err.to_string().contains("sheet 'Nope' not found"));
}

#[test]
fn xlsx_upload_dispatches_to_excel_reader() {
    let upload = RawUpload::new("people.XLSX", people_xlsx_bytes());
    let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 4);
}

#[test]
fn ingest_excel_from_path_via_unified_entrypoint() {
    let path = tmp_file("people");
    people_workbook().save(&path).unwrap();

    let table = ingest_from_path(&path, &IngestionOptions::default()).unwrap();
    assert_eq!(table.row_count(), 2);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_workbook_is_a_parse_error() {
    let upload = RawUpload::new("broken.xlsx", b"definitely not a zip archive".to_vec());
    let err = ingest_upload(&upload, &IngestionOptions::default()).unwrap_err();
    assert!(matches!(err, IngestionError::ParseError { .. }));
}

#[test]
fn date_cells_are_read_as_iso_text() {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let stamp_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let date = ExcelDateTime::parse_from_str("2024-03-15").unwrap();
    let stamp = ExcelDateTime::parse_from_str("2024-03-15T10:30:00").unwrap();

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "day").unwrap();
    ws.write_string(0, 1, "at").unwrap();
    ws.write_datetime_with_format(1, 0, &date, &date_format).unwrap();
    ws.write_datetime_with_format(1, 1, &stamp, &stamp_format).unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let table = ingest_excel_from_bytes(&bytes, &IngestionOptions::default()).unwrap();

    assert_eq!(table.schema().fields[0].data_type, DataType::Utf8);
    assert_eq!(
        table.rows(),
        &[vec![
            Value::Utf8("2024-03-15".to_string()),
            Value::Utf8("2024-03-15T10:30:00".to_string()),
        ]]
    );
}
