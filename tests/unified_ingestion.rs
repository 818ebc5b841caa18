use upload_insights::ingestion::{ingest_from_path, ingest_upload, IngestionFormat, IngestionOptions};
use upload_insights::types::Value;
use upload_insights::upload::RawUpload;
use upload_insights::IngestionError;

#[test]
fn unified_ingest_csv_and_json_fixtures_match() {
    let opts = IngestionOptions::default();
    let csv = ingest_from_path("tests/fixtures/people.csv", &opts).unwrap();
    let json = ingest_from_path("tests/fixtures/people.json", &opts).unwrap();

    assert_eq!(csv.row_count(), json.row_count());
    assert_eq!(csv.column_count(), json.column_count());
    assert_eq!(csv.rows()[0][0], json.rows()[0][0]);
    assert_eq!(csv.rows()[1][2], json.rows()[1][2]);
}

#[test]
fn extension_match_is_case_insensitive() {
    let upload = RawUpload::new("DATA.CSV", "a,b\n1,2\n");
    let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();
    assert_eq!(table.row_count(), 1);
}

#[test]
fn unsupported_extension_is_rejected_without_parsing() {
    let upload = RawUpload::new("report.pdf", "%PDF-1.7");
    let err = ingest_upload(&upload, &IngestionOptions::default()).unwrap_err();

    match &err {
        IngestionError::UnsupportedFormat { extension } => assert_eq!(extension, "pdf"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Unsupported file format: pdf. Please upload a CSV, Excel, or JSON file."
    );
}

#[test]
fn name_without_extension_is_unsupported() {
    let err = ingest_upload(&RawUpload::new("README", "a\n1\n"), &IngestionOptions::default())
        .unwrap_err();
    assert!(matches!(err, IngestionError::UnsupportedFormat { ref extension } if extension.is_empty()));
}

#[test]
fn malformed_content_under_supported_extension_is_a_parse_error() {
    let opts = IngestionOptions::default();

    let err = ingest_upload(&RawUpload::new("broken.json", "{not json"), &opts).unwrap_err();
    assert!(matches!(
        err,
        IngestionError::ParseError {
            format: Some(IngestionFormat::Json),
            ..
        }
    ));

    let err = ingest_upload(&RawUpload::new("broken.csv", "a,b\n1\n"), &opts).unwrap_err();
    assert!(matches!(
        err,
        IngestionError::ParseError {
            format: Some(IngestionFormat::Csv),
            ..
        }
    ));
}

#[test]
fn forced_format_overrides_extension() {
    let opts = IngestionOptions {
        format: Some(IngestionFormat::Csv),
        ..Default::default()
    };
    let table = ingest_upload(&RawUpload::new("export.txt", "x\n1\n"), &opts).unwrap();
    assert_eq!(table.rows()[0][0], Value::Int64(1));
}

#[test]
fn table_shape_matches_rows_and_header_order() {
    let upload = RawUpload::new("shape.csv", "c,a,b\n1,2,3\n4,5,6\n7,8,9\n");
    let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_names(), vec!["c", "a", "b"]);
    assert!(table.rows().iter().all(|row| row.len() == 3));
}

#[test]
fn missing_path_is_an_io_error() {
    let err = ingest_from_path("tests/fixtures/does_not_exist.csv", &IngestionOptions::default())
        .unwrap_err();
    assert!(matches!(err, IngestionError::Io(_)));
}
