use upload_insights::ingestion::{ingest_from_path, ingest_upload, IngestionOptions};
use upload_insights::report::{quality_report, ColumnKind, QualityReport, SummaryStatistics};
use upload_insights::types::{DataType, Table};
use upload_insights::upload::RawUpload;

fn quality_fixture() -> Table {
    ingest_from_path("tests/fixtures/quality.csv", &IngestionOptions::default()).unwrap()
}

fn distinct_rows(table: &Table) -> usize {
    let mut seen: Vec<String> = table.rows().iter().map(|row| format!("{row:?}")).collect();
    seen.sort();
    seen.dedup();
    seen.len()
}

#[test]
fn shape_types_and_kinds() {
    let report = QualityReport::from_table(&quality_fixture());

    assert_eq!((report.row_count, report.column_count), (6, 4));
    let types: Vec<(&str, DataType, ColumnKind)> = report
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.data_type, c.kind))
        .collect();
    assert_eq!(
        types,
        vec![
            ("city", DataType::Utf8, ColumnKind::Text),
            ("temperature", DataType::Float64, ColumnKind::Numeric),
            ("humidity", DataType::Int64, ColumnKind::Numeric),
            ("station", DataType::Utf8, ColumnKind::Text),
        ]
    );
}

#[test]
fn missing_values_are_counted_per_column() {
    let report = QualityReport::from_table(&quality_fixture());

    assert!(report.has_missing());
    assert_eq!(report.total_missing(), 3);
    assert_eq!(report.columns_with_missing(), vec![("temperature", 1), ("humidity", 2)]);
    assert_eq!(report.missing_for("city"), Some(0));
    assert_eq!(report.missing_for("nope"), None);
}

#[test]
fn duplicate_count_equals_rows_minus_distinct_rows() {
    let table = quality_fixture();
    let report = QualityReport::from_table(&table);

    assert_eq!(report.duplicate_rows, 3);
    assert_eq!(report.duplicate_rows, table.row_count() - distinct_rows(&table));
    assert!(report.has_duplicates());
}

#[test]
fn numeric_summary_covers_numeric_columns_only() {
    let report = QualityReport::from_table(&quality_fixture());

    let SummaryStatistics::Numeric(stats) = &report.summary else {
        panic!("expected numeric summary, got {:?}", report.summary);
    };
    let names: Vec<&str> = stats.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(names, vec!["temperature", "humidity"]);

    let humidity = report.summary_for("humidity").unwrap();
    assert_eq!(humidity.count, 4);
    assert_eq!(humidity.min, Some(40.0));
    assert_eq!(humidity.max, Some(81.0));
    assert_eq!(humidity.median, Some(81.0));
    assert!(report.summary_for("city").is_none());
}

#[test]
fn report_is_deterministic() {
    let table = quality_fixture();
    assert_eq!(QualityReport::from_table(&table), quality_report(&table));
}

#[test]
fn text_only_upload_has_no_numeric_columns() {
    let upload = RawUpload::new("names.csv", "first,last\nAda,Lovelace\nGrace,Hopper\n");
    let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();
    let report = quality_report(&table);

    assert_eq!(report.summary, SummaryStatistics::NoNumericColumns);
    assert!(!report.has_missing());
    assert!(!report.has_duplicates());
}

#[test]
fn documented_scenario_reports_one_duplicate_and_one_missing() {
    let upload = RawUpload::new("scores.csv", "a,b\n1,2\n1,2\n3,\n");
    let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();
    let report = quality_report(&table);

    assert_eq!((report.row_count, report.column_count), (3, 2));
    assert_eq!(report.columns_with_missing(), vec![("b", 1)]);
    assert_eq!(report.duplicate_rows, 1);
}

#[test]
fn report_with_opposite_infinities_equals_itself() {
    let upload = RawUpload::new("inf.csv", "x\ninf\n-inf\n1\n");
    let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();

    let report = quality_report(&table);
    let x = report.summary_for("x").unwrap();
    assert_eq!(x.q25, None);
    assert_eq!(x.mean, None);
    assert_eq!(report, quality_report(&table));
}
