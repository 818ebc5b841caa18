use criterion::{black_box, criterion_group, criterion_main, Criterion};

use upload_insights::ingestion::{ingest_upload, IngestionOptions};
use upload_insights::report::QualityReport;
use upload_insights::upload::RawUpload;

fn synthetic_csv(rows: usize) -> Vec<u8> {
    let mut out = String::from("id,region,units,price,flag\n");
    for i in 0..rows {
        let units = if i % 17 == 0 { String::new() } else { (i % 40).to_string() };
        out.push_str(&format!(
            "{},{},{},{:.2},{}\n",
            i % 500,
            ["north", "south", "east", "west"][i % 4],
            units,
            (i % 97) as f64 * 1.25,
            i % 3 == 0
        ));
    }
    out.into_bytes()
}

fn bench_ingestion(c: &mut Criterion) {
    let opts = IngestionOptions::default();
    let sample = RawUpload::sample();
    let large = RawUpload::new("large.csv", synthetic_csv(20_000));

    c.bench_function("ingest_sample_csv", |b| {
        b.iter(|| ingest_upload(black_box(&sample), &opts).unwrap())
    });

    c.bench_function("ingest_csv_20k_rows", |b| {
        b.iter(|| ingest_upload(black_box(&large), &opts).unwrap())
    });

    let table = ingest_upload(&large, &opts).unwrap();
    c.bench_function("quality_report_20k_rows", |b| {
        b.iter(|| QualityReport::from_table(black_box(&table)))
    });
}

criterion_group!(benches, bench_ingestion);
criterion_main!(benches);
