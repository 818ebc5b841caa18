//! CSV ingestion implementation.

use crate::error::{IngestionError, IngestionResult};
use crate::types::Table;

use super::header::normalize_headers;
use super::infer::{build_table, RawCell};
use super::unified::{IngestionFormat, IngestionOptions};

/// Delimiters considered when sniffing, in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Ingest CSV bytes into an in-memory [`Table`].
///
/// Rules:
///
/// - The first non-blank record is the header row.
/// - The delimiter is `options.csv_delimiter`, or sniffed from the header line.
/// - Input must be UTF-8 (a UTF-8 BOM is skipped); blank and whitespace-only lines are ignored.
/// - Every other record must have as many fields as the header.
pub fn ingest_csv_from_bytes(bytes: &[u8], options: &IngestionOptions) -> IngestionResult<Table> {
    let bytes = strip_utf8_bom(bytes);
    reject_utf16(bytes)?;

    let delimiter = options
        .csv_delimiter
        .unwrap_or_else(|| sniff_delimiter(bytes));
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);
    ingest_csv_from_reader(&mut rdr, &options.null_tokens)
}

/// Ingest CSV data from an existing CSV reader.
///
/// The reader should be configured with `has_headers(false)` and `flexible(true)`: the header
/// is the first non-blank record, and field counts are checked here so that whitespace-only
/// lines can be skipped instead of failing as short records.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    null_tokens: &[String],
) -> IngestionResult<Table> {
    let mut records = rdr.records().filter(|r| !matches!(r, Ok(rec) if is_blank_record(rec)));

    let header = match records.next() {
        Some(header) => header?,
        None => {
            return Err(IngestionError::parse(
                IngestionFormat::Csv,
                "no columns to parse from file",
            ));
        }
    };
    let columns = normalize_headers(header.iter());

    let mut rows: Vec<Vec<RawCell>> = Vec::new();
    for result in records {
        let record = result?;
        if record.len() != columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(IngestionError::parse(
                IngestionFormat::Csv,
                format!(
                    "expected {} fields in line {line}, saw {}",
                    columns.len(),
                    record.len()
                ),
            ));
        }
        rows.push(
            record
                .iter()
                .map(|field| RawCell::Text(field.to_owned()))
                .collect(),
        );
    }

    build_table(columns, rows, null_tokens)
}

/// A record made of a single whitespace-only field, i.e. a line holding only spaces or tabs.
fn is_blank_record(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record.iter().all(|f| f.trim().is_empty())
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes)
}

fn reject_utf16(bytes: &[u8]) -> IngestionResult<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestionError::parse(
        IngestionFormat::Csv,
        format!("unsupported encoding {encoding}; save the file as UTF-8"),
    ))
}

/// Pick the candidate delimiter occurring most often (outside quotes) in the first non-blank
/// line. Falls back to `,`.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let line = bytes
        .split(|&b| b == b'\n')
        .find(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .unwrap_or_default();

    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for &b in line {
        if b == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(idx) = CANDIDATE_DELIMITERS.iter().position(|&d| d == b) {
            counts[idx] += 1;
        }
    }

    let mut best = 0;
    for idx in 1..counts.len() {
        if counts[idx] > counts[best] {
            best = idx;
        }
    }
    CANDIDATE_DELIMITERS[best]
}
