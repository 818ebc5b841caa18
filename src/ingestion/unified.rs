//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_upload`], which turns a [`RawUpload`] into an in-memory
//! [`crate::types::Table`].
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the upload's
//!   file extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::Table;
use crate::upload::RawUpload;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Cell texts treated as missing values in CSV fields and Excel text cells.
pub const DEFAULT_NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan",
    "null",
];

/// [`DEFAULT_NULL_TOKENS`] as owned strings, the default for [`IngestionOptions::null_tokens`].
pub fn default_null_tokens() -> Vec<String> {
    DEFAULT_NULL_TOKENS.iter().map(|t| t.to_string()).collect()
}

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionFormat {
    /// Comma-separated values (delimiter may be sniffed).
    Csv,
    /// Spreadsheet workbooks (feature-gated behind `excel`).
    Excel,
    /// JSON object or array of objects.
    Json,
}

/// Signature shared by every per-format parser.
type Parser = fn(&[u8], &IngestionOptions) -> IngestionResult<Table>;

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xls" | "xlsx" => Some(Self::Excel),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Lower-case name used in messages and log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Json => "json",
        }
    }

    /// Detect the format of an upload from its file name.
    pub fn from_upload(upload: &RawUpload) -> IngestionResult<Self> {
        let extension = upload.extension();
        Self::from_extension(&extension).ok_or(IngestionError::UnsupportedFormat { extension })
    }

    /// Parse `bytes` as this format.
    pub fn parse(self, bytes: &[u8], options: &IngestionOptions) -> IngestionResult<Table> {
        (self.parser())(bytes, options)
    }

    fn parser(self) -> Parser {
        match self {
            Self::Csv => csv::ingest_csv_from_bytes,
            Self::Excel => ingest_excel_dispatch,
            Self::Json => json::ingest_json_from_bytes,
        }
    }
}

/// Which worksheet to read when ingesting an Excel workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExcelSheetSelection {
    /// Ingest the first sheet (default).
    #[default]
    First,
    /// Ingest a single named sheet.
    Sheet(String),
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from the file extension.
    pub format: Option<IngestionFormat>,
    /// Excel-specific options.
    pub excel_sheet_selection: ExcelSheetSelection,
    /// CSV field delimiter. If `None`, sniffed from the header line.
    pub csv_delimiter: Option<u8>,
    /// Exact cell texts read as missing values (CSV fields and Excel text cells).
    pub null_tokens: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("excel_sheet_selection", &self.excel_sheet_selection)
            .field("csv_delimiter", &self.csv_delimiter.map(char::from))
            .field("null_tokens", &self.null_tokens.len())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet_selection: ExcelSheetSelection::default(),
            csv_delimiter: None,
            null_tokens: default_null_tokens(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point.
///
/// - If `options.format` is `None`, format is inferred from the upload's extension; anything
///   other than `csv`, `xls`, `xlsx`, `json` fails with [`IngestionError::UnsupportedFormat`].
/// - Ingestion is all-or-nothing: any malformed row or cell fails the whole upload with
///   [`IngestionError::ParseError`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column count stats
/// - `on_failure` on failure, with the error's severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```rust
/// use upload_insights::ingestion::{ingest_upload, IngestionOptions};
/// use upload_insights::upload::RawUpload;
///
/// # fn main() -> Result<(), upload_insights::IngestionError> {
/// let upload = RawUpload::new("scores.csv", "a,b\n1,2\n1,2\n3,\n");
/// let table = ingest_upload(&upload, &IngestionOptions::default())?;
/// assert_eq!(table.column_names(), vec!["a", "b"]);
/// assert_eq!(table.row_count(), 3);
/// # Ok(())
/// # }
/// ```
///
/// ## Force a format explicitly (override extension inference)
///
/// ```rust
/// use upload_insights::ingestion::{ingest_upload, IngestionFormat, IngestionOptions};
/// use upload_insights::upload::RawUpload;
///
/// # fn main() -> Result<(), upload_insights::IngestionError> {
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Json),
///     ..Default::default()
/// };
/// let upload = RawUpload::new("export.txt", r#"[{"x":1},{"x":2}]"#);
/// let table = ingest_upload(&upload, &opts)?;
/// assert_eq!(table.row_count(), 2);
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```rust
/// use std::sync::Arc;
///
/// use upload_insights::ingestion::{
///     ingest_upload, IngestionOptions, IngestionSeverity, StdErrObserver,
/// };
/// use upload_insights::upload::RawUpload;
///
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: IngestionSeverity::Error,
///     ..Default::default()
/// };
///
/// // Malformed JSON is an Error-severity failure and triggers `on_alert` at this threshold.
/// let _err = ingest_upload(&RawUpload::new("broken.json", "{"), &opts).unwrap_err();
/// ```
pub fn ingest_upload(upload: &RawUpload, options: &IngestionOptions) -> IngestionResult<Table> {
    let format = match options.format {
        Some(f) => Ok(f),
        None => IngestionFormat::from_upload(upload),
    };

    let ctx = IngestionContext {
        source: upload.name.clone(),
        format: format.as_ref().ok().copied(),
    };

    match format.and_then(|f| f.parse(&upload.bytes, options)) {
        Ok(table) => {
            report_success(options, &ctx, &table);
            Ok(table)
        }
        Err(e) => Err(report_failure(options, &ctx, e)),
    }
}

/// Read a file from disk and ingest it like an upload named after the file.
///
/// Read failures are reported as [`IngestionError::Io`].
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Table> {
    let upload = read_upload(path.as_ref(), options)?;
    ingest_upload(&upload, options)
}

/// Read `path` into a [`RawUpload`], reporting a read failure to the configured observer.
pub(crate) fn read_upload(path: &Path, options: &IngestionOptions) -> IngestionResult<RawUpload> {
    RawUpload::from_path(path).map_err(|e| {
        let ctx = IngestionContext {
            source: path.display().to_string(),
            format: options.format.or_else(|| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .and_then(IngestionFormat::from_extension)
            }),
        };
        report_failure(options, &ctx, e)
    })
}

fn report_success(options: &IngestionOptions, ctx: &IngestionContext, table: &Table) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_success(
            ctx,
            IngestionStats {
                rows: table.row_count(),
                columns: table.column_count(),
            },
        );
    }
}

fn report_failure(options: &IngestionOptions, ctx: &IngestionContext, error: IngestionError) -> IngestionError {
    if let Some(obs) = options.observer.as_ref() {
        let sev = error.severity();
        obs.on_failure(ctx, sev, &error);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, &error);
        }
    }
    error
}

fn ingest_excel_dispatch(bytes: &[u8], options: &IngestionOptions) -> IngestionResult<Table> {
    #[cfg(feature = "excel")]
    {
        super::excel::ingest_excel_from_bytes(bytes, options)
    }

    #[cfg(not(feature = "excel"))]
    {
        // Avoid unused warnings when the feature is off.
        let _ = (bytes, options);
        Err(IngestionError::parse(
            IngestionFormat::Excel,
            "excel ingestion not enabled (enable cargo feature 'excel')",
        ))
    }
}
