use thiserror::Error;

use crate::ingestion::{IngestionFormat, IngestionSeverity};

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV/JSON/Excel ingestion and the session layer.
/// Parser library errors convert into [`IngestionError::ParseError`] via `From`.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The upload's extension is not one of `csv`, `xls`, `xlsx`, `json`.
    #[error("Unsupported file format: {extension}. Please upload a CSV, Excel, or JSON file.")]
    UnsupportedFormat { extension: String },

    /// The bytes do not decode into a well-formed table for the declared format.
    #[error("failed to parse {} input: {message}", .format.map_or("table", IngestionFormat::label))]
    ParseError {
        /// Format being parsed, if known.
        format: Option<IngestionFormat>,
        message: String,
    },

    /// An action that needs a file was invoked without one.
    #[error("no file supplied: please upload a file first")]
    EmptyInput,

    /// Underlying I/O error while reading an input path.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestionError {
    /// Build a [`IngestionError::ParseError`] for `format`.
    pub fn parse(format: IngestionFormat, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: Some(format),
            message: message.into(),
        }
    }

    /// Severity used by observers and alert thresholds.
    pub fn severity(&self) -> IngestionSeverity {
        match self {
            Self::Io(_) => IngestionSeverity::Critical,
            Self::ParseError { .. } => IngestionSeverity::Error,
            Self::UnsupportedFormat { .. } | Self::EmptyInput => IngestionSeverity::Warning,
        }
    }
}

impl From<csv::Error> for IngestionError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => {
                let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
                Self::parse(
                    IngestionFormat::Csv,
                    format!("expected {expected_len} fields in line {line}, saw {len}"),
                )
            }
            _ => Self::parse(IngestionFormat::Csv, err.to_string()),
        }
    }
}

impl From<serde_json::Error> for IngestionError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(IngestionFormat::Json, err.to_string())
    }
}

#[cfg(feature = "excel")]
impl From<calamine::Error> for IngestionError {
    fn from(err: calamine::Error) -> Self {
        Self::parse(IngestionFormat::Excel, err.to_string())
    }
}
