//! Per-session dashboard state.
//!
//! A [`Session`] owns the single live [`Table`] of one browser tab together with the upload
//! status and the "cleaned" flag. It is passed explicitly to every action, so separate sessions
//! (and tests) never share state.

use std::path::Path;

use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};
use crate::ingestion::unified::read_upload;
use crate::ingestion::{ingest_upload, IngestionOptions};
use crate::report::QualityReport;
use crate::types::Table;
use crate::upload::RawUpload;

/// Number of rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 10;

/// Outcome of the most recent ingestion attempt, rendered as a banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadStatus {
    /// Nothing attempted yet.
    #[default]
    Idle,
    /// The named file was loaded.
    Success { filename: String },
    /// The last attempt failed; the previous table (if any) is still live.
    Error { message: String },
}

/// Dashboard state for one session.
#[derive(Debug, Default)]
pub struct Session {
    options: IngestionOptions,
    table: Option<Table>,
    source_name: Option<String>,
    status: UploadStatus,
    cleaned: bool,
}

impl Session {
    /// Create an idle session that ingests with `options`.
    pub fn new(options: IngestionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Ingest an upload, replacing the live table on success.
    ///
    /// - `None` fails with [`IngestionError::EmptyInput`].
    /// - On success the table is replaced wholesale, the status becomes
    ///   [`UploadStatus::Success`] and the cleaned flag is reset.
    /// - On failure the live table is left untouched and the status becomes
    ///   [`UploadStatus::Error`] with a human-readable message.
    pub fn ingest(&mut self, upload: Option<RawUpload>) -> IngestionResult<&Table> {
        let Some(upload) = upload else {
            return Err(self.record_failure("<none>", IngestionError::EmptyInput));
        };

        match ingest_upload(&upload, &self.options) {
            Ok(table) => {
                log::debug!(
                    "session loaded {}: rows={} columns={}",
                    upload.name,
                    table.row_count(),
                    table.column_count()
                );
                self.status = UploadStatus::Success {
                    filename: upload.name.clone(),
                };
                self.source_name = Some(upload.name);
                self.cleaned = false;
                Ok(&*self.table.insert(table))
            }
            Err(e) => Err(self.record_failure(&upload.name, e)),
        }
    }

    /// Load the built-in sample dataset.
    pub fn load_sample(&mut self) -> IngestionResult<&Table> {
        self.ingest(Some(RawUpload::sample()))
    }

    /// Read a file from disk and ingest it.
    ///
    /// A read failure reaches the configured observer as a critical failure, like
    /// [`crate::ingestion::ingest_from_path`].
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> IngestionResult<&Table> {
        let path = path.as_ref();
        match read_upload(path, &self.options) {
            Ok(upload) => self.ingest(Some(upload)),
            Err(e) => Err(self.record_failure(&path.display().to_string(), e)),
        }
    }

    fn record_failure(&mut self, source: &str, error: IngestionError) -> IngestionError {
        log::warn!("session failed to load {source}: {error}");
        self.status = UploadStatus::Error {
            message: error.to_string(),
        };
        error
    }

    /// The live table, if any.
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Name of the file the live table came from.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Outcome of the most recent ingestion attempt.
    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    /// Ingestion options used by this session.
    pub fn options(&self) -> &IngestionOptions {
        &self.options
    }

    /// `true` once a cleaning step has run on the live table; reset by every successful ingestion.
    pub fn is_cleaned(&self) -> bool {
        self.cleaned
    }

    /// Record that the live table has been cleaned. No-op without a table.
    pub fn mark_cleaned(&mut self) {
        if self.table.is_some() {
            self.cleaned = true;
        }
    }

    /// The first [`PREVIEW_ROWS`] rows of the live table.
    pub fn preview(&self) -> Option<Table> {
        self.table.as_ref().map(|t| t.head(PREVIEW_ROWS))
    }

    /// A fresh [`QualityReport`] of the live table.
    pub fn report(&self) -> Option<QualityReport> {
        self.table.as_ref().map(QualityReport::from_table)
    }
}
