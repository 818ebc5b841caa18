//! `upload-insights` turns an uploaded tabular file into an in-memory [`types::Table`] and a
//! data-quality snapshot of it.
//!
//! The pipeline is:
//!
//! 1. a [`upload::RawUpload`] (file name + bytes) arrives,
//! 2. [`ingestion::ingest_upload`] picks a parser from the file extension and infers one
//!    [`types::DataType`] per column,
//! 3. [`report::QualityReport`] summarizes the result,
//! 4. a [`session::Session`] holds the live table, the upload status and the "cleaned" flag.
//!
//! ## What you can ingest
//!
//! **File formats (selected by extension, case-insensitive):**
//!
//! - **CSV**: `.csv` (delimiter sniffed from `,` `;` tab `|`)
//! - **Excel** (Cargo feature `excel`, on by default): `.xls`, `.xlsx` (first sheet)
//! - **JSON**: `.json` (a single object or an array of objects; nested objects become
//!   dotted column names such as `user.name`)
//!
//! Anything else fails with [`IngestionError::UnsupportedFormat`].
//!
//! **Value types:**
//!
//! - [`types::DataType::Int64`]
//! - [`types::DataType::Float64`]
//! - [`types::DataType::Bool`]
//! - [`types::DataType::Utf8`]
//!
//! Empty cells, common null tokens (`NA`, `NaN`, `null`, ...) and JSON `null` all map to
//! [`types::Value::Null`], the single missing-value marker.
//!
//! ## Quick example
//!
//! ```rust
//! use upload_insights::session::{Session, UploadStatus};
//! use upload_insights::upload::RawUpload;
//!
//! # fn main() -> Result<(), upload_insights::IngestionError> {
//! let mut session = Session::default();
//! session.ingest(Some(RawUpload::new("scores.csv", "a,b\n1,2\n1,2\n3,\n")))?;
//!
//! let report = session.report().unwrap();
//! assert_eq!((report.row_count, report.column_count), (3, 2));
//! assert_eq!(report.duplicate_rows, 1);
//! assert_eq!(report.missing_for("b"), Some(1));
//! assert!(matches!(session.status(), UploadStatus::Success { .. }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`upload`]: uploaded file payloads and the built-in sample dataset
//! - [`ingestion`]: format dispatch, parsers and ingestion observability
//! - [`types`]: schema + in-memory table types
//! - [`report`]: the data-quality report
//! - [`session`]: per-session dashboard state
//! - [`error`]: error types used across the crate

pub mod error;
pub mod ingestion;
pub mod report;
pub mod session;
pub mod types;
pub mod upload;

pub use error::{IngestionError, IngestionResult};
