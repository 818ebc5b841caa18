//! Uploaded file payloads.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::IngestionResult;

/// File name of the built-in sample dataset.
pub const SAMPLE_FILE_NAME: &str = "sample.csv";

const SAMPLE_CSV: &[u8] = include_bytes!("../data/sample.csv");

/// An uploaded file: a name carrying the extension, plus the raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct RawUpload {
    /// File name as supplied by the uploader, e.g. `sales.xlsx`.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl RawUpload {
    /// Create an upload from a file name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk; the upload is named after the file.
    pub fn from_path(path: impl AsRef<Path>) -> IngestionResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// The built-in sample dataset (a known-good CSV shipped with the crate).
    pub fn sample() -> Self {
        Self::new(SAMPLE_FILE_NAME, SAMPLE_CSV)
    }

    /// Lower-cased text after the last `.` of the name; empty when the name has no dot.
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

impl fmt::Debug for RawUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawUpload")
            .field("name", &self.name)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}
