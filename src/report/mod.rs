//! Data-quality report over a [`Table`].
//!
//! A [`QualityReport`] is a read-only snapshot computed from a table with no side effects:
//!
//! - shape (row and column counts)
//! - per-column data type and kind ([`ColumnKind::Numeric`] or [`ColumnKind::Text`])
//! - summary statistics for numeric columns ([`SummaryStatistics`])
//! - per-column missing-value counts ([`crate::types::Value::Null`] cells)
//! - duplicate-row count
//!
//! The report is deterministic: computing it twice on an unmodified table yields equal reports.
//!
//! ```rust
//! use upload_insights::ingestion::{ingest_upload, IngestionOptions};
//! use upload_insights::report::QualityReport;
//! use upload_insights::upload::RawUpload;
//!
//! let upload = RawUpload::new("scores.csv", "a,b\n1,2\n1,2\n3,\n");
//! let table = ingest_upload(&upload, &IngestionOptions::default()).unwrap();
//! let report = QualityReport::from_table(&table);
//!
//! assert_eq!(report.row_count, 3);
//! assert_eq!(report.columns_with_missing(), vec![("b", 1)]);
//! assert_eq!(report.duplicate_rows, 1);
//! ```

pub mod duplicates;
pub mod summary;

use serde::Serialize;

use crate::types::{DataType, Table};

pub use duplicates::count_duplicate_rows;
pub use summary::NumericSummary;

/// Coarse column classification used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer or floating point column.
    Numeric,
    /// Everything else (text, booleans).
    Text,
}

impl From<DataType> for ColumnKind {
    fn from(data_type: DataType) -> Self {
        if data_type.is_numeric() {
            Self::Numeric
        } else {
            Self::Text
        }
    }
}

/// Per-column facts in a [`QualityReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: DataType,
    pub kind: ColumnKind,
    /// Number of missing cells.
    pub missing: usize,
}

/// Summary statistics section of a [`QualityReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "columns", rename_all = "snake_case")]
pub enum SummaryStatistics {
    /// The table has no numeric columns to summarize.
    NoNumericColumns,
    /// One entry per numeric column, in column order.
    Numeric(Vec<NumericSummary>),
}

/// Derived, read-only statistics about a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub row_count: usize,
    pub column_count: usize,
    /// One profile per column, in column order.
    pub columns: Vec<ColumnProfile>,
    pub summary: SummaryStatistics,
    /// Rows repeating an earlier row's full value tuple.
    pub duplicate_rows: usize,
}

impl QualityReport {
    /// Compute a fresh report for `table`.
    pub fn from_table(table: &Table) -> Self {
        let mut missing = vec![0usize; table.column_count()];
        for row in table.rows() {
            for (count, value) in missing.iter_mut().zip(row) {
                if value.is_null() {
                    *count += 1;
                }
            }
        }

        let columns: Vec<ColumnProfile> = table
            .schema()
            .fields
            .iter()
            .zip(missing)
            .map(|(field, missing)| ColumnProfile {
                name: field.name.clone(),
                data_type: field.data_type,
                kind: ColumnKind::from(field.data_type),
                missing,
            })
            .collect();

        let numeric: Vec<NumericSummary> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ColumnKind::Numeric)
            .map(|(idx, _)| NumericSummary::for_column(table, idx))
            .collect();
        let summary = if numeric.is_empty() {
            SummaryStatistics::NoNumericColumns
        } else {
            SummaryStatistics::Numeric(numeric)
        };

        Self {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
            summary,
            duplicate_rows: count_duplicate_rows(table),
        }
    }

    /// Total number of missing cells.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }

    /// `true` if any cell is missing.
    pub fn has_missing(&self) -> bool {
        self.columns.iter().any(|c| c.missing > 0)
    }

    /// `(column, missing)` for columns with at least one missing cell, in column order.
    pub fn columns_with_missing(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .filter(|c| c.missing > 0)
            .map(|c| (c.name.as_str(), c.missing))
            .collect()
    }

    /// `true` if any row repeats an earlier row.
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_rows > 0
    }

    /// Missing count for a column by name.
    pub fn missing_for(&self, column: &str) -> Option<usize> {
        self.columns.iter().find(|c| c.name == column).map(|c| c.missing)
    }

    /// Summary statistics for a numeric column by name.
    pub fn summary_for(&self, column: &str) -> Option<&NumericSummary> {
        match &self.summary {
            SummaryStatistics::Numeric(stats) => stats.iter().find(|s| s.column == column),
            SummaryStatistics::NoNumericColumns => None,
        }
    }
}

/// Compute a [`QualityReport`] for `table`.
pub fn quality_report(table: &Table) -> QualityReport {
    QualityReport::from_table(table)
}
