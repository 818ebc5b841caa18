//! Summary statistics for numeric columns.

use serde::Serialize;

use crate::types::{Table, Value};

/// Descriptive statistics of one numeric column, ignoring missing values.
///
/// Statistics that are undefined are `None`: everything but `count` for an all-missing column,
/// `std` for fewer than two values, and any statistic that would be NaN (a column holding both
/// `inf` and `-inf`). Summaries therefore always compare equal to themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Column name.
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (`n - 1` denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    /// 25th percentile.
    pub q25: Option<f64>,
    /// 50th percentile.
    pub median: Option<f64>,
    /// 75th percentile.
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    /// Summarize the column at `idx` of `table`.
    ///
    /// Non-numeric values are ignored; callers pass numeric columns only.
    pub fn for_column(table: &Table, idx: usize) -> Self {
        let column = table
            .schema()
            .fields
            .get(idx)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        let values: Vec<f64> = table.column_values(idx).filter_map(Value::as_f64).collect();
        Self::from_values(column, values)
    }

    fn from_values(column: String, mut values: Vec<f64>) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                column,
                count,
                mean: None,
                std: None,
                min: None,
                q25: None,
                median: None,
                q75: None,
                max: None,
            };
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        });

        values.sort_by(f64::total_cmp);

        Self {
            column,
            count,
            mean: defined(mean),
            std: std.and_then(defined),
            min: values.first().copied(),
            q25: defined(quantile(&values, 0.25)),
            median: defined(quantile(&values, 0.5)),
            q75: defined(quantile(&values, 0.75)),
            max: values.last().copied(),
        }
    }
}

fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if frac == 0.0 || sorted[lo] == sorted[hi] {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::{quantile, NumericSummary};
    use crate::types::{DataType, Field, Schema, Table, Value};

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn quantile_interpolates_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn summary_ignores_nulls() {
        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let table = Table::new(
            schema,
            vec![
                vec![Value::Float64(4.0)],
                vec![Value::Null],
                vec![Value::Float64(1.0)],
                vec![Value::Float64(2.0)],
                vec![Value::Float64(3.0)],
            ],
        )
        .unwrap();

        let s = NumericSummary::for_column(&table, 0);
        assert_eq!(s.column, "score");
        assert_eq!(s.count, 4);
        assert!(approx(s.mean, 2.5));
        assert!(approx(s.std, (5.0f64 / 3.0).sqrt()));
        assert_eq!(s.min, Some(1.0));
        assert!(approx(s.q25, 1.75));
        assert!(approx(s.median, 2.5));
        assert!(approx(s.q75, 3.25));
        assert_eq!(s.max, Some(4.0));
    }

    #[test]
    fn integer_columns_are_summarized_as_floats() {
        let schema = Schema::new(vec![Field::new("n", DataType::Int64)]);
        let table = Table::new(schema, vec![vec![Value::Int64(5)]]).unwrap();

        let s = NumericSummary::for_column(&table, 0);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, Some(5.0));
        assert_eq!(s.std, None);
        assert_eq!(s.median, Some(5.0));
    }

    #[test]
    fn opposite_infinities_leave_nan_statistics_undefined() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let table = Table::new(
            schema,
            vec![
                vec![Value::Float64(f64::INFINITY)],
                vec![Value::Float64(f64::NEG_INFINITY)],
                vec![Value::Float64(1.0)],
            ],
        )
        .unwrap();

        let s = NumericSummary::for_column(&table, 0);
        assert_eq!(s.count, 3);
        assert_eq!(s.mean, None);
        assert_eq!(s.std, None);
        assert_eq!(s.min, Some(f64::NEG_INFINITY));
        assert_eq!(s.q25, None);
        assert_eq!(s.median, Some(1.0));
        assert_eq!(s.max, Some(f64::INFINITY));
        assert_eq!(s, NumericSummary::for_column(&table, 0));
    }

    #[test]
    fn all_missing_column_has_only_a_count() {
        let schema = Schema::new(vec![Field::new("empty", DataType::Float64)]);
        let table = Table::new(schema, vec![vec![Value::Null], vec![Value::Null]]).unwrap();

        let s = NumericSummary::for_column(&table, 0);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.min, None);
        assert_eq!(s.max, None);
    }
}
