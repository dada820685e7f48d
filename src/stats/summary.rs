//! Summary Statistics Module
//! Describe-style per-column statistics for the dataset summary panel.

use super::Aggregator;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric {
        name: String,
        count: usize,
        mean: f64,
        std: f64,
        min: f64,
        q25: f64,
        median: f64,
        q75: f64,
        max: f64,
    },
    Categorical {
        name: String,
        count: usize,
        unique: usize,
        top: Option<String>,
        freq: usize,
    },
}

impl ColumnSummary {
    pub fn name(&self) -> &str {
        match self {
            ColumnSummary::Numeric { name, .. } | ColumnSummary::Categorical { name, .. } => name,
        }
    }
}

/// Computes describe-style statistics with multi-threading support.
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Summarize every column, in table order.
    pub fn describe(df: &DataFrame) -> PolarsResult<Vec<ColumnSummary>> {
        df.get_columns()
            .par_iter()
            .map(|column| {
                if Self::is_numeric(column.dtype()) {
                    Self::describe_numeric(column)
                } else {
                    Self::describe_categorical(column)
                }
            })
            .collect()
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    fn describe_numeric(column: &Column) -> PolarsResult<ColumnSummary> {
        let as_f64 = column.cast(&DataType::Float64)?;
        let values: Vec<f64> = as_f64
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Ok(ColumnSummary::Numeric {
            name: column.name().to_string(),
            count: values.len(),
            mean: Statistics::mean(values.iter()),
            std: Statistics::std_dev(values.iter()),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        })
    }

    fn describe_categorical(column: &Column) -> PolarsResult<ColumnSummary> {
        let as_text = column.cast(&DataType::String)?;
        let counts = Aggregator::value_counts(as_text.str()?.into_iter().flatten());

        Ok(ColumnSummary::Categorical {
            name: column.name().to_string(),
            count: counts.iter().map(|entry| entry.count).sum(),
            unique: counts.len(),
            top: counts.first().map(|entry| entry.label.clone()),
            freq: counts.first().map(|entry| entry.count).unwrap_or(0),
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::raw_catalog;
    use crate::data::Cleaner;

    fn find<'a>(summary: &'a [ColumnSummary], name: &str) -> &'a ColumnSummary {
        summary.iter().find(|s| s.name() == name).unwrap()
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(SummaryCalculator::percentile(&sorted, 0.0), 1.0);
        assert_eq!(SummaryCalculator::percentile(&sorted, 25.0), 1.75);
        assert_eq!(SummaryCalculator::percentile(&sorted, 50.0), 2.5);
        assert_eq!(SummaryCalculator::percentile(&sorted, 100.0), 4.0);
        assert!(SummaryCalculator::percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn describe_keeps_column_order() {
        let df = raw_catalog();
        let summary = SummaryCalculator::describe(&df).unwrap();

        let names: Vec<&str> = summary.iter().map(ColumnSummary::name).collect();
        let column_names = df.get_column_names();
        let expected: Vec<&str> = column_names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn numeric_columns_get_moments_and_quartiles() {
        let cleaned = Cleaner::clean(raw_catalog()).unwrap();
        let summary = SummaryCalculator::describe(&cleaned).unwrap();

        match find(&summary, "release_year") {
            ColumnSummary::Numeric {
                count,
                mean,
                std,
                min,
                median,
                max,
                ..
            } => {
                assert_eq!(*count, 3);
                assert!((mean - 2018.6667).abs() < 1e-3);
                assert!((std - 0.57735).abs() < 1e-4);
                assert_eq!(*min, 2018.0);
                assert_eq!(*median, 2019.0);
                assert_eq!(*max, 2019.0);
            }
            other => panic!("expected numeric summary, got {other:?}"),
        }
    }

    #[test]
    fn categorical_columns_get_top_and_freq() {
        let summary = SummaryCalculator::describe(&raw_catalog()).unwrap();

        assert_eq!(
            find(&summary, "country"),
            &ColumnSummary::Categorical {
                name: "country".into(),
                count: 4,
                unique: 3,
                top: Some("India".into()),
                freq: 2,
            }
        );
        assert!(matches!(
            find(&summary, "title"),
            ColumnSummary::Categorical { count: 4, .. }
        ));
    }
}
