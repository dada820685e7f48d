//! Stats module - chart aggregations and dataset summary

mod aggregator;
mod summary;

pub use aggregator::{AggregateError, Aggregations, Aggregator, CountEntry, YearTrend};
pub use summary::{ColumnSummary, SummaryCalculator};
