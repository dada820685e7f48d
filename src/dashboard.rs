//! Dashboard Pipeline
//! Load → clean → summarize → aggregate, recomputed on demand.

use crate::config::DashboardConfig;
use crate::data::{CatalogLoader, CleanError, Cleaner, LoaderError};
use crate::stats::{AggregateError, Aggregations, ColumnSummary, SummaryCalculator};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error("Summary failed: {0}")]
    Summary(#[from] PolarsError),
}

/// Everything the page shows, derived from one cleaned table.
pub struct Dashboard {
    pub table: DataFrame,
    pub summary: Vec<ColumnSummary>,
    pub aggregations: Aggregations,
}

/// Serializable snapshot of the computed results.
#[derive(Serialize)]
pub struct DashboardReport<'a> {
    pub rows: usize,
    pub summary: &'a [ColumnSummary],
    pub aggregations: &'a Aggregations,
}

impl Dashboard {
    /// Run the full pipeline for the configured catalog.
    pub fn build(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let raw = CatalogLoader::load(&config.data_path)?;
        Self::from_raw(raw, config.top_n)
    }

    /// Run clean → summarize → aggregate on an already loaded table.
    pub fn from_raw(raw: DataFrame, top_n: usize) -> Result<Self, DashboardError> {
        let table = Cleaner::clean(raw)?;
        let summary = SummaryCalculator::describe(&table)?;
        let aggregations = Aggregations::compute(&table, top_n)?;

        tracing::info!(
            rows = table.height(),
            years_accounted = aggregations.titles_per_year.total(),
            "dashboard computed"
        );

        Ok(Self {
            table,
            summary,
            aggregations,
        })
    }

    pub fn report(&self) -> DashboardReport<'_> {
        DashboardReport {
            rows: self.table.height(),
            summary: &self.summary,
            aggregations: &self.aggregations,
        }
    }

    /// Pretty-printed JSON of [`Dashboard::report`].
    pub fn report_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::raw_catalog;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn from_raw_produces_consistent_results() {
        let dashboard = Dashboard::from_raw(raw_catalog(), 10).unwrap();

        let rows = dashboard.table.height();
        assert_eq!(rows, 3);
        assert_eq!(dashboard.summary.len(), dashboard.table.width());

        let types: usize = dashboard
            .aggregations
            .type_distribution
            .iter()
            .map(|e| e.count)
            .sum();
        assert_eq!(types, rows);
        assert_eq!(dashboard.aggregations.titles_per_year.total(), rows);
    }

    #[test]
    fn build_reads_configured_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netflix_titles.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "show_id,type,title,director,country,release_year,rating,listed_in").unwrap();
        writeln!(file, "s1,Movie,A,,,2019,,\"Dramas, Comedies\"").unwrap();
        writeln!(file, "s2,,B,Ann,India,2020,PG,Dramas").unwrap();
        writeln!(file, "s3,TV Show,C,Bo,India,2020,TV-MA,").unwrap();
        drop(file);

        let config = DashboardConfig {
            data_path: path,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::build(&config).unwrap();

        assert_eq!(dashboard.table.height(), 2);
        assert_eq!(dashboard.aggregations.top_genres.len(), 2);
        assert_eq!(dashboard.aggregations.top_countries[0].label, "Unknown");
    }

    #[test]
    fn build_surfaces_missing_input() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("missing.csv"),
            ..DashboardConfig::default()
        };

        assert!(matches!(
            Dashboard::build(&config),
            Err(DashboardError::Load(LoaderError::InputNotFound(_)))
        ));
    }

    #[test]
    fn report_serializes_aggregations() {
        let dashboard = Dashboard::from_raw(raw_catalog(), 10).unwrap();
        let json: serde_json::Value = serde_json::from_str(&dashboard.report_json().unwrap()).unwrap();

        assert_eq!(json["rows"], 3);
        assert_eq!(json["aggregations"]["top_genres"][0]["label"], "Dramas");
        assert_eq!(json["summary"][0]["kind"], "categorical");
    }
}
