//! Catalog Aggregator Module
//! Count-based summaries feeding the four dashboard charts.

use crate::data::{split_genres, string_column, COUNTRY, LISTED_IN, RELEASE_YEAR, TYPE};
use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One bar of a count chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

impl CountEntry {
    fn new(label: &str, count: usize) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

/// Titles per release year, ascending by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YearTrend {
    pub points: Vec<(i64, usize)>,
    /// Rows whose release year is absent or not an integer.
    pub unknown: usize,
}

impl YearTrend {
    pub fn total(&self) -> usize {
        self.points.iter().map(|(_, count)| count).sum::<usize>() + self.unknown
    }
}

/// All chart inputs derived from one cleaned table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregations {
    pub type_distribution: Vec<CountEntry>,
    pub top_countries: Vec<CountEntry>,
    pub top_genres: Vec<CountEntry>,
    pub titles_per_year: YearTrend,
}

impl Aggregations {
    pub fn compute(df: &DataFrame, top_n: usize) -> Result<Self, AggregateError> {
        Ok(Self {
            type_distribution: Aggregator::type_distribution(df)?,
            top_countries: Aggregator::top_countries(df, top_n)?,
            top_genres: Aggregator::top_genres(df, top_n)?,
            titles_per_year: Aggregator::titles_per_year(df)?,
        })
    }
}

/// Stateless derivations over the cleaned catalog.
pub struct Aggregator;

impl Aggregator {
    /// Count occurrences of each distinct value, highest count first.
    ///
    /// The sort is stable, so equal counts keep first-appearance order.
    pub fn value_counts<'a, I>(values: I) -> Vec<CountEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut counts: Vec<(&'a str, usize)> = Vec::new();

        for value in values {
            match index.get(value) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .map(|(label, count)| CountEntry::new(label, count))
            .collect()
    }

    /// Rows per distinct `type`.
    pub fn type_distribution(df: &DataFrame) -> Result<Vec<CountEntry>, AggregateError> {
        let types = string_column(df, TYPE)?;
        let counts = Self::value_counts(types.into_iter().flatten());
        tracing::debug!(distinct = counts.len(), "type distribution computed");
        Ok(counts)
    }

    /// The `top_n` most frequent `country` values.
    pub fn top_countries(df: &DataFrame, top_n: usize) -> Result<Vec<CountEntry>, AggregateError> {
        let countries = string_column(df, COUNTRY)?;
        let mut counts = Self::value_counts(countries.into_iter().flatten());
        counts.truncate(top_n);
        tracing::debug!(shown = counts.len(), "top countries computed");
        Ok(counts)
    }

    /// The `top_n` most frequent genres across `listed_in`.
    ///
    /// Rows with an absent `listed_in` contribute nothing; a row lists each
    /// genre at most once.
    pub fn top_genres(df: &DataFrame, top_n: usize) -> Result<Vec<CountEntry>, AggregateError> {
        let listed_in = string_column(df, LISTED_IN)?;
        let genres: Vec<&str> = listed_in
            .into_iter()
            .flatten()
            .flat_map(split_genres)
            .collect();

        let mut counts = Self::value_counts(genres);
        counts.truncate(top_n);
        tracing::debug!(shown = counts.len(), "top genres computed");
        Ok(counts)
    }

    /// Rows per release year, ascending by year.
    pub fn titles_per_year(df: &DataFrame) -> Result<YearTrend, AggregateError> {
        // Non-integer years become null under the non-strict cast
        let years = df.column(RELEASE_YEAR)?.cast(&DataType::Int64)?;

        let mut by_year: BTreeMap<i64, usize> = BTreeMap::new();
        let mut unknown = 0;
        for year in years.i64()?.into_iter() {
            match year {
                Some(year) => *by_year.entry(year).or_default() += 1,
                None => unknown += 1,
            }
        }

        if unknown > 0 {
            tracing::warn!(rows = unknown, "release_year absent or malformed");
        }

        Ok(YearTrend {
            points: by_year.into_iter().collect(),
            unknown,
        })
    }
}
