//! Catalog Cleaner Module
//! Drops unidentifiable rows and fills absent descriptive cells.

use super::{
    first_missing_column, string_column, COUNTRY, DIRECTOR, NOT_RATED, RATING, TITLE, TYPE, UNKNOWN,
};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column '{0}' is missing")]
    MissingColumn(&'static str),
}

/// Applies the catalog cleaning rules.
pub struct Cleaner;

impl Cleaner {
    /// Produce the cleaned table.
    ///
    /// - rows with an absent `title` or `type` are removed
    /// - absent `country` / `director` become `"Unknown"`
    /// - absent `rating` becomes `"Not Rated"`
    ///
    /// Absent means null or the empty string; a quoted `""` in the CSV is
    /// read as an empty string, an unquoted empty cell as null.
    /// Running the cleaner on its own output returns an identical table.
    pub fn clean(df: DataFrame) -> Result<DataFrame, CleanError> {
        if let Some(missing) = first_missing_column(&df) {
            return Err(CleanError::MissingColumn(missing));
        }

        let rows_before = df.height();
        let kept = df
            .lazy()
            .filter(Self::present(TITLE).and(Self::present(TYPE)))
            .collect()?;

        let mut cells_filled = 0;
        for name in [COUNTRY, DIRECTOR, RATING] {
            cells_filled += Self::absent_count(&kept, name)?;
        }

        let cleaned = kept
            .lazy()
            .with_columns([
                Self::fill_text(COUNTRY, UNKNOWN),
                Self::fill_text(DIRECTOR, UNKNOWN),
                Self::fill_text(RATING, NOT_RATED),
            ])
            .collect()?;

        tracing::info!(
            rows_in = rows_before,
            rows_out = cleaned.height(),
            rows_dropped = rows_before - cleaned.height(),
            cells_filled,
            "catalog cleaned"
        );
        Ok(cleaned)
    }

    /// True where the cell is neither null nor empty.
    fn present(name: &str) -> Expr {
        // `neq` on a null cell yields null, which the filter drops
        col(name)
            .is_not_null()
            .and(col(name).cast(DataType::String).neq(lit("")))
    }

    fn absent_count(df: &DataFrame, name: &str) -> PolarsResult<usize> {
        let values = string_column(df, name)?;
        Ok(values
            .into_iter()
            .filter(|value| value.map_or(true, str::is_empty))
            .count())
    }

    fn fill_text(name: &str, fill: &str) -> Expr {
        let text = col(name).cast(DataType::String);
        when(text.clone().is_null().or(text.clone().eq(lit(""))))
            .then(lit(fill))
            .otherwise(text)
            .alias(name)
    }
}
