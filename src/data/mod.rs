//! Data module - catalog loading, cleaning and export

mod cleaner;
mod export;
mod loader;

pub use cleaner::{CleanError, Cleaner};
pub use export::CsvExporter;
pub use loader::{CatalogLoader, LoaderError};

use polars::prelude::*;

pub const TITLE: &str = "title";
pub const TYPE: &str = "type";
pub const COUNTRY: &str = "country";
pub const DIRECTOR: &str = "director";
pub const RATING: &str = "rating";
pub const LISTED_IN: &str = "listed_in";
pub const RELEASE_YEAR: &str = "release_year";

/// Columns every catalog file must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    TITLE,
    TYPE,
    COUNTRY,
    DIRECTOR,
    RATING,
    LISTED_IN,
    RELEASE_YEAR,
];

/// Fill value for absent `country` and `director` cells.
pub const UNKNOWN: &str = "Unknown";
/// Fill value for absent `rating` cells.
pub const NOT_RATED: &str = "Not Rated";

/// Separator between genre names inside `listed_in`.
pub const GENRE_SEPARATOR: &str = ", ";

/// Return the first required column the frame lacks, if any.
pub fn first_missing_column(df: &DataFrame) -> Option<&'static str> {
    let names = df.get_column_names();
    REQUIRED_COLUMNS
        .into_iter()
        .find(|required| !names.iter().any(|name| name.as_str() == *required))
}

/// Split a `listed_in` cell into its genre tokens, keeping order and
/// dropping repeats and empty tokens.
pub fn split_genres(listed_in: &str) -> Vec<&str> {
    let mut genres: Vec<&str> = Vec::new();
    for genre in listed_in.split(GENRE_SEPARATOR) {
        if !genre.is_empty() && !genres.contains(&genre) {
            genres.push(genre);
        }
    }
    genres
}

/// Materialize a column as strings (non-string dtypes are cast).
pub fn string_column(df: &DataFrame, name: &str) -> PolarsResult<StringChunked> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.clone())
}
