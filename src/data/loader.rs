//! Catalog Loader Module
//! Reads the catalog CSV with Polars and memoizes it for the process lifetime.

use super::first_missing_column;
use once_cell::sync::Lazy;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found or unreadable: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Required column '{0}' is missing from the input")]
    MissingColumn(&'static str),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loaded tables keyed by canonical path. Never invalidated.
static TABLE_CACHE: Lazy<Mutex<HashMap<PathBuf, DataFrame>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Loads catalog CSV files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog, reusing an earlier load of the same file.
    ///
    /// The returned frame is a cheap clone of the cached one, so callers may
    /// consume it (e.g. hand it to the cleaner) without touching the cache.
    pub fn load(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let path = path.as_ref();
        let key = std::fs::canonicalize(path)
            .map_err(|_| LoaderError::InputNotFound(path.to_path_buf()))?;

        let mut cache = TABLE_CACHE
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(df) = cache.get(&key) {
            tracing::debug!(path = %key.display(), "catalog cache hit");
            return Ok(df.clone());
        }

        let df = Self::read(&key)?;
        cache.insert(key, df.clone());
        Ok(df)
    }

    /// Read and validate a catalog without consulting the cache.
    pub fn read(path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::InputNotFound(path.to_path_buf()));
        }
        // Permission and other open failures are reported like a missing file
        if let Err(e) = std::fs::File::open(path) {
            tracing::error!(path = %path.display(), "cannot open catalog: {e}");
            return Err(LoaderError::InputNotFound(path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if let Some(missing) = first_missing_column(&df) {
            tracing::error!(path = %path.display(), column = missing, "catalog rejected");
            return Err(LoaderError::MissingColumn(missing));
        }

        tracing::info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "catalog loaded"
        );
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{COUNTRY, RELEASE_YEAR, TITLE};
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str =
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn reads_catalog_with_empty_cells_as_nulls() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "titles.csv",
            &[
                HEADER,
                r#"s1,Movie,Alpha,,,"United States, India",,2019,PG,90 min,"Dramas, Comedies",x"#,
                r#"s2,TV Show,Beta,Kim,,,,2020,,1 Season,Dramas,y"#,
            ],
        );

        let df = CatalogLoader::read(&path).unwrap();
        assert_eq!(df.height(), 2);

        let titles = df.column(TITLE).unwrap().str().unwrap();
        assert_eq!(titles.get(0), Some("Alpha"));

        let countries = df.column(COUNTRY).unwrap().str().unwrap();
        assert_eq!(countries.get(0), Some("United States, India"));
        assert_eq!(countries.get(1), None);

        let years = df.column(RELEASE_YEAR).unwrap().cast(&DataType::Int64).unwrap();
        assert_eq!(years.i64().unwrap().get(1), Some(2020));
    }

    #[test]
    fn missing_file_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        assert!(matches!(
            CatalogLoader::read(&path),
            Err(LoaderError::InputNotFound(_))
        ));
        assert!(matches!(
            CatalogLoader::load(&path),
            Err(LoaderError::InputNotFound(_))
        ));
    }

    #[test]
    fn directory_path_is_input_not_found() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            CatalogLoader::read(dir.path()),
            Err(LoaderError::InputNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_input_not_found() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "locked.csv", &[HEADER]);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; only assert when the open really fails.
        if std::fs::File::open(&path).is_err() {
            assert!(matches!(
                CatalogLoader::read(&path),
                Err(LoaderError::InputNotFound(_))
            ));
        }
    }

    #[test]
    fn quoted_empty_cells_are_cleaned_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "quoted.csv",
            &[
                "title,type,country,director,rating,listed_in,release_year",
                r#"A,Movie,India,Ann,PG,Dramas,2019"#,
                r#""",Movie,"",Bo,"",Dramas,2019"#,
                r#"C,TV Show,"",Cy,"",Comedies,2020"#,
            ],
        );

        let cleaned = crate::data::Cleaner::clean(CatalogLoader::read(&path).unwrap()).unwrap();

        assert_eq!(cleaned.height(), 2);
        let titles = cleaned.column(TITLE).unwrap().str().unwrap();
        assert_eq!(titles.get(1), Some("C"));
        let countries = cleaned.column(COUNTRY).unwrap().str().unwrap();
        assert_eq!(countries.get(1), Some("Unknown"));
        let ratings = cleaned.column("rating").unwrap().str().unwrap();
        assert_eq!(ratings.get(1), Some("Not Rated"));
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "no_rating.csv",
            &[
                "title,type,country,director,listed_in,release_year",
                "A,Movie,India,Ann,Dramas,2019",
            ],
        );

        assert!(matches!(
            CatalogLoader::read(&path),
            Err(LoaderError::MissingColumn("rating"))
        ));
    }

    #[test]
    fn load_is_memoized_per_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "cached.csv",
            &[HEADER, "s1,Movie,Alpha,Ann,,India,,2019,PG,90 min,Dramas,x"],
        );

        let first = CatalogLoader::load(&path).unwrap();

        // Rewriting the file must not change what the cache hands out.
        write_csv(
            dir.path(),
            "cached.csv",
            &[
                HEADER,
                "s1,Movie,Alpha,Ann,,India,,2019,PG,90 min,Dramas,x",
                "s2,Movie,Beta,Bo,,Japan,,2020,R,80 min,Comedies,y",
            ],
        );
        let second = CatalogLoader::load(&path).unwrap();

        assert_eq!(first.height(), 1);
        assert!(first.equals_missing(&second));
    }
}
