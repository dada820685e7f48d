//! CSV Export Module
//! Serializes the cleaned catalog for download.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes cleaned tables as CSV text with a header row and no index column.
pub struct CsvExporter;

impl CsvExporter {
    /// Serialize the table to CSV bytes.
    pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
        // CsvWriter needs a mutable frame; the clone only bumps Arc counts
        let mut df = df.clone();
        let mut buffer: Vec<u8> = Vec::new();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut df)?;
        Ok(buffer)
    }

    /// Serialize the table and write it to `path`.
    pub fn write_csv(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
        let bytes = Self::to_csv_bytes(df)?;
        std::fs::write(path, &bytes)?;
        tracing::info!(
            path = %path.display(),
            rows = df.height(),
            bytes = bytes.len(),
            "cleaned catalog exported"
        );
        Ok(())
    }
}
