//! Dashboard Configuration
//! JSON settings file with defaults for every field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "NETFLIX_INSIGHTS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./dashboard.json";
/// Largest accepted chart image side, in pixels.
pub const MAX_CHART_SIDE: u32 = 8192;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Catalog CSV, relative to the working directory.
    pub data_path: PathBuf,
    /// Suggested file name for the cleaned-data download.
    pub export_file_name: String,
    /// Length of the country and genre rankings.
    pub top_n: usize,
    pub log_level: String,
    /// Size of exported chart images.
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("netflix_titles.csv"),
            export_file_name: "cleaned_netflix_titles.csv".to_string(),
            top_n: 10,
            log_level: "info".to_string(),
            chart_width: 1000,
            chart_height: 600,
        }
    }
}

impl DashboardConfig {
    /// Load from the file named by `NETFLIX_INSIGHTS_CONFIG` (default `./dashboard.json`).
    pub fn init() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(Path::new(&path))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        for (field, side) in [("chart_width", self.chart_width), ("chart_height", self.chart_height)] {
            if side == 0 || side > MAX_CHART_SIDE {
                return Err(format!("{field} must be within 1..={MAX_CHART_SIDE}, got {side}"));
            }
        }
        if self.top_n == 0 {
            return Err("top_n must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::from_file(&dir.path().join("absent.json")).unwrap();

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.top_n, 10);
        assert_eq!(config.data_path, PathBuf::from("netflix_titles.csv"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "top_n": 5, "data_path": "data/titles.csv" }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();

        assert_eq!(config.top_n, 5);
        assert_eq!(config.data_path, PathBuf::from("data/titles.csv"));
        assert_eq!(config.export_file_name, "cleaned_netflix_titles.csv");
    }

    #[test]
    fn out_of_range_chart_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");

        for body in [
            r#"{ "chart_width": 100000, "chart_height": 100000 }"#,
            r#"{ "chart_width": 0 }"#,
            r#"{ "top_n": 0 }"#,
        ] {
            std::fs::write(&path, body).unwrap();
            assert!(
                matches!(DashboardConfig::from_file(&path), Err(ConfigError::Invalid { .. })),
                "{body}"
            );
        }

        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, "{ top_n: ").unwrap();

        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
