//! Netflix Insights - catalog cleaning & chart dashboard
//!
//! Loads the Netflix titles CSV, fills absent values, and shows descriptive
//! charts with a cleaned-data download.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `RUST_LOG` wins over the configured level; unknown levels fall back to info.
fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::init()?;
    init_logging(&config.log_level);
    tracing::info!(data_path = %config.data_path.display(), top_n = config.top_n, "starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Netflix Dataset Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "Netflix Insights",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run dashboard: {e}"))
}
