//! Netflix Insights Main Application
//! Single scrolling page: dataset, summary, four charts and downloads.

use crate::charts::{BarOrientation, ChartPlotter, StaticChartRenderer, COOLWARM, MAKO, VIRIDIS};
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::data::CsvExporter;
use crate::gui::table_view::{show_catalog_table, show_summary_table};
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 300.0;

/// Result of the last pipeline run.
enum DashboardState {
    Ready(Box<Dashboard>),
    Failed(String),
}

/// User actions collected while drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageAction {
    None,
    Reload,
    DownloadCsv,
    SaveCharts,
    SaveReport,
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    state: DashboardState,
    status: String,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let state = Self::compute(&config);
        Self {
            config,
            state,
            status: "Ready".to_string(),
        }
    }

    fn compute(config: &DashboardConfig) -> DashboardState {
        match Dashboard::build(config) {
            Ok(dashboard) => DashboardState::Ready(Box::new(dashboard)),
            Err(e) => {
                tracing::error!("Dashboard pipeline failed: {e}");
                DashboardState::Failed(e.to_string())
            }
        }
    }

    fn handle_action(&mut self, action: PageAction) {
        match action {
            PageAction::None => {}
            PageAction::Reload => {
                self.state = Self::compute(&self.config);
                self.status = "Recomputed".to_string();
            }
            PageAction::DownloadCsv => self.handle_download_csv(),
            PageAction::SaveCharts => self.handle_save_charts(),
            PageAction::SaveReport => self.handle_save_report(),
        }
    }

    /// Save the cleaned table as CSV via a save dialog.
    fn handle_download_csv(&mut self) {
        let DashboardState::Ready(dashboard) = &self.state else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&self.config.export_file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        self.status = match CsvExporter::write_csv(&dashboard.table, &path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                tracing::error!("CSV export failed: {e}");
                format!("Error: {}", e)
            }
        };
    }

    /// Render the four charts as PNG files into a chosen folder.
    fn handle_save_charts(&mut self) {
        let DashboardState::Ready(dashboard) = &self.state else {
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        self.status = match StaticChartRenderer::save_all(
            &dashboard.aggregations,
            self.config.top_n,
            &dir,
            self.config.chart_width,
            self.config.chart_height,
        ) {
            Ok(paths) => format!("Saved {} charts to {}", paths.len(), dir.display()),
            Err(e) => {
                tracing::error!("Chart export failed: {e}");
                format!("Error: {}", e)
            }
        };
    }

    /// Save summary and aggregations as JSON.
    fn handle_save_report(&mut self) {
        let DashboardState::Ready(dashboard) = &self.state else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("netflix_summary.json")
            .save_file()
        else {
            return;
        };

        let result = dashboard
            .report_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));

        self.status = match result {
            Ok(()) => {
                tracing::info!(path = %path.display(), "summary report saved");
                format!("Saved {}", path.display())
            }
            Err(e) => {
                tracing::error!("Report export failed: {e}");
                format!("Error: {}", e)
            }
        };
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.add_space(12.0);
        ui.separator();
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(4.0);
    }

    fn show_dashboard(ui: &mut egui::Ui, dashboard: &Dashboard, top_n: usize) -> PageAction {
        let mut action = PageAction::None;
        let aggs = &dashboard.aggregations;

        Self::section(ui, "Netflix Dataset");
        show_catalog_table(ui, &dashboard.table);

        Self::section(ui, "Dataset Summary");
        show_summary_table(ui, &dashboard.summary);

        Self::section(ui, "Movies vs TV Shows");
        ChartPlotter::draw_count_chart(
            ui,
            "type_distribution",
            &aggs.type_distribution,
            &VIRIDIS,
            BarOrientation::Vertical,
            ("Type", "Count"),
            CHART_HEIGHT,
        );

        Self::section(
            ui,
            &format!("Top {} Countries Producing Netflix Content", top_n),
        );
        ChartPlotter::draw_count_chart(
            ui,
            "top_countries",
            &aggs.top_countries,
            &COOLWARM,
            BarOrientation::Horizontal,
            ("Count", "Country"),
            CHART_HEIGHT,
        );

        Self::section(ui, "Top Genres on Netflix");
        ChartPlotter::draw_count_chart(
            ui,
            "top_genres",
            &aggs.top_genres,
            &MAKO,
            BarOrientation::Horizontal,
            ("Count", "Genre"),
            CHART_HEIGHT,
        );

        Self::section(ui, "Content Trend Over the Years");
        ChartPlotter::draw_year_trend(ui, &aggs.titles_per_year, CHART_HEIGHT);
        if aggs.titles_per_year.unknown > 0 {
            ui.label(
                RichText::new(format!(
                    "{} titles without a valid release year are not plotted",
                    aggs.titles_per_year.unknown
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        }

        Self::section(ui, "Download Cleaned Dataset");
        ui.horizontal(|ui| {
            if ui.button("Download Cleaned Dataset as CSV").clicked() {
                action = PageAction::DownloadCsv;
            }
            if ui.button("Save charts as PNG").clicked() {
                action = PageAction::SaveCharts;
            }
            if ui.button("Save summary as JSON").clicked() {
                action = PageAction::SaveReport;
            }
        });

        action
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = PageAction::None;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reload").clicked() {
                    action = PageAction::Reload;
                }
                ui.label(RichText::new(&self.status).size(12.0));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().id_salt("page").show(ui, |ui| {
                ui.label(
                    RichText::new("Netflix Dataset Analysis")
                        .size(26.0)
                        .color(Color32::from_rgb(229, 9, 20)),
                );

                match &self.state {
                    DashboardState::Ready(dashboard) => {
                        let page_action = Self::show_dashboard(ui, dashboard, self.config.top_n);
                        if page_action != PageAction::None {
                            action = page_action;
                        }
                    }
                    DashboardState::Failed(message) => {
                        ui.add_space(20.0);
                        ui.label(
                            RichText::new(format!("Error: {}", message))
                                .size(16.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                        ui.label(format!(
                            "Data file: {}",
                            self.config.data_path.display()
                        ));
                    }
                }
            });
        });

        self.handle_action(action);
    }
}
