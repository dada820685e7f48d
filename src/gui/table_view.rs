//! Table Views
//! Full catalog grid and the dataset summary grid.

use crate::stats::ColumnSummary;
use egui::{RichText, ScrollArea};
use polars::prelude::*;

const TABLE_HEIGHT: f32 = 320.0;
const MAX_CELL_CHARS: usize = 48;
const CELL_WIDTH: f32 = 140.0;

/// Display text for one cell; absent values render empty.
pub fn cell_text(value: &AnyValue<'_>) -> String {
    let text = match value {
        AnyValue::Null => return String::new(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    };
    truncate(&text, MAX_CELL_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.3}", value)
    }
}

/// Column headers of the catalog grid.
pub fn header_cells(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

/// Display cells of data row `row` (0 = first data row).
pub fn row_cells(df: &DataFrame, row: usize) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|column| column.get(row).map(|v| cell_text(&v)).unwrap_or_default())
        .collect()
}

fn fixed_cell(ui: &mut egui::Ui, text: RichText, height: f32) {
    ui.add_sized([CELL_WIDTH, height], egui::Label::new(text).truncate());
}

/// Scrollable full-table view; only visible rows are materialized.
///
/// The header sits above the vertical scroll area so it stays visible and
/// every scrolled row maps straight to a data row.
pub fn show_catalog_table(ui: &mut egui::Ui, df: &DataFrame) {
    let text_height = ui.text_style_height(&egui::TextStyle::Body);
    let row_height = text_height + 4.0;

    ui.label(
        RichText::new(format!("{} rows × {} columns", df.height(), df.width()))
            .size(11.0)
            .weak(),
    );

    ScrollArea::horizontal()
        .id_salt("catalog_table_h")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("catalog_header")
                .min_col_width(CELL_WIDTH)
                .max_col_width(CELL_WIDTH)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for header in header_cells(df) {
                        fixed_cell(ui, RichText::new(header).strong().size(11.0), text_height);
                    }
                    ui.end_row();
                });
            ui.separator();

            ScrollArea::vertical()
                .id_salt("catalog_table_v")
                .max_height(TABLE_HEIGHT)
                .auto_shrink([false, true])
                .show_rows(ui, row_height, df.height(), |ui, row_range| {
                    egui::Grid::new("catalog_rows")
                        .striped(true)
                        .min_col_width(CELL_WIDTH)
                        .max_col_width(CELL_WIDTH)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for row in row_range {
                                for text in row_cells(df, row) {
                                    fixed_cell(ui, RichText::new(text).size(11.0), text_height);
                                }
                                ui.end_row();
                            }
                        });
                });
        });
}

/// Describe-style summary grid: one line per column.
pub fn show_summary_table(ui: &mut egui::Ui, summary: &[ColumnSummary]) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ScrollArea::horizontal().id_salt("summary_scroll").show(ui, |ui| {
                egui::Grid::new("summary_grid")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Column", "count", "unique", "top", "freq", "mean", "std", "min", "25%",
                            "50%", "75%", "max",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for column in summary {
                            let cells: Vec<String> = match column {
                                ColumnSummary::Categorical {
                                    name,
                                    count,
                                    unique,
                                    top,
                                    freq,
                                } => {
                                    let mut cells = vec![
                                        name.clone(),
                                        count.to_string(),
                                        unique.to_string(),
                                        truncate(top.as_deref().unwrap_or("-"), MAX_CELL_CHARS),
                                        freq.to_string(),
                                    ];
                                    cells.extend(std::iter::repeat("-".to_string()).take(7));
                                    cells
                                }
                                ColumnSummary::Numeric {
                                    name,
                                    count,
                                    mean,
                                    std,
                                    min,
                                    q25,
                                    median,
                                    q75,
                                    max,
                                } => {
                                    let mut cells = vec![
                                        name.clone(),
                                        count.to_string(),
                                        "-".to_string(),
                                        "-".to_string(),
                                        "-".to_string(),
                                    ];
                                    cells.extend(
                                        [*mean, *std, *min, *q25, *median, *q75, *max]
                                            .into_iter()
                                            .map(format_stat),
                                    );
                                    cells
                                }
                            };

                            for cell in cells {
                                ui.label(RichText::new(cell).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
        });
}
