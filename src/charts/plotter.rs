//! Chart Plotter Module
//! Interactive dashboard charts using egui_plot.

use super::{category_label, palette_color, Rgb, TREND_GREEN};
use crate::stats::{CountEntry, YearTrend};
use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

/// Bar direction of a count chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrientation {
    Vertical,
    /// Highest count drawn at the top.
    Horizontal,
}

fn to_color32((r, g, b): Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws the dashboard charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Axis position of entry `index` out of `len`.
    pub fn bar_position(orientation: BarOrientation, index: usize, len: usize) -> usize {
        match orientation {
            BarOrientation::Vertical => index,
            BarOrientation::Horizontal => len - 1 - index,
        }
    }

    /// Draw a count chart: one bar per entry, labelled on the category axis.
    pub fn draw_count_chart(
        ui: &mut egui::Ui,
        id: &str,
        entries: &[CountEntry],
        palette: &[Rgb],
        orientation: BarOrientation,
        axis_labels: (&str, &str),
        height: f32,
    ) {
        let n = entries.len();
        let mut labels = vec![String::new(); n];

        let bars: Vec<Bar> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let position = Self::bar_position(orientation, i, n);
                labels[position] = entry.label.clone();
                Bar::new(position as f64, entry.count as f64)
                    .name(&entry.label)
                    .width(0.6)
                    .fill(to_color32(palette_color(palette, i, n)))
            })
            .collect();

        let mut chart = BarChart::new(bars).name(id);
        if orientation == BarOrientation::Horizontal {
            chart = chart.horizontal();
        }

        let (x_label, y_label) = axis_labels;
        let mut plot = Plot::new(id)
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label);

        plot = match orientation {
            BarOrientation::Vertical => {
                plot.x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            }
            BarOrientation::Horizontal => {
                plot.y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            }
        };

        plot.show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
    }

    /// Draw the titles-per-year line with point markers.
    pub fn draw_year_trend(ui: &mut egui::Ui, trend: &YearTrend, height: f32) {
        let points: Vec<[f64; 2]> = trend
            .points
            .iter()
            .map(|&(year, count)| [year as f64, count as f64])
            .collect();
        let color = to_color32(TREND_GREEN);

        Plot::new("titles_per_year")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Number of Titles Released")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name("Titles"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(color),
                );
            });
    }
}
