//! Static Chart Renderer
//! Renders the dashboard charts to PNG files with plotters.
//!
//! Layout per image:
//! 1. Caption centered at the top
//! 2. Bar chart (vertical or horizontal) or year line chart
//! 3. Axis descriptions on both axes

use super::{
    category_label, palette_color, BarOrientation, ChartPlotter, Rgb, COOLWARM, MAKO, TREND_GREEN,
    VIRIDIS,
};
use crate::stats::{Aggregations, CountEntry, YearTrend};
use image::RgbImage;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Invalid pixel buffer size {0}x{1}")]
    Buffer(u32, u32),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Byte length of an RGB buffer, rejecting empty or overflowing sizes.
fn buffer_len(width: u32, height: u32) -> Result<usize, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::Buffer(width, height));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(RenderError::Buffer(width, height))
}

fn rgb((r, g, b): Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

/// Description of one count chart.
pub struct BarSpec<'a> {
    pub title: &'a str,
    pub entries: &'a [CountEntry],
    pub palette: &'a [Rgb],
    pub orientation: BarOrientation,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Upper bound of the count axis, padded 10% above the largest count.
    pub fn count_axis_max(entries: &[CountEntry]) -> f64 {
        let max = entries.iter().map(|e| e.count).max().unwrap_or(0) as f64;
        (max * 1.1).max(1.0)
    }

    /// Render a count chart into an RGB image.
    pub fn render_bar_chart(spec: &BarSpec<'_>, width: u32, height: u32) -> Result<RgbImage, RenderError> {
        let mut buffer = vec![0u8; buffer_len(width, height)?];
        let n = spec.entries.len();
        let count_max = Self::count_axis_max(spec.entries);
        let category_range = -0.5f64..(n.max(1) as f64 - 0.5);

        let mut labels = vec![String::new(); n];
        for (i, entry) in spec.entries.iter().enumerate() {
            labels[ChartPlotter::bar_position(spec.orientation, i, n)] = entry.label.clone();
        }

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let label_formatter = |v: &f64| category_label(&labels, *v);

            match spec.orientation {
                BarOrientation::Vertical => {
                    let mut chart = ChartBuilder::on(&root)
                        .caption(spec.title, ("sans-serif", 24))
                        .margin(20)
                        .x_label_area_size(50)
                        .y_label_area_size(60)
                        .build_cartesian_2d(category_range, 0f64..count_max)
                        .map_err(draw_err)?;

                    chart
                        .configure_mesh()
                        .disable_x_mesh()
                        .x_labels(n.max(1))
                        .x_label_formatter(&label_formatter)
                        .x_desc(spec.x_desc)
                        .y_desc(spec.y_desc)
                        .draw()
                        .map_err(draw_err)?;

                    chart
                        .draw_series(spec.entries.iter().enumerate().map(|(i, entry)| {
                            let x = i as f64;
                            let color = rgb(palette_color(spec.palette, i, n));
                            Rectangle::new([(x - 0.3, 0.0), (x + 0.3, entry.count as f64)], color.filled())
                        }))
                        .map_err(draw_err)?;
                }
                BarOrientation::Horizontal => {
                    let mut chart = ChartBuilder::on(&root)
                        .caption(spec.title, ("sans-serif", 24))
                        .margin(20)
                        .x_label_area_size(50)
                        .y_label_area_size(220)
                        .build_cartesian_2d(0f64..count_max, category_range)
                        .map_err(draw_err)?;

                    chart
                        .configure_mesh()
                        .disable_y_mesh()
                        .y_labels(n.max(1))
                        .y_label_formatter(&label_formatter)
                        .x_desc(spec.x_desc)
                        .y_desc(spec.y_desc)
                        .draw()
                        .map_err(draw_err)?;

                    chart
                        .draw_series(spec.entries.iter().enumerate().map(|(i, entry)| {
                            let y = (n - 1 - i) as f64;
                            let color = rgb(palette_color(spec.palette, i, n));
                            Rectangle::new([(0.0, y - 0.3), (entry.count as f64, y + 0.3)], color.filled())
                        }))
                        .map_err(draw_err)?;
                }
            }

            root.present().map_err(draw_err)?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))
    }

    /// Render the titles-per-year line chart with point markers.
    pub fn render_year_trend(trend: &YearTrend, width: u32, height: u32) -> Result<RgbImage, RenderError> {
        let mut buffer = vec![0u8; buffer_len(width, height)?];
        let points: Vec<(f64, f64)> = trend
            .points
            .iter()
            .map(|&(year, count)| (year as f64, count as f64))
            .collect();

        let first_year = points.first().map(|p| p.0).unwrap_or(0.0);
        let last_year = points.last().map(|p| p.0).unwrap_or(1.0).max(first_year + 1.0);
        let count_max = points.iter().map(|p| p.1).fold(1.0, f64::max) * 1.1;
        let green = rgb(TREND_GREEN);

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption("Content Trend Over the Years", ("sans-serif", 24))
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(60)
                .build_cartesian_2d(first_year..last_year, 0f64..count_max)
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .x_label_formatter(&|x: &f64| format!("{:.0}", x))
                .x_desc("Year")
                .y_desc("Number of Titles Released")
                .draw()
                .map_err(draw_err)?;

            chart
                .draw_series(LineSeries::new(points.iter().copied(), green.stroke_width(2)))
                .map_err(draw_err)?;
            chart
                .draw_series(points.iter().map(|&point| Circle::new(point, 4, green.filled())))
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))
    }

    /// Render all four charts into `dir`, returning the written paths.
    pub fn save_all(
        aggregations: &Aggregations,
        top_n: usize,
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let countries_title = format!("Top {} Countries", top_n);
        let bar_specs = [
            (
                "type_distribution.png",
                BarSpec {
                    title: "Movies vs TV Shows",
                    entries: &aggregations.type_distribution,
                    palette: &VIRIDIS,
                    orientation: BarOrientation::Vertical,
                    x_desc: "Type",
                    y_desc: "Count",
                },
            ),
            (
                "top_countries.png",
                BarSpec {
                    title: &countries_title,
                    entries: &aggregations.top_countries,
                    palette: &COOLWARM,
                    orientation: BarOrientation::Horizontal,
                    x_desc: "Count",
                    y_desc: "Country",
                },
            ),
            (
                "top_genres.png",
                BarSpec {
                    title: "Top Genres",
                    entries: &aggregations.top_genres,
                    palette: &MAKO,
                    orientation: BarOrientation::Horizontal,
                    x_desc: "Count",
                    y_desc: "Genre",
                },
            ),
        ];

        let mut written = Vec::with_capacity(bar_specs.len() + 1);
        for (file_name, spec) in &bar_specs {
            let path = dir.join(file_name);
            Self::render_bar_chart(spec, width, height)?.save(&path)?;
            written.push(path);
        }

        let path = dir.join("content_trend.png");
        Self::render_year_trend(&aggregations.titles_per_year, width, height)?.save(&path)?;
        written.push(path);

        tracing::info!(dir = %dir.display(), charts = written.len(), "chart images saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::raw_catalog;
    use crate::data::Cleaner;
    use tempfile::TempDir;

    fn assert_png_sizes(paths: &[PathBuf], width: u32, height: u32) {
        assert_eq!(paths.len(), 4);
        for path in paths {
            assert!(path.is_file(), "{}", path.display());
            assert_eq!(image::image_dimensions(path).unwrap(), (width, height));
        }
    }

    #[test]
    fn save_all_writes_four_pngs() {
        let dir = TempDir::new().unwrap();
        let cleaned = Cleaner::clean(raw_catalog()).unwrap();
        let aggregations = Aggregations::compute(&cleaned, 10).unwrap();

        let paths = StaticChartRenderer::save_all(&aggregations, 10, dir.path(), 640, 480).unwrap();

        assert_png_sizes(&paths, 640, 480);
        let names: Vec<_> = paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                "type_distribution.png",
                "top_countries.png",
                "top_genres.png",
                "content_trend.png"
            ]
        );
    }

    #[test]
    fn save_all_handles_empty_aggregations() {
        let dir = TempDir::new().unwrap();
        let paths =
            StaticChartRenderer::save_all(&Aggregations::default(), 10, dir.path(), 320, 240).unwrap();

        assert_png_sizes(&paths, 320, 240);
    }

    #[test]
    fn invalid_sizes_are_rejected_before_drawing() {
        assert!(matches!(buffer_len(0, 600), Err(RenderError::Buffer(0, 600))));
        assert!(matches!(buffer_len(1000, 0), Err(RenderError::Buffer(1000, 0))));
        assert_eq!(buffer_len(1000, 600).unwrap(), 1_800_000);

        let trend = YearTrend::default();
        assert!(matches!(
            StaticChartRenderer::render_year_trend(&trend, 0, 0),
            Err(RenderError::Buffer(0, 0))
        ));
    }

    #[test]
    fn count_axis_leaves_headroom() {
        let entries = vec![
            CountEntry {
                label: "Movie".into(),
                count: 100,
            },
            CountEntry {
                label: "TV Show".into(),
                count: 40,
            },
        ];
        assert!((StaticChartRenderer::count_axis_max(&entries) - 110.0).abs() < 1e-9);
        assert_eq!(StaticChartRenderer::count_axis_max(&[]), 1.0);
    }
}
