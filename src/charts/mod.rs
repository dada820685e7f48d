//! Charts module - interactive and static chart rendering

mod plotter;
mod renderer;

pub use plotter::{BarOrientation, ChartPlotter};
pub use renderer::StaticChartRenderer;

/// RGB triple shared by the egui and plotters backends.
pub type Rgb = (u8, u8, u8);

/// Viridis samples (type distribution).
pub const VIRIDIS: [Rgb; 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Coolwarm samples (top countries).
pub const COOLWARM: [Rgb; 5] = [
    (59, 76, 192),
    (141, 176, 254),
    (221, 221, 221),
    (244, 154, 123),
    (180, 4, 38),
];

/// Mako samples (top genres).
pub const MAKO: [Rgb; 5] = [
    (11, 4, 5),
    (53, 38, 94),
    (52, 96, 160),
    (63, 157, 169),
    (183, 230, 197),
];

/// Line and marker color of the year trend.
pub const TREND_GREEN: Rgb = (0, 128, 0);

/// Pick a palette color for bar `index` of `len` bars, spread across the palette.
pub fn palette_color(palette: &[Rgb], index: usize, len: usize) -> Rgb {
    if palette.is_empty() {
        return (128, 128, 128);
    }
    if len <= 1 {
        return palette[0];
    }
    let slot = index * (palette.len() - 1) / (len - 1);
    palette[slot.min(palette.len() - 1)]
}

/// Label for an integer axis position, empty between categories.
pub fn category_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}
