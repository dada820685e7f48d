//! GUI module - single-page dashboard

mod app;
mod table_view;

pub use app::DashboardApp;
