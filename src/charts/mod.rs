//! Charts module - Chart rendering

mod heatmap;
mod plotter;

pub use heatmap::HeatmapPainter;
pub use plotter::{ChartData, ChartKind, ChartPlotter};
