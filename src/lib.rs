//! Procurement KPI - CSV enrichment & chart viewer
//!
//! Loads a procurement transactions table, derives KPI columns, writes a
//! cleaned copy and builds six descriptive charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod reports;
pub mod stats;

pub use config::PipelineConfig;
pub use pipeline::{run, KpiSummary, PipelineError, PipelineOutput};
