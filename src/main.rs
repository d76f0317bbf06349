//! Procurement KPI - CSV enrichment & chart viewer
//!
//! Runs the pipeline on the fixed dataset, then opens a window with the charts.

use anyhow::{anyhow, Context};
use eframe::egui;
use log::info;
use procurement_kpi::gui::KpiApp;
use procurement_kpi::PipelineConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    let output = procurement_kpi::run(&config).with_context(|| {
        format!(
            "procurement KPI pipeline failed for {}",
            config.input_path.display()
        )
    })?;
    info!(
        "{} rows enriched, opening {} charts",
        output.summary.rows,
        output.charts.len()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Procurement KPI Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "Procurement KPI Analysis",
        options,
        Box::new(move |cc| Ok(Box::new(KpiApp::new(cc, output)))),
    )
    .map_err(|e| anyhow!("chart window failed: {e}"))
}
