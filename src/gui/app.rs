//! Procurement KPI Main Application
//! Window with the summary panel and the chart viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::PipelineOutput;
use egui::SidePanel;
use log::debug;

/// Main application window. Only reads the finished pipeline output.
pub struct KpiApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl KpiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, output: PipelineOutput) -> Self {
        Self {
            control_panel: ControlPanel::new(output.summary),
            chart_viewer: ChartViewer::new(output.charts),
        }
    }
}

impl eframe::App for KpiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::VisibilityChanged => debug!(
                            "{} chart(s) hidden",
                            self.control_panel.hidden_views.len()
                        ),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, &self.control_panel.hidden_views);
        });
    }
}
