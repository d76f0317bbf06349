//! Control Panel Widget
//! Left side panel with the run summary and view toggles.

use crate::pipeline::KpiSummary;
use crate::reports::ReportView;
use egui::{Color32, RichText};
use std::collections::HashSet;

/// Left side control panel listing the dataset figures and chart switches.
pub struct ControlPanel {
    pub summary: KpiSummary,
    pub hidden_views: HashSet<ReportView>,
}

impl ControlPanel {
    pub fn new(summary: KpiSummary) -> Self {
        Self {
            summary,
            hidden_views: HashSet::new(),
        }
    }

    pub fn is_visible(&self, view: ReportView) -> bool {
        !self.hidden_views.contains(&view)
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Procurement KPI")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("data_source")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Input:");
                        ui.label(RichText::new(self.summary.input_path.display().to_string()).size(12.0));
                        ui.end_row();

                        ui.label("Cleaned:");
                        ui.label(RichText::new(self.summary.cleaned_path.display().to_string()).size(12.0));
                        ui.end_row();
                    });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== KPI Section =====
        ui.label(RichText::new("📈 Summary").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("kpi_summary")
            .num_columns(2)
            .striped(true)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Purchase orders");
                ui.label(self.summary.rows.to_string());
                ui.end_row();

                ui.label("Median lead time");
                ui.label(
                    self.summary
                        .median_lead_time
                        .map(|m| format!("{:.1} days", m))
                        .unwrap_or_else(|| "-".to_string()),
                );
                ui.end_row();

                ui.label("Missing lead time");
                ui.label(self.summary.missing_lead_times.to_string());
                ui.end_row();

                ui.label("On-time delivery");
                ui.label(format!("{:.1}%", self.summary.on_time_rate));
                ui.end_row();
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Views Section =====
        ui.label(RichText::new("🔧 Charts").size(14.0).strong());
        ui.add_space(5.0);

        for view in ReportView::ALL {
            let mut visible = self.is_visible(view);
            if ui.checkbox(&mut visible, view.title()).changed() {
                if visible {
                    self.hidden_views.remove(&view);
                } else {
                    self.hidden_views.insert(view);
                }
                action = ControlPanelAction::VisibilityChanged;
            }
        }

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Show All").clicked() {
                self.hidden_views.clear();
                action = ControlPanelAction::VisibilityChanged;
            }
            if ui.small_button("Hide All").clicked() {
                self.hidden_views.extend(ReportView::ALL);
                action = ControlPanelAction::VisibilityChanged;
            }
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    VisibilityChanged,
}
