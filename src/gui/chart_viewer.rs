//! Chart Viewer Widget
//! Scrollable central panel with one card per report view.
//! Cards wrap into as many columns as the window width allows.

use crate::charts::{ChartData, ChartPlotter};
use crate::reports::ReportView;
use egui::{Color32, RichText, ScrollArea};
use std::collections::HashSet;

const CHART_SPACING: f32 = 15.0;
const CHART_WIDTH: f32 = 640.0;
const CARD_BORDER: Color32 = Color32::from_rgb(100, 149, 237);

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    pub chart_data: Vec<ChartData>,
}

impl ChartViewer {
    pub fn new(chart_data: Vec<ChartData>) -> Self {
        Self { chart_data }
    }

    /// Charts not hidden by the control panel, in report order.
    pub fn visible<'a>(&'a self, hidden: &'a HashSet<ReportView>) -> impl Iterator<Item = &'a ChartData> {
        self.chart_data
            .iter()
            .filter(move |c| !hidden.contains(&c.view))
    }

    pub fn show(&self, ui: &mut egui::Ui, hidden: &HashSet<ReportView>) {
        let charts: Vec<&ChartData> = self.visible(hidden).collect();
        if charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Charts").size(20.0));
            });
            return;
        }

        let avail_width = ui.available_width();
        let card_total_width = CHART_WIDTH + CHART_SPACING;
        let num_columns = ((avail_width / card_total_width).floor() as usize).max(1);

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in charts.chunks(num_columns) {
                    ui.horizontal_top(|ui| {
                        for data in row {
                            Self::draw_chart_card(ui, data);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    /// Draw a single chart card with fixed width
    fn draw_chart_card(ui: &mut egui::Ui, chart_data: &ChartData) {
        let card_width = CHART_WIDTH - 20.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, CARD_BORDER))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(&chart_data.title)
                            .size(16.0)
                            .strong()
                            .color(CARD_BORDER),
                    );
                    ui.add_space(8.0);
                    ChartPlotter::draw_chart(ui, chart_data);
                });
            });
    }
}
