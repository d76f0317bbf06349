//! Chart Plotter Module
//! Draws the report views with egui_plot.

use crate::charts::heatmap::HeatmapPainter;
use crate::reports::ReportView;
use crate::stats::Histogram;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Pos2, Sense};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, PlotResponse, Points};
use std::f32::consts::FRAC_PI_4;

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const KDE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

const PLOT_HEIGHT: f32 = 300.0;
const LABEL_FONT_SIZE: f32 = 11.0;
const MAX_LABEL_BAND: f32 = 120.0;

/// What a view renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Binned counts with a density curve already scaled to counts.
    Histogram {
        histogram: Histogram,
        density: Vec<[f64; 2]>,
    },
    /// Ordered categories joined by a line with markers.
    Line { labels: Vec<String>, values: Vec<f64> },
    /// One bar per category, labels drawn rotated.
    Bar { labels: Vec<String>, values: Vec<f64> },
    /// Square matrix over `labels`, values in [-1, 1] or NaN.
    Heatmap {
        labels: Vec<String>,
        matrix: Vec<Vec<f64>>,
    },
}

/// Chart data for a single view
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub view: ReportView,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

/// Draws report charts into an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw_chart(ui: &mut egui::Ui, chart_data: &ChartData) {
        match &chart_data.kind {
            ChartKind::Histogram { histogram, density } => {
                Self::draw_histogram_chart(ui, chart_data, histogram, density)
            }
            ChartKind::Line { labels, values } => {
                Self::draw_line_chart(ui, chart_data, labels, values)
            }
            ChartKind::Bar { labels, values } => Self::draw_bar_chart(ui, chart_data, labels, values),
            ChartKind::Heatmap { labels, matrix } => HeatmapPainter::draw(ui, labels, matrix),
        }
    }

    /// Histogram bars with the density overlay
    fn draw_histogram_chart(
        ui: &mut egui::Ui,
        chart_data: &ChartData,
        histogram: &Histogram,
        density: &[[f64; 2]],
    ) {
        let width = histogram.bin_width();
        let bars: Vec<Bar> = histogram
            .edges
            .windows(2)
            .zip(histogram.counts.iter())
            .map(|(edge, &count)| {
                Bar::new((edge[0] + edge[1]) / 2.0, count as f64)
                    .width(width)
                    .fill(BAR_COLOR.gamma_multiply(0.6))
                    .stroke(egui::Stroke::new(1.0, BAR_COLOR))
            })
            .collect();

        Plot::new(format!("plot_{:?}", chart_data.view))
            .height(PLOT_HEIGHT)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_axis_label(chart_data.x_label.clone())
            .y_axis_label(chart_data.y_label.clone())
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Count"));
                if !density.is_empty() {
                    let points: PlotPoints = density.iter().copied().collect();
                    plot_ui.line(Line::new(points).color(KDE_COLOR).width(2.0).name("KDE"));
                }
            });
    }

    /// Line with markers over ordered category labels
    fn draw_line_chart(ui: &mut egui::Ui, chart_data: &ChartData, labels: &[String], values: &[f64]) {
        let x_labels = labels.to_vec();
        let points: Vec<[f64; 2]> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect();

        Plot::new(format!("plot_{:?}", chart_data.view))
            .height(PLOT_HEIGHT)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_axis_label(chart_data.x_label.clone())
            .y_axis_label(chart_data.y_label.clone())
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| Self::category_label(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }

    /// Bars over categories; tick labels are painted rotated below the plot
    fn draw_bar_chart(ui: &mut egui::Ui, chart_data: &ChartData, labels: &[String], values: &[f64]) {
        let bars: Vec<Bar> = values
            .iter()
            .zip(labels.iter())
            .enumerate()
            .map(|(i, (&v, label))| {
                // NaN bars have no height to draw
                let height = if v.is_finite() { v } else { 0.0 };
                Bar::new(i as f64, height).width(0.7).name(label).fill(BAR_COLOR)
            })
            .collect();

        let response = Plot::new(format!("plot_{:?}", chart_data.view))
            .height(PLOT_HEIGHT)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_axis_label(chart_data.x_label.clone())
            .y_axis_label(chart_data.y_label.clone())
            .include_y(0.0)
            .x_axis_formatter(|_mark, _range| String::new())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });

        Self::draw_rotated_labels(ui, &response, labels);
    }

    /// Paint category labels at 45°, each ending under its bar.
    fn draw_rotated_labels(ui: &mut egui::Ui, response: &PlotResponse<()>, labels: &[String]) {
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(LABEL_FONT_SIZE);
        let galleys: Vec<_> = labels
            .iter()
            .map(|label| ui.painter().layout_no_wrap(label.clone(), font.clone(), text_color))
            .collect();

        let diagonal = |w: f32| w * FRAC_PI_4.cos();
        let band = galleys
            .iter()
            .map(|g| diagonal(g.size().x) + LABEL_FONT_SIZE * 2.0)
            .fold(LABEL_FONT_SIZE * 2.0, f32::max)
            .min(MAX_LABEL_BAND);

        let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), band), Sense::hover());
        let painter = ui.painter_at(rect);

        for (i, galley) in galleys.into_iter().enumerate() {
            let tick = response
                .transform
                .position_from_point(&PlotPoint::new(i as f64, 0.0));
            let run = diagonal(galley.size().x);
            let start = Pos2::new(tick.x - run, rect.top() + run + LABEL_FONT_SIZE * 0.5);
            painter.add(TextShape::new(start, galley, text_color).with_angle(-FRAC_PI_4));
        }
    }

    /// Label of the category at an integer axis position, blank elsewhere.
    pub fn category_label(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if (value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}
