//! Annotated correlation heatmap painted cell by cell.

use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::f32::consts::FRAC_PI_4;

const CELL: f32 = 56.0;
const ROW_LABEL_WIDTH: f32 = 130.0;
const COLUMN_LABEL_HEIGHT: f32 = 100.0;
const COLORBAR_WIDTH: f32 = 16.0;
const COLORBAR_GAP: f32 = 18.0;
const FONT_SIZE: f32 = 11.0;

// Coolwarm anchors: -1, 0, +1
const COOL: [f32; 3] = [59.0, 76.0, 192.0];
const NEUTRAL: [f32; 3] = [221.0, 221.0, 221.0];
const WARM: [f32; 3] = [180.0, 4.0, 38.0];
const MISSING: Color32 = Color32::from_rgb(128, 128, 128);

pub struct HeatmapPainter;

impl HeatmapPainter {
    /// Diverging blue-white-red colour for a value in [-1, 1]. NaN is grey.
    pub fn coolwarm(value: f64) -> Color32 {
        if value.is_nan() {
            return MISSING;
        }
        let t = value.clamp(-1.0, 1.0) as f32;
        let (from, to, f) = if t < 0.0 {
            (NEUTRAL, COOL, -t)
        } else {
            (NEUTRAL, WARM, t)
        };
        let mix = |i: usize| (from[i] + (to[i] - from[i]) * f).round() as u8;
        Color32::from_rgb(mix(0), mix(1), mix(2))
    }

    /// Annotation text colour that stays readable on the cell colour.
    pub fn annotation_color(value: f64) -> Color32 {
        if value.is_finite() && value.abs() > 0.6 {
            Color32::WHITE
        } else {
            Color32::BLACK
        }
    }

    /// Cell annotation, two decimals; blank for NaN.
    pub fn annotation(value: f64) -> String {
        if value.is_nan() {
            String::new()
        } else {
            format!("{:.2}", value)
        }
    }

    pub fn draw(ui: &mut egui::Ui, labels: &[String], matrix: &[Vec<f64>]) {
        let n = labels.len();
        let grid = CELL * n as f32;
        let size = Vec2::new(
            ROW_LABEL_WIDTH + grid + COLORBAR_GAP + COLORBAR_WIDTH + 40.0,
            grid + COLUMN_LABEL_HEIGHT,
        );
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(FONT_SIZE);
        let origin = Pos2::new(rect.left() + ROW_LABEL_WIDTH, rect.top());

        for (row, values) in matrix.iter().enumerate().take(n) {
            for (column, &value) in values.iter().enumerate().take(n) {
                let min = origin + Vec2::new(column as f32 * CELL, row as f32 * CELL);
                let cell = Rect::from_min_size(min, Vec2::splat(CELL));
                painter.rect_filled(cell, 0.0, Self::coolwarm(value));
                painter.rect_stroke(cell, 0.0, Stroke::new(0.5, Color32::WHITE));
                painter.text(
                    cell.center(),
                    Align2::CENTER_CENTER,
                    Self::annotation(value),
                    font.clone(),
                    Self::annotation_color(value),
                );
            }
        }

        for (i, label) in labels.iter().enumerate() {
            // Row labels, right-aligned against the grid
            painter.text(
                Pos2::new(origin.x - 6.0, origin.y + (i as f32 + 0.5) * CELL),
                Align2::RIGHT_CENTER,
                label,
                font.clone(),
                text_color,
            );

            // Column labels, rotated under the grid
            let galley = painter.layout_no_wrap(label.clone(), font.clone(), text_color);
            let run = galley.size().x * FRAC_PI_4.cos();
            let tick_x = origin.x + (i as f32 + 0.5) * CELL;
            let start = Pos2::new(tick_x - run, origin.y + grid + run + FONT_SIZE * 0.5);
            painter.add(TextShape::new(start, galley, text_color).with_angle(-FRAC_PI_4));
        }

        Self::draw_colorbar(&painter, origin + Vec2::new(grid + COLORBAR_GAP, 0.0), grid, &font, text_color);
    }

    /// Vertical -1..1 legend strip beside the grid
    fn draw_colorbar(painter: &egui::Painter, top_left: Pos2, height: f32, font: &FontId, text_color: Color32) {
        const STEPS: usize = 40;
        let step_h = height / STEPS as f32;
        for s in 0..STEPS {
            // Top of the strip is +1
            let value = 1.0 - 2.0 * (s as f64 + 0.5) / STEPS as f64;
            let min = top_left + Vec2::new(0.0, s as f32 * step_h);
            painter.rect_filled(
                Rect::from_min_size(min, Vec2::new(COLORBAR_WIDTH, step_h + 0.5)),
                0.0,
                Self::coolwarm(value),
            );
        }

        for (value, y) in [(1.0, 0.0), (0.0, height / 2.0), (-1.0, height)] {
            painter.text(
                top_left + Vec2::new(COLORBAR_WIDTH + 4.0, y),
                Align2::LEFT_CENTER,
                format!("{:.1}", value),
                font.clone(),
                text_color,
            );
        }
    }
}
