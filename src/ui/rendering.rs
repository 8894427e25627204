//! Painting of canvas display lists.
//!
//! Translates a [`Scene`] built in canvas coordinates into egui shapes at the
//! canvas widget's screen position.

use crate::constants::{LABEL_FONT_SIZE, LABEL_PADDING};
use crate::scene::{DrawCommand, Scene};
use eframe::egui;

/// Paints every command of `scene`, offsetting canvas coordinates by `origin`.
///
/// # Arguments
///
/// * `painter` - The egui painter for drawing operations
/// * `origin` - Screen position of the canvas' top-left corner
/// * `scene` - Display list to paint
pub fn paint_scene(painter: &egui::Painter, origin: egui::Pos2, scene: &Scene) {
    let offset = origin.to_vec2();
    for command in &scene.commands {
        match command {
            DrawCommand::Clear { size, color } => {
                painter.rect_filled(egui::Rect::from_min_size(origin, *size), 0.0, *color);
            }
            DrawCommand::Line { from, to, stroke } => {
                painter.line_segment([*from + offset, *to + offset], *stroke);
            }
            DrawCommand::DashedLine {
                from,
                to,
                stroke,
                dash,
                gap,
            } => {
                painter.extend(egui::Shape::dashed_line(
                    &[*from + offset, *to + offset],
                    *stroke,
                    *dash,
                    *gap,
                ));
            }
            DrawCommand::Triangle { points, fill } => {
                painter.add(egui::Shape::convex_polygon(
                    points.iter().map(|p| *p + offset).collect(),
                    *fill,
                    egui::Stroke::NONE,
                ));
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                painter.circle(*center + offset, *radius, *fill, *stroke);
            }
            DrawCommand::Text {
                center,
                text,
                color,
                background,
            } => paint_text(painter, *center + offset, text, *color, *background),
        }
    }
}

/// Draws centred text, with an optional padded box behind it.
fn paint_text(
    painter: &egui::Painter,
    center: egui::Pos2,
    text: &str,
    color: egui::Color32,
    background: Option<egui::Color32>,
) {
    let font_id = egui::FontId::proportional(LABEL_FONT_SIZE);
    let galley = painter.layout_no_wrap(text.to_string(), font_id, color);
    let rect = egui::Align2::CENTER_CENTER.anchor_size(center, galley.size());
    if let Some(fill) = background {
        painter.rect_filled(rect.expand(LABEL_PADDING), 0.0, fill);
    }
    painter.galley(rect.min, galley, color);
}
