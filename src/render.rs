use egui::{Painter, Shape, Stroke as EguiStroke};

use crate::path::fit_path;
use crate::stroke::{Stroke, StrokeRef};

/// Build the egui shapes for one stroke.
///
/// Lasso strokes are selection shapes, not paint, and produce nothing;
/// eraser strokes need layered compositing the immediate-mode painter does
/// not have, so their live presentation is left to the embedding layer and
/// they produce nothing here either. A single-sample stroke becomes a
/// filled circle so its width stays visible as a capped dot.
pub fn stroke_shapes(stroke: &Stroke) -> Vec<Shape> {
    if !stroke.kind().has_color() {
        return Vec::new();
    }
    let Some(path) = fit_path(stroke.samples()) else {
        return Vec::new();
    };

    let radius = stroke.width() / 2.0;
    if path.is_dot() {
        return vec![Shape::circle_filled(path.start(), radius, stroke.color())];
    }

    let points = path.flatten();
    let first = points[0];
    let last = points[points.len() - 1];
    vec![
        // Round end caps; egui polylines are butt-capped.
        Shape::circle_filled(first, radius, stroke.color()),
        Shape::circle_filled(last, radius, stroke.color()),
        Shape::line(points, EguiStroke::new(stroke.width(), stroke.color())),
    ]
}

/// Paint every stroke in paint order.
pub fn paint_strokes(painter: &Painter, strokes: &[StrokeRef]) {
    for stroke in strokes {
        let stroke = stroke.read();
        for shape in stroke_shapes(&stroke) {
            painter.add(shape);
        }
    }
}
