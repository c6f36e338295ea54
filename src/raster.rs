//! Software compositor for the flatten/export path.
//!
//! Strokes are stamped into a transparent overlay in paint order (erasers
//! clear overlay pixels instead of painting them), and the overlay is then
//! alpha-blended over the background. The background itself is never erased;
//! an eraser only subtracts prior stroke content.

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};
use log::trace;

use crate::path::fit_path;
use crate::stroke::{Stroke, StrokeRef};
use crate::tool::ToolKind;

/// Composite `strokes` in paint order over `background` into a new image.
pub fn composite(background: &RgbaImage, strokes: &[StrokeRef]) -> RgbaImage {
    let mut overlay = RgbaImage::new(background.width(), background.height());
    for stroke in strokes {
        let stroke = stroke.read();
        apply_stroke(&mut overlay, &stroke);
    }

    let mut out = background.clone();
    for (dst, src) in out.pixels_mut().zip(overlay.pixels()) {
        *dst = blend_over(*src, *dst);
    }
    out
}

/// Stamp one stroke into the overlay as a round-capped thick path: a pixel
/// is covered when its center lies within half the stroke width of the
/// flattened polyline.
fn apply_stroke(overlay: &mut RgbaImage, stroke: &Stroke) {
    if stroke.kind() == ToolKind::Lasso {
        // Selection shape, not paint.
        return;
    }
    let Some(path) = fit_path(stroke.samples()) else {
        return;
    };
    let points = path.flatten();
    let radius = (stroke.width() / 2.0).max(0.5);
    let erase = stroke.kind().is_eraser();
    let color = color_to_rgba(stroke.color());

    let (width, height) = overlay.dimensions();
    let mut min = points[0];
    let mut max = points[0];
    for point in &points {
        min = min.min(*point);
        max = max.max(*point);
    }
    let pad = radius + 1.0;
    let x0 = ((min.x - pad).floor() as i64).max(0);
    let y0 = ((min.y - pad).floor() as i64).max(0);
    let x1 = ((max.x + pad).ceil() as i64).min(width as i64 - 1);
    let y1 = ((max.y + pad).ceil() as i64).min(height as i64 - 1);
    if x0 > x1 || y0 > y1 {
        trace!("stroke lies outside the image, skipping");
        return;
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if !covers(&points, center, radius) {
                continue;
            }
            let (x, y) = (x as u32, y as u32);
            if erase {
                overlay.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            } else {
                let under = *overlay.get_pixel(x, y);
                overlay.put_pixel(x, y, blend_over(color, under));
            }
        }
    }
}

/// Whether `point` lies within `radius` of the polyline. A one-point
/// polyline degenerates to a disc, which is what gives dots and end caps
/// their rounding.
fn covers(points: &[Pos2], point: Pos2, radius: f32) -> bool {
    if points.len() == 1 {
        return (point - points[0]).length() <= radius;
    }
    points
        .windows(2)
        .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= radius)
}

/// Distance from a point to a line segment.
fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line = end - start;
    let offset = point - start;

    let len = line.length();
    if len == 0.0 {
        return offset.length();
    }

    let t = ((offset.x * line.x + offset.y * line.y) / len).clamp(0.0, len);
    let projection = start + (line * t / len);
    (point - projection).length()
}

fn color_to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

/// Straight-alpha source-over blend.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let blended = (src[channel] as f32 * src_a
            + dst[channel] as f32 * dst_a * (1.0 - src_a))
            / out_a;
        out[channel] = blended.round() as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}
