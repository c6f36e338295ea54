use egui::Pos2;

use crate::stroke::StrokeSample;

/// Straight-line steps used to flatten one cubic segment. Fixed so the two
/// renderers (live shapes and raster export) see identical geometry.
const CUBIC_FLATTEN_STEPS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    LineTo(Pos2),
    CubicTo {
        ctrl1: Pos2,
        ctrl2: Pos2,
        end: Pos2,
    },
}

/// A smooth path fitted over a stroke's samples: a start point followed by
/// cubic and line segments. A path with no segments is a dot.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    start: Pos2,
    segments: Vec<PathSegment>,
}

impl StrokePath {
    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// A zero-length path, rendered as a capped dot so width stays visible.
    pub fn is_dot(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flatten to a polyline starting at `start`. Cubics are subdivided at
    /// fixed parameter steps, so the result is deterministic for a path.
    pub fn flatten(&self) -> Vec<Pos2> {
        let mut points = vec![self.start];
        let mut current = self.start;
        for segment in &self.segments {
            match *segment {
                PathSegment::LineTo(end) => {
                    points.push(end);
                    current = end;
                }
                PathSegment::CubicTo { ctrl1, ctrl2, end } => {
                    for step in 1..=CUBIC_FLATTEN_STEPS {
                        let t = step as f32 / CUBIC_FLATTEN_STEPS as f32;
                        points.push(cubic_point(current, ctrl1, ctrl2, end, t));
                    }
                    current = end;
                }
            }
        }
        points
    }
}

/// Fit a smooth path over `samples`, rebuilt from scratch on every call so
/// the output depends only on the samples captured so far.
///
/// With fewer than four samples there is no cubic section, just straight
/// segments. From four samples on, each group of three samples yields one
/// cubic whose control points are the first two samples of the group;
/// consecutive cubics are joined at the midpoint between one cubic's second
/// control point and the next cubic's first, which keeps the joins visually
/// continuous at the cost of not re-passing through every raw sample. The
/// `(n - 4) % 3` trailing samples that cannot yet form a cubic are appended
/// as straight lines; they smooth out as further samples arrive.
pub fn fit_path(samples: &[StrokeSample]) -> Option<StrokePath> {
    let first = samples.first()?;
    let n = samples.len();
    let mut segments = Vec::new();

    if n >= 4 {
        let leftover = (n - 4) % 3;
        let curves = 1 + (n - 4 - leftover) / 3;
        let mut i = 0;
        for c in 0..curves {
            let ctrl1 = samples[i + 1].location();
            let ctrl2 = samples[i + 2].location();
            let end = if c + 1 < curves {
                midpoint(ctrl2, samples[i + 4].location())
            } else {
                samples[i + 3].location()
            };
            segments.push(PathSegment::CubicTo { ctrl1, ctrl2, end });
            i += 3;
        }
        for sample in &samples[n - leftover..] {
            segments.push(PathSegment::LineTo(sample.location()));
        }
    } else {
        for sample in &samples[1..] {
            segments.push(PathSegment::LineTo(sample.location()));
        }
    }

    Some(StrokePath {
        start: first.location(),
        segments,
    })
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Evaluate a cubic Bezier at parameter `t`.
fn cubic_point(p0: Pos2, c1: Pos2, c2: Pos2, p3: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;
    Pos2::new(
        w0 * p0.x + w1 * c1.x + w2 * c2.x + w3 * p3.x,
        w0 * p0.y + w1 * c1.y + w2 * c2.y + w3 * p3.y,
    )
}
