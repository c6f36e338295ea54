#![warn(clippy::all, rust_2018_idioms)]

//! Stroke capture and rendering core for drawing over an image with a
//! finger: a gesture state machine that disambiguates single-finger strokes
//! from multi-finger pan/zoom, an append-only stroke data model, a cubic
//! curve fitter, and a canvas that composites committed strokes over a
//! background for export. All UI chrome (tool bars, color pickers, photo
//! library) lives in the embedding application.

pub mod canvas;
pub mod capture;
pub mod error;
pub mod path;
pub mod raster;
pub mod render;
pub mod stroke;
pub mod tool;

pub use canvas::Canvas;
pub use capture::{
    COMMIT_TIMEOUT, CapturePhase, CommitTimer, StrokeEvent, StrokeRecognizer, Touch, TouchEvent,
};
pub use error::CanvasError;
pub use path::{PathSegment, StrokePath, fit_path};
pub use render::{paint_strokes, stroke_shapes};
pub use stroke::{Stroke, StrokeRef, StrokeSample};
pub use tool::{Tool, ToolKind};
