use egui::{Color32, Pos2};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::tool::{FALLBACK_WIDTH, Tool, ToolKind};

/// One (position, timestamp) observation of the tracked finger.
///
/// The timestamp is the platform's monotonic event time in seconds and is
/// used only for ordering; nothing downstream interpolates over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    location: Pos2,
    timestamp: f64,
}

impl StrokeSample {
    pub fn new(location: Pos2, timestamp: f64) -> Self {
        Self {
            location,
            timestamp,
        }
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// One continuous captured drag: an append-only sample sequence plus the
/// cosmetic attributes stamped from the tool that drew it.
///
/// Width, color and kind are not known at construction time. They are
/// stamped by the canvas when the gesture is first surfaced as provisional,
/// so a tool swap between the physical touch-down and that moment still
/// lands on the stroke.
#[derive(Debug, Clone)]
pub struct Stroke {
    kind: ToolKind,
    width: f32,
    color: Color32,
    samples: Vec<StrokeSample>,
}

/// Shared handle to a stroke.
///
/// While a gesture is in flight the recognizer appends samples through this
/// handle and the canvas renders through its own clone of it; once the
/// gesture ends the recognizer drops its handle and no writer remains.
pub type StrokeRef = Arc<RwLock<Stroke>>;

impl Stroke {
    /// A new empty stroke with placeholder attributes.
    pub fn new() -> Self {
        Self {
            kind: ToolKind::Pen,
            width: FALLBACK_WIDTH,
            color: Color32::BLACK,
            samples: Vec::new(),
        }
    }

    /// A new empty stroke behind a shared handle.
    pub fn new_ref() -> StrokeRef {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Stamp the attributes of `tool` onto this stroke.
    pub fn apply_tool(&mut self, tool: &Tool) {
        self.kind = tool.kind();
        self.width = tool.width().unwrap_or(FALLBACK_WIDTH);
        self.color = tool.color().unwrap_or(Color32::BLACK);
    }

    pub fn push_sample(&mut self, sample: StrokeSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new()
    }
}
