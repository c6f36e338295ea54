use egui::Color32;
use serde::{Deserialize, Serialize};

/// Width given to strokes whose tool carries none (the lasso).
pub const FALLBACK_WIDTH: f32 = 1.0;

/// Width the per-kind constructors start out with.
pub const DEFAULT_WIDTH: f32 = 5.0;

/// The drawing mode a tool is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Pen,
    Brush,
    Neon,
    Pencil,
    Eraser,
    ObjectEraser,
    BlurEraser,
    Lasso,
}

impl ToolKind {
    /// Every kind but the lasso has an adjustable width.
    pub fn has_width(self) -> bool {
        !matches!(self, ToolKind::Lasso)
    }

    /// Only the paint kinds carry a color.
    pub fn has_color(self) -> bool {
        matches!(
            self,
            ToolKind::Pen | ToolKind::Brush | ToolKind::Neon | ToolKind::Pencil
        )
    }

    /// Eraser kinds subtract from prior stroke content instead of painting.
    pub fn is_eraser(self) -> bool {
        matches!(
            self,
            ToolKind::Eraser | ToolKind::ObjectEraser | ToolKind::BlurEraser
        )
    }
}

/// A drawing tool: a kind tag plus the width/color settings that apply to it.
///
/// `Copy` on purpose: the embedding UI hands the current tool's value to the
/// canvas and to display widgets, and mutating one copy must never leak into
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    kind: ToolKind,
    width: Option<f32>,
    color: Option<Color32>,
}

impl Tool {
    /// Create a tool, dropping whichever settings the kind does not carry.
    pub fn new(kind: ToolKind, width: Option<f32>, color: Option<Color32>) -> Self {
        Self {
            kind,
            width: if kind.has_width() { width } else { None },
            color: if kind.has_color() { color } else { None },
        }
    }

    pub fn pen() -> Self {
        Self::new(ToolKind::Pen, Some(DEFAULT_WIDTH), Some(Color32::RED))
    }

    pub fn brush() -> Self {
        Self::new(ToolKind::Brush, Some(DEFAULT_WIDTH), Some(Color32::GREEN))
    }

    pub fn neon() -> Self {
        Self::new(ToolKind::Neon, Some(DEFAULT_WIDTH), Some(Color32::BLUE))
    }

    pub fn pencil() -> Self {
        Self::new(ToolKind::Pencil, Some(DEFAULT_WIDTH), Some(Color32::WHITE))
    }

    pub fn eraser() -> Self {
        Self::new(ToolKind::Eraser, Some(DEFAULT_WIDTH), None)
    }

    pub fn object_eraser() -> Self {
        Self::new(ToolKind::ObjectEraser, Some(DEFAULT_WIDTH), None)
    }

    pub fn blur_eraser() -> Self {
        Self::new(ToolKind::BlurEraser, Some(DEFAULT_WIDTH), None)
    }

    pub fn lasso() -> Self {
        Self::new(ToolKind::Lasso, None, None)
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn color(&self) -> Option<Color32> {
        self.color
    }

    /// Set the width; ignored for kinds without one.
    pub fn set_width(&mut self, width: f32) {
        if self.kind.has_width() {
            self.width = Some(width);
        }
    }

    /// Set the color; ignored for kinds without one.
    pub fn set_color(&mut self, color: Color32) {
        if self.kind.has_color() {
            self.color = Some(color);
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::pen()
    }
}
