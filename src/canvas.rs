use image::RgbaImage;
use log::debug;

use crate::capture::{CapturePhase, StrokeEvent, StrokeRecognizer, TouchEvent};
use crate::error::CanvasError;
use crate::raster;
use crate::stroke::StrokeRef;
use crate::tool::Tool;

/// The drawing surface: the active tool, the committed stroke list in paint
/// order, and the recognizer that feeds it.
///
/// The canvas bridges recognizer events to the stroke list: a `Possible`
/// stroke is registered immediately (visible but provisional) and a later
/// `Failed` or `Cancelled` pops it again, so at no point does a rejected
/// gesture leave anything behind.
pub struct Canvas {
    active_tool: Tool,
    strokes: Vec<StrokeRef>,
    recognizer: StrokeRecognizer,
}

impl Canvas {
    pub fn new(tool: Tool) -> Self {
        Self {
            active_tool: tool,
            strokes: Vec::new(),
            recognizer: StrokeRecognizer::new(),
        }
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// Swap the drawing tool. Committed strokes are untouched; only strokes
    /// started after the swap pick up the new settings.
    pub fn set_active_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
    }

    /// The committed strokes, in paint order (later strokes on top).
    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn capture_phase(&self) -> CapturePhase {
        self.recognizer.phase()
    }

    /// Feed one touch report through the recognizer. Returns whether the
    /// caller should redraw.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        match self.recognizer.handle_event(event) {
            Some(event) => self.apply_event(event),
            None => false,
        }
    }

    /// Advance the commit timer between touch reports (e.g. once per frame
    /// while a finger rests on the surface).
    pub fn poll(&mut self, now: f64) {
        self.recognizer.poll(now);
    }

    /// Drop every committed stroke.
    pub fn clear(&mut self) {
        debug!("clearing {} stroke(s)", self.strokes.len());
        self.strokes.clear();
    }

    /// Remove and return the most recent stroke (last-action undo).
    pub fn remove_last_stroke(&mut self) -> Option<StrokeRef> {
        self.strokes.pop()
    }

    /// Composite `background` and every stroke in paint order into a new
    /// image. On-screen state is left untouched, so calling this twice on an
    /// unchanged canvas yields pixel-identical results.
    pub fn flatten(&self, background: &RgbaImage) -> Result<RgbaImage, CanvasError> {
        if background.width() == 0 || background.height() == 0 {
            return Err(CanvasError::EmptyBackground);
        }
        Ok(raster::composite(background, &self.strokes))
    }

    fn apply_event(&mut self, event: StrokeEvent) -> bool {
        match event {
            StrokeEvent::Possible => {
                let Some(stroke) = self.recognizer.stroke().cloned() else {
                    debug_assert!(false, "possible event without an in-flight stroke");
                    return false;
                };
                // Stamp with the tool that is current *now*, not whatever
                // was active at the physical touch-down.
                stroke.write().apply_tool(&self.active_tool);
                self.strokes.push(stroke);
                debug!("provisional stroke registered ({} total)", self.strokes.len());
                true
            }
            StrokeEvent::Moved => true,
            StrokeEvent::Ended => {
                debug!("stroke committed ({} total)", self.strokes.len());
                false
            }
            StrokeEvent::Failed | StrokeEvent::Cancelled => {
                // Exact inverse of the registration above; only one stroke
                // can be provisional at a time.
                let removed = self.strokes.pop();
                debug_assert!(removed.is_some(), "no provisional stroke to discard");
                debug!("provisional stroke discarded ({} total)", self.strokes.len());
                true
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Tool::default())
    }
}
