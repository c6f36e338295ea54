use thiserror::Error;

/// Errors surfaced by canvas operations.
///
/// Gesture failures are not errors; they are ordinary [`StrokeEvent`]
/// outcomes. Inconsistencies between the recognizer and the stroke list are
/// programming bugs and are assertion-guarded instead.
///
/// [`StrokeEvent`]: crate::capture::StrokeEvent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    /// `flatten` was asked to composite over a zero-sized background.
    #[error("background image has zero width or height")]
    EmptyBackground,
}
