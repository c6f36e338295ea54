//! Touch-to-stroke capture: a state machine that decides, under ambiguity,
//! whether a single continuous finger-drag should become a committed stroke,
//! while rejecting gestures that turn out to involve a second finger
//! (reserved for pan/zoom elsewhere in the embedding app).

use egui::Pos2;

mod recognizer;
mod timer;

pub use recognizer::{CapturePhase, StrokeRecognizer};
pub use timer::CommitTimer;

/// Two-finger disambiguation window, in seconds.
pub const COMMIT_TIMEOUT: f64 = 0.25;

/// A single finger observation in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Stable identifier of the finger across its down/move/up sequence.
    pub id: u64,
    pub pos: Pos2,
    /// Monotonic event time in seconds.
    pub timestamp: f64,
}

/// Raw touch events fed to the recognizer by the embedding layer.
#[derive(Debug, Clone)]
pub enum TouchEvent {
    /// One or more fingers went down in the same report.
    Began { touches: Vec<Touch> },
    /// A finger moved. `coalesced` carries sub-frame positions reported for
    /// this event, in order; when present they replace `touch` as the
    /// sample source so no temporal resolution is lost.
    Moved {
        touch: Touch,
        coalesced: Vec<Touch>,
    },
    /// A finger lifted.
    Ended { touch: Touch },
    /// The platform aborted the touch sequence.
    Cancelled { touch: Touch },
}

impl TouchEvent {
    /// Report time of the event.
    pub fn timestamp(&self) -> f64 {
        match self {
            TouchEvent::Began { touches } => {
                touches.first().map(|t| t.timestamp).unwrap_or_default()
            }
            TouchEvent::Moved { touch, .. }
            | TouchEvent::Ended { touch }
            | TouchEvent::Cancelled { touch } => touch.timestamp,
        }
    }
}

/// Lifecycle notifications the recognizer hands back to its caller.
///
/// `Failed` and `Cancelled` are only emitted for gestures that previously
/// produced a `Possible`, so the caller can always pair a discard with the
/// provisional stroke it registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEvent {
    /// A stroke may be starting; the in-flight stroke holds its first sample.
    Possible,
    /// The tracked finger moved and new samples were appended.
    Moved,
    /// The tracked finger lifted; the stroke is final.
    Ended,
    /// The platform aborted the gesture; discard the provisional stroke.
    Cancelled,
    /// A second finger arrived inside the commit window; discard the
    /// provisional stroke.
    Failed,
}
