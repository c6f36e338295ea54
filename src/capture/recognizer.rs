use log::{debug, trace};

use crate::stroke::{Stroke, StrokeRef, StrokeSample};

use super::timer::CommitTimer;
use super::{COMMIT_TIMEOUT, StrokeEvent, Touch, TouchEvent};

/// Where the recognizer currently is in a gesture's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    /// One finger is down but the commit window has not elapsed; the gesture
    /// could still turn out to be the start of a pan/zoom.
    Possible,
    /// The commit window elapsed with a single finger down; extra fingers
    /// are ignored from here on.
    Active,
    Ended,
    Cancelled,
    Failed,
}

impl CapturePhase {
    fn is_terminal(self) -> bool {
        matches!(
            self,
            CapturePhase::Ended | CapturePhase::Cancelled | CapturePhase::Failed
        )
    }
}

/// The stroke gesture state machine.
///
/// Owns at most one in-flight stroke and arbitrates between single-finger
/// drawing and multi-finger gestures. On first touch-down there is no way to
/// know whether the user intends a stroke or is mid-way through placing a
/// second finger, so the recognizer waits out a short commit window before
/// treating the gesture as a draw; a second finger inside that window fails
/// the whole gesture.
///
/// The machine is driven by [`handle_event`](Self::handle_event) for touch
/// reports and [`poll`](Self::poll) for timer progress between reports, and
/// reports lifecycle changes as returned [`StrokeEvent`]s rather than
/// through a delegate object.
#[derive(Debug)]
pub struct StrokeRecognizer {
    phase: CapturePhase,
    stroke: Option<StrokeRef>,
    tracking_touch: Option<u64>,
    touch_start: Option<f64>,
    timer: CommitTimer,
    timeout: f64,
}

impl StrokeRecognizer {
    pub fn new() -> Self {
        Self::with_timeout(COMMIT_TIMEOUT)
    }

    /// A recognizer with a non-default commit window.
    pub fn with_timeout(timeout: f64) -> Self {
        Self {
            phase: CapturePhase::Idle,
            stroke: None,
            tracking_touch: None,
            touch_start: None,
            timer: CommitTimer::new(),
            timeout,
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// The in-flight stroke, present from `Possible` until the gesture
    /// reaches a terminal phase.
    pub fn stroke(&self) -> Option<&StrokeRef> {
        self.stroke.as_ref()
    }

    /// Feed one touch report through the state machine.
    pub fn handle_event(&mut self, event: &TouchEvent) -> Option<StrokeEvent> {
        // A finished gesture stays observable until the next report arrives.
        if self.phase.is_terminal() {
            self.phase = CapturePhase::Idle;
        }
        self.advance_timer(event.timestamp());

        match event {
            TouchEvent::Began { touches } => self.on_began(touches),
            TouchEvent::Moved { touch, coalesced } => self.on_moved(touch, coalesced),
            TouchEvent::Ended { touch } => self.on_ended(touch),
            TouchEvent::Cancelled { touch } => self.on_cancelled(touch),
        }
    }

    /// Advance the commit timer without a touch report, e.g. once per frame
    /// while a finger rests on the surface.
    pub fn poll(&mut self, now: f64) {
        self.advance_timer(now);
    }

    /// Unwind to `Idle`, dropping the in-flight stroke and any pending timer.
    pub fn reset(&mut self) {
        self.phase = CapturePhase::Idle;
        self.stroke = None;
        self.tracking_touch = None;
        self.touch_start = None;
        self.timer.invalidate();
    }

    fn advance_timer(&mut self, now: f64) {
        if self.timer.fire(now) && self.phase == CapturePhase::Possible {
            self.phase = CapturePhase::Active;
            debug!("commit window elapsed, capture is active");
        }
    }

    fn on_began(&mut self, touches: &[Touch]) -> Option<StrokeEvent> {
        if self.tracking_touch.is_some() {
            match self.phase {
                CapturePhase::Possible => {
                    // Second finger inside the commit window: this is the
                    // start of a multi-finger gesture, not a stroke.
                    debug!("second touch inside commit window, failing gesture");
                    self.conclude(CapturePhase::Failed);
                    Some(StrokeEvent::Failed)
                }
                CapturePhase::Active => {
                    trace!("ignoring {} extra touch(es) on active stroke", touches.len());
                    None
                }
                _ => None,
            }
        } else if touches.len() >= 2 {
            // Both fingers arrived in the same report: the ambiguity is
            // resolved before any stroke is surfaced, so no listener event.
            debug!("simultaneous multi-touch down, no stroke surfaced");
            self.conclude(CapturePhase::Failed);
            None
        } else {
            let touch = touches.first()?;
            let stroke = Stroke::new_ref();
            stroke
                .write()
                .push_sample(StrokeSample::new(touch.pos, touch.timestamp));
            self.stroke = Some(stroke);
            self.tracking_touch = Some(touch.id);
            self.touch_start = Some(touch.timestamp);
            self.timer.arm(touch.timestamp + self.timeout);
            self.phase = CapturePhase::Possible;
            debug!("tracking touch {} at {:?}", touch.id, touch.pos);
            Some(StrokeEvent::Possible)
        }
    }

    fn on_moved(&mut self, touch: &Touch, coalesced: &[Touch]) -> Option<StrokeEvent> {
        if self.tracking_touch != Some(touch.id) {
            return None;
        }
        if !matches!(self.phase, CapturePhase::Possible | CapturePhase::Active) {
            return None;
        }
        let stroke = self.stroke.as_ref()?;
        {
            let mut stroke = stroke.write();
            if coalesced.is_empty() {
                stroke.push_sample(StrokeSample::new(touch.pos, touch.timestamp));
            } else {
                for sub in coalesced {
                    stroke.push_sample(StrokeSample::new(sub.pos, sub.timestamp));
                }
            }
            trace!("stroke at {} samples", stroke.samples().len());
        }
        // One notification per report, however many samples it carried.
        Some(StrokeEvent::Moved)
    }

    fn on_ended(&mut self, touch: &Touch) -> Option<StrokeEvent> {
        if self.tracking_touch != Some(touch.id) {
            return None;
        }
        if !matches!(self.phase, CapturePhase::Possible | CapturePhase::Active) {
            return None;
        }
        if let Some(start) = self.touch_start {
            debug!(
                "touch {} lifted after {:.3}s",
                touch.id,
                touch.timestamp - start
            );
        }
        self.conclude(CapturePhase::Ended);
        Some(StrokeEvent::Ended)
    }

    fn on_cancelled(&mut self, touch: &Touch) -> Option<StrokeEvent> {
        if self.tracking_touch != Some(touch.id) {
            return None;
        }
        if !matches!(self.phase, CapturePhase::Possible | CapturePhase::Active) {
            return None;
        }
        debug!("touch sequence cancelled by the platform");
        self.conclude(CapturePhase::Cancelled);
        Some(StrokeEvent::Cancelled)
    }

    /// Enter a terminal phase, releasing everything but the phase marker so
    /// no dangling stroke or timer survives the gesture.
    fn conclude(&mut self, phase: CapturePhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        self.stroke = None;
        self.tracking_touch = None;
        self.touch_start = None;
        self.timer.invalidate();
    }
}

impl Default for StrokeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
