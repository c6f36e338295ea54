/// A cancellable one-shot deadline standing in for a scheduled timer.
///
/// The capture state machine is single-threaded and event-driven, so instead
/// of a real timer thread the deadline is advanced by the timestamps of
/// incoming events (or an explicit poll between events). Invalidation while
/// the deadline is in flight maps to `invalidate`, matching a timer object
/// that can be cancelled before it fires.
#[derive(Debug, Default)]
pub struct CommitTimer {
    deadline: Option<f64>,
}

impl CommitTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer to fire at `deadline`.
    pub fn arm(&mut self, deadline: f64) {
        self.deadline = Some(deadline);
    }

    /// Cancel the pending deadline, if any.
    pub fn invalidate(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Advance the timer to `now`. Returns `true` exactly once, the first
    /// time `now` reaches or passes the armed deadline.
    pub fn fire(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
