//! Frame-clock driven timers
//!
//! Nothing here schedules callbacks. Both timers are polled with the current
//! widget time, so cancelling one is a plain state change.

use std::time::Duration;

/// Coalesces bursts of values into the last one, released after a quiet period
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    /// Record a new value at `now`, replacing any pending one and restarting the quiet period
    pub fn push(&mut self, value: T, now: Duration) {
        self.pending = Some((now, value));
    }

    /// Release the pending value once `quiet` has elapsed since the last push
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let settled = matches!(&self.pending, Some((at, _)) if now.saturating_sub(*at) >= self.quiet);
        if settled {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// First-use hint: visible from start until a deadline or an explicit dismissal
#[derive(Debug, Clone, Default)]
pub struct HintTimer {
    visible: bool,
    deadline: Option<Duration>,
}

impl HintTimer {
    pub fn start(&mut self, now: Duration, delay: Duration) {
        self.visible = true;
        self.deadline = Some(now + delay);
    }

    /// Hide the hint for good and drop the deadline
    pub fn dismiss(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        self.deadline = None;
        was_visible
    }

    /// Returns true when the deadline passed on this poll
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => self.dismiss(),
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
