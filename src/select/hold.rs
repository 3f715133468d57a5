use std::time::{Duration, Instant};

/// Distinguishes a quick click from a press-and-hold drag gesture.
///
/// Armed on press, disarmed on release, polled by the event loop. Taking
/// `Instant` arguments keeps the timing contract testable without real
/// wall-clock delays.
#[derive(Debug)]
pub struct HoldTimer {
    threshold: Duration,
    armed_at: Option<Instant>,
}

impl HoldTimer {
    pub fn new(threshold: Duration) -> Self {
        HoldTimer {
            threshold,
            armed_at: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.armed_at = Some(now);
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// True once the held press has matured. Disarms itself on firing so a
    /// single press starts a single gesture.
    pub fn fires(&mut self, now: Instant) -> bool {
        match self.armed_at {
            Some(armed) if now.duration_since(armed) >= self.threshold => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }
}
