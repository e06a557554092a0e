//! Windowed throughput measurement.
//!
//! Operations-per-second is measured over a trailing window rather than
//! the whole run, so a long task's displayed rate tracks recent behavior
//! instead of being permanently skewed by an early fast or slow burst.

use std::time::{Duration, Instant};

use super::render::round3;

/// A window older than this resets on the next measurement.
pub(crate) const RATE_WINDOW: Duration = Duration::from_secs(30);

/// Units completed since the window opened.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RateWindow {
    started_at: Instant,
    count: u64,
}

impl RateWindow {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            count: 0,
        }
    }

    /// Record one completed unit in the current window.
    pub(crate) fn record(&mut self) {
        self.count += 1;
    }

    /// Ops/sec over the window, rounded to three decimals.
    ///
    /// A window that has outgrown [`RATE_WINDOW`] is reset before the
    /// measurement, dropping its accumulated count; the tick that follows
    /// a long gap therefore reads zero until fresh samples arrive. A
    /// zero-elapsed window also reads zero rather than dividing by it.
    pub(crate) fn measure(&mut self, now: Instant) -> f64 {
        let mut elapsed = now.saturating_duration_since(self.started_at);
        if elapsed > RATE_WINDOW {
            self.started_at = now;
            self.count = 0;
            elapsed = Duration::ZERO;
        }
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            round3(self.count as f64 / secs)
        } else {
            0.0
        }
    }
}
