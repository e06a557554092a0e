//! Render throttling policies.
//!
//! Throttling limits how often the visible line is redrawn, independent
//! of how often progress is reported. Exactly one policy is active at a
//! time.

use std::time::{Duration, Instant};

/// Decides, per report, whether the line is redrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottlePolicy {
    /// Redraw when the completed count is a multiple of the step.
    ///
    /// Bounds the redraw count in proportion to the total work; suits
    /// loops where per-unit cost is uniform and predictable.
    Interval(u64),
    /// Redraw at most once per duration, plus once on the first report.
    ///
    /// Bounds the redraw rate independent of loop speed; suits loops
    /// whose per-unit cost varies wildly.
    Timeout(Duration),
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        ThrottlePolicy::Interval(1)
    }
}

impl ThrottlePolicy {
    /// Evaluate the policy for a report of unit `current`.
    ///
    /// An [`Interval`](ThrottlePolicy::Interval) step of zero is a
    /// contract violation and panics on the remainder check.
    pub(crate) fn render_required(
        self,
        current: u64,
        last_render_at: Option<Instant>,
        now: Instant,
    ) -> bool {
        match self {
            ThrottlePolicy::Interval(step) => current % step == 0,
            ThrottlePolicy::Timeout(timeout) => match last_render_at {
                None => true,
                Some(last) => now.saturating_duration_since(last) >= timeout,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_fires_on_exact_multiples() {
        let policy = ThrottlePolicy::Interval(50);
        let now = Instant::now();
        for current in 1..=200u64 {
            let expected = current % 50 == 0;
            assert_eq!(policy.render_required(current, None, now), expected);
        }
    }

    #[test]
    fn interval_ignores_elapsed_time() {
        let policy = ThrottlePolicy::Interval(2);
        let start = Instant::now();
        // A long-stale render timestamp changes nothing for interval mode.
        let much_later = start + Duration::from_secs(600);
        assert!(!policy.render_required(3, Some(start), much_later));
        assert!(policy.render_required(4, Some(start), much_later));
    }

    #[test]
    fn timeout_fires_when_no_render_happened_yet() {
        let policy = ThrottlePolicy::Timeout(Duration::from_millis(250));
        assert!(policy.render_required(1, None, Instant::now()));
    }

    #[test]
    fn timeout_waits_out_the_duration() {
        let policy = ThrottlePolicy::Timeout(Duration::from_millis(250));
        let start = Instant::now();
        let last = Some(start);
        assert!(!policy.render_required(2, last, start + Duration::from_millis(100)));
        assert!(!policy.render_required(3, last, start + Duration::from_millis(249)));
        // The boundary itself is inclusive.
        assert!(policy.render_required(4, last, start + Duration::from_millis(250)));
        assert!(policy.render_required(5, last, start + Duration::from_millis(600)));
    }

    #[test]
    fn default_renders_every_report() {
        let policy = ThrottlePolicy::default();
        let now = Instant::now();
        for current in 1..=5u64 {
            assert!(policy.render_required(current, None, now));
        }
    }
}
