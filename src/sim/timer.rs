//! Countdown timer on the simulation clock
//!
//! The clock is the session's tick-driven millisecond counter, not wall time,
//! so timers freeze while the game is paused and replay identically.

use serde::{Deserialize, Serialize};

/// A countdown started at `start_ms` lasting `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub duration_ms: u64,
    pub start_ms: u64,
}

impl Timer {
    pub fn new(duration_ms: u64, now: u64) -> Self {
        Self {
            duration_ms,
            start_ms: now,
        }
    }

    /// Restart the countdown, optionally with a new duration
    pub fn reset(&mut self, now: u64, duration_ms: Option<u64>) {
        if let Some(d) = duration_ms {
            self.duration_ms = d;
        }
        self.start_ms = now;
    }

    #[inline]
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_ms)
    }

    #[inline]
    pub fn done(&self, now: u64) -> bool {
        self.elapsed(now) >= self.duration_ms
    }

    /// Fraction of the duration elapsed, clamped to [0, 1]
    pub fn progress(&self, now: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed(now) as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn remaining(&self, now: u64) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_done_and_progress() {
        let t = Timer::new(100, 1000);
        assert!(!t.done(1000));
        assert_eq!(t.progress(1000), 0.0);
        assert!(!t.done(1099));
        assert!((t.progress(1050) - 0.5).abs() < 1e-6);
        assert!(t.done(1100));
        assert_eq!(t.progress(5000), 1.0);
        assert_eq!(t.remaining(1030), 70);
    }

    #[test]
    fn test_reset_changes_duration() {
        let mut t = Timer::new(100, 0);
        t.reset(500, Some(40));
        assert_eq!(t.duration_ms, 40);
        assert!(!t.done(539));
        assert!(t.done(540));
        t.reset(600, None);
        assert_eq!(t.duration_ms, 40);
        assert_eq!(t.elapsed(610), 10);
    }

    #[test]
    fn test_zero_duration_is_immediately_done() {
        let t = Timer::new(0, 10);
        assert!(t.done(10));
        assert_eq!(t.progress(10), 1.0);
    }

    #[test]
    fn test_clock_before_start_reads_as_zero_elapsed() {
        let t = Timer::new(50, 100);
        assert_eq!(t.elapsed(20), 0);
        assert_eq!(t.progress(20), 0.0);
    }

    proptest! {
        #[test]
        fn prop_progress_clamped(duration in 0u64..10_000, start in 0u64..10_000, now in 0u64..30_000) {
            let p = Timer::new(duration, start).progress(now);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
