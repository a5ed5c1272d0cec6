//! Tick-driven timers.
//!
//! Stand-ins for `setTimeout`/`setInterval`: nothing runs on its own, the
//! owner calls [`Timer::tick`] with each frame's delta and acts on the
//! returned firing count. That keeps every timed effect deterministic under
//! test.

use std::time::Duration;

/// Whether a timer fires once or keeps repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Once,
    Repeating,
}

/// A countdown that fires after `duration`, optionally repeating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    duration: Duration,
    elapsed: Duration,
    mode: TimerMode,
    finished: bool,
}

impl Timer {
    /// Create a timer. A zero duration is bumped to 1 ms so a repeating
    /// timer cannot fire without bound in one tick.
    pub fn new(duration: Duration, mode: TimerMode) -> Self {
        Self {
            duration: duration.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            mode,
            finished: false,
        }
    }

    pub fn once(duration: Duration) -> Self {
        Self::new(duration, TimerMode::Once)
    }

    pub fn repeating(interval: Duration) -> Self {
        Self::new(interval, TimerMode::Repeating)
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// A one-shot timer that already fired.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Time left until the next firing.
    pub fn remaining(&self) -> Duration {
        if self.finished {
            Duration::ZERO
        } else {
            self.duration.saturating_sub(self.elapsed)
        }
    }

    /// Advance by `dt` and return how many times the timer fired.
    ///
    /// A one-shot timer fires at most once over its life; a repeating
    /// timer fires once per whole interval crossed.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if self.finished {
            return 0;
        }
        self.elapsed += dt;

        match self.mode {
            TimerMode::Once => {
                if self.elapsed >= self.duration {
                    self.finished = true;
                    self.elapsed = self.duration;
                    1
                } else {
                    0
                }
            }
            TimerMode::Repeating => {
                let mut fired = 0;
                while self.elapsed >= self.duration {
                    self.elapsed -= self.duration;
                    fired += 1;
                }
                fired
            }
        }
    }

    /// Restart with a new duration, keeping the mode.
    pub fn reset_to(&mut self, duration: Duration) {
        *self = Self::new(duration, self.mode);
    }

    /// Restart from zero.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_once_fires_once() {
        let mut t = Timer::once(100 * MS);
        assert_eq!(t.tick(60 * MS), 0);
        assert_eq!(t.remaining(), 40 * MS);
        assert_eq!(t.tick(60 * MS), 1);
        assert!(t.is_finished());
        assert_eq!(t.tick(500 * MS), 0);
    }

    #[test]
    fn test_repeating_counts_intervals() {
        let mut t = Timer::repeating(530 * MS);
        assert_eq!(t.tick(1100 * MS), 2);
        assert_eq!(t.remaining(), 490 * MS);
        assert_eq!(t.tick(490 * MS), 1);
    }

    #[test]
    fn test_zero_duration_is_bounded() {
        let mut t = Timer::repeating(Duration::ZERO);
        assert_eq!(t.tick(5 * MS), 5);
    }

    #[test]
    fn test_reset_to() {
        let mut t = Timer::once(10 * MS);
        t.tick(10 * MS);
        t.reset_to(20 * MS);
        assert!(!t.is_finished());
        assert_eq!(t.tick(10 * MS), 0);
        assert_eq!(t.tick(10 * MS), 1);
    }
}
