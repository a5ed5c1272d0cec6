//! Count-up number shown once its element scrolls into view.

use std::time::Duration;

use crate::timer::Timer;

/// Total count-up time.
pub const COUNTER_DURATION: Duration = Duration::from_millis(1500);
/// Interval between increments.
pub const COUNTER_TICK: Duration = Duration::from_millis(16);

/// A number that counts from 0 to `target`.
#[derive(Debug, Clone)]
pub struct Counter {
    target: u32,
    value: f32,
    increment: f32,
    started: bool,
    timer: Timer,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        let steps = COUNTER_DURATION.as_secs_f32() / COUNTER_TICK.as_secs_f32();
        Self {
            target,
            value: 0.0,
            increment: target as f32 / steps,
            started: false,
            timer: Timer::repeating(COUNTER_TICK),
        }
    }

    #[inline]
    pub fn target(&self) -> u32 {
        self.target
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Start counting. Later calls have no effect.
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_done(&self) -> bool {
        self.value >= self.target as f32
    }

    /// Advance by `dt`. Does nothing until started.
    pub fn tick(&mut self, dt: Duration) {
        if !self.started || self.is_done() {
            return;
        }
        let firings = self.timer.tick(dt);
        for _ in 0..firings {
            self.value += self.increment;
            if self.value >= self.target as f32 {
                self.value = self.target as f32;
                break;
            }
        }
    }

    /// Number to display.
    pub fn display(&self) -> u32 {
        if self.is_done() {
            self.target
        } else {
            self.value.floor() as u32
        }
    }
}
