//! Frame timing.
//!
//! [`FrameClock`] turns wall-clock instants into per-frame deltas for the
//! springs and timers. Long stalls (window dragged, laptop asleep) are capped
//! at [`MAX_FRAME_DELTA`] so a late frame never makes the page jump; the lost
//! time is simply dropped, like a skipped animation frame.
//!
//! # Example
//!
//! ```
//! use folio::time::FrameClock;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut clock = FrameClock::starting_at(start);
//! let dt = clock.tick(start + Duration::from_millis(16));
//! assert_eq!(dt, Duration::from_millis(16));
//! assert_eq!(clock.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Largest delta a single frame may report.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Tracks frame deltas, elapsed time and a periodically refreshed FPS.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Instant,
    /// Sum of reported (capped) deltas.
    elapsed: Duration,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock whose first frame is measured from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            elapsed: Duration::ZERO,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: start,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame at `now` and return its (capped) delta.
    ///
    /// An instant earlier than the previous frame yields a zero delta.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let raw = now.saturating_duration_since(self.last_frame);
        self.delta = raw.min(MAX_FRAME_DELTA);
        self.last_frame = now.max(self.last_frame);
        self.elapsed += self.delta;
        self.frame_count += 1;

        let since_fps = now.saturating_duration_since(self.fps_update_time);
        if since_fps >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_fps.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta
    }

    /// Record a frame at the current instant.
    pub fn tick_now(&mut self) -> Duration {
        self.tick(Instant::now())
    }

    /// Time since last frame (delta time).
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta in seconds, for the spring integrators.
    #[inline]
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total animated time (sum of capped deltas).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta(), Duration::ZERO);
    }

    #[test]
    fn test_tick_reports_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick(start + Duration::from_millis(16));
        clock.tick(start + Duration::from_millis(33));

        assert_eq!(clock.delta(), Duration::from_millis(17));
        assert_eq!(clock.elapsed(), Duration::from_millis(33));
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_stall_is_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick(start + Duration::from_secs(5));
        assert_eq!(dt, MAX_FRAME_DELTA);
        assert_eq!(clock.elapsed(), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_backwards_instant_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick(start - Duration::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn test_fps_window() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..=30 {
            clock.tick(start + Duration::from_millis(i * 20));
        }
        // 25 frames landed in the first 500ms window -> 50 fps
        assert!((clock.fps() - 50.0).abs() < 1.0);
    }
}
