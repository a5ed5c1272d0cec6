//! One-shot reveal on first visibility.
//!
//! An element starts hidden (transparent, shifted down) and, the first time
//! it comes into view, fades and slides into place. The visibility flag is
//! sticky: scrolling the element back out never hides it again.

use super::interpolate::CubicBezier;

/// How far inside the viewport an element must be before it counts as seen.
pub const REVEAL_MARGIN_PX: f32 = 60.0;
/// Starting vertical offset of a hidden element.
pub const REVEAL_OFFSET_PX: f32 = 50.0;
/// Length of the entrance transition, seconds.
pub const REVEAL_DURATION: f32 = 0.8;

/// Opacity and vertical offset to draw an element with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOutput {
    pub opacity: f32,
    pub offset_y: f32,
}

/// Reveal state of one element.
#[derive(Debug, Clone)]
pub struct Reveal {
    revealed: bool,
    /// Stagger delay before the transition starts, seconds.
    delay: f32,
    since_reveal: f32,
}

impl Reveal {
    pub fn new() -> Self {
        Self::with_delay(0.0)
    }

    /// A reveal that starts `delay` seconds after the element is first seen.
    pub fn with_delay(delay: f32) -> Self {
        Self {
            revealed: false,
            delay: delay.max(0.0),
            since_reveal: 0.0,
        }
    }

    /// Staggered reveal for the `index`-th item of a list.
    pub fn staggered(index: usize, step: f32) -> Self {
        Self::with_delay(index as f32 * step)
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feed the element's current vertical extent in viewport coordinates.
    ///
    /// Returns the (sticky) visibility flag.
    pub fn observe(&mut self, top: f32, bottom: f32, viewport_height: f32) -> bool {
        if !self.revealed && intersects(top, bottom, viewport_height) {
            self.revealed = true;
        }
        self.revealed
    }

    /// Advance the entrance transition by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if self.revealed {
            self.since_reveal += dt.max(0.0);
        }
    }

    /// Linear transition progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if !self.revealed {
            return 0.0;
        }
        ((self.since_reveal - self.delay) / REVEAL_DURATION).clamp(0.0, 1.0)
    }

    pub fn output(&self) -> RevealOutput {
        let eased = CubicBezier::EASE_OUT_EXPO.ease(self.progress());
        RevealOutput {
            opacity: eased,
            offset_y: REVEAL_OFFSET_PX * (1.0 - eased),
        }
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `[top, bottom]` overlaps the viewport shrunk by the margin.
fn intersects(top: f32, bottom: f32, viewport_height: f32) -> bool {
    top < viewport_height - REVEAL_MARGIN_PX && bottom > REVEAL_MARGIN_PX
}
