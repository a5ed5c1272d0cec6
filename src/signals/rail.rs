//! Vertical-scroll-to-horizontal-pan for the project strip.
//!
//! The rail section is taller than the viewport and its strip stays pinned
//! while the page scrolls through it. Progress through the section pans the
//! strip from slightly right of its rest position to most of its width left.
//!
//! The arrow buttons add a second, manual offset on top of that pan
//! ([`RailScroll`]), bounded by how far the strip overflows its container.

use super::interpolate::interpolate;
use super::spring::{Spring, SpringConfig};

/// Strip offset at the top of the section, as a percentage of strip width.
pub const RAIL_START_PCT: f32 = 5.0;
/// Strip offset at the bottom of the section.
pub const RAIL_END_PCT: f32 = -82.0;

/// Distance moved by one arrow click.
pub const ARROW_STEP_PX: f32 = 400.0;
/// The right arrow disables this close to the end.
pub const SCROLL_END_SLACK_PX: f32 = 10.0;

/// Near-critical spring for smooth arrow scrolling.
const SMOOTH_SCROLL: SpringConfig = SpringConfig {
    stiffness: 170.0,
    damping: 26.0,
};

/// Progress through a pinned section in `[0, 1]`.
///
/// 0 when the section's top reaches the viewport top, 1 when its bottom
/// reaches the viewport bottom.
pub fn section_fraction(scroll: f32, section_top: f32, section_height: f32, viewport_height: f32) -> f32 {
    let range = section_height - viewport_height;
    if range <= 0.0 {
        return if scroll >= section_top { 1.0 } else { 0.0 };
    }
    ((scroll - section_top) / range).clamp(0.0, 1.0)
}

/// A horizontally panning strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rail {
    start_pct: f32,
    end_pct: f32,
}

impl Rail {
    pub fn new(start_pct: f32, end_pct: f32) -> Self {
        Self { start_pct, end_pct }
    }

    /// Offset as a percentage of the strip width.
    pub fn offset_pct(&self, fraction: f32) -> f32 {
        interpolate(fraction, (0.0, 1.0), (self.start_pct, self.end_pct))
    }

    /// Horizontal translation in pixels for a strip `strip_width` wide.
    pub fn translate_x(&self, fraction: f32, strip_width: f32) -> f32 {
        self.offset_pct(fraction) / 100.0 * strip_width
    }
}

impl Default for Rail {
    fn default() -> Self {
        Self::new(RAIL_START_PCT, RAIL_END_PCT)
    }
}

/// Arrow-driven horizontal scroll of the strip, in pixels to the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailScroll {
    spring: Spring,
    max: f32,
}

impl RailScroll {
    /// `max` is the strip width minus the visible width.
    pub fn new(max: f32) -> Self {
        Self {
            spring: Spring::new(SMOOTH_SCROLL, 0.0),
            max: max.max(0.0),
        }
    }

    /// Current offset, within `[0, max]`.
    pub fn offset(&self) -> f32 {
        self.spring.value().clamp(0.0, self.max)
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Change the scroll range, pulling the offset back inside it.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        if self.spring.target() > self.max {
            self.spring.snap_to(self.max);
        }
    }

    pub fn can_scroll_left(&self) -> bool {
        self.offset() > 0.0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.offset() < self.max - SCROLL_END_SLACK_PX
    }

    /// Scroll by `dx` pixels (positive moves the cards left).
    pub fn scroll_by(&mut self, dx: f32) {
        let target = (self.spring.target() + dx).clamp(0.0, self.max);
        self.spring.set_target(target);
    }

    pub fn step(&mut self, dt: f32) {
        self.spring.step(dt);
    }
}
