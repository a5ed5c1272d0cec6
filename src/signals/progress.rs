//! Page scroll bindings: the top progress bar and the hero fade-out.

use super::interpolate::interpolate;
use super::spring::{Spring, SpringConfig};

/// Scroll offset over which the hero fades out.
pub const HERO_FADE_PX: f32 = 500.0;
/// Hero scale once fully scrolled past.
pub const HERO_MIN_SCALE: f32 = 0.95;

/// Scroll offset as a fraction of the scrollable range, in `[0, 1]`.
///
/// A page that does not scroll reports 0.
pub fn scroll_fraction(offset: f32, scrollable: f32) -> f32 {
    if scrollable <= 0.0 {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

/// Spring-smoothed horizontal scale of the reading progress bar.
#[derive(Debug, Clone)]
pub struct ScrollProgress {
    spring: Spring,
}

impl ScrollProgress {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            spring: Spring::new(config, 0.0),
        }
    }

    /// Set the raw scroll fraction; values outside `[0, 1]` are clamped.
    pub fn set_fraction(&mut self, fraction: f32) {
        self.spring.set_target(fraction.clamp(0.0, 1.0));
    }

    pub fn step(&mut self, dt: f32) {
        self.spring.step(dt);
    }

    /// Bar scale in `[0, 1]`.
    pub fn scale_x(&self) -> f32 {
        self.spring.value().clamp(0.0, 1.0)
    }
}

impl Default for ScrollProgress {
    fn default() -> Self {
        Self::new(SpringConfig::PROGRESS)
    }
}

/// Hero opacity and scale for the current scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroFade {
    pub opacity: f32,
    pub scale: f32,
}

impl HeroFade {
    pub fn at(scroll_offset: f32) -> Self {
        Self {
            opacity: interpolate(scroll_offset, (0.0, HERO_FADE_PX), (1.0, 0.0)),
            scale: interpolate(scroll_offset, (0.0, HERO_FADE_PX), (1.0, HERO_MIN_SCALE)),
        }
    }
}
