//! Pointer-driven card tilt.
//!
//! While hovered, the pointer offset inside the card (normalised to
//! `-0.5..0.5` on each axis) sets rotation targets of up to ±10° and a
//! slight scale-up. Leaving the card sends every target back to neutral.
//! Springs smooth all three outputs.

use glam::Vec2;

use super::interpolate::interpolate;
use super::spring::{Spring, SpringConfig};

/// Peak rotation at the card edge, in degrees.
pub const MAX_TILT_DEG: f32 = 10.0;
/// Scale while hovered.
pub const HOVER_SCALE: f32 = 1.02;

/// Smoothed rotation and scale of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltOutput {
    /// Rotation about the horizontal axis, degrees.
    pub rotate_x: f32,
    /// Rotation about the vertical axis, degrees.
    pub rotate_y: f32,
    pub scale: f32,
}

impl TiltOutput {
    pub const NEUTRAL: TiltOutput = TiltOutput {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };
}

/// Tilt state for one card.
#[derive(Debug, Clone)]
pub struct Tilt {
    rotate_x: Spring,
    rotate_y: Spring,
    scale: Spring,
    hovered: bool,
}

impl Tilt {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            rotate_x: Spring::new(config, 0.0),
            rotate_y: Spring::new(config, 0.0),
            scale: Spring::new(config, 1.0),
            hovered: false,
        }
    }

    /// Normalised pointer offset within `bounds` (`min`, `size`).
    ///
    /// `(0, 0)` is the card centre, `(±0.5, ±0.5)` its corners.
    pub fn normalise(pointer: Vec2, min: Vec2, size: Vec2) -> Vec2 {
        let size = size.max(Vec2::splat(f32::EPSILON));
        (pointer - min) / size - Vec2::splat(0.5)
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer moved over the card at normalised `offset`.
    pub fn hover(&mut self, offset: Vec2) {
        self.hovered = true;
        self.rotate_x
            .set_target(interpolate(offset.y, (-0.5, 0.5), (MAX_TILT_DEG, -MAX_TILT_DEG)));
        self.rotate_y
            .set_target(interpolate(offset.x, (-0.5, 0.5), (-MAX_TILT_DEG, MAX_TILT_DEG)));
        self.scale.set_target(HOVER_SCALE);
    }

    /// Pointer left the card.
    pub fn leave(&mut self) {
        self.hovered = false;
        self.rotate_x.set_target(0.0);
        self.rotate_y.set_target(0.0);
        self.scale.set_target(1.0);
    }

    /// Advance the springs by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.rotate_x.step(dt);
        self.rotate_y.step(dt);
        self.scale.step(dt);
    }

    pub fn output(&self) -> TiltOutput {
        TiltOutput {
            rotate_x: self.rotate_x.value(),
            rotate_y: self.rotate_y.value(),
            scale: self.scale.value(),
        }
    }

    /// Whether all three springs are at rest.
    pub fn is_settled(&self) -> bool {
        self.rotate_x.is_settled() && self.rotate_y.is_settled() && self.scale.is_settled()
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self::new(SpringConfig::TILT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(tilt: &mut Tilt) {
        for _ in 0..600 {
            tilt.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_normalise() {
        let min = Vec2::new(100.0, 200.0);
        let size = Vec2::new(200.0, 100.0);
        assert_eq!(Tilt::normalise(Vec2::new(200.0, 250.0), min, size), Vec2::ZERO);
        assert_eq!(
            Tilt::normalise(Vec2::new(100.0, 300.0), min, size),
            Vec2::new(-0.5, 0.5)
        );
    }

    #[test]
    fn test_corner_tilts_fully() {
        let mut tilt = Tilt::default();
        tilt.hover(Vec2::new(0.5, -0.5));
        settle(&mut tilt);

        let out = tilt.output();
        assert_eq!(out.rotate_x, MAX_TILT_DEG);
        assert_eq!(out.rotate_y, MAX_TILT_DEG);
        assert_eq!(out.scale, HOVER_SCALE);
    }

    #[test]
    fn test_leave_returns_to_neutral() {
        let mut tilt = Tilt::default();
        tilt.hover(Vec2::new(-0.4, 0.3));
        tilt.step(0.05);
        tilt.leave();
        settle(&mut tilt);

        assert!(!tilt.is_hovered());
        assert!(tilt.is_settled());
        assert_eq!(tilt.output(), TiltOutput::NEUTRAL);
    }
}
