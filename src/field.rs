//! Ambient particle field.
//!
//! A fixed batch of 2D point masses drifting across the viewport, weakly
//! attracted to the pointer and joined by faint lines when close together.
//!
//! # Frame Step
//!
//! Each call to [`ParticleField::step`] runs, per particle and in order:
//!
//! 1. Pointer attraction: if the pointer is within `attraction_radius`,
//!    `velocity += (pointer - position) * attraction_strength`
//! 2. Integration: `position += velocity`
//! 3. Damping: `velocity *= damping`
//! 4. Wrapping: positions leaving one edge re-enter at the opposite edge
//!
//! Steps are per frame, not per second, so the field runs at the display's
//! own pace the way a `requestAnimationFrame` loop would.
//!
//! # Example
//!
//! ```
//! use folio::field::{FieldConfig, ParticleField};
//! use folio::Vec2;
//!
//! let mut field = ParticleField::new(FieldConfig::default(), Vec2::new(1280.0, 720.0));
//! field.step(Vec2::new(640.0, 360.0));
//!
//! for link in field.links() {
//!     assert!(link.alpha > 0.0);
//! }
//! ```

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the particle field.
///
/// Defaults reproduce the portfolio hero: 60 violet dots, 200 px pointer
/// pull, 100 px link distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// When false the page skips the field entirely.
    pub enabled: bool,
    /// Number of particles, fixed for the field's lifetime.
    pub count: usize,
    /// Initial velocity is drawn from `(-initial_speed, initial_speed)` per axis.
    pub initial_speed: f32,
    /// Radius range `[min, max)` in pixels.
    pub radius_range: [f32; 2],
    /// Opacity range `[min, max)`.
    pub opacity_range: [f32; 2],
    /// Pointer attraction applies within this distance (pixels).
    pub attraction_radius: f32,
    /// Velocity impulse per pixel of pointer offset.
    pub attraction_strength: f32,
    /// Per-frame velocity multiplier, below 1.
    pub damping: f32,
    /// Particles closer than this are linked (pixels).
    pub link_distance: f32,
    /// Link opacity at zero distance.
    pub link_opacity: f32,
    /// Link stroke width in pixels.
    pub link_width: f32,
    /// Dot colour (sRGB, 0-1).
    pub particle_color: [f32; 3],
    /// Link colour (sRGB, 0-1).
    pub link_color: [f32; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 60,
            initial_speed: 0.15,
            radius_range: [0.5, 2.5],
            opacity_range: [0.1, 0.5],
            attraction_radius: 200.0,
            attraction_strength: 0.00005,
            damping: 0.98,
            link_distance: 100.0,
            link_opacity: 0.06,
            link_width: 0.5,
            particle_color: [167.0 / 255.0, 139.0 / 255.0, 250.0 / 255.0],
            link_color: [124.0 / 255.0, 58.0 / 255.0, 237.0 / 255.0],
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the initial velocity half-range.
    pub fn with_initial_speed(mut self, speed: f32) -> Self {
        self.initial_speed = speed.abs();
        self
    }

    /// Set pointer attraction radius and strength.
    pub fn with_attraction(mut self, radius: f32, strength: f32) -> Self {
        self.attraction_radius = radius;
        self.attraction_strength = strength;
        self
    }

    /// Set the per-frame damping factor.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the link distance threshold.
    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance;
        self
    }

    /// Enable or disable the field.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check the values that would stop particles settling or linking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |what: &str, reason: String| ConfigError::Invalid {
            what: format!("field.{what}"),
            reason,
        };
        if !(0.0..1.0).contains(&self.damping) {
            return Err(invalid("damping", format!("must be in [0, 1), got {}", self.damping)));
        }
        if self.attraction_radius.is_nan() || self.attraction_radius < 0.0 {
            return Err(invalid(
                "attraction_radius",
                format!("must not be negative, got {}", self.attraction_radius),
            ));
        }
        if self.link_distance.is_nan() || self.link_distance < 0.0 {
            return Err(invalid(
                "link_distance",
                format!("must not be negative, got {}", self.link_distance),
            ));
        }
        Ok(())
    }
}

/// One simulated dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Fixed at creation.
    pub radius: f32,
    /// Fixed at creation.
    pub opacity: f32,
}

/// A connecting line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first particle (always lower than `j`).
    pub i: usize,
    pub j: usize,
    pub a: Vec2,
    pub b: Vec2,
    /// Falls linearly to zero at the link distance.
    pub alpha: f32,
}

/// The particle batch plus the bounds it wraps within.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    bounds: Vec2,
}

impl ParticleField {
    /// Create a field with a fresh, unseeded random layout.
    pub fn new(config: FieldConfig, bounds: Vec2) -> Self {
        Self::with_rng(config, bounds, &mut rand::thread_rng())
    }

    /// Create a field drawing its initial layout from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: FieldConfig, bounds: Vec2, rng: &mut R) -> Self {
        let bounds = bounds.max(Vec2::ONE);
        let speed = config.initial_speed;
        let particles = (0..config.count)
            .map(|_| Particle {
                position: Vec2::new(
                    sample(rng, 0.0, bounds.x),
                    sample(rng, 0.0, bounds.y),
                ),
                velocity: Vec2::new(sample(rng, -speed, speed), sample(rng, -speed, speed)),
                radius: sample(rng, config.radius_range[0], config.radius_range[1]),
                opacity: sample(rng, config.opacity_range[0], config.opacity_range[1]),
            })
            .collect();

        Self {
            config,
            particles,
            bounds,
        }
    }

    /// Build a field from explicit particles.
    pub fn from_particles(config: FieldConfig, bounds: Vec2, particles: Vec<Particle>) -> Self {
        Self {
            config,
            particles,
            bounds: bounds.max(Vec2::ONE),
        }
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Track a new viewport size.
    ///
    /// Existing particles are not moved; any now outside the bounds wrap
    /// back in on the next step.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds.max(Vec2::ONE);
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self, pointer: Vec2) {
        let radius_sq = self.config.attraction_radius * self.config.attraction_radius;
        let strength = self.config.attraction_strength;
        let damping = self.config.damping;
        let bounds = self.bounds;

        for p in &mut self.particles {
            let offset = pointer - p.position;
            if offset.length_squared() < radius_sq {
                p.velocity += offset * strength;
            }

            p.position += p.velocity;
            p.velocity *= damping;

            p.position.x = wrap(p.position.x, bounds.x);
            p.position.y = wrap(p.position.y, bounds.y);
        }
    }

    /// All links for the current positions.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        self.links_into(&mut out);
        out
    }

    /// Write the current links into `out`, reusing its allocation.
    ///
    /// Every unordered pair is tested once; the pair count is tiny (60
    /// particles give 1770 pairs) so no spatial index is needed.
    pub fn links_into(&self, out: &mut Vec<Link>) {
        out.clear();
        let max = self.config.link_distance;
        if max <= 0.0 {
            return;
        }
        let max_sq = max * max;

        for (i, p) in self.particles.iter().enumerate() {
            for (j, q) in self.particles.iter().enumerate().skip(i + 1) {
                let dist_sq = p.position.distance_squared(q.position);
                if dist_sq < max_sq {
                    let dist = dist_sq.sqrt();
                    out.push(Link {
                        i,
                        j,
                        a: p.position,
                        b: q.position,
                        alpha: self.config.link_opacity * (1.0 - dist / max),
                    });
                }
            }
        }
    }

    /// Fastest particle speed, in pixels per frame.
    pub fn max_speed(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.velocity.length())
            .fold(0.0, f32::max)
    }
}

/// Map a coordinate onto `[0, extent)` with toroidal wrap-around.
pub fn wrap(value: f32, extent: f32) -> f32 {
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negatives
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(position: Vec2) -> Particle {
        Particle {
            position,
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.3,
        }
    }

    #[test]
    fn test_initial_layout_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FieldConfig::default();
        let field = ParticleField::with_rng(config.clone(), Vec2::new(800.0, 600.0), &mut rng);

        assert_eq!(field.len(), 60);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
            assert!(p.velocity.x.abs() < 0.15 && p.velocity.y.abs() < 0.15);
            assert!(p.radius >= 0.5 && p.radius < 2.5);
            assert!(p.opacity >= 0.1 && p.opacity < 0.5);
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(50.0, 100.0), 50.0);
        assert_eq!(wrap(100.0, 100.0), 0.0);
        assert!((wrap(-1.0, 100.0) - 99.0).abs() < 1e-4);
        assert!((wrap(250.0, 100.0) - 50.0).abs() < 1e-4);
        let tiny = wrap(-1e-9, 100.0);
        assert!((0.0..100.0).contains(&tiny));
    }

    #[test]
    fn test_pointer_attraction_only_within_radius() {
        let config = FieldConfig::default().with_damping(1.0);
        let near = still(Vec2::new(100.0, 100.0));
        let far = still(Vec2::new(700.0, 500.0));
        let mut field =
            ParticleField::from_particles(config, Vec2::new(800.0, 600.0), vec![near, far]);

        field.step(Vec2::new(150.0, 100.0));

        let near = field.particles()[0];
        let far = field.particles()[1];
        assert!((near.velocity.x - 50.0 * 0.00005).abs() < 1e-7);
        assert_eq!(near.velocity.y, 0.0);
        assert_eq!(far.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_unmoved_pointer_pulls_toward_origin() {
        let config = FieldConfig::default();
        let corner = still(Vec2::new(50.0, 50.0));
        let mut field =
            ParticleField::from_particles(config, Vec2::new(800.0, 600.0), vec![corner]);

        field.step(Vec2::ZERO);
        let p = field.particles()[0];
        assert!(p.position.x < 50.0);
        assert!(p.position.y < 50.0);
    }

    #[test]
    fn test_links_fall_off_with_distance() {
        let config = FieldConfig::default();
        let field = ParticleField::from_particles(
            config,
            Vec2::new(800.0, 600.0),
            vec![
                still(Vec2::new(0.0, 0.0)),
                still(Vec2::new(50.0, 0.0)),
                still(Vec2::new(400.0, 400.0)),
            ],
        );

        let links = field.links();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].i, links[0].j), (0, 1));
        assert!((links[0].alpha - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_link_at_threshold_excluded() {
        let field = ParticleField::from_particles(
            FieldConfig::default(),
            Vec2::new(800.0, 600.0),
            vec![still(Vec2::new(0.0, 0.0)), still(Vec2::new(100.0, 0.0))],
        );
        assert!(field.links().is_empty());
    }

    #[test]
    fn test_resize_does_not_move_particles() {
        let mut field = ParticleField::from_particles(
            FieldConfig::default(),
            Vec2::new(800.0, 600.0),
            vec![still(Vec2::new(700.0, 500.0))],
        );
        field.resize(Vec2::new(400.0, 300.0));
        assert_eq!(field.particles()[0].position, Vec2::new(700.0, 500.0));

        field.step(Vec2::new(-10_000.0, -10_000.0));
        let p = field.particles()[0].position;
        assert!(p.x >= 0.0 && p.x < 400.0);
        assert!(p.y >= 0.0 && p.y < 300.0);
    }

    #[test]
    fn test_zero_count_field() {
        let mut field = ParticleField::new(FieldConfig::default().with_count(0), Vec2::new(10.0, 10.0));
        field.step(Vec2::ZERO);
        assert!(field.is_empty());
        assert!(field.links().is_empty());
        assert_eq!(field.max_speed(), 0.0);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(FieldConfig::default().validate().is_ok());
        assert!(FieldConfig::default().with_damping(0.0).validate().is_ok());

        for config in [
            FieldConfig::default().with_damping(1.0),
            FieldConfig::default().with_damping(-0.1),
            FieldConfig::default().with_attraction(-1.0, 0.0),
            FieldConfig::default().with_link_distance(-10.0),
        ] {
            assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
        }
    }

}
