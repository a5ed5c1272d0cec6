//! Damped spring filter.
//!
//! Every smoothed binding on the page (tilt, scale, scroll progress) is a
//! unit-mass spring pulled toward a target. The step uses the closed-form
//! solution of the damped oscillator for the frame's delta, so it is exact
//! for any `dt` and any damping regime:
//!
//! - under-damped (`damping² < 4·stiffness`): decaying oscillation
//! - critically damped: fastest approach without overshoot
//! - over-damped: slow exponential approach, never overshoots
//!
//! The target is held constant during a step.

use serde::{Deserialize, Serialize};

/// Settling tolerance on position.
pub const REST_DELTA: f32 = 0.001;
/// Settling tolerance on velocity.
pub const REST_SPEED: f32 = 0.01;

/// Spring constants.
///
/// Deserializing rejects a stiffness that is not positive or a negative
/// damping; either would make the closed-form step produce NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpringConfig")]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
}

#[derive(Deserialize)]
struct RawSpringConfig {
    stiffness: f32,
    damping: f32,
}

impl TryFrom<RawSpringConfig> for SpringConfig {
    type Error = String;

    fn try_from(raw: RawSpringConfig) -> Result<Self, Self::Error> {
        if !raw.stiffness.is_finite() || raw.stiffness <= 0.0 {
            return Err(format!("spring stiffness must be positive, got {}", raw.stiffness));
        }
        if !raw.damping.is_finite() || raw.damping < 0.0 {
            return Err(format!("spring damping must not be negative, got {}", raw.damping));
        }
        Ok(Self {
            stiffness: raw.stiffness,
            damping: raw.damping,
        })
    }
}

impl SpringConfig {
    /// Constants used by tilt cards.
    pub const TILT: SpringConfig = SpringConfig {
        stiffness: 300.0,
        damping: 30.0,
    };

    /// Constants used by the scroll progress bar.
    pub const PROGRESS: SpringConfig = SpringConfig {
        stiffness: 100.0,
        damping: 30.0,
    };

    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness: stiffness.max(f32::EPSILON),
            damping: damping.max(0.0),
        }
    }

    /// Damping ratio ζ; 1.0 is critical.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * self.stiffness.sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::TILT
    }
}

/// A spring-smoothed scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    position: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// A spring at rest on `value`.
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            position: value,
            velocity: 0.0,
            target: value,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop.
    pub fn snap_to(&mut self, value: f32) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Whether the spring sits on its target with no motion.
    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds. Returns true once settled.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.is_settled() {
            return true;
        }
        if dt <= 0.0 {
            return false;
        }

        let (x, v) = solve(self.config, self.position - self.target, self.velocity, dt);
        self.position = self.target + x;
        self.velocity = v;

        let settled = x.abs() < REST_DELTA && v.abs() < REST_SPEED;
        if settled {
            self.position = self.target;
            self.velocity = 0.0;
        }
        settled
    }
}

/// Displacement and velocity after `t` seconds, from displacement `x0` and
/// velocity `v0`, for a unit mass.
fn solve(config: SpringConfig, x0: f32, v0: f32, t: f32) -> (f32, f32) {
    let k = config.stiffness;
    let c = config.damping;
    let omega = k.sqrt();
    let zeta = c / (2.0 * omega);

    if (zeta - 1.0).abs() < 1e-4 {
        // x(t) = (c1 + c2 t) e^(-ωt)
        let c1 = x0;
        let c2 = v0 + omega * x0;
        let e = (-omega * t).exp();
        let x = (c1 + c2 * t) * e;
        let v = (c2 - omega * (c1 + c2 * t)) * e;
        (x, v)
    } else if zeta < 1.0 {
        // x(t) = e^(-ζωt) (c1 cos ωd t + c2 sin ωd t)
        let wd = omega * (1.0 - zeta * zeta).sqrt();
        let decay = zeta * omega;
        let c1 = x0;
        let c2 = (v0 + decay * x0) / wd;
        let e = (-decay * t).exp();
        let (sin, cos) = (wd * t).sin_cos();
        let x = e * (c1 * cos + c2 * sin);
        let v = e * ((c2 * wd - decay * c1) * cos - (c1 * wd + decay * c2) * sin);
        (x, v)
    } else {
        // x(t) = A e^(r1 t) + B e^(r2 t)
        let root = omega * (zeta * zeta - 1.0).sqrt();
        let r1 = -zeta * omega + root;
        let r2 = -zeta * omega - root;
        let a = (v0 - r2 * x0) / (r1 - r2);
        let b = x0 - a;
        let e1 = (r1 * t).exp();
        let e2 = (r2 * t).exp();
        (a * e1 + b * e2, a * r1 * e1 + b * r2 * e2)
    }
}
