//! Range mapping and easing curves.

/// Map `value` from `input` range onto `output` range, clamped to the
/// output range.
///
/// A degenerate input range (`input.0 == input.1`) returns the output start.
/// Ranges may run in either direction, e.g. `[-0.5, 0.5] → [10, -10]`.
///
/// ```
/// use folio::signals::interpolate;
///
/// assert_eq!(interpolate(250.0, (0.0, 500.0), (1.0, 0.0)), 0.5);
/// assert_eq!(interpolate(900.0, (0.0, 500.0), (1.0, 0.0)), 0.0);
/// ```
pub fn interpolate(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let span = input.1 - input.0;
    if span == 0.0 {
        return output.0;
    }
    let t = (value - input.0) / span;
    if t <= 0.0 {
        output.0
    } else if t >= 1.0 {
        output.1
    } else {
        output.0 + (output.1 - output.0) * t
    }
}

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// The page's entrance curve: fast start, long soft landing.
    pub const EASE_OUT_EXPO: CubicBezier = CubicBezier::new(0.22, 1.0, 0.36, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for linear progress `t` in `[0, 1]`.
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_x(t);
        bezier(s, self.y1, self.y2)
    }

    /// Find the curve parameter whose x equals `x`.
    ///
    /// Newton iterations first, bisection if the slope is too flat.
    fn solve_x(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..8 {
            let err = bezier(s, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return s;
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..32 {
            let v = bezier(s, self.x1, self.x2);
            if (v - x).abs() < 1e-6 {
                break;
            }
            if v < x {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }
}

/// One coordinate of a bezier with endpoints 0 and 1.
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_reversed_output() {
        assert_eq!(interpolate(-0.5, (-0.5, 0.5), (10.0, -10.0)), 10.0);
        assert_eq!(interpolate(0.0, (-0.5, 0.5), (10.0, -10.0)), 0.0);
        assert_eq!(interpolate(0.5, (-0.5, 0.5), (10.0, -10.0)), -10.0);
    }

    #[test]
    fn test_interpolate_clamps() {
        assert_eq!(interpolate(-3.0, (0.0, 1.0), (5.0, -82.0)), 5.0);
        assert_eq!(interpolate(3.0, (0.0, 1.0), (5.0, -82.0)), -82.0);
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(interpolate(1.0, (2.0, 2.0), (7.0, 9.0)), 7.0);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((linear.ease(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ease_out_is_monotonic_and_front_loaded() {
        let curve = CubicBezier::EASE_OUT_EXPO;
        let mut last = 0.0;
        for i in 1..=100 {
            let v = curve.ease(i as f32 / 100.0);
            assert!(v >= last - 1e-5);
            last = v;
        }
        assert!(curve.ease(0.25) > 0.5);
        assert_eq!(curve.ease(1.0), 1.0);
    }
}
