//! Endlessly looping horizontal strip.
//!
//! The item list is laid out twice in a row, so translating the strip by
//! half its width lands on an identical frame and the loop has no seam.

use std::time::Duration;

/// One full loop.
pub const MARQUEE_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarqueeDirection {
    /// Offset runs from -50% to 0%.
    Forward,
    /// Offset runs from 0% to -50%.
    Reverse,
}

/// Looping marquee state.
#[derive(Debug, Clone)]
pub struct Marquee {
    period: Duration,
    direction: MarqueeDirection,
    phase: f32,
}

impl Marquee {
    pub fn new(direction: MarqueeDirection) -> Self {
        Self::with_period(direction, MARQUEE_PERIOD)
    }

    pub fn with_period(direction: MarqueeDirection, period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            direction,
            phase: 0.0,
        }
    }

    #[inline]
    pub fn direction(&self) -> MarqueeDirection {
        self.direction
    }

    /// Loop phase in `[0, 1)`.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn step(&mut self, dt: Duration) {
        let advance = dt.as_secs_f32() / self.period.as_secs_f32();
        self.phase = (self.phase + advance).fract();
    }

    /// Offset as a fraction of the doubled strip width, in `[-0.5, 0]`.
    pub fn offset_fraction(&self) -> f32 {
        match self.direction {
            MarqueeDirection::Forward => -0.5 + 0.5 * self.phase,
            MarqueeDirection::Reverse => -0.5 * self.phase,
        }
    }

    /// Translation in pixels for a doubled strip `strip_width` wide.
    pub fn translate_x(&self, strip_width: f32) -> f32 {
        self.offset_fraction() * strip_width
    }
}

/// The items repeated twice, in order.
pub fn doubled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * 2);
    out.extend_from_slice(items);
    out.extend_from_slice(items);
    out
}
