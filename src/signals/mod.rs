//! Scroll- and pointer-linked animation bindings.
//!
//! Each binding maps one input signal (pointer offset, scroll offset,
//! visibility, wall time) to one visual property. Smoothing goes through
//! the shared [`Spring`] filter; none of these types touch the GPU.

pub mod counter;
pub mod interpolate;
pub mod marquee;
pub mod progress;
pub mod rail;
pub mod reveal;
pub mod spring;
pub mod tilt;

pub use counter::Counter;
pub use interpolate::{interpolate, CubicBezier};
pub use marquee::{doubled, Marquee, MarqueeDirection};
pub use progress::{scroll_fraction, HeroFade, ScrollProgress};
pub use rail::{section_fraction, Rail, RailScroll};
pub use reveal::{Reveal, RevealOutput};
pub use spring::{Spring, SpringConfig};
pub use tilt::{Tilt, TiltOutput};
