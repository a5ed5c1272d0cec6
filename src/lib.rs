//! # folio
//!
//! A developer portfolio page rendered natively with wgpu: an ambient
//! particle field behind the hero, scroll- and pointer-linked animation
//! bindings, a typewriter terminal and a contact form that posts to a
//! form-relay service.
//!
//! ## Quick Start
//!
//! ```ignore
//! use folio::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let config = FolioConfig::discover(std::env::args().nth(1).map(Into::into))?;
//!     folio::run(config)
//! }
//! ```
//!
//! ## Core Pieces
//!
//! ### Particle Field
//!
//! [`ParticleField`] steps a fixed batch of 2D dots once per frame: pointer
//! pull, integration, damping and toroidal wrap. [`ParticleField::links`]
//! yields the faint lines between dots closer than the link distance.
//!
//! ```
//! use folio::prelude::*;
//!
//! let mut field = ParticleField::new(FieldConfig::default(), Vec2::new(800.0, 600.0));
//! field.step(Vec2::new(400.0, 300.0));
//! assert_eq!(field.len(), 60);
//! ```
//!
//! ### Signals
//!
//! The [`signals`] module holds the animation bindings: springs, card tilt,
//! one-shot reveals, the reading progress bar, the hero fade, the pinned
//! project rail, marquees and count-up numbers. Each is advanced with an
//! explicit `dt`, so none of them read the clock.
//!
//! ### Typing
//!
//! [`Typewriter`] types a terminal script one character per timer firing;
//! [`CursorBlink`] toggles on its own interval.
//!
//! ### Contact
//!
//! [`ContactForm`] tracks the form lifecycle (idle, loading, sent, error)
//! and [`FormClient`] delivers submissions over HTTP. Any [`Submitter`]
//! can stand in for the client, and [`SubmitWorker`] runs one on its own
//! thread so the frame loop never waits on the network.
//!
//! ## Feature Overview
//!
//! | Area | Types |
//! |------|-------|
//! | Simulation | [`ParticleField`], [`FieldConfig`] |
//! | Motion | [`Spring`], [`Tilt`], [`Reveal`], [`ScrollProgress`], [`HeroFade`], [`Rail`], [`RailScroll`], [`Marquee`], [`Counter`] |
//! | Text | [`Typewriter`], [`CursorBlink`] |
//! | Page | [`Page`], [`Layout`], [`NavState`], [`Target`] |
//! | Frames | [`FrameScheduler`], [`FrameClock`], [`Timer`] |
//! | I/O | [`ContactForm`], [`FormClient`], [`SubmitWorker`], [`AssetStore`], [`Content`], [`FolioConfig`] |

pub mod assets;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod nav;
pub mod page;
pub mod scheduler;
pub mod signals;
pub mod time;
pub mod timer;
pub mod typing;
pub mod viewport;
mod window;

pub use assets::{AssetStore, AssetsConfig, DecodedImage, ImageAsset};
pub use config::FolioConfig;
pub use contact::{
    ContactConfig, ContactField, ContactForm, FormClient, FormStatus, SubmitResponse,
    SubmitWorker, Submission, Submitter,
};
pub use content::Content;
pub use error::{AssetError, ConfigError, ContactError, GpuError, RunError};
pub use field::{FieldConfig, Link, Particle, ParticleField};
pub use glam::Vec2;
pub use nav::NavState;
pub use page::{Layout, Outbound, Page, Target};
pub use scheduler::{FrameScheduler, FrameSource};
pub use signals::{
    Counter, HeroFade, Marquee, MarqueeDirection, Rail, RailScroll, Reveal, ScrollProgress,
    Spring, SpringConfig, Tilt,
};
pub use time::FrameClock;
pub use timer::{Timer, TimerMode};
pub use typing::{CursorBlink, ScriptLine, Typewriter, TypingConfig};
pub use window::{run, App};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use folio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FolioConfig;
    pub use crate::contact::{
        ContactField, ContactForm, FormClient, FormStatus, SubmitWorker, Submission, Submitter,
    };
    pub use crate::content::Content;
    pub use crate::error::{ContactError, RunError};
    pub use crate::field::{FieldConfig, ParticleField};
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::page::Page;
    pub use crate::signals::{Reveal, ScrollProgress, Spring, SpringConfig, Tilt};
    pub use crate::time::FrameClock;
    pub use crate::typing::{CursorBlink, Typewriter};
    pub use crate::Vec2;
}
