//! Display-synced frame requests.
//!
//! The page redraws once per display refresh. [`FrameScheduler`] keeps at
//! most one request outstanding: asking again while a frame is pending is a
//! no-op. Cancelling (or dropping the scheduler) releases the frame source,
//! and any redraw delivered afterwards is reported as stale so the caller
//! skips it.

use std::rc::Rc;
use std::sync::Arc;

use winit::window::Window;

/// Something that can deliver a redraw on the next display refresh.
pub trait FrameSource {
    fn request_frame(&self);
}

impl FrameSource for Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

impl<T: FrameSource + ?Sized> FrameSource for Arc<T> {
    fn request_frame(&self) {
        (**self).request_frame();
    }
}

impl<T: FrameSource + ?Sized> FrameSource for Rc<T> {
    fn request_frame(&self) {
        (**self).request_frame();
    }
}

/// Single-outstanding-request frame driver.
#[derive(Debug)]
pub struct FrameScheduler<S: FrameSource> {
    source: Option<S>,
    pending: bool,
    frames: u64,
}

impl<S: FrameSource> FrameScheduler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            pending: false,
            frames: 0,
        }
    }

    /// Ask for the next frame. Returns false if one is already pending or
    /// the scheduler has been cancelled.
    pub fn request(&mut self) -> bool {
        match &self.source {
            Some(source) if !self.pending => {
                source.request_frame();
                self.pending = true;
                true
            }
            _ => false,
        }
    }

    /// A redraw arrived. Returns whether it should be processed.
    ///
    /// Redraws the platform issues on its own (expose, resize) are also
    /// processed while the scheduler is live.
    pub fn on_frame(&mut self) -> bool {
        if self.source.is_none() {
            return false;
        }
        self.pending = false;
        self.frames += 1;
        true
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.source.is_none()
    }

    /// Frames processed so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Stop scheduling. Idempotent.
    pub fn cancel(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!(frames = self.frames, "frame scheduler cancelled");
        }
        self.pending = false;
    }
}

impl<S: FrameSource> Drop for FrameScheduler<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
