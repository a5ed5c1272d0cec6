//! Drawing surface dimensions.
//!
//! The viewport follows the window size. A resize marks the cached surface
//! size dirty; the renderer picks it up with [`Viewport::take_resize`] before
//! the next frame. Between a resize and that frame the surface may be stale.

use glam::Vec2;

/// Width and height of the drawing surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    dirty: bool,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            dirty: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as floats, for simulation and layout.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Record a window resize.
    ///
    /// Zero-sized resizes (minimised windows) are ignored so the surface is
    /// never configured with an empty extent. Returns whether the size
    /// actually changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.dirty = true;
        true
    }

    /// Whether a resize is waiting to be applied to the surface.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Take the pending resize, if any, clearing the dirty flag.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        if self.dirty {
            self.dirty = false;
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Whether a point lies inside the viewport.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
