//! Pointer, wheel and keyboard input for the page.
//!
//! The `Input` struct keeps the latest pointer position and the input that
//! arrived since the last frame. Consumers read it once per frame; nothing
//! is pushed to them.
//!
//! Printable characters typed this frame are collected separately from key
//! codes, so a focused text field reads [`Input::text`] while the page keeps
//! reading keys for scrolling.
//!
//! The pointer starts at the origin and stays there until the first cursor
//! move, so anything attracted to the pointer drifts toward the top-left
//! corner until the visitor moves the mouse.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Pixels scrolled per wheel line.
pub const LINE_SCROLL_PX: f32 = 60.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left,
        }
    }
}

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Escape,
    Enter,
    Backspace,
    Tab,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::PageUp => KeyCode::PageUp,
            WinitKeyCode::PageDown => KeyCode::PageDown,
            WinitKeyCode::Home => KeyCode::Home,
            WinitKeyCode::End => KeyCode::End,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Backspace => KeyCode::Backspace,
            WinitKeyCode::Tab => KeyCode::Tab,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Input state tracking for pointer, wheel and keys.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,

    pointer: Vec2,
    pointer_inside: bool,
    pointer_moved: bool,

    // Positive scrolls the page down, in pixels
    scroll_delta: f32,

    // Printable text typed since the last frame
    text: String,
}

impl Input {
    /// Create a new input tracker with the pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest pointer position in viewport pixels.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether the pointer is currently over the window.
    #[inline]
    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Whether the pointer moved since the last frame.
    #[inline]
    pub fn pointer_moved(&self) -> bool {
        self.pointer_moved
    }

    /// Page scroll requested this frame, in pixels (positive is down).
    #[inline]
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Printable characters typed this frame, in order.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Overwrite the pointer position.
    pub fn move_pointer(&mut self, position: Vec2) {
        self.pointer = position;
        self.pointer_inside = true;
        self.pointer_moved = true;
    }

    /// Mark the pointer as having left the window.
    ///
    /// The last position is kept; only hover state is cleared.
    pub fn leave(&mut self) {
        self.pointer_inside = false;
    }

    /// Queue a page scroll in pixels.
    pub fn scroll_by(&mut self, pixels: f32) {
        self.scroll_delta += pixels;
    }

    /// Record a key press for this frame.
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
        self.keys_held.insert(key);
    }

    /// Append typed text. Control characters are dropped.
    pub fn type_text(&mut self, text: &str) {
        self.text.extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Record a key release.
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    /// Record a button press for this frame.
    pub fn press_mouse(&mut self, button: MouseButton) {
        self.mouse_pressed.insert(button);
        self.mouse_held.insert(button);
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
    }

    /// Clear per-frame state. Called after each frame has consumed input.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
        self.pointer_moved = false;
        self.scroll_delta = 0.0;
        self.text.clear();
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        // Key repeat still counts as a press so holding an
                        // arrow keeps scrolling
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
                if event.state == ElementState::Pressed {
                    if let Some(text) = &event.text {
                        self.type_text(text);
                    }
                }
            }

            WindowEvent::Ime(Ime::Commit(text)) => self.type_text(text),

            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => self.press_mouse(button),
                    ElementState::Released => self.release_mouse(button),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_pointer(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => self.leave(),

            WindowEvent::MouseWheel { delta, .. } => {
                // Wheel up (positive y) scrolls the page up
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y * LINE_SCROLL_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.scroll_by(pixels);
            }

            _ => {}
        }
    }
}
