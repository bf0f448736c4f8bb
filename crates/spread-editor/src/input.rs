//! Input abstraction layer.
//!
//! Normalizes pointer, keyboard and viewport notifications from the host
//! into a single `InputEvent` enum consumed by the canvas.

/// A normalized input event. Pointer coordinates are client (screen) space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Double click / double tap.
    DoubleClick { x: f64, y: f64 },

    /// Key pressed. `text_entry_focused` is true when keyboard focus sits in a
    /// text input, textarea or contenteditable.
    KeyDown { key: String, text_entry_focused: bool },

    /// Key released.
    KeyUp { key: String },

    /// Window lost focus; held keys are considered released.
    Blur,

    /// The visible viewport changed size.
    Resize { width: i32, height: i32 },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            text_entry_focused: false,
        }
    }

    pub fn key_up(key: &str) -> Self {
        Self::KeyUp {
            key: key.to_string(),
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::DoubleClick { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}
