//! Pointer and keyboard input handling for the canvas.
//!
//! ## Architecture
//!
//! The controller is an explicit state machine ([`InputState`]) driven by
//! three pointer inputs and the keyboard. Each handler is an `impl` block on
//! [`CanvasSession`](crate::session::CanvasSession) in its own module.
//!
//! ## Modules
//!
//! - `state` - Input state machine enum and helper methods
//! - `pointer_down` - Start drawing, start a marquee, or record a press on a shape
//! - `pointer_move` - Grow the in-progress shape or the marquee
//! - `pointer_up` - Commit a drawing, finalize a marquee, route clicks, cancel
//! - `keyboard` - Delete, select-all and escape shortcuts

mod keyboard;
mod pointer_down;
mod pointer_move;
mod pointer_up;
mod state;

pub use keyboard::{FocusTarget, Key, KeyEvent};
pub use state::{InputState, PendingPress};

use crate::geometry::Point;

/// Modifier keys held during an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Ctrl on most platforms, Cmd on macOS
    pub fn is_toggle(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A pointer event in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub modifiers: Modifiers,
    pub button: PointerButton,
}

impl PointerEvent {
    /// Primary-button event without modifiers
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
            button: PointerButton::Primary,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}
