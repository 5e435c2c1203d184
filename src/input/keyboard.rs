//! Keyboard shortcuts.
//!
//! Shortcuts are edge-triggered and never change the pointer state, except
//! Escape which aborts an in-progress drawing or marquee.

use super::Modifiers;
use crate::session::CanvasSession;
use crate::surface::RenderSurface;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Character(char),
}

/// Where keyboard focus was when the key was pressed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FocusTarget {
    #[default]
    Canvas,
    /// A text field, e.g. the style panel or an inline text editor
    TextInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub focus: FocusTarget,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            focus: FocusTarget::Canvas,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.focus = FocusTarget::TextInput;
        self
    }
}

impl<S: RenderSurface> CanvasSession<S> {
    /// Handle a key press. Returns true if a shortcut consumed it.
    pub fn key_down(&mut self, event: &KeyEvent) -> bool {
        if event.focus == FocusTarget::TextInput {
            return false;
        }

        match event.key {
            Key::Delete | Key::Backspace => {
                if self.scene.selection().is_empty() {
                    return false;
                }
                let removed = self.delete_selected();
                debug!("Delete shortcut removed {} shapes", removed);
                true
            }
            Key::Escape => self.cancel_interaction(),
            Key::Character(c) if c.eq_ignore_ascii_case(&'a') && event.modifiers.is_toggle() => {
                if self.scene.is_empty() {
                    return false;
                }
                self.select_all();
                true
            }
            Key::Character(_) => false,
        }
    }
}
