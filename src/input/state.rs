//! Input state machine - one explicit state for every pointer interaction.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drawing              (pointer down in drawing mode with a tool)
//! Idle -> MarqueeSelecting     (pointer down on empty background)
//!
//! Drawing -> Idle              (pointer up commits the shape, Escape discards it)
//! MarqueeSelecting -> Idle     (pointer up selects, Escape discards the marquee)
//! ```
//!
//! The in-progress shape lives inside `Drawing`, so there can never be two of
//! them at once.

use super::Modifiers;
use crate::geometry::{Point, Rect};
use crate::types::{Shape, ShapeId, ShapeKind};

/// Unified input state for all pointer interactions.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No active input operation
    #[default]
    Idle,

    /// Dragging out a new shape
    Drawing {
        /// Tool being used
        kind: ShapeKind,
        /// Drawing start position
        start: Point,
        /// The shape being drawn; on the surface but not yet in the scene
        shape: Shape,
    },

    /// Marquee/box selection
    MarqueeSelecting {
        /// Selection box start position
        start: Point,
        /// Current pointer position
        current: Point,
        /// Modifier held when the marquee started
        additive: bool,
        /// Set once the pointer leaves the click tolerance; a marquee that
        /// returns to its start is still a marquee
        moved: bool,
    },
}

/// A press in `Idle` that may turn into a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPress {
    /// Shape under the pointer, `None` for the background
    pub target: Option<ShapeId>,
    pub origin: Point,
    pub modifiers: Modifiers,
    /// Set once the pointer leaves the click tolerance
    pub moved: bool,
}

impl InputState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if currently drawing
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Returns true if currently marquee selecting
    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelecting { .. })
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn start_drawing(&mut self, kind: ShapeKind, start: Point, shape: Shape) {
        *self = Self::Drawing { kind, start, shape };
    }

    pub fn start_marquee(&mut self, start: Point, additive: bool) {
        *self = Self::MarqueeSelecting {
            start,
            current: start,
            additive,
            moved: false,
        };
    }

    /// The in-progress shape, if drawing
    pub fn drawing_shape(&self) -> Option<&Shape> {
        match self {
            Self::Drawing { shape, .. } => Some(shape),
            _ => None,
        }
    }

    /// Get the drawing start position, if drawing
    pub fn drawing_start(&self) -> Option<Point> {
        match self {
            Self::Drawing { start, .. } => Some(*start),
            _ => None,
        }
    }

    /// Current marquee rectangle, normalized
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::MarqueeSelecting { start, current, .. } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }
}
