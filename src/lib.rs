//! Sketchboard - the interaction core of a 2D whiteboard.
//!
//! A [`CanvasSession`] turns raw pointer and keyboard events into scene
//! mutations: drawing new shapes, marquee and click selection, deletion,
//! duplication, and document import/export. Rendering is delegated to a
//! [`RenderSurface`].

pub mod bindings;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod image_tool;
pub mod input;
pub mod perf;
pub mod scene;
pub mod selection;
pub mod serialization;
pub mod session;
pub mod spatial_index;
pub mod style;
pub mod surface;
pub mod types;

pub use bindings::{BindingManager, LifecycleListener, ShapeEvent, SyncQueue};
pub use config::SessionConfig;
pub use document::DocumentNode;
pub use error::{CanvasError, CanvasResult};
pub use geometry::{Point, Rect, SelectionMode};
pub use input::{InputState, Key, KeyEvent, Modifiers, PointerEvent};
pub use selection::SelectionSet;
pub use session::CanvasSession;
pub use style::{StyleAttribute, StyleRecord, StyleValue};
pub use surface::{MemorySurface, RenderSurface, SurfaceError};
pub use types::{Shape, ShapeData, ShapeId, ShapeKind, TextStyleToggle};
