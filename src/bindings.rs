//! Event binding manager.
//!
//! Every interactive shape carries a [`Binding`] that encodes three behaviors:
//! select-on-interact, the drag-enable policy, and lifecycle notifications
//! (drag end, transform end, style change). Bindings share the manager's
//! listener list, so a listener attached after a shape was bound still hears
//! about it.
//!
//! ## Rebinding
//!
//! Clones and imported shapes arrive unbound. [`BindingManager::rebind_tree`]
//! walks a shape depth-first: group members are bound but never independently
//! draggable, and nodes matched by the exclude predicate (eraser strokes) are
//! left unbound, fixed in place, and not descended into.

use crate::geometry::Rect;
use crate::input::Modifiers;
use crate::selection::SelectionSet;
use crate::types::{Shape, ShapeId};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle notification raised by a bound shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeEvent {
    DragEnd { id: ShapeId, bounds: Rect },
    TransformEnd { id: ShapeId, bounds: Rect },
    StyleChange { id: ShapeId, attribute: &'static str },
}

impl ShapeEvent {
    pub fn shape_id(&self) -> ShapeId {
        match self {
            ShapeEvent::DragEnd { id, .. }
            | ShapeEvent::TransformEnd { id, .. }
            | ShapeEvent::StyleChange { id, .. } => *id,
        }
    }
}

/// Receives lifecycle notifications from every bound shape.
pub trait LifecycleListener: Send + Sync {
    fn on_drag_end(&self, _id: ShapeId, _bounds: Rect) {}

    fn on_transform_end(&self, _id: ShapeId, _bounds: Rect) {}

    fn on_style_change(&self, _id: ShapeId, _attribute: &'static str) {}
}

/// Default listener, writes every notification to the log
pub struct LoggingListener;

impl LifecycleListener for LoggingListener {
    fn on_drag_end(&self, id: ShapeId, bounds: Rect) {
        info!("Shape {} dragged to ({}, {})", id, bounds.x, bounds.y);
    }

    fn on_transform_end(&self, id: ShapeId, bounds: Rect) {
        info!(
            "Shape {} transformed to {}x{} at ({}, {})",
            id, bounds.width, bounds.height, bounds.x, bounds.y
        );
    }

    fn on_style_change(&self, id: ShapeId, attribute: &'static str) {
        info!("Shape {} style changed: {}", id, attribute);
    }
}

/// Buffers notifications until drained, e.g. by a sync or persistence task.
#[derive(Default)]
pub struct SyncQueue {
    events: Mutex<Vec<ShapeEvent>>,
}

impl SyncQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<ShapeEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl LifecycleListener for SyncQueue {
    fn on_drag_end(&self, id: ShapeId, bounds: Rect) {
        self.events.lock().push(ShapeEvent::DragEnd { id, bounds });
    }

    fn on_transform_end(&self, id: ShapeId, bounds: Rect) {
        self.events.lock().push(ShapeEvent::TransformEnd { id, bounds });
    }

    fn on_style_change(&self, id: ShapeId, attribute: &'static str) {
        self.events.lock().push(ShapeEvent::StyleChange { id, attribute });
    }
}

type ListenerList = Arc<RwLock<Vec<Arc<dyn LifecycleListener>>>>;

/// Binding record attached to one shape.
#[derive(Clone)]
pub struct Binding {
    shape_id: ShapeId,
    /// Group members follow their group when dragged
    nested: bool,
    listeners: ListenerList,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("shape_id", &self.shape_id)
            .field("nested", &self.nested)
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

impl Binding {
    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    /// Select-on-interact. Returns true if the selection changed.
    ///
    /// Ctrl/meta toggles membership. A plain click selects the shape alone, or
    /// clears the selection when the shape already is the sole member.
    pub fn click(
        &self,
        selection: &mut SelectionSet,
        modifiers: Modifiers,
        drawing_mode: bool,
    ) -> bool {
        if drawing_mode || self.nested {
            return false;
        }

        let id = self.shape_id;
        if modifiers.is_toggle() {
            let added = selection.toggle(id);
            debug!("Toggled {} ({})", id, if added { "added" } else { "removed" });
        } else if selection.is_sole(id) {
            selection.clear();
            debug!("Deselected {}", id);
        } else {
            selection.select_only(id);
            debug!("Selected {}", id);
        }
        true
    }

    /// Drag-enable policy
    pub fn drag_enabled(&self, drawing_mode: bool) -> bool {
        !drawing_mode && !self.nested
    }

    pub fn drag_end(&self, bounds: Rect) {
        for listener in self.listeners.read().iter() {
            listener.on_drag_end(self.shape_id, bounds);
        }
    }

    pub fn transform_end(&self, bounds: Rect) {
        for listener in self.listeners.read().iter() {
            listener.on_transform_end(self.shape_id, bounds);
        }
    }

    pub fn style_change(&self, attribute: &'static str) {
        for listener in self.listeners.read().iter() {
            listener.on_style_change(self.shape_id, attribute);
        }
    }
}

/// Attaches bindings to shapes and owns the shared listener list.
pub struct BindingManager {
    listeners: ListenerList,
}

impl Default for BindingManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BindingManager {
    /// Manager with the logging listener registered
    pub fn new() -> Self {
        let listeners: Vec<Arc<dyn LifecycleListener>> = vec![Arc::new(LoggingListener)];
        Self {
            listeners: Arc::new(RwLock::new(listeners)),
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn LifecycleListener>) {
        self.listeners.write().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Bind a top-level shape. Binding an already bound shape is a no-op.
    ///
    /// Returns true if a new binding was attached.
    pub fn bind(&self, shape: &mut Shape, drawing_mode: bool) -> bool {
        self.attach(shape, false, drawing_mode)
    }

    pub fn unbind(&self, shape: &mut Shape) {
        shape.detach_binding();
        shape.set_draggable(false);
    }

    /// Replace bindings on `shape` and every group member, depth-first.
    pub fn rebind_tree<F>(&self, shape: &mut Shape, exclude: &F, drawing_mode: bool)
    where
        F: Fn(&Shape) -> bool,
    {
        self.rebind_node(shape, exclude, false, drawing_mode);
    }

    fn rebind_node<F>(&self, shape: &mut Shape, exclude: &F, nested: bool, drawing_mode: bool)
    where
        F: Fn(&Shape) -> bool,
    {
        self.unbind(shape);
        if exclude(shape) {
            debug!("Skipping binding for utility node {}", shape.id());
            return;
        }

        self.attach(shape, nested, drawing_mode);
        if let Some(children) = shape.children_mut() {
            for child in children.iter_mut() {
                self.rebind_node(child, exclude, true, drawing_mode);
            }
        }
    }

    fn attach(&self, shape: &mut Shape, nested: bool, drawing_mode: bool) -> bool {
        if shape.binding().is_some_and(|b| b.shape_id() == shape.id()) {
            return false;
        }

        let binding = Binding {
            shape_id: shape.id(),
            nested,
            listeners: Arc::clone(&self.listeners),
        };
        shape.set_draggable(binding.drag_enabled(drawing_mode));
        shape.attach_binding(binding);
        true
    }

    /// Re-evaluate the drag-enable policy on a shape tree.
    pub fn apply_drag_policy(&self, shape: &mut Shape, drawing_mode: bool) {
        let draggable = shape
            .binding()
            .is_some_and(|b| b.drag_enabled(drawing_mode));
        shape.set_draggable(draggable);
        if let Some(children) = shape.children_mut() {
            for child in children.iter_mut() {
                self.apply_drag_policy(child, drawing_mode);
            }
        }
    }
}
