//! The canvas session: one scene, one selection, one render surface.
//!
//! `CanvasSession` is the explicit context object every operation goes
//! through. Pointer handling lives in [`crate::input`], document import and
//! export in [`crate::serialization`], image import in [`crate::image_tool`];
//! this module holds the editing operations the UI calls directly.

use crate::bindings::{BindingManager, LifecycleListener};
use crate::config::SessionConfig;
use crate::constants::MENU_OFFSET;
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Rect};
use crate::input::{InputState, PendingPress};
use crate::scene::Scene;
use crate::selection::SelectionSet;
use crate::style::{StyleAttribute, StyleRecord, StyleValue};
use crate::surface::RenderSurface;
use crate::types::{Shape, ShapeId, ShapeKind, TextStyleToggle};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct CanvasSession<S: RenderSurface> {
    pub(crate) scene: Scene,
    pub(crate) surface: S,
    pub(crate) bindings: BindingManager,
    pub(crate) input: InputState,
    pub(crate) press: Option<PendingPress>,
    pub(crate) active_tool: Option<ShapeKind>,
    pub(crate) drawing_mode: bool,
    pub(crate) current_style: StyleRecord,
    pub(crate) config: SessionConfig,
}

impl<S: RenderSurface> CanvasSession<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, SessionConfig::default())
    }

    pub fn with_config(surface: S, config: SessionConfig) -> Self {
        Self {
            scene: Scene::new(),
            surface,
            bindings: BindingManager::new(),
            input: InputState::Idle,
            press: None,
            active_tool: None,
            drawing_mode: false,
            current_style: config.default_style.clone(),
            config,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    pub fn selection(&self) -> &SelectionSet {
        self.scene.selection()
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.scene.selection().ids().to_vec()
    }

    pub fn primary_selection(&self) -> Option<ShapeId> {
        self.scene.selection().primary()
    }

    pub fn add_listener(&self, listener: Arc<dyn LifecycleListener>) {
        self.bindings.add_listener(listener);
    }

    // ========================================================================
    // Tool & Mode Signals
    // ========================================================================

    pub fn active_tool(&self) -> Option<ShapeKind> {
        self.active_tool
    }

    pub fn set_active_tool(&mut self, tool: Option<ShapeKind>) {
        debug!("Active tool: {:?}", tool);
        self.active_tool = tool;
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    /// Toggle drawing mode and re-apply the drag-enable policy to every shape.
    pub fn set_drawing_mode(&mut self, enabled: bool) {
        if self.drawing_mode == enabled {
            return;
        }
        self.drawing_mode = enabled;
        self.press = None;
        for shape in self.scene.shapes_mut() {
            self.bindings.apply_drag_policy(shape, enabled);
        }
        debug!("Drawing mode: {}", enabled);
    }

    pub fn current_style(&self) -> &StyleRecord {
        &self.current_style
    }

    /// Replace the style snapshotted by newly drawn shapes.
    pub fn set_current_style(&mut self, style: StyleRecord) {
        self.current_style = style;
    }

    // ========================================================================
    // Scene Membership
    // ========================================================================

    /// Insert a shape programmatically: bind it, surface it, append it.
    ///
    /// A shape whose identifier (or a group member's) is already in the scene
    /// is inserted as a fresh copy; the returned id is the one in the scene.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        if self.collides_with_scene(&shape) {
            let fresh = shape.duplicate(0.0, 0.0);
            debug!("Shape id {} already in scene, inserting as {}", shape.id(), fresh.id());
            shape = fresh;
        }
        if !shape.is_eraser() {
            self.bindings
                .rebind_tree(&mut shape, &Shape::is_eraser, self.drawing_mode);
        }
        let id = shape.id();
        self.surface.add_node(&shape);
        self.scene.push(shape);
        self.surface.raise_transformer();
        self.surface.batch_draw();
        id
    }

    fn collides_with_scene(&self, shape: &Shape) -> bool {
        self.scene.find(shape.id()).is_some()
            || shape.children().iter().any(|child| self.collides_with_scene(child))
    }

    /// Remove one shape from the scene and the surface.
    ///
    /// A surface release failure is logged; the shape is gone from the scene
    /// either way.
    pub fn delete(&mut self, id: ShapeId) -> CanvasResult<()> {
        let shape = self.scene.remove(id).ok_or(CanvasError::UnknownShape(id))?;
        if let Err(e) = self.destroy_node(&shape) {
            warn!("{}", e);
        }
        self.sync_transformer();
        Ok(())
    }

    /// Remove every selected shape. Returns the number removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selected_ids();
        let mut removed = 0;
        for id in ids {
            let Some(shape) = self.scene.remove(id) else {
                continue;
            };
            if let Err(e) = self.destroy_node(&shape) {
                warn!("{}", e);
            }
            removed += 1;
        }
        self.scene.selection.clear();
        self.sync_transformer();
        info!("Deleted {} shapes", removed);
        removed
    }

    pub(crate) fn destroy_node(&mut self, shape: &Shape) -> CanvasResult<()> {
        self.surface
            .remove_node(shape.id())
            .map_err(|e| CanvasError::ShapeDestroyFailure {
                id: shape.id(),
                reason: e.to_string(),
            })
    }

    /// Clone a shape with an offset and a fresh identity, then select the clone.
    pub fn duplicate(&mut self, id: ShapeId) -> CanvasResult<ShapeId> {
        let source = self.scene.get(id).ok_or(CanvasError::UnknownShape(id))?;
        let (dx, dy) = self.config.duplicate_offset;
        let mut clone = source.duplicate(dx, dy);

        self.bindings
            .rebind_tree(&mut clone, &Shape::is_eraser, self.drawing_mode);
        let clone_id = clone.id();
        self.surface.add_node(&clone);
        self.scene.push(clone);

        if !self.scene.get(clone_id).is_some_and(Shape::is_eraser) {
            self.scene.selection.select_only(clone_id);
        }
        self.sync_transformer();
        debug!("Duplicated {} as {}", id, clone_id);
        Ok(clone_id)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_all(&mut self) {
        let ids = self.scene.selectable_ids();
        self.scene.selection.replace(ids);
        self.sync_transformer();
    }

    pub fn clear_selection(&mut self) {
        self.scene.selection.clear();
        self.sync_transformer();
    }

    /// Point the transform widget at the current selection and raise it.
    pub(crate) fn sync_transformer(&mut self) {
        let ids = self.scene.selection().ids().to_vec();
        self.surface.set_transformer_nodes(&ids);
        self.surface.raise_transformer();
        self.surface.batch_draw();
    }

    /// Context-menu anchor: centered above the primary selection.
    pub fn menu_anchor(&self) -> Option<Point> {
        let primary = self.primary_selection()?;
        let rect = self
            .surface
            .client_rect(primary)
            .or_else(|| self.scene.get(primary).map(Shape::bounds))?;
        Some(Point::new(rect.x + rect.width / 2.0, rect.y - MENU_OFFSET))
    }

    // ========================================================================
    // Manipulation Results
    // ========================================================================

    /// Apply a finished drag of `(dx, dy)` and raise drag-end.
    ///
    /// Returns false for shapes the drag policy keeps fixed (erasers, and
    /// everything while drawing mode is on); they are left untouched.
    pub fn finish_drag(&mut self, id: ShapeId, dx: f32, dy: f32) -> CanvasResult<bool> {
        let shape = self.scene.get_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        if !shape.is_draggable() {
            debug!("Rejected drag of fixed shape {}", id);
            return Ok(false);
        }
        shape.translate(dx, dy);
        let bounds = shape.bounds();
        if let Some(binding) = shape.binding() {
            binding.drag_end(bounds);
        }
        self.surface.update_node(shape);
        self.surface.batch_draw();
        Ok(true)
    }

    /// Apply a finished transform of one shape and raise transform-end.
    ///
    /// Returns false when `target` is below the minimum size or the shape is
    /// fixed in place; the shape is left untouched in that case.
    pub fn finish_transform(&mut self, id: ShapeId, target: Rect) -> CanvasResult<bool> {
        let accepted = self.accepts_transform(&target);
        let shape = self.scene.get_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        if !accepted || !shape.is_draggable() {
            debug!("Rejected transform of {} to {:?}", id, target);
            return Ok(false);
        }
        shape.resize_to(target);
        let bounds = shape.bounds();
        if let Some(binding) = shape.binding() {
            binding.transform_end(bounds);
        }
        self.surface.update_node(shape);
        self.surface.batch_draw();
        Ok(true)
    }

    /// Map the union box of the selection onto `target`.
    ///
    /// The selection moves as a unit: if any member is fixed in place nothing
    /// is transformed.
    pub fn transform_selection(&mut self, target: Rect) -> CanvasResult<bool> {
        let ids = self.selected_ids();
        let members: Vec<&Shape> = ids.iter().filter_map(|id| self.scene.get(*id)).collect();
        let Some(union) = members.iter().map(|s| s.bounds()).reduce(|acc, r| acc.union(&r)) else {
            return Ok(false);
        };
        if !members.iter().all(|s| s.is_draggable()) {
            debug!("Rejected selection transform, selection holds fixed shapes");
            return Ok(false);
        }
        if !self.accepts_transform(&target) {
            debug!("Rejected selection transform to {:?}", target);
            return Ok(false);
        }

        for id in ids {
            let Some(shape) = self.scene.get_mut(id) else {
                continue;
            };
            let mapped = Rect::map_rect(&shape.bounds(), &union, &target);
            shape.resize_to(mapped);
            let bounds = shape.bounds();
            if let Some(binding) = shape.binding() {
                binding.transform_end(bounds);
            }
            self.surface.update_node(shape);
        }
        self.surface.batch_draw();
        Ok(true)
    }

    fn accepts_transform(&self, target: &Rect) -> bool {
        let min = self.config.min_transform_size;
        target.is_well_formed() && target.width >= min && target.height >= min
    }

    // ========================================================================
    // Style Edits
    // ========================================================================

    /// Edit one style attribute of one shape and raise style-change.
    pub fn set_shape_style(
        &mut self,
        id: ShapeId,
        attribute: StyleAttribute,
        value: StyleValue,
    ) -> CanvasResult<()> {
        let shape = self.scene.find_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        shape.style.apply(attribute, value)?;
        if let Some(binding) = shape.binding() {
            binding.style_change(attribute.name());
        }
        self.refresh_node(id);
        Ok(())
    }

    pub fn set_font_size(&mut self, id: ShapeId, size: f32) -> CanvasResult<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(CanvasError::InvalidFontSize(size));
        }
        let shape = self.scene.find_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        let font_size = shape.font_size_mut().ok_or(CanvasError::NotText(id))?;
        *font_size = size;
        if let Some(binding) = shape.binding() {
            binding.style_change("fontSize");
        }
        self.refresh_node(id);
        Ok(())
    }

    /// Flip bold, italic or underline on a text shape. Returns the new state.
    pub fn toggle_text_style(&mut self, id: ShapeId, toggle: TextStyleToggle) -> CanvasResult<bool> {
        let shape = self.scene.find_mut(id).ok_or(CanvasError::UnknownShape(id))?;
        let font_style = shape.font_style_mut().ok_or(CanvasError::NotText(id))?;
        let (flag, attribute) = match toggle {
            TextStyleToggle::Bold => (&mut font_style.bold, "fontStyle"),
            TextStyleToggle::Italic => (&mut font_style.italic, "fontStyle"),
            TextStyleToggle::Underline => (&mut font_style.underline, "textDecoration"),
        };
        *flag = !*flag;
        let enabled = *flag;

        if let Some(binding) = shape.binding() {
            binding.style_change(attribute);
        }
        self.refresh_node(id);
        Ok(enabled)
    }

    /// Push a changed shape (or the group holding it) to the surface.
    fn refresh_node(&mut self, id: ShapeId) {
        if let Some(top) = self.scene.shapes().iter().find(|s| s.find(id).is_some()) {
            self.surface.update_node(top);
        }
        self.surface.batch_draw();
    }
}
