//! Pointer down handling - start drawing, start a marquee, or record a press.
//!
//! ## Performance Notes
//!
//! Hit testing goes through the surface's R-tree, so a press costs
//! O(log n) regardless of scene size.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::{PendingPress, PointerButton, PointerEvent};
use crate::error::CanvasResult;
use crate::factory;
use crate::geometry::Rect;
use crate::profile_scope;
use crate::session::CanvasSession;
use crate::surface::RenderSurface;
use tracing::debug;

impl<S: RenderSurface> CanvasSession<S> {
    /// Handle a pointer press in scene coordinates.
    ///
    /// Fails with `UnsupportedShapeType` when the active tool cannot be drawn;
    /// the state stays `Idle` in that case.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> CanvasResult<()> {
        profile_scope!("pointer_down");

        if event.button != PointerButton::Primary {
            return Ok(());
        }
        if !self.input.is_idle() {
            debug!("Ignoring pointer down while {:?} is active", self.input);
            return Ok(());
        }

        let pos = event.position;
        self.press = None;

        // In drawing mode every press starts a shape, even on top of another one
        if self.drawing_mode {
            let Some(kind) = self.active_tool else {
                return Ok(());
            };
            let shape = factory::create(kind, pos.x, pos.y, 0.0, 0.0, &self.current_style)?;
            debug!("Started drawing {} at ({}, {})", kind, pos.x, pos.y);

            self.surface.add_node(&shape);
            self.surface.batch_draw();
            self.input.start_drawing(kind, pos, shape);
            return Ok(());
        }

        // Unbound nodes (eraser strokes) still cover what lies beneath them
        let hit = self.surface.hit_test(pos);
        if let Some(id) = hit.filter(|id| self.scene.get(*id).is_some_and(|s| !s.is_bound())) {
            debug!("Press absorbed by unbound node {}", id);
            return Ok(());
        }

        match hit.filter(|id| self.scene.contains(*id)) {
            Some(id) => {
                if let Some(shape) = self.scene.get_mut(id) {
                    self.bindings.apply_drag_policy(shape, self.drawing_mode);
                }
                self.press = Some(PendingPress {
                    target: Some(id),
                    origin: pos,
                    modifiers: event.modifiers,
                    moved: false,
                });
            }
            None => {
                let additive = event.modifiers.is_toggle();
                self.surface.show_marquee(Rect::new(pos.x, pos.y, 0.0, 0.0));
                self.surface.batch_draw();
                self.input.start_marquee(pos, additive);
                debug!("Started marquee at ({}, {}), additive: {}", pos.x, pos.y, additive);
            }
        }

        Ok(())
    }
}
