//! Pointer up handling - commit drawings, finalize marquee selection, route clicks.

use super::{InputState, Modifiers, PointerEvent};
use crate::factory;
use crate::geometry::{Point, Rect};
use crate::profile_scope;
use crate::session::CanvasSession;
use crate::surface::RenderSurface;
use crate::types::{Shape, ShapeId, ShapeKind};
use std::mem;
use tracing::{debug, warn};

impl<S: RenderSurface> CanvasSession<S> {
    pub fn pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("pointer_up");

        let pos = event.position;
        match mem::take(&mut self.input) {
            InputState::Drawing { kind, start, mut shape } => {
                // Free-draw already received this point from the last move
                if kind != ShapeKind::FreeDraw {
                    factory::reshape(&mut shape, start, pos);
                }
                self.commit_drawn_shape(shape);
            }
            InputState::MarqueeSelecting { start, additive, moved, .. } => {
                let additive = additive || event.modifiers.is_toggle();
                let moved = moved || start.distance(pos) > self.config.click_tolerance;
                self.finish_marquee(start, pos, additive, moved);
            }
            InputState::Idle => {
                let Some(press) = self.press.take() else {
                    return;
                };
                let within_tolerance =
                    !press.moved && press.origin.distance(pos) <= self.config.click_tolerance;
                if let (true, Some(id)) = (within_tolerance, press.target) {
                    self.click_shape(id, event.modifiers);
                }
            }
        }
    }

    /// Abort an in-progress drawing or marquee without touching the selection.
    ///
    /// Returns true if there was something to cancel.
    pub fn cancel_interaction(&mut self) -> bool {
        self.press = None;
        match mem::take(&mut self.input) {
            InputState::Drawing { shape, .. } => {
                if let Err(e) = self.surface.remove_node(shape.id()) {
                    warn!("Failed to discard in-progress shape {}: {}", shape.id(), e);
                }
                self.surface.batch_draw();
                debug!("Cancelled drawing");
                true
            }
            InputState::MarqueeSelecting { .. } => {
                self.surface.remove_marquee();
                self.surface.batch_draw();
                debug!("Cancelled marquee");
                true
            }
            InputState::Idle => false,
        }
    }

    fn commit_drawn_shape(&mut self, mut shape: Shape) {
        self.bindings.bind(&mut shape, self.drawing_mode);
        self.surface.update_node(&shape);

        let id = shape.id();
        debug!("Committed {} {}", shape.kind(), id);
        self.scene.push(shape);
        self.scene.selection.select_only(id);
        self.sync_transformer();
    }

    fn finish_marquee(&mut self, start: Point, end: Point, additive: bool, moved: bool) {
        self.surface.remove_marquee();

        // A marquee that never left the click tolerance is a background click
        if !moved {
            if additive {
                self.surface.batch_draw();
            } else {
                self.clear_selection();
            }
            return;
        }

        let marquee = Rect::from_corners(start, end);
        let matches = self.scene.query_rect(&marquee, self.config.marquee_mode);
        debug!(
            "Marquee {:?} matched {} shapes (additive: {})",
            marquee,
            matches.len(),
            additive
        );

        if additive {
            self.scene.selection.extend(matches);
        } else {
            self.scene.selection.replace(matches);
        }
        self.sync_transformer();
    }

    fn click_shape(&mut self, id: ShapeId, modifiers: Modifiers) {
        let Some(binding) = self.scene.get(id).and_then(|s| s.binding().cloned()) else {
            return;
        };
        if binding.click(&mut self.scene.selection, modifiers, self.drawing_mode) {
            self.sync_transformer();
        }
    }
}
