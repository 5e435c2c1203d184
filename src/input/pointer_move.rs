//! Pointer move handling - grow the in-progress shape or the marquee.
//!
//! Called for every pointer move, so non-interactive states exit early.

use super::{InputState, PointerEvent};
use crate::factory;
use crate::geometry::Rect;
use crate::profile_scope;
use crate::session::CanvasSession;
use crate::surface::RenderSurface;

impl<S: RenderSurface> CanvasSession<S> {
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        profile_scope!("pointer_move");

        let pos = event.position;
        match &mut self.input {
            InputState::Drawing { start, shape, .. } => {
                factory::reshape(shape, *start, pos);
                self.surface.update_node(shape);
                self.surface.batch_draw();
            }
            InputState::MarqueeSelecting { start, current, moved, .. } => {
                *current = pos;
                if start.distance(pos) > self.config.click_tolerance {
                    *moved = true;
                }
                self.surface.update_marquee(Rect::from_corners(*start, pos));
                self.surface.batch_draw();
            }
            InputState::Idle => {
                let tolerance = self.config.click_tolerance;
                if let Some(press) = self.press.as_mut() {
                    if press.origin.distance(pos) > tolerance {
                        press.moved = true;
                    }
                }
            }
        }
    }
}
