//! Render surface abstraction.
//!
//! The session never draws anything itself. It pushes node changes, the
//! transform widget's targets and the marquee rectangle to a [`RenderSurface`]
//! and asks it for hit tests. [`MemorySurface`] keeps everything in process and
//! backs the CLI and the tests.

use crate::geometry::{Point, Rect};
use crate::spatial_index::SpatialIndex;
use crate::types::{Shape, ShapeId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::trace;

/// Failures reported by a render surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("node {0} is not on the surface")]
    UnknownNode(ShapeId),

    #[error("failed to release node {id}: {reason}")]
    ReleaseFailed { id: ShapeId, reason: String },
}

/// Operations the interaction layer needs from the rendering engine.
pub trait RenderSurface {
    /// Add a node on top of the z-order, or refresh it if present.
    fn add_node(&mut self, shape: &Shape);

    /// Refresh geometry and style of an existing node.
    fn update_node(&mut self, shape: &Shape);

    /// Destroy a node and release its resources.
    fn remove_node(&mut self, id: ShapeId) -> Result<(), SurfaceError>;

    /// Topmost node under `point`, if any.
    fn hit_test(&self, point: Point) -> Option<ShapeId>;

    /// On-screen bounding box of a node.
    fn client_rect(&self, id: ShapeId) -> Option<Rect>;

    /// Attach the transform widget to `ids` (empty detaches it).
    fn set_transformer_nodes(&mut self, ids: &[ShapeId]);

    /// Move the transform widget above all of its targets.
    fn raise_transformer(&mut self);

    fn show_marquee(&mut self, rect: Rect);

    fn update_marquee(&mut self, rect: Rect);

    fn remove_marquee(&mut self);

    /// Schedule a redraw of the layer.
    fn batch_draw(&mut self);
}

/// In-process surface with R-tree hit testing.
#[derive(Default)]
pub struct MemorySurface {
    z_order: Vec<ShapeId>,
    bounds: HashMap<ShapeId, Rect>,
    index: SpatialIndex,
    transformer_nodes: Vec<ShapeId>,
    transformer_on_top: bool,
    marquee: Option<Rect>,
    draw_count: usize,
    fail_release: HashSet<ShapeId>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node ids from bottom to top
    pub fn node_ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    pub fn has_node(&self, id: ShapeId) -> bool {
        self.bounds.contains_key(&id)
    }

    pub fn transformer_nodes(&self) -> &[ShapeId] {
        &self.transformer_nodes
    }

    pub fn is_transformer_on_top(&self) -> bool {
        self.transformer_on_top
    }

    pub fn marquee(&self) -> Option<Rect> {
        self.marquee
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Make the next removal of `id` fail, simulating a resource release error.
    pub fn fail_release_of(&mut self, id: ShapeId) {
        self.fail_release.insert(id);
    }
}

impl RenderSurface for MemorySurface {
    fn add_node(&mut self, shape: &Shape) {
        let id = shape.id();
        if !self.bounds.contains_key(&id) {
            self.z_order.push(id);
            self.transformer_on_top = false;
        }
        self.bounds.insert(id, shape.bounds());
        self.index.insert(id, shape.bounds());
    }

    fn update_node(&mut self, shape: &Shape) {
        let id = shape.id();
        if self.bounds.contains_key(&id) {
            self.bounds.insert(id, shape.bounds());
            self.index.insert(id, shape.bounds());
        }
    }

    fn remove_node(&mut self, id: ShapeId) -> Result<(), SurfaceError> {
        if self.fail_release.remove(&id) {
            return Err(SurfaceError::ReleaseFailed {
                id,
                reason: "resource still in use".to_string(),
            });
        }
        if self.bounds.remove(&id).is_none() {
            return Err(SurfaceError::UnknownNode(id));
        }
        self.index.remove(id);
        self.z_order.retain(|n| *n != id);
        self.transformer_nodes.retain(|n| *n != id);
        Ok(())
    }

    fn hit_test(&self, point: Point) -> Option<ShapeId> {
        let hits = self.index.query_point(point);
        self.z_order
            .iter()
            .rev()
            .find(|id| hits.contains(id))
            .copied()
    }

    fn client_rect(&self, id: ShapeId) -> Option<Rect> {
        self.bounds.get(&id).copied()
    }

    fn set_transformer_nodes(&mut self, ids: &[ShapeId]) {
        self.transformer_nodes = ids.to_vec();
    }

    fn raise_transformer(&mut self) {
        self.transformer_on_top = true;
    }

    fn show_marquee(&mut self, rect: Rect) {
        self.marquee = Some(rect);
    }

    fn update_marquee(&mut self, rect: Rect) {
        if let Some(marquee) = self.marquee.as_mut() {
            *marquee = rect;
        }
    }

    fn remove_marquee(&mut self) {
        self.marquee = None;
    }

    fn batch_draw(&mut self) {
        self.draw_count += 1;
        trace!(draws = self.draw_count, "batch draw");
    }
}
