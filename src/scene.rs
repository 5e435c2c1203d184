//! The scene registry: insertion-ordered shapes plus the selection set.
//!
//! Removing a shape always drops it from the selection in the same call, so
//! the selection never references a shape outside the scene.

use crate::geometry::{Rect, SelectionMode};
use crate::selection::SelectionSet;
use crate::types::{Shape, ShapeId};

#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    pub(crate) selection: SelectionSet,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub(crate) fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove a top-level shape and drop it from the selection.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let pos = self.shapes.iter().position(|s| s.id() == id)?;
        self.selection.remove(id);
        Some(self.shapes.remove(pos))
    }

    /// Remove every shape and clear the selection.
    pub fn clear(&mut self) -> Vec<Shape> {
        self.selection.clear();
        std::mem::take(&mut self.shapes)
    }

    /// Top-level lookup
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Lookup including group members
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find_map(|s| s.find(id))
    }

    pub fn find_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find_map(|s| s.find_mut(id))
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    /// Selectable top-level shapes matching `marquee`, in scene order.
    pub fn query_rect(&self, marquee: &Rect, mode: SelectionMode) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| !s.is_eraser())
            .filter(|s| mode.matches(marquee, &s.bounds()))
            .map(Shape::id)
            .collect()
    }

    /// Ids of every selectable top-level shape, in scene order.
    pub fn selectable_ids(&self) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| !s.is_eraser())
            .map(Shape::id)
            .collect()
    }
}
