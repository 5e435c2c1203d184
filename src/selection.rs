//! The selection set.
//!
//! An ordered, duplicate-free list of shape ids plus an explicit primary
//! member. The primary drives the context menu and text controls; it is not
//! necessarily the first element.

use crate::types::ShapeId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    members: Vec<ShapeId>,
    primary: Option<ShapeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.members
    }

    pub fn primary(&self) -> Option<ShapeId> {
        self.primary
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.members.contains(&id)
    }

    /// True if `id` is the only member
    pub fn is_sole(&self, id: ShapeId) -> bool {
        self.members.len() == 1 && self.members[0] == id
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.primary = None;
    }

    pub fn select_only(&mut self, id: ShapeId) {
        self.members.clear();
        self.members.push(id);
        self.primary = Some(id);
    }

    /// Replace the members, dropping duplicates. The first id becomes primary.
    pub fn replace<I: IntoIterator<Item = ShapeId>>(&mut self, ids: I) {
        self.members.clear();
        self.primary = None;
        self.extend(ids);
    }

    /// Union-extend, keeping existing order and appending new ids.
    pub fn extend<I: IntoIterator<Item = ShapeId>>(&mut self, ids: I) {
        for id in ids {
            if !self.members.contains(&id) {
                self.members.push(id);
            }
        }
        if self.primary.is_none() {
            self.primary = self.members.first().copied();
        }
    }

    /// Toggle membership. Returns true if `id` is now selected.
    ///
    /// Adding makes `id` primary; removing it hands primary to the new first
    /// member.
    pub fn toggle(&mut self, id: ShapeId) -> bool {
        if let Some(pos) = self.members.iter().position(|m| *m == id) {
            self.members.remove(pos);
            if self.primary == Some(id) {
                self.primary = self.members.first().copied();
            }
            false
        } else {
            self.members.push(id);
            self.primary = Some(id);
            true
        }
    }

    /// Remove one id. Returns true if it was selected.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        let before = self.members.len();
        self.retain(|m| m != id);
        before != self.members.len()
    }

    pub fn retain<F: FnMut(ShapeId) -> bool>(&mut self, mut keep: F) {
        self.members.retain(|id| keep(*id));
        if let Some(primary) = self.primary {
            if !self.members.contains(&primary) {
                self.primary = self.members.first().copied();
            }
        }
    }
}
