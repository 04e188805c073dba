//! Ordered shape store.
//!
//! Shapes live in the registry under monotonically increasing ids. Iteration
//! follows insertion order, which is also the snap-engine registration order
//! and the order documents serialize in. Ids are never reused, even after
//! removal or a full clear, so undo entries can refer to shapes by id across
//! arbitrary redo branches.

use std::collections::HashMap;

use crate::model::{Shape, ShapeId};

/// A shape together with its registry identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    /// Registry id.
    pub id: ShapeId,
    /// Display name, assigned at creation ("Polygon 3").
    pub name: String,
    /// The geometry itself.
    pub shape: Shape,
}

/// Insertion-ordered store of all completed shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    records: HashMap<ShapeId, ShapeRecord>,
    order: Vec<ShapeId>,
    next_id: ShapeId,
}

impl ShapeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds a shape under a fresh id and a name derived from its kind.
    /// Returns the assigned id.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = self.generate_id();
        let name = format!("{} {}", shape.kind(), id);
        self.order.push(id);
        self.records.insert(id, ShapeRecord { id, name, shape });
        id
    }

    /// Restores a record under its original id (used for undo/redo).
    ///
    /// A record whose id is already present replaces the stored shape in
    /// place, keeping its position in insertion order. The id counter is
    /// bumped past the restored id so it can never be handed out again.
    pub fn insert_record(&mut self, record: ShapeRecord) {
        let id = record.id;
        if self.next_id <= id {
            self.next_id = id + 1;
        }
        if self.records.insert(id, record).is_none() {
            self.order.push(id);
        }
    }

    /// Removes a shape and returns its record (used for undo/redo).
    pub fn remove(&mut self, id: ShapeId) -> Option<ShapeRecord> {
        let record = self.records.remove(&id)?;
        self.order.retain(|&existing| existing != id);
        Some(record)
    }

    /// Gets a reference to a record by ID.
    pub fn get(&self, id: ShapeId) -> Option<&ShapeRecord> {
        self.records.get(&id)
    }

    /// Gets a mutable reference to a record by ID.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut ShapeRecord> {
        self.records.get_mut(&id)
    }

    /// Whether a shape with this id is registered.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.records.contains_key(&id)
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.order.iter().filter_map(move |id| self.records.get(id))
    }

    /// Returns the number of registered shapes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every shape. The id counter is not reset.
    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }
}
