//! Undoable edit commands.
//!
//! Every mutation of the registry that participates in undo is described by
//! an [`EditCommand`] value. Commands capture the full before/after data
//! they need at construction time (snapshots and vertex paths, never
//! references into live state), so `apply` and `revert` take `&self` and
//! replaying an entry can never observe a later mutation.

use serde::{Deserialize, Serialize};

use geodraw_core::GeoPoint;

use crate::error::{EditorError, Result};
use crate::model::ShapeId;
use crate::registry::{ShapeRecord, ShapeRegistry};
use crate::serialization::ShapeSnapshot;

/// A registry mutation that can be applied (redo) and reverted (undo).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditCommand {
    CreateShape(CreateShape),
    DeleteShape(DeleteShape),
    EditPath(EditPath),
    ClearShapes(ClearShapes),
}

/// A single shape entered the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShape {
    /// Full snapshot of the created shape.
    pub snapshot: ShapeSnapshot,
}

/// A single shape left the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteShape {
    /// Full snapshot taken immediately before deletion.
    pub snapshot: ShapeSnapshot,
}

/// Which kind of vertex gesture produced a path edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathEditKind {
    /// An existing vertex was dragged.
    MoveVertex,
    /// A midpoint was dragged, inserting a vertex.
    InsertVertex,
}

/// The vertex path of a polygon or polyline changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPath {
    /// Id of the edited shape.
    pub id: ShapeId,
    /// Path before the gesture.
    pub old_path: Vec<GeoPoint>,
    /// Path after the gesture.
    pub new_path: Vec<GeoPoint>,
    /// The gesture that produced the edit.
    pub edit: PathEditKind,
}

/// Every shape was removed in one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearShapes {
    /// Snapshots of all removed shapes, in insertion order.
    pub snapshots: Vec<ShapeSnapshot>,
}

impl EditCommand {
    /// Applies the command in the redo direction.
    pub fn apply(&self, registry: &mut ShapeRegistry) -> Result<()> {
        match self {
            EditCommand::CreateShape(cmd) => restore_snapshot(registry, &cmd.snapshot),
            EditCommand::DeleteShape(cmd) => {
                registry
                    .remove(cmd.snapshot.id)
                    .ok_or(EditorError::UnknownShape {
                        id: cmd.snapshot.id,
                    })?;
                Ok(())
            }
            EditCommand::EditPath(cmd) => set_path(registry, cmd.id, &cmd.new_path),
            EditCommand::ClearShapes(_) => {
                registry.clear();
                Ok(())
            }
        }
    }

    /// Reverts the command in the undo direction.
    pub fn revert(&self, registry: &mut ShapeRegistry) -> Result<()> {
        match self {
            EditCommand::CreateShape(cmd) => {
                registry
                    .remove(cmd.snapshot.id)
                    .ok_or(EditorError::UnknownShape {
                        id: cmd.snapshot.id,
                    })?;
                Ok(())
            }
            EditCommand::DeleteShape(cmd) => restore_snapshot(registry, &cmd.snapshot),
            EditCommand::EditPath(cmd) => set_path(registry, cmd.id, &cmd.old_path),
            EditCommand::ClearShapes(cmd) => {
                for snapshot in &cmd.snapshots {
                    restore_snapshot(registry, snapshot)?;
                }
                Ok(())
            }
        }
    }

    /// Returns the name of the command for display.
    pub fn describe(&self) -> String {
        match self {
            EditCommand::CreateShape(cmd) => format!("Create {}", cmd.snapshot.name),
            EditCommand::DeleteShape(cmd) => format!("Delete {}", cmd.snapshot.name),
            EditCommand::EditPath(cmd) => match cmd.edit {
                PathEditKind::MoveVertex => format!("Move vertex in shape {}", cmd.id),
                PathEditKind::InsertVertex => format!("Insert vertex in shape {}", cmd.id),
            },
            EditCommand::ClearShapes(cmd) => format!("Clear {} shapes", cmd.snapshots.len()),
        }
    }
}

fn restore_snapshot(registry: &mut ShapeRegistry, snapshot: &ShapeSnapshot) -> Result<()> {
    let shape = snapshot.to_shape()?;
    registry.insert_record(ShapeRecord {
        id: snapshot.id,
        name: snapshot.name.clone(),
        shape,
    });
    Ok(())
}

fn set_path(registry: &mut ShapeRegistry, id: ShapeId, path: &[GeoPoint]) -> Result<()> {
    let record = registry.get_mut(id).ok_or(EditorError::UnknownShape { id })?;
    let kind = record.shape.kind();
    let target = record
        .shape
        .path_mut()
        .ok_or(EditorError::NotPathBacked { id, kind })?;
    *target = path.to_vec();
    Ok(())
}
