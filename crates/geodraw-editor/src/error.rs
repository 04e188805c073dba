//! Error handling for the editing engine.
//!
//! Only construction and command replay can fail; interactive boundary
//! conditions (completing below the minimum point count, undo at the start
//! of the log, redundant selection) are valid states reported through `bool`
//! returns, not errors.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::model::{ShapeId, ShapeKind};

/// Editing engine error type.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A command referenced a shape id that is not in the registry.
    #[error("Unknown shape id {id}")]
    UnknownShape {
        /// The id that was not found.
        id: ShapeId,
    },

    /// A command needed an editable vertex path, but the shape has none.
    #[error("Shape {id} ({kind}) is not path-backed")]
    NotPathBacked {
        /// The id of the offending shape.
        id: ShapeId,
        /// The kind of the offending shape.
        kind: ShapeKind,
    },

    /// A snapshot did not carry the fields its shape type requires.
    #[error("Invalid {kind} snapshot: {reason}")]
    InvalidSnapshot {
        /// The declared shape kind of the snapshot.
        kind: ShapeKind,
        /// What is missing or inconsistent.
        reason: String,
    },

    /// A path-backed snapshot carried fewer vertices than its kind allows.
    #[error("{kind} requires at least {required} vertices, got {actual}")]
    PathTooShort {
        /// The declared shape kind of the snapshot.
        kind: ShapeKind,
        /// The minimum vertex count for the kind.
        required: usize,
        /// The vertex count actually present.
        actual: usize,
    },

    /// Snapshot JSON could not be encoded or decoded.
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
