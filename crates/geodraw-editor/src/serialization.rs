//! Serialization for editor documents and shape snapshots.
//!
//! Implements capture/restore for whole documents using JSON with complete
//! geometry preservation. [`ShapeSnapshot`] doubles as the payload of shape
//! lifecycle events and of delete/clear undo entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use geodraw_core::{GeoBounds, GeoPoint};

use crate::error::{EditorError, Result};
use crate::model::{Circle, Polygon, Polyline, Rectangle, Shape, ShapeId, ShapeKind};
use crate::registry::ShapeRecord;

/// Document format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete document snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub version: String,
    pub metadata: DocumentMetadata,
    pub shapes: Vec<ShapeSnapshot>,
}

/// Document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Serialized shape state.
///
/// Only the fields relevant to the kind are populated: `path` for polygons
/// and polylines, `center` and `radius` for circles, `bounds` for
/// rectangles. `area` is captured for listeners and recomputed from
/// geometry on restore, never trusted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub id: ShapeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<GeoPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "radius")]
    pub radius_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GeoBounds>,
    #[serde(rename = "area")]
    pub area_sq_m: f64,
}

impl ShapeSnapshot {
    /// Capture a snapshot of a registered shape.
    pub fn from_record(record: &ShapeRecord) -> Self {
        let shape = &record.shape;
        let (path, center, radius_m, bounds) = match shape {
            Shape::Polygon(p) => (Some(p.path.clone()), None, None, None),
            Shape::Polyline(p) => (Some(p.path.clone()), None, None, None),
            Shape::Circle(c) => (None, Some(c.center), Some(c.radius_m), None),
            Shape::Rectangle(r) => (None, None, None, Some(r.bounds)),
        };
        Self {
            id: record.id,
            name: record.name.clone(),
            kind: shape.kind(),
            path,
            center,
            radius_m,
            bounds,
            area_sq_m: shape.area_sq_m(),
        }
    }

    /// Rebuild the shape this snapshot describes.
    ///
    /// Fails when the snapshot lacks the fields its kind requires, or when
    /// a vertex path is below the minimum count for the kind.
    pub fn to_shape(&self) -> Result<Shape> {
        match self.kind {
            ShapeKind::Polygon | ShapeKind::Polyline => {
                let path = self
                    .path
                    .clone()
                    .ok_or_else(|| EditorError::InvalidSnapshot {
                        kind: self.kind,
                        reason: "missing path".to_string(),
                    })?;
                let required = self.kind.min_points();
                if path.len() < required {
                    return Err(EditorError::PathTooShort {
                        kind: self.kind,
                        required,
                        actual: path.len(),
                    });
                }
                Ok(if self.kind == ShapeKind::Polygon {
                    Shape::Polygon(Polygon::new(path))
                } else {
                    Shape::Polyline(Polyline::new(path))
                })
            }
            ShapeKind::Circle => {
                let center = self.center.ok_or_else(|| EditorError::InvalidSnapshot {
                    kind: self.kind,
                    reason: "missing center".to_string(),
                })?;
                let radius_m = self.radius_m.ok_or_else(|| EditorError::InvalidSnapshot {
                    kind: self.kind,
                    reason: "missing radius".to_string(),
                })?;
                Ok(Shape::Circle(Circle::new(center, radius_m)))
            }
            ShapeKind::Rectangle => {
                let bounds = self.bounds.ok_or_else(|| EditorError::InvalidSnapshot {
                    kind: self.kind,
                    reason: "missing bounds".to_string(),
                })?;
                Ok(Shape::Rectangle(Rectangle::new(bounds)))
            }
        }
    }
}

impl DocumentSnapshot {
    /// Create an empty document snapshot with default metadata.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            shapes: Vec::new(),
        }
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document snapshot from JSON.
    ///
    /// Fails on malformed JSON or an unrecognized shape type tag. The
    /// modified timestamp is refreshed on load.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: DocumentSnapshot = serde_json::from_str(json)?;
        doc.metadata.modified = Utc::now();
        Ok(doc)
    }
}
