//! Shape model: a closed sum type over the four editable shape kinds.
//!
//! All dispatch is exhaustive pattern matching; adding a shape kind means
//! extending [`Shape`] and letting the compiler point at every match arm
//! that needs a decision.

use serde::{Deserialize, Serialize};

use geodraw_core::GeoPoint;

mod circle;
mod polygon;
mod polyline;
mod rectangle;

pub use circle::Circle;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rectangle::Rectangle;

/// Stable identifier for a shape in the registry.
pub type ShapeId = u64;

/// Discriminant for the four shape variants.
///
/// Serialized in lowercase; this is the `type` tag of the snapshot contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Polygon,
    Polyline,
    Circle,
    Rectangle,
}

impl ShapeKind {
    /// Minimum number of confirmed points required to complete a drawing of
    /// this kind. Circle and rectangle are two-point gestures.
    pub fn min_points(&self) -> usize {
        match self {
            ShapeKind::Polygon => 3,
            ShapeKind::Polyline => 2,
            ShapeKind::Circle => 2,
            ShapeKind::Rectangle => 2,
        }
    }

    /// Whether this kind stores an editable vertex path.
    pub fn is_path_backed(&self) -> bool {
        matches!(self, ShapeKind::Polygon | ShapeKind::Polyline)
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Polygon => write!(f, "Polygon"),
            ShapeKind::Polyline => write!(f, "Polyline"),
            ShapeKind::Circle => write!(f, "Circle"),
            ShapeKind::Rectangle => write!(f, "Rectangle"),
        }
    }
}

/// A completed shape on the geographic surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Polygon(Polygon),
    Polyline(Polyline),
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Polyline(_) => ShapeKind::Polyline,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    /// Enclosed area in square meters. Zero for polylines.
    pub fn area_sq_m(&self) -> f64 {
        match self {
            Shape::Polygon(p) => p.area_sq_m(),
            Shape::Polyline(_) => 0.0,
            Shape::Circle(c) => c.area_sq_m(),
            Shape::Rectangle(r) => r.area_sq_m(),
        }
    }

    /// Outline length in meters: ring perimeter for closed shapes, path
    /// length for polylines.
    pub fn perimeter_m(&self) -> f64 {
        match self {
            Shape::Polygon(p) => p.perimeter_m(),
            Shape::Polyline(p) => p.length_m(),
            Shape::Circle(c) => c.circumference_m(),
            Shape::Rectangle(r) => r.perimeter_m(),
        }
    }

    pub fn centroid(&self) -> GeoPoint {
        match self {
            Shape::Polygon(p) => p.centroid(),
            Shape::Polyline(p) => p.centroid(),
            Shape::Circle(c) => c.center,
            Shape::Rectangle(r) => r.bounds.center(),
        }
    }

    /// Hit test against the shape interior. Polylines have no interior.
    pub fn contains_point(&self, p: &GeoPoint) -> bool {
        match self {
            Shape::Polygon(poly) => poly.contains_point(p),
            Shape::Polyline(_) => false,
            Shape::Circle(c) => c.contains_point(p),
            Shape::Rectangle(r) => r.bounds.contains(p),
        }
    }

    /// The editable vertex path for polygon/polyline shapes.
    pub fn path(&self) -> Option<&[GeoPoint]> {
        match self {
            Shape::Polygon(p) => Some(&p.path),
            Shape::Polyline(p) => Some(&p.path),
            Shape::Circle(_) | Shape::Rectangle(_) => None,
        }
    }

    /// Mutable access to the vertex path for polygon/polyline shapes.
    pub fn path_mut(&mut self) -> Option<&mut Vec<GeoPoint>> {
        match self {
            Shape::Polygon(p) => Some(&mut p.path),
            Shape::Polyline(p) => Some(&mut p.path),
            Shape::Circle(_) | Shape::Rectangle(_) => None,
        }
    }
}
