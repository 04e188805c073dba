//! Geographic and pixel-space value types.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// A projected screen coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another pixel point.
    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned geographic bounding box in degrees.
///
/// Invariant after `from_corners`: `north >= south` and `east >= west`.
/// Antimeridian-crossing boxes are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Builds normalized bounds from two opposite corners in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            north: a.lat.max(b.lat),
            south: a.lat.min(b.lat),
            east: a.lng.max(b.lng),
            west: a.lng.min(b.lng),
        }
    }

    /// Corners in ring order: NW, NE, SE, SW.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.north, self.west),
            GeoPoint::new(self.north, self.east),
            GeoPoint::new(self.south, self.east),
            GeoPoint::new(self.south, self.west),
        ]
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat <= self.north && p.lat >= self.south && p.lng <= self.east && p.lng >= self.west
    }
}
