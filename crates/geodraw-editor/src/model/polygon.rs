use serde::{Deserialize, Serialize};

use geodraw_core::{kernel, GeoPoint};

/// A closed geographic ring. The closing edge from the last vertex back to
/// the first is implicit and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub path: Vec<GeoPoint>,
}

impl Polygon {
    pub fn new(path: Vec<GeoPoint>) -> Self {
        Self { path }
    }

    pub fn area_sq_m(&self) -> f64 {
        kernel::polygon_area(&self.path)
    }

    pub fn perimeter_m(&self) -> f64 {
        kernel::polygon_perimeter(&self.path)
    }

    pub fn centroid(&self) -> GeoPoint {
        kernel::centroid(&self.path)
    }

    pub fn contains_point(&self, p: &GeoPoint) -> bool {
        kernel::point_in_polygon(p, &self.path)
    }
}
