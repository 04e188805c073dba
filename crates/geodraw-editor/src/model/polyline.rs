use serde::{Deserialize, Serialize};

use geodraw_core::{kernel, GeoPoint};

/// An open geographic path. No closing edge, no interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub path: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(path: Vec<GeoPoint>) -> Self {
        Self { path }
    }

    pub fn length_m(&self) -> f64 {
        kernel::path_length(&self.path)
    }

    pub fn centroid(&self) -> GeoPoint {
        kernel::centroid(&self.path)
    }
}
