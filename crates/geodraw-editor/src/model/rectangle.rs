use serde::{Deserialize, Serialize};

use geodraw_core::{kernel, GeoBounds};

/// An axis-aligned geographic rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub bounds: GeoBounds,
}

impl Rectangle {
    pub fn new(bounds: GeoBounds) -> Self {
        Self { bounds }
    }

    pub fn area_sq_m(&self) -> f64 {
        kernel::polygon_area(&self.bounds.corners())
    }

    pub fn perimeter_m(&self) -> f64 {
        kernel::polygon_perimeter(&self.bounds.corners())
    }
}
