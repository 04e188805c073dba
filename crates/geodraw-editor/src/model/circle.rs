use serde::{Deserialize, Serialize};

use geodraw_core::{haversine_distance, GeoPoint, METERS_PER_DEGREE_LAT};

/// A circle defined by a geographic center and a metric radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: GeoPoint,
    /// Radius in meters.
    pub radius_m: f64,
}

impl Circle {
    pub fn new(center: GeoPoint, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    pub fn area_sq_m(&self) -> f64 {
        std::f64::consts::PI * self.radius_m * self.radius_m
    }

    pub fn circumference_m(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius_m
    }

    pub fn contains_point(&self, p: &GeoPoint) -> bool {
        haversine_distance(&self.center, p) <= self.radius_m
    }

    /// Flattens the circle to a regular polygon ring for edge derivation.
    ///
    /// The metric radius converts to degree offsets with
    /// `1° latitude ≈ 111 111 m`, longitude scaled by `cos(latitude)` of the
    /// center. Good enough for snapping; not a geodesic circle.
    pub fn to_ring(&self, segments: usize) -> Vec<GeoPoint> {
        let segments = segments.max(3);
        let lat_radius = self.radius_m / METERS_PER_DEGREE_LAT;
        let lng_radius = lat_radius / self.center.lat.to_radians().cos().abs().max(1e-12);

        (0..segments)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
                GeoPoint::new(
                    self.center.lat + lat_radius * theta.sin(),
                    self.center.lng + lng_radius * theta.cos(),
                )
            })
            .collect()
    }
}
