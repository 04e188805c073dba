//! Pure geometry kernel.
//!
//! Great-circle distance, spherical polygon area, perimeter, centroid,
//! clamped segment projection in pixel space, and ray-cast point-in-polygon.
//! All functions are deterministic and total: empty or degenerate input
//! yields zero/identity values, never an error.

use crate::constants::EARTH_RADIUS_M;
use crate::geo::{GeoPoint, PixelPoint};

/// Result of projecting a point onto a segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Closest point on the segment.
    pub point: PixelPoint,
    /// Euclidean distance from the query point to `point`, in pixels.
    pub distance: f64,
    /// Normalized position along the segment, clamped to `[0, 1]`.
    pub t: f64,
}

/// Great-circle distance between two geographic points in meters.
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let d_phi = (p2.lat - p1.lat).to_radians();
    let d_lambda = (p2.lng - p1.lng).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Area of a geographic polygon in square meters via spherical excess.
///
/// For each consecutive vertex pair the summation accumulates
/// `Δlng_rad * (2 + sin(lat_i) + sin(lat_j))`, is scaled by `R²/2`, and the
/// absolute value is returned so winding order does not matter.
/// Returns 0 for fewer than 3 points.
pub fn polygon_area(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        total += (p2.lng - p1.lng).to_radians()
            * (2.0 + p1.lat.to_radians().sin() + p2.lat.to_radians().sin());
    }
    (total * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0).abs()
}

/// Perimeter of a closed geographic ring in meters (wraps last to first).
/// Returns 0 for fewer than 2 points.
pub fn polygon_perimeter(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..points.len() {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % points.len()];
        total += haversine_distance(p1, p2);
    }
    total
}

/// Length of an open geographic path in meters (no wrap).
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}

/// Arithmetic mean of the vertex coordinates.
///
/// An acceptable approximation for small shapes, not the geodesic centroid.
/// Returns `(0, 0)` for empty input.
pub fn centroid(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let n = points.len() as f64;
    let lat_sum: f64 = points.iter().map(|p| p.lat).sum();
    let lng_sum: f64 = points.iter().map(|p| p.lng).sum();
    GeoPoint::new(lat_sum / n, lng_sum / n)
}

/// Projects `p` onto the segment `a`..`b` in flat pixel space.
///
/// Standard clamped scalar projection. A degenerate segment (`a == b`)
/// yields `a` itself with `t = 0`.
pub fn project_point_to_segment(p: &PixelPoint, a: &PixelPoint, b: &PixelPoint) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return SegmentProjection {
            point: *a,
            distance: p.distance_to(a),
            t: 0.0,
        };
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let point = PixelPoint::new(a.x + t * dx, a.y + t * dy);
    SegmentProjection {
        point,
        distance: p.distance_to(&point),
        t,
    }
}

/// Ray-casting point-in-polygon test (even-odd rule) on the lat/lng plane.
/// Returns false for rings with fewer than 3 vertices.
pub fn point_in_polygon(p: &GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);

        if ((yi > p.lat) != (yj > p.lat)) && (p.lng < (xj - xi) * (p.lat - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}
