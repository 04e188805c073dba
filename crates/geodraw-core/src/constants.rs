//! Geodesic constants shared across the workspace.

/// Mean Earth radius in meters, used by all great-circle math.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Approximate meters per degree of latitude, used when converting a
/// metric radius to degree offsets for circle flattening.
pub const METERS_PER_DEGREE_LAT: f64 = 111_111.0;

/// Number of segments used when a circle is flattened to a polygon ring
/// for edge snapping.
pub const CIRCLE_SNAP_SEGMENTS: usize = 36;
