//! # GeoDraw Core
//!
//! Foundation crate for the GeoDraw editing engine: geographic and pixel
//! value types, the pure geometry kernel (great-circle distance, spherical
//! polygon area, segment projection, point-in-polygon), and the projection
//! seam that converts between geographic coordinates and screen pixels at a
//! given zoom level.
//!
//! Everything here is stateless and total: kernel functions degenerate to
//! zero/identity values on empty input rather than failing.

pub mod constants;
pub mod geo;
pub mod kernel;
pub mod projection;

pub use constants::{CIRCLE_SNAP_SEGMENTS, EARTH_RADIUS_M, METERS_PER_DEGREE_LAT};
pub use geo::{GeoBounds, GeoPoint, PixelPoint};
pub use kernel::{
    centroid, haversine_distance, path_length, point_in_polygon, polygon_area,
    polygon_perimeter, project_point_to_segment, SegmentProjection,
};
pub use projection::{Projection, WebMercator};
