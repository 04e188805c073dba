//! Projection seam between geographic coordinates and screen pixels.
//!
//! The editing engine measures snap distances in on-screen pixels, so every
//! snap query converts geography to pixel space at the current zoom level.
//! Hosts supply the projection that matches their tile scheme; `WebMercator`
//! is the shipping default and the test fixture.

use crate::geo::{GeoPoint, PixelPoint};

/// Converts between geographic coordinates and pixel coordinates at a zoom
/// level.
///
/// Pixel space at zoom `z` is the zoom-0 world coordinate scaled by `2^z`.
pub trait Projection {
    /// Projects a geographic point to pixel coordinates at `zoom`.
    fn project(&self, point: &GeoPoint, zoom: f64) -> PixelPoint;

    /// Inverse of [`project`](Projection::project).
    fn unproject(&self, pixel: &PixelPoint, zoom: f64) -> GeoPoint;
}

/// Spherical Web-Mercator projection on a 256-pixel world tile.
///
/// Formulas (world coordinates at zoom 0, then scaled by `2^zoom`):
/// ```text
/// x = 256 * (lng + 180) / 360
/// y = 256 * (0.5 - atanh(sin(lat)) / 2π)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

/// World tile size in pixels at zoom 0.
const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Mercator world.
const MAX_LATITUDE: f64 = 85.051_128_78;

impl Projection for WebMercator {
    fn project(&self, point: &GeoPoint, zoom: f64) -> PixelPoint {
        let scale = TILE_SIZE * 2f64.powf(zoom);
        let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

        let x = (point.lng + 180.0) / 360.0;
        let sin_lat = lat.to_radians().sin();
        let y = 0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * std::f64::consts::PI);

        PixelPoint::new(x * scale, y * scale)
    }

    fn unproject(&self, pixel: &PixelPoint, zoom: f64) -> GeoPoint {
        let scale = TILE_SIZE * 2f64.powf(zoom);

        let lng = pixel.x / scale * 360.0 - 180.0;
        let y_merc = (0.5 - pixel.y / scale) * 2.0 * std::f64::consts::PI;
        let lat = (2.0 * y_merc.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();

        GeoPoint::new(lat, lng)
    }
}
