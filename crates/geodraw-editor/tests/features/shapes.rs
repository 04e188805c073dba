use approx::assert_relative_eq;

use geodraw_core::{GeoBounds, GeoPoint, EARTH_RADIUS_M};
use geodraw_editor::model::{Circle, Polygon, Polyline, Rectangle, Shape, ShapeKind};

/// Bounds spanning `side_m` meters in each direction, centered on the
/// equator so the flat-area approximation holds.
fn metric_bounds(side_m: f64) -> GeoBounds {
    let d = ((side_m / 2.0) / EARTH_RADIUS_M).to_degrees();
    GeoBounds::new(d, -d, d, -d)
}

#[test]
fn test_kind_minimums() {
    assert_eq!(ShapeKind::Polygon.min_points(), 3);
    assert_eq!(ShapeKind::Polyline.min_points(), 2);
    assert_eq!(ShapeKind::Circle.min_points(), 2);
    assert_eq!(ShapeKind::Rectangle.min_points(), 2);

    assert!(ShapeKind::Polygon.is_path_backed());
    assert!(ShapeKind::Polyline.is_path_backed());
    assert!(!ShapeKind::Circle.is_path_backed());
    assert!(!ShapeKind::Rectangle.is_path_backed());
}

#[test]
fn test_circle_metrics() {
    let shape = Shape::Circle(Circle::new(GeoPoint::new(0.0, 0.0), 100.0));
    assert_relative_eq!(shape.area_sq_m(), std::f64::consts::PI * 100.0 * 100.0);
    assert_relative_eq!(shape.perimeter_m(), 2.0 * std::f64::consts::PI * 100.0);
    assert_eq!(shape.centroid(), GeoPoint::new(0.0, 0.0));
}

#[test]
fn test_circle_contains_point_by_metric_distance() {
    // One degree of latitude is about 111.2 km.
    let circle = Circle::new(GeoPoint::new(0.0, 0.0), 200_000.0);
    assert!(circle.contains_point(&GeoPoint::new(1.0, 0.0)));
    assert!(!circle.contains_point(&GeoPoint::new(2.0, 0.0)));
}

#[test]
fn test_circle_ring_flattening() {
    let circle = Circle::new(GeoPoint::new(0.0, 0.0), 111_111.0);
    let ring = circle.to_ring(36);
    assert_eq!(ring.len(), 36);
    // Vertex 0 lies due east of the center by one ring radius.
    assert_relative_eq!(ring[0].lat, 0.0, epsilon = 1e-9);
    assert_relative_eq!(ring[0].lng, 1.0, epsilon = 1e-9);

    // Longitude offsets stretch by 1/cos(latitude) away from the equator.
    let north = Circle::new(GeoPoint::new(60.0, 0.0), 111_111.0);
    let ring = north.to_ring(36);
    assert_relative_eq!(ring[0].lng, 2.0, max_relative = 1e-9);

    // Degenerate segment counts clamp to a triangle.
    assert_eq!(circle.to_ring(1).len(), 3);
}

#[test]
fn test_rectangle_metrics_approximate_flat_box() {
    let shape = Shape::Rectangle(Rectangle::new(metric_bounds(1000.0)));
    assert_relative_eq!(shape.area_sq_m(), 1_000_000.0, max_relative = 1e-3);
    assert_relative_eq!(shape.perimeter_m(), 4000.0, max_relative = 1e-3);
    assert_eq!(shape.centroid(), GeoPoint::new(0.0, 0.0));
}

#[test]
fn test_rectangle_contains_point() {
    let shape = Shape::Rectangle(Rectangle::new(GeoBounds::new(10.0, 0.0, 20.0, 10.0)));
    assert!(shape.contains_point(&GeoPoint::new(5.0, 15.0)));
    assert!(!shape.contains_point(&GeoPoint::new(11.0, 15.0)));
}

#[test]
fn test_polygon_contains_point() {
    let shape = Shape::Polygon(Polygon::new(vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 10.0),
        GeoPoint::new(10.0, 10.0),
        GeoPoint::new(10.0, 0.0),
    ]));
    assert!(shape.contains_point(&GeoPoint::new(5.0, 5.0)));
    assert!(!shape.contains_point(&GeoPoint::new(5.0, 15.0)));
}

#[test]
fn test_polyline_has_no_area_or_interior() {
    let shape = Shape::Polyline(Polyline::new(vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 1.0),
        GeoPoint::new(1.0, 1.0),
    ]));
    assert_eq!(shape.area_sq_m(), 0.0);
    assert!(!shape.contains_point(&GeoPoint::new(0.5, 0.5)));
    assert!(shape.perimeter_m() > 0.0, "open length still counts");
}

#[test]
fn test_path_access_follows_kind() {
    let mut polygon = Shape::Polygon(Polygon::new(vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 1.0),
        GeoPoint::new(1.0, 1.0),
    ]));
    assert_eq!(polygon.path().unwrap().len(), 3);
    polygon.path_mut().unwrap().push(GeoPoint::new(1.0, 0.0));
    assert_eq!(polygon.path().unwrap().len(), 4);

    let mut circle = Shape::Circle(Circle::new(GeoPoint::new(0.0, 0.0), 10.0));
    assert!(circle.path().is_none());
    assert!(circle.path_mut().is_none());

    let mut rect = Shape::Rectangle(Rectangle::new(GeoBounds::new(1.0, 0.0, 1.0, 0.0)));
    assert!(rect.path().is_none());
    assert!(rect.path_mut().is_none());
}

#[test]
fn test_kind_display_names_match_registry_naming() {
    assert_eq!(ShapeKind::Polygon.to_string(), "Polygon");
    assert_eq!(ShapeKind::Polyline.to_string(), "Polyline");
    assert_eq!(ShapeKind::Circle.to_string(), "Circle");
    assert_eq!(ShapeKind::Rectangle.to_string(), "Rectangle");
}
