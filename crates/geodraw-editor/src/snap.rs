//! Edge snapping engine.
//!
//! Holds the set of snappable shape ids and answers nearest-edge queries in
//! pixel space. Geometry is read fresh from the registry on every query, so
//! the engine never holds stale boundaries; with shape counts in the tens,
//! recomputing the edge list per pointer move is cheaper than keeping an
//! incremental index consistent through undo/redo.

use geodraw_core::{
    project_point_to_segment, GeoPoint, PixelPoint, Projection, CIRCLE_SNAP_SEGMENTS,
};

use crate::config::SnapConfig;
use crate::events::{EditorEvent, EventDispatcher};
use crate::model::{Shape, ShapeId};
use crate::registry::ShapeRegistry;

/// One edge of a registered shape's boundary, identified by its position in
/// the owner's edge list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEdge {
    /// Owner of the edge.
    pub shape_id: ShapeId,
    /// Edge position within the owner's edge list.
    pub index: usize,
    /// Geographic start of the edge.
    pub start: GeoPoint,
    /// Geographic end of the edge.
    pub end: GeoPoint,
}

/// Outcome of a snap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped location on the winning edge.
    pub point: GeoPoint,
    /// Pixel distance from the cursor to the snapped location.
    pub distance_px: f64,
    /// The edge the cursor snapped to.
    pub edge: SnapEdge,
    /// Normalized position of the snapped location along the edge.
    pub t: f64,
}

struct Candidate {
    point_px: PixelPoint,
    distance_px: f64,
    edge: SnapEdge,
    t: f64,
}

/// Nearest-edge snapping over the registered shape set.
#[derive(Debug)]
pub struct SnapEngine {
    enabled: bool,
    threshold_px: f64,
    show_indicator: bool,
    registered: Vec<ShapeId>,
    active_point: Option<GeoPoint>,
    events: EventDispatcher,
}

impl SnapEngine {
    /// Creates an engine publishing indicator changes through `events`.
    pub fn new(config: &SnapConfig, events: EventDispatcher) -> Self {
        Self {
            enabled: config.enabled,
            threshold_px: config.threshold_px,
            show_indicator: config.show_indicator,
            registered: Vec::new(),
            active_point: None,
            events,
        }
    }

    /// Adds a shape to the snappable set. Registration order is query order,
    /// which decides ties; re-registering an id keeps its original position.
    pub fn register(&mut self, id: ShapeId) {
        if !self.registered.contains(&id) {
            self.registered.push(id);
        }
    }

    /// Removes a shape from the snappable set. Returns whether it was
    /// registered.
    pub fn unregister(&mut self, id: ShapeId) -> bool {
        let before = self.registered.len();
        self.registered.retain(|&existing| existing != id);
        self.registered.len() != before
    }

    /// Removes every shape from the snappable set.
    pub fn clear(&mut self) {
        self.registered.clear();
    }

    /// Number of registered shapes.
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Enables or disables snapping. Disabling clears an active indicator.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.update_indicator(None);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the snap radius in pixels.
    pub fn set_threshold_px(&mut self, threshold_px: f64) {
        self.threshold_px = threshold_px;
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Finds the nearest registered edge within the pixel threshold.
    ///
    /// Returns `None` without performing any projection work when snapping
    /// is disabled or nothing is registered. `exclude` drops one shape from
    /// the query so a shape being edited cannot snap to itself. A candidate
    /// wins strictly: equal distances keep the first edge in registration
    /// order, then intra-shape edge order. As a side effect the indicator
    /// state is refreshed and a change is published.
    pub fn find_snap_point(
        &mut self,
        cursor: GeoPoint,
        exclude: Option<ShapeId>,
        registry: &ShapeRegistry,
        projection: &dyn Projection,
        zoom: f64,
    ) -> Option<SnapResult> {
        if !self.enabled || self.registered.is_empty() {
            self.update_indicator(None);
            return None;
        }

        let cursor_px = projection.project(&cursor, zoom);
        let mut best: Option<Candidate> = None;
        let mut best_distance = self.threshold_px;

        for &shape_id in &self.registered {
            if exclude == Some(shape_id) {
                continue;
            }
            let Some(record) = registry.get(shape_id) else {
                continue;
            };

            let (ring, closed) = boundary(&record.shape);
            if ring.len() < 2 {
                continue;
            }
            let ring_px: Vec<PixelPoint> =
                ring.iter().map(|p| projection.project(p, zoom)).collect();

            let edge_count = if closed { ring.len() } else { ring.len() - 1 };
            for index in 0..edge_count {
                let next = (index + 1) % ring.len();
                let projected =
                    project_point_to_segment(&cursor_px, &ring_px[index], &ring_px[next]);
                if projected.distance < best_distance {
                    best_distance = projected.distance;
                    best = Some(Candidate {
                        point_px: projected.point,
                        distance_px: projected.distance,
                        edge: SnapEdge {
                            shape_id,
                            index,
                            start: ring[index],
                            end: ring[next],
                        },
                        t: projected.t,
                    });
                }
            }
        }

        let result = best.map(|candidate| SnapResult {
            point: projection.unproject(&candidate.point_px, zoom),
            distance_px: candidate.distance_px,
            edge: candidate.edge,
            t: candidate.t,
        });
        self.update_indicator(result.map(|r| r.point));
        result
    }

    fn update_indicator(&mut self, point: Option<GeoPoint>) {
        if point == self.active_point {
            return;
        }
        self.active_point = point;
        if !self.show_indicator {
            return;
        }
        self.events.publish(EditorEvent::SnapChanged {
            active: point.is_some(),
            point,
        });
    }
}

/// The snappable boundary of a shape as a vertex ring plus whether the last
/// vertex connects back to the first.
fn boundary(shape: &Shape) -> (Vec<GeoPoint>, bool) {
    match shape {
        Shape::Polygon(p) => (p.path.clone(), true),
        Shape::Polyline(p) => (p.path.clone(), false),
        Shape::Circle(c) => (c.to_ring(CIRCLE_SNAP_SEGMENTS), true),
        Shape::Rectangle(r) => (r.bounds.corners().to_vec(), true),
    }
}
