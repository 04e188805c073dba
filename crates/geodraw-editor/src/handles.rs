//! Edit handles for path-backed shapes.
//!
//! A [`HandleSet`] mirrors one vertex path: a handle per vertex plus a
//! handle per edge midpoint. Polygon edges wrap around to close the ring,
//! polyline edges do not. During a vertex drag only the two midpoints
//! adjacent to the moving vertex are recomputed; inserting a vertex changes
//! edge adjacency, so the owning session rebuilds the whole set instead.

use geodraw_core::GeoPoint;

/// Vertex and midpoint handles derived from a path.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSet {
    vertices: Vec<GeoPoint>,
    midpoints: Vec<GeoPoint>,
    closed: bool,
}

/// Midpoint of one edge in coordinate space.
pub(crate) fn midpoint(a: GeoPoint, b: GeoPoint) -> GeoPoint {
    GeoPoint::new((a.lat + b.lat) / 2.0, (a.lng + b.lng) / 2.0)
}

impl HandleSet {
    /// Builds the handle set for a path. `closed` selects whether the last
    /// vertex connects back to the first.
    pub fn from_path(path: &[GeoPoint], closed: bool) -> Self {
        let n = path.len();
        let edge_count = if closed { n } else { n.saturating_sub(1) };
        let midpoints = (0..edge_count)
            .map(|i| midpoint(path[i], path[(i + 1) % n]))
            .collect();
        Self {
            vertices: path.to_vec(),
            midpoints,
            closed,
        }
    }

    /// Moves one vertex and recomputes only its two adjacent midpoints.
    /// An out-of-range index is ignored.
    pub fn move_vertex(&mut self, index: usize, point: GeoPoint) {
        let n = self.vertices.len();
        if index >= n {
            return;
        }
        self.vertices[index] = point;

        if self.closed {
            self.midpoints[index] = midpoint(self.vertices[index], self.vertices[(index + 1) % n]);
            let previous = (index + n - 1) % n;
            self.midpoints[previous] = midpoint(self.vertices[previous], self.vertices[index]);
        } else {
            if index + 1 < n {
                self.midpoints[index] = midpoint(self.vertices[index], self.vertices[index + 1]);
            }
            if index > 0 {
                self.midpoints[index - 1] =
                    midpoint(self.vertices[index - 1], self.vertices[index]);
            }
        }
    }

    /// Vertex handle positions, one per path vertex.
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Midpoint handle positions, one per edge.
    pub fn midpoints(&self) -> &[GeoPoint] {
        &self.midpoints
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
