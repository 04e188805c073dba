//! Interactive drawing session.
//!
//! [`DrawingSession`] is the orchestrator: it owns the shape registry, the
//! snap engine, the undo log, and the event dispatcher, and runs the
//! drawing state machine and the vertex editing protocol against them. All
//! methods take `&mut self` and run to completion on the calling thread;
//! collaborators observe mutations through the session's event stream, not
//! through shared state.

use geodraw_core::{haversine_distance, GeoBounds, GeoPoint, Projection};

use crate::commands::{
    ClearShapes, CreateShape, DeleteShape, EditCommand, EditPath, PathEditKind,
};
use crate::config::EditorConfig;
use crate::error::Result;
use crate::events::{EditorEvent, EventDispatcher};
use crate::handles::{midpoint, HandleSet};
use crate::history::{History, HistoryStatus};
use crate::model::{Circle, Polygon, Polyline, Rectangle, Shape, ShapeId, ShapeKind};
use crate::registry::{ShapeRecord, ShapeRegistry};
use crate::serialization::{DocumentSnapshot, ShapeSnapshot};
use crate::snap::SnapEngine;

/// The drawing state machine: at most one gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No drawing in progress.
    Idle,
    /// A drawing gesture is accumulating points.
    Drawing {
        /// The kind being drawn.
        kind: ShapeKind,
        /// Confirmed points. For circle/rectangle this holds at most the
        /// anchor; the second click completes the shape.
        path: Vec<GeoPoint>,
        /// Snap result of the most recent pointer move, substituted for
        /// the raw cursor position on the next click.
        last_snap: Option<GeoPoint>,
    },
}

/// Keys whose behavior the engine owns. Hosts map physical keyboard events
/// onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Undo,
    Redo,
    Cancel,
    Complete,
    DeleteSelection,
}

/// A vertex drag gesture in progress.
#[derive(Debug, Clone)]
struct DragState {
    shape_id: ShapeId,
    vertex_index: usize,
    original_path: Vec<GeoPoint>,
    edit: PathEditKind,
}

#[derive(Debug, Clone, Copy)]
enum ReplayDirection {
    Undo,
    Redo,
}

/// Orchestrator for interactive drawing, editing, and undo.
pub struct DrawingSession {
    registry: ShapeRegistry,
    snap: SnapEngine,
    history: History<EditCommand>,
    events: EventDispatcher,
    projection: Box<dyn Projection>,
    zoom: f64,
    state: DrawingState,
    selected: Option<ShapeId>,
    handles: Option<HandleSet>,
    drag: Option<DragState>,
    preview: Option<GeoPoint>,
}

impl DrawingSession {
    /// Creates a session from configuration, projecting through `projection`.
    ///
    /// The zoom starts at 0; hosts push the real map zoom with
    /// [`set_zoom`](Self::set_zoom) before pointer interaction.
    pub fn new(config: &EditorConfig, projection: Box<dyn Projection>) -> Self {
        let events = EventDispatcher::new();
        let snap = SnapEngine::new(&config.snapping, events.clone());

        let mut history = History::new(config.history.max_steps);
        let history_events = events.clone();
        history.set_on_change(move |status| {
            history_events.publish(EditorEvent::HistoryChanged { status });
        });

        Self {
            registry: ShapeRegistry::new(),
            snap,
            history,
            events,
            projection,
            zoom: 0.0,
            state: DrawingState::Idle,
            selected: None,
            handles: None,
            drag: None,
            preview: None,
        }
    }

    // ----- drawing state machine -----

    /// Begins drawing a shape of `kind`.
    ///
    /// An active drawing is cancelled first and any selection is cleared,
    /// so there is never more than one gesture in progress.
    pub fn start_drawing(&mut self, kind: ShapeKind) {
        if matches!(self.state, DrawingState::Drawing { .. }) {
            self.cancel_drawing();
        }
        self.deselect_shape();
        self.state = DrawingState::Drawing {
            kind,
            path: Vec::new(),
            last_snap: None,
        };
        self.preview = None;
        tracing::debug!("Drawing started: {}", kind);
        self.events.publish(EditorEvent::DrawingStarted { kind });
    }

    /// Updates the preview while drawing: re-runs the snap query and stages
    /// the result for the next click.
    pub fn pointer_move(&mut self, geo: GeoPoint) {
        if !matches!(self.state, DrawingState::Drawing { .. }) {
            return;
        }
        let snapped = self
            .snap
            .find_snap_point(geo, None, &self.registry, self.projection.as_ref(), self.zoom)
            .map(|result| result.point);
        if let DrawingState::Drawing { last_snap, .. } = &mut self.state {
            *last_snap = snapped;
        }
        self.preview = Some(snapped.unwrap_or(geo));
    }

    /// Confirms a point in the active drawing.
    ///
    /// The staged snap point from the preceding move substitutes for the
    /// raw position. Polygons and polylines accumulate; for circle and
    /// rectangle the second click completes the shape immediately. Returns
    /// whether a drawing consumed the click.
    pub fn pointer_click(&mut self, geo: GeoPoint) -> bool {
        let (kind, count) = {
            let DrawingState::Drawing {
                kind,
                path,
                last_snap,
            } = &mut self.state
            else {
                return false;
            };
            path.push(last_snap.unwrap_or(geo));
            (*kind, path.len())
        };

        match kind {
            ShapeKind::Polygon | ShapeKind::Polyline => {
                self.events.publish(EditorEvent::DrawingProgress { count });
            }
            ShapeKind::Circle | ShapeKind::Rectangle => {
                if count >= 2 {
                    self.complete_drawing();
                }
            }
        }
        true
    }

    /// Finishes a multi-point drawing, equivalent to explicit completion.
    pub fn pointer_double_click(&mut self) -> bool {
        self.complete_drawing()
    }

    /// Completes the active drawing if it meets the kind's minimum point
    /// count; below the minimum this is a silent no-op and the session
    /// stays in the drawing state. Returns whether a shape was created.
    pub fn complete_drawing(&mut self) -> bool {
        let ready = match &self.state {
            DrawingState::Drawing { kind, path, .. } => path.len() >= kind.min_points(),
            DrawingState::Idle => false,
        };
        if !ready {
            return false;
        }
        let DrawingState::Drawing { kind, path, .. } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return false;
        };
        self.preview = None;

        let id = self.registry.insert(materialize(kind, path));
        self.snap.register(id);
        let Some(record) = self.registry.get(id) else {
            return false;
        };
        let snapshot = ShapeSnapshot::from_record(record);

        self.history.push(EditCommand::CreateShape(CreateShape {
            snapshot: snapshot.clone(),
        }));
        tracing::info!("Created {}", snapshot.name);
        self.events.publish(EditorEvent::DrawingCompleted);
        self.events.publish(EditorEvent::ShapeCreated { shape: snapshot });
        true
    }

    /// Abandons the active drawing without creating a shape or a history
    /// entry. Returns whether a drawing was active.
    pub fn cancel_drawing(&mut self) -> bool {
        if !matches!(self.state, DrawingState::Drawing { .. }) {
            return false;
        }
        self.state = DrawingState::Idle;
        self.preview = None;
        self.events.publish(EditorEvent::DrawingCancelled);
        true
    }

    // ----- selection -----

    /// Selects a shape, building its edit handles when it is path-backed.
    ///
    /// Selecting the already-selected shape is a no-op returning `true`;
    /// an unknown id returns `false`. Any previous selection is deselected
    /// first.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        if self.selected == Some(id) {
            return true;
        }
        let Some(record) = self.registry.get(id) else {
            return false;
        };
        let snapshot = ShapeSnapshot::from_record(record);
        let handles = record
            .shape
            .path()
            .map(|path| HandleSet::from_path(path, record.shape.kind() == ShapeKind::Polygon));

        self.deselect_shape();
        self.selected = Some(id);
        self.handles = handles;
        self.events.publish(EditorEvent::ShapeSelected { shape: snapshot });
        true
    }

    /// Clears the selection and drops its handles. Returns `false` when
    /// nothing was selected.
    pub fn deselect_shape(&mut self) -> bool {
        if self.selected.take().is_none() {
            return false;
        }
        self.handles = None;
        self.drag = None;
        self.events.publish(EditorEvent::ShapeDeselected);
        true
    }

    // ----- vertex editing -----

    /// Starts dragging an existing vertex of a path-backed shape. The
    /// shape becomes the selection if it was not already.
    pub fn begin_vertex_drag(&mut self, id: ShapeId, vertex_index: usize) -> bool {
        let Some(record) = self.registry.get(id) else {
            return false;
        };
        let Some(path) = record.shape.path() else {
            return false;
        };
        if vertex_index >= path.len() {
            return false;
        }
        let original_path = path.to_vec();

        self.select_shape(id);
        self.drag = Some(DragState {
            shape_id: id,
            vertex_index,
            original_path,
            edit: PathEditKind::MoveVertex,
        });
        true
    }

    /// Starts dragging the midpoint of edge `edge_index`: a new vertex is
    /// inserted after the edge's start immediately, and subsequent
    /// [`drag_to`](Self::drag_to) calls move it.
    pub fn begin_midpoint_drag(&mut self, id: ShapeId, edge_index: usize) -> bool {
        let Some(record) = self.registry.get(id) else {
            return false;
        };
        let Some(path) = record.shape.path() else {
            return false;
        };
        let closed = record.shape.kind() == ShapeKind::Polygon;
        let n = path.len();
        let edge_count = if closed { n } else { n.saturating_sub(1) };
        if edge_index >= edge_count {
            return false;
        }
        let original_path = path.to_vec();
        let new_vertex = midpoint(path[edge_index], path[(edge_index + 1) % n]);
        let insert_at = edge_index + 1;

        self.select_shape(id);
        let Some(record) = self.registry.get_mut(id) else {
            return false;
        };
        let Some(path) = record.shape.path_mut() else {
            return false;
        };
        path.insert(insert_at, new_vertex);
        // Edge adjacency changed; the handle set is rebuilt, not patched.
        self.handles = Some(HandleSet::from_path(path, closed));
        self.drag = Some(DragState {
            shape_id: id,
            vertex_index: insert_at,
            original_path,
            edit: PathEditKind::InsertVertex,
        });
        true
    }

    /// Moves the dragged vertex, snapping against every shape except the
    /// one being edited. Intermediate moves update geometry and the two
    /// adjacent midpoint handles only; nothing is pushed to history until
    /// release.
    pub fn drag_to(&mut self, geo: GeoPoint) {
        let (shape_id, vertex_index) = match &self.drag {
            Some(drag) => (drag.shape_id, drag.vertex_index),
            None => return,
        };
        let snapped = self
            .snap
            .find_snap_point(
                geo,
                Some(shape_id),
                &self.registry,
                self.projection.as_ref(),
                self.zoom,
            )
            .map(|result| result.point);
        let point = snapped.unwrap_or(geo);

        let Some(record) = self.registry.get_mut(shape_id) else {
            return;
        };
        let Some(path) = record.shape.path_mut() else {
            return;
        };
        if vertex_index >= path.len() {
            return;
        }
        path[vertex_index] = point;
        if let Some(handles) = self.handles.as_mut() {
            handles.move_vertex(vertex_index, point);
        }
    }

    /// Releases the active drag.
    ///
    /// The whole gesture becomes one history entry capturing the before
    /// and after paths; a gesture that leaves the path identical pushes
    /// nothing. Returns whether a drag was active.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let Some(record) = self.registry.get(drag.shape_id) else {
            return false;
        };
        let Some(path) = record.shape.path() else {
            return false;
        };
        let new_path = path.to_vec();
        let closed = record.shape.kind() == ShapeKind::Polygon;
        let snapshot = ShapeSnapshot::from_record(record);

        self.handles = Some(HandleSet::from_path(&new_path, closed));

        if new_path == drag.original_path {
            return true;
        }
        self.history.push(EditCommand::EditPath(EditPath {
            id: drag.shape_id,
            old_path: drag.original_path,
            new_path,
            edit: drag.edit,
        }));
        self.events.publish(EditorEvent::ShapeUpdated { shape: snapshot });
        true
    }

    // ----- deletion -----

    /// Deletes a shape, recording its full snapshot so undo can re-create
    /// it under the same id. Returns `false` for an unknown id.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        let Some(record) = self.registry.get(id) else {
            return false;
        };
        let snapshot = ShapeSnapshot::from_record(record);

        if self.selected == Some(id) {
            // Selection dies with the shape, without a separate deselect
            // event.
            self.selected = None;
            self.handles = None;
            self.drag = None;
        }
        self.registry.remove(id);
        self.snap.unregister(id);
        self.history.push(EditCommand::DeleteShape(DeleteShape {
            snapshot: snapshot.clone(),
        }));
        tracing::info!("Deleted {}", snapshot.name);
        self.events.publish(EditorEvent::ShapeDeleted { id });
        true
    }

    /// Deletes the selected shape, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete_shape(id),
            None => false,
        }
    }

    /// Removes every shape as one atomic history entry. Clearing an empty
    /// registry is a silent no-op. Returns the number of shapes removed.
    pub fn clear_shapes(&mut self) -> usize {
        if self.registry.is_empty() {
            return 0;
        }
        let snapshots: Vec<ShapeSnapshot> = self
            .registry
            .iter()
            .map(ShapeSnapshot::from_record)
            .collect();
        let count = snapshots.len();

        self.registry.clear();
        self.snap.clear();
        self.selected = None;
        self.handles = None;
        self.drag = None;
        self.history
            .push(EditCommand::ClearShapes(ClearShapes { snapshots }));
        tracing::info!("Cleared {} shapes", count);
        self.events.publish(EditorEvent::ShapesCleared);
        count
    }

    // ----- undo/redo -----

    /// Undoes the most recent entry, emitting the same shape events a
    /// direct mutation would. Returns `false` at the start of the log or
    /// when replay fails.
    pub fn undo(&mut self) -> bool {
        let Self {
            history,
            registry,
            snap,
            events,
            selected,
            handles,
            drag,
            ..
        } = self;
        history.undo(|command| match command.revert(registry) {
            Ok(()) => {
                sync_after_replay(
                    command,
                    ReplayDirection::Undo,
                    registry,
                    snap,
                    events,
                    selected,
                    handles,
                    drag,
                );
                true
            }
            Err(error) => {
                tracing::warn!("Undo of '{}' failed: {}", command.describe(), error);
                false
            }
        })
    }

    /// Redoes the next entry. Returns `false` at the tail of the log or
    /// when replay fails.
    pub fn redo(&mut self) -> bool {
        let Self {
            history,
            registry,
            snap,
            events,
            selected,
            handles,
            drag,
            ..
        } = self;
        history.redo(|command| match command.apply(registry) {
            Ok(()) => {
                sync_after_replay(
                    command,
                    ReplayDirection::Redo,
                    registry,
                    snap,
                    events,
                    selected,
                    handles,
                    drag,
                );
                true
            }
            Err(error) => {
                tracing::warn!("Redo of '{}' failed: {}", command.describe(), error);
                false
            }
        })
    }

    /// Applies an editor key action. Returns whether anything happened.
    pub fn handle_key(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Undo => self.undo(),
            EditorKey::Redo => self.redo(),
            EditorKey::Cancel => self.cancel_drawing(),
            EditorKey::Complete => self.complete_drawing(),
            EditorKey::DeleteSelection => self.delete_selected(),
        }
    }

    // ----- configuration passthroughs -----

    /// Pushes the current map zoom; pixel-space snapping distances depend
    /// on it.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Enables or disables snapping at runtime.
    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap.set_enabled(enabled);
    }

    /// Adjusts the snap radius in pixels at runtime.
    pub fn set_snap_threshold_px(&mut self, threshold_px: f64) {
        self.snap.set_threshold_px(threshold_px);
    }

    // ----- documents -----

    /// Captures every shape as a named document snapshot.
    pub fn snapshot(&self, name: impl Into<String>) -> DocumentSnapshot {
        let mut document = DocumentSnapshot::new(name);
        document.shapes = self
            .registry
            .iter()
            .map(ShapeSnapshot::from_record)
            .collect();
        document
    }

    /// Replaces all session content with a document's shapes.
    ///
    /// Every snapshot is validated before any state changes, so a bad
    /// document leaves the session untouched. On success the history,
    /// selection, and any active drawing are reset, each restored shape is
    /// registered for snapping in document order, and listeners observe a
    /// cleared-then-created event sequence.
    pub fn restore(&mut self, document: &DocumentSnapshot) -> Result<()> {
        let mut records = Vec::with_capacity(document.shapes.len());
        for snapshot in &document.shapes {
            records.push(ShapeRecord {
                id: snapshot.id,
                name: snapshot.name.clone(),
                shape: snapshot.to_shape()?,
            });
        }

        self.cancel_drawing();
        self.deselect_shape();
        self.registry.clear();
        self.snap.clear();
        self.events.publish(EditorEvent::ShapesCleared);

        for record in records {
            let id = record.id;
            self.registry.insert_record(record);
            self.snap.register(id);
            if let Some(restored) = self.registry.get(id) {
                self.events.publish(EditorEvent::ShapeCreated {
                    shape: ShapeSnapshot::from_record(restored),
                });
            }
        }
        self.history.clear();
        tracing::info!(
            "Restored document '{}' with {} shapes",
            document.metadata.name,
            document.shapes.len()
        );
        Ok(())
    }

    // ----- accessors -----

    /// Read access to a registered record.
    pub fn shape(&self, id: ShapeId) -> Option<&ShapeRecord> {
        self.registry.get(id)
    }

    /// All records in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.registry.iter()
    }

    pub fn shape_count(&self) -> usize {
        self.registry.len()
    }

    /// The session's dispatcher, for subscribing collaborators.
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Current drawing state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Rubber-band preview position while drawing.
    pub fn preview(&self) -> Option<GeoPoint> {
        self.preview
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Edit handles of the selected path-backed shape.
    pub fn handles(&self) -> Option<&HandleSet> {
        self.handles.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo log state for UI affordances.
    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }
}

/// Builds the completed shape from the confirmed drawing path. The caller
/// has already verified the kind's minimum point count.
fn materialize(kind: ShapeKind, path: Vec<GeoPoint>) -> Shape {
    match kind {
        ShapeKind::Polygon => Shape::Polygon(Polygon::new(path)),
        ShapeKind::Polyline => Shape::Polyline(Polyline::new(path)),
        ShapeKind::Circle => {
            let radius_m = haversine_distance(&path[0], &path[1]);
            Shape::Circle(Circle::new(path[0], radius_m))
        }
        ShapeKind::Rectangle => {
            Shape::Rectangle(Rectangle::new(GeoBounds::from_corners(path[0], path[1])))
        }
    }
}

/// Re-aligns snap registration, selection, and handles after a history
/// entry was replayed against the registry, and emits the shape events a
/// direct mutation would have emitted.
#[allow(clippy::too_many_arguments)]
fn sync_after_replay(
    command: &EditCommand,
    direction: ReplayDirection,
    registry: &ShapeRegistry,
    snap: &mut SnapEngine,
    events: &EventDispatcher,
    selected: &mut Option<ShapeId>,
    handles: &mut Option<HandleSet>,
    drag: &mut Option<DragState>,
) {
    match (command, direction) {
        (EditCommand::CreateShape(cmd), ReplayDirection::Undo) => {
            replay_removed(cmd.snapshot.id, snap, events, selected, handles, drag);
        }
        (EditCommand::CreateShape(cmd), ReplayDirection::Redo) => {
            replay_restored(&cmd.snapshot, snap, events);
        }
        (EditCommand::DeleteShape(cmd), ReplayDirection::Undo) => {
            replay_restored(&cmd.snapshot, snap, events);
        }
        (EditCommand::DeleteShape(cmd), ReplayDirection::Redo) => {
            replay_removed(cmd.snapshot.id, snap, events, selected, handles, drag);
        }
        (EditCommand::EditPath(cmd), _) => {
            if let Some(record) = registry.get(cmd.id) {
                if *selected == Some(cmd.id) {
                    if let Some(path) = record.shape.path() {
                        *handles = Some(HandleSet::from_path(
                            path,
                            record.shape.kind() == ShapeKind::Polygon,
                        ));
                    }
                }
                events.publish(EditorEvent::ShapeUpdated {
                    shape: ShapeSnapshot::from_record(record),
                });
            }
        }
        (EditCommand::ClearShapes(cmd), ReplayDirection::Undo) => {
            for snapshot in &cmd.snapshots {
                replay_restored(snapshot, snap, events);
            }
        }
        (EditCommand::ClearShapes(_), ReplayDirection::Redo) => {
            snap.clear();
            *selected = None;
            *handles = None;
            *drag = None;
            events.publish(EditorEvent::ShapesCleared);
        }
    }
}

fn replay_removed(
    id: ShapeId,
    snap: &mut SnapEngine,
    events: &EventDispatcher,
    selected: &mut Option<ShapeId>,
    handles: &mut Option<HandleSet>,
    drag: &mut Option<DragState>,
) {
    snap.unregister(id);
    if *selected == Some(id) {
        *selected = None;
        *handles = None;
        *drag = None;
    }
    events.publish(EditorEvent::ShapeDeleted { id });
}

fn replay_restored(snapshot: &ShapeSnapshot, snap: &mut SnapEngine, events: &EventDispatcher) {
    snap.register(snapshot.id);
    events.publish(EditorEvent::ShapeCreated {
        shape: snapshot.clone(),
    });
}
