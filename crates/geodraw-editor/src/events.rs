//! Editor event stream.
//!
//! Publish/subscribe distribution of editor lifecycle events. Every
//! dispatcher is owned by the session that created it, so subscriptions are
//! torn down with the session instead of accumulating in process-global
//! state. Dispatch is synchronous and runs listeners in subscription order;
//! a panicking listener is caught and logged without stopping delivery to
//! the listeners after it.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use geodraw_core::GeoPoint;

use crate::history::HistoryStatus;
use crate::model::{ShapeId, ShapeKind};
use crate::serialization::ShapeSnapshot;

/// Root event enum for all editor events.
///
/// Shape-carrying variants embed the snapshot form so listeners never hold
/// references into the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EditorEvent {
    /// A drawing gesture began.
    DrawingStarted {
        /// The kind being drawn.
        kind: ShapeKind,
    },
    /// A vertex was confirmed during an active multi-point drawing.
    DrawingProgress {
        /// Number of confirmed vertices so far.
        count: usize,
    },
    /// The active drawing was abandoned without creating a shape.
    DrawingCancelled,
    /// The active drawing finished and produced a shape.
    DrawingCompleted,
    /// A shape entered the registry.
    ShapeCreated {
        /// Snapshot of the new shape.
        shape: ShapeSnapshot,
    },
    /// A shape's geometry changed.
    ShapeUpdated {
        /// Snapshot of the shape after the change.
        shape: ShapeSnapshot,
    },
    /// A shape left the registry.
    ShapeDeleted {
        /// Id of the removed shape.
        id: ShapeId,
    },
    /// A shape became the current selection.
    ShapeSelected {
        /// Snapshot of the selected shape.
        shape: ShapeSnapshot,
    },
    /// The selection was cleared.
    ShapeDeselected,
    /// Every shape was removed in a single operation.
    ShapesCleared,
    /// The undo log changed.
    HistoryChanged {
        /// Observable log state after the change.
        status: HistoryStatus,
    },
    /// The snap indicator turned on over a point, or turned off.
    SnapChanged {
        /// Whether a snap target is currently active.
        active: bool,
        /// The snapped location while active.
        point: Option<GeoPoint>,
    },
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::DrawingStarted { .. }
            | EditorEvent::DrawingProgress { .. }
            | EditorEvent::DrawingCancelled
            | EditorEvent::DrawingCompleted => EventCategory::Drawing,
            EditorEvent::ShapeCreated { .. }
            | EditorEvent::ShapeUpdated { .. }
            | EditorEvent::ShapeDeleted { .. }
            | EditorEvent::ShapeSelected { .. }
            | EditorEvent::ShapeDeselected
            | EditorEvent::ShapesCleared => EventCategory::Shape,
            EditorEvent::HistoryChanged { .. } => EventCategory::History,
            EditorEvent::SnapChanged { .. } => EventCategory::Snap,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::DrawingStarted { kind } => format!("Drawing started: {}", kind),
            EditorEvent::DrawingProgress { count } => {
                format!("Drawing progress: {} points", count)
            }
            EditorEvent::DrawingCancelled => "Drawing cancelled".to_string(),
            EditorEvent::DrawingCompleted => "Drawing completed".to_string(),
            EditorEvent::ShapeCreated { shape } => {
                format!("Shape created: {} (id {})", shape.name, shape.id)
            }
            EditorEvent::ShapeUpdated { shape } => {
                format!("Shape updated: {} (id {})", shape.name, shape.id)
            }
            EditorEvent::ShapeDeleted { id } => format!("Shape deleted: id {}", id),
            EditorEvent::ShapeSelected { shape } => {
                format!("Shape selected: {} (id {})", shape.name, shape.id)
            }
            EditorEvent::ShapeDeselected => "Selection cleared".to_string(),
            EditorEvent::ShapesCleared => "All shapes cleared".to_string(),
            EditorEvent::HistoryChanged { status } => {
                format!("History changed: {} entries", status.len)
            }
            EditorEvent::SnapChanged { point: Some(p), .. } => format!("Snap active at {}", p),
            EditorEvent::SnapChanged { .. } => "Snap inactive".to_string(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Drawing gesture lifecycle events.
    Drawing,
    /// Shape lifecycle and selection events.
    Shape,
    /// Undo log events.
    History,
    /// Snap indicator events.
    Snap,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Drawing => write!(f, "Drawing"),
            EventCategory::Shape => write!(f, "Shape"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Snap => write!(f, "Snap"),
        }
    }
}

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Box<dyn Fn(EditorEvent) + Send + Sync>;

struct Registration {
    id: SubscriptionId,
    filter: EventFilter,
    handler: EventHandler,
}

/// Session-scoped event dispatcher.
///
/// Cloning shares the registration table, so collaborators owned by the
/// same session (the snap engine, the undo log bridge) publish into the
/// same set of listeners.
#[derive(Clone)]
pub struct EventDispatcher {
    handlers: Arc<RwLock<Vec<Registration>>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Publish an event to all matching subscribers.
    ///
    /// Listeners run synchronously in subscription order. A panicking
    /// listener is caught and logged; the remaining listeners still receive
    /// the event. Returns the number of listeners the event was delivered
    /// to.
    pub fn publish(&self, event: EditorEvent) -> usize {
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for registration in handlers.iter() {
            if !registration.filter.matches(&event) {
                continue;
            }
            let outcome = catch_unwind(AssertUnwindSafe(|| (registration.handler)(event.clone())));
            if let Err(payload) = outcome {
                tracing::error!(
                    "Listener {} panicked handling {}: {}",
                    registration.id,
                    event.description(),
                    panic_message(payload.as_ref())
                );
            }
            delivered += 1;
        }
        delivered
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler is called on the publishing thread, so it should return
    /// quickly to avoid blocking event dispatch.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        let mut handlers = self.handlers.write();
        handlers.push(Registration {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|registration| registration.id != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
