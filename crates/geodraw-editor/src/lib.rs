//! # GeoDraw Editor
//!
//! This crate provides the interactive editing engine for geographic
//! shapes. It combines a drawing state machine, pixel-space edge snapping,
//! vertex editing, and command-based undo into one headless session that a
//! map UI drives with pointer and key input.
//!
//! ## Core Components
//!
//! ### Shapes
//! - **Model**: Polygons, polylines, circles, and rectangles with metric
//!   measurements computed on a spherical earth
//! - **Registry**: Identity-keyed shape storage with insertion-order
//!   iteration and never-reused ids
//! - **Serialization**: Versioned JSON document snapshots
//!
//! ### Interaction
//! - **Session**: The drawing state machine and editing protocol
//! - **Snap**: Nearest-edge queries in screen space with a pixel threshold
//! - **Handles**: Vertex and midpoint grips for path editing
//!
//! ### Infrastructure
//! - **History**: Bounded undo/redo over self-contained edit commands
//! - **Events**: Synchronous, filtered notification of session changes
//! - **Config**: Serde-backed tunables with sensible defaults
//!
//! ## Architecture
//!
//! ```text
//! DrawingSession (pointer + key input)
//!   ├── ShapeRegistry (shape storage)
//!   ├── SnapEngine (edge snapping)
//!   ├── History<EditCommand> (undo/redo)
//!   └── EventDispatcher (listener fan-out)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geodraw_core::{GeoPoint, WebMercator};
//! use geodraw_editor::{DrawingSession, EditorConfig, ShapeKind};
//!
//! let config = EditorConfig::default();
//! let mut session = DrawingSession::new(&config, Box::new(WebMercator));
//! session.set_zoom(15.0);
//!
//! session.start_drawing(ShapeKind::Polygon);
//! session.pointer_click(GeoPoint::new(52.0, 13.0));
//! session.pointer_click(GeoPoint::new(52.0, 13.1));
//! session.pointer_click(GeoPoint::new(52.1, 13.05));
//! session.complete_drawing();
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod handles;
pub mod history;
pub mod model;
pub mod registry;
pub mod serialization;
pub mod session;
pub mod snap;

// Re-export all public types from submodules
pub use commands::{ClearShapes, CreateShape, DeleteShape, EditCommand, EditPath, PathEditKind};
pub use config::{EditorConfig, HistoryConfig, SnapConfig};
pub use error::{EditorError, Result};
pub use events::{
    EditorEvent, EventCategory, EventDispatcher, EventFilter, SubscriptionId,
};
pub use handles::HandleSet;
pub use history::{History, HistoryStatus};
pub use model::{Circle, Polygon, Polyline, Rectangle, Shape, ShapeId, ShapeKind};
pub use registry::{ShapeRecord, ShapeRegistry};
pub use serialization::{DocumentMetadata, DocumentSnapshot, ShapeSnapshot};
pub use session::{DrawingSession, DrawingState, EditorKey};
pub use snap::{SnapEdge, SnapEngine, SnapResult};
