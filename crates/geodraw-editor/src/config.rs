//! Editor configuration.
//!
//! Configuration is organized into logical sections:
//! - Snapping (enable flag, pixel threshold, indicator visibility)
//! - History (undo depth)
//!
//! Every field has a serde default, so partial configuration files
//! deserialize cleanly against the built-in defaults.

use serde::{Deserialize, Serialize};

/// Snapping behavior settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Whether snapping is active at startup.
    #[serde(default = "default_snap_enabled")]
    pub enabled: bool,
    /// Snap radius in screen pixels at the current zoom.
    #[serde(default = "default_snap_threshold")]
    pub threshold_px: f64,
    /// Whether the snap indicator is shown when a snap target is active.
    #[serde(default = "default_show_indicator")]
    pub show_indicator: bool,
}

fn default_snap_enabled() -> bool {
    true
}

fn default_snap_threshold() -> f64 {
    15.0
}

fn default_show_indicator() -> bool {
    true
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: default_snap_enabled(),
            threshold_px: default_snap_threshold(),
            show_indicator: default_show_indicator(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of undoable entries kept in the log.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_max_steps() -> usize {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

/// Complete editor configuration.
///
/// Aggregates all settings sections consumed when a session is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Snapping behavior.
    #[serde(default)]
    pub snapping: SnapConfig,
    /// Undo history sizing.
    #[serde(default)]
    pub history: HistoryConfig,
}

impl EditorConfig {
    /// Create a configuration with built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }
}
