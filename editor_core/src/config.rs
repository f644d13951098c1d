//! Editor behaviour knobs

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_CAPACITY;
use crate::suggest::PopupMetrics;

/// Runtime configuration of a [`crate::PlaygroundCore`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorConfig {
    /// Insert `></name>` when `>` closes an open tag
    pub auto_close: bool,
    /// Show tag/attribute suggestions while typing
    pub predictions: bool,
    pub history_capacity: usize,
    /// Idle time before typing is committed to history
    pub debounce_ms: u64,
    pub max_suggestions: usize,
    pub popup: PopupMetrics,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_close: true,
            predictions: true,
            history_capacity: DEFAULT_CAPACITY,
            debounce_ms: 1000,
            max_suggestions: 15,
            popup: PopupMetrics::default(),
        }
    }
}
