//! Suggestion store and popup placement

use alloc::vec::Vec;

use markup_assist::Suggestion;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Vertical room kept free below the popup
pub const POPUP_HEIGHT_RESERVE: f64 = 350.0;
/// Horizontal room kept free right of the popup
pub const POPUP_WIDTH_RESERVE: f64 = 300.0;

/// Current suggestion list with a highlighted entry
///
/// An empty list is the idle state; a non-empty list is active and its
/// highlighted index is always in range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionStore {
    items: Vec<Suggestion>,
    index: usize,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list and highlights the first entry
    pub fn show(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.index = 0;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index = 0;
    }

    pub fn is_active(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.items.get(self.index)
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    /// Moves the highlight down, wrapping to the top
    pub fn next(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.index = (self.index + 1) % n;
        }
    }

    /// Moves the highlight up, wrapping to the bottom
    pub fn prev(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.index = (self.index + n - 1) % n;
        }
    }

    /// Highlights `index`; returns false if it is out of range
    pub fn hover(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.index = index;
            true
        } else {
            false
        }
    }
}

/// Geometry used to place the suggestion popup next to the caret
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct PopupMetrics {
    pub line_height: f64,
    pub char_width: f64,
    pub top_offset: f64,
    pub left_offset: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for PopupMetrics {
    fn default() -> Self {
        Self {
            line_height: 24.0,
            char_width: 9.5,
            top_offset: 90.0,
            left_offset: 110.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

/// Popup anchor in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct PopupPosition {
    pub top: f64,
    pub left: f64,
}

impl PopupMetrics {
    /// Places the popup for a caret preceded by `text_before`
    pub fn position(&self, text_before: &str) -> PopupPosition {
        let lines = crate::buffer::line_count(text_before) as f64;
        let column = crate::buffer::column(text_before) as f64;
        let top = (lines * self.line_height + self.top_offset)
            .min(self.viewport_height - POPUP_HEIGHT_RESERVE);
        let left = (column * self.char_width + self.left_offset)
            .min(self.viewport_width - POPUP_WIDTH_RESERVE);
        PopupPosition {
            top: top.max(0.0),
            left: left.max(0.0),
        }
    }
}
