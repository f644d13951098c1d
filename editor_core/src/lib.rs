#![no_std]

//! # Editor Core
//!
//! Editing session logic for the playground's three-facet projects.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same key trace and clock => same editor state
//! - **Explicit time**: Debounced history commits run on a logical clock the host advances
//! - **Mechanism over policy**: Core returns mutations, hosts decide rendering
//! - **Two-phase cursor restore**: Hosts render a mutation, then call `finish_render`
//!
//! ## Design
//!
//! The core provides:
//! - PlaygroundCore: Key dispatch and change pipeline
//! - CoreOutcome: Structured results from operations
//! - History: Bounded linear undo
//! - SuggestionStore: Autocomplete list, highlight and popup placement
//! - EditorSnapshot: Deterministic state for replay checks

extern crate alloc;

pub mod buffer;
pub mod config;
pub mod core;
pub mod debounce;
pub mod facet;
pub mod history;
pub mod key;
pub mod skeleton;
pub mod snapshot;
pub mod suggest;

pub use buffer::{Mutation, Selection};
pub use config::EditorConfig;
pub use crate::core::{CoreOutcome, EditAction, PlaygroundCore};
pub use facet::{Document, Facet};
pub use history::History;
pub use key::{Key, KeyPress, Modifiers};
pub use snapshot::EditorSnapshot;
pub use suggest::{PopupMetrics, PopupPosition, SuggestionStore};
