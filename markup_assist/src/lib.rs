#![no_std]

//! # Markup Assist
//!
//! Text-level editing intelligence for HTML buffers.
//!
//! ## Philosophy
//!
//! - **No parser**: Everything works on raw strings and byte offsets
//! - **Total functions**: Detectors return `None` instead of failing
//! - **Malformed markup is normal**: Unbalanced tags simply never match
//! - **Pure**: Every completion returns new text plus a cursor; callers apply it
//!
//! ## Design
//!
//! The crate provides:
//! - Tag matcher: depth-aware search for the closing tag of an open tag
//! - Token detectors: classify the text immediately before the cursor
//! - Completion engine: expansions, auto-close, suggestion filtering/application
//! - Rename sync: keep a closing tag's name in step with its opening tag
//! - Vocabulary: static tag and attribute lists

extern crate alloc;

pub mod complete;
pub mod detect;
pub mod rename;
pub mod tag_match;
pub mod vocabulary;

pub use complete::{Completion, Suggestion, SuggestionKind};
pub use detect::{CompletionContext, EnterTrigger, Token};
pub use rename::sync_renamed_tag;
pub use tag_match::find_matching_close;
