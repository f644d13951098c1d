//! # Playground Export
//!
//! Turns a three-facet project into one standalone HTML document.
//!
//! ## Philosophy
//!
//! - **Pure assembly**: Export is a string function of the document and library set
//! - **Explicit libraries**: External CSS/JS enters only through a [`LibrarySet`]
//! - **Locked down**: Every export carries a Content-Security-Policy
//!
//! ## Design
//!
//! The crate provides:
//! - Library catalog and an ordered selection set
//! - Document assembly and export file naming

pub mod document;
pub mod library;

pub use document::{assemble_document, content_security_policy, export_file_name};
pub use library::{catalog, parse_library_url, ExportError, Library, LibraryKind, LibrarySet};
