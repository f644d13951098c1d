//! External library catalog and selection

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Errors from library bookkeeping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("Unknown library: {0}")]
    UnknownLibrary(String),

    #[error("Invalid library URL: {0}")]
    InvalidUrl(String),
}

/// How a library is linked into the exported document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    /// `<link rel="stylesheet">` in the head
    Css,
    /// `<script src>` at the end of the body
    Js,
}

/// An external stylesheet or script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    pub url: String,
    pub kind: LibraryKind,
}

impl Library {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        kind: LibraryKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            kind,
        }
    }

    /// Serialized origin of the library URL, usable as a CSP source
    ///
    /// `None` unless the URL passes [`parse_library_url`].
    pub fn origin(&self) -> Option<String> {
        parse_library_url(&self.url)
            .ok()
            .map(|url| url.origin().ascii_serialization())
    }
}

/// Built-in libraries offered to every project
pub fn catalog() -> Vec<Library> {
    vec![
        Library::new(
            "tailwind",
            "Tailwind CSS",
            "https://cdn.tailwindcss.com",
            LibraryKind::Js,
        ),
        Library::new(
            "animate-css",
            "Animate.css",
            "https://cdnjs.cloudflare.com/ajax/libs/animate.css/4.1.1/animate.min.css",
            LibraryKind::Css,
        ),
        Library::new(
            "gsap",
            "GSAP",
            "https://cdnjs.cloudflare.com/ajax/libs/gsap/3.12.2/gsap.min.js",
            LibraryKind::Js,
        ),
    ]
}

/// Parses a library URL: `http` or `https`, a non-empty host, no credentials
pub fn parse_library_url(raw: &str) -> Result<Url, ExportError> {
    let invalid = || ExportError::InvalidUrl(raw.to_string());
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid());
    }
    Ok(url)
}

/// Libraries enabled for a project, in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySet {
    libraries: Vec<Library>,
}

impl LibrarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `library`, or removes the entry with its id; returns true if added
    pub fn toggle(&mut self, library: Library) -> bool {
        if self.remove(&library.id) {
            log::debug!("library {} disabled", library.id);
            false
        } else {
            log::debug!("library {} enabled", library.id);
            self.libraries.push(library);
            true
        }
    }

    /// Toggles a built-in library by id
    pub fn toggle_catalog(&mut self, id: &str) -> Result<bool, ExportError> {
        let library = catalog()
            .into_iter()
            .find(|library| library.id == id)
            .ok_or_else(|| ExportError::UnknownLibrary(id.to_string()))?;
        Ok(self.toggle(library))
    }

    /// Adds a library from a user-supplied URL under a fresh id
    pub fn add_custom(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        kind: LibraryKind,
    ) -> Result<&Library, ExportError> {
        let url = parse_library_url(&url.into())?;
        let id = Uuid::new_v4().to_string();
        // The serialized form is percent-encoded, so it is safe inside an attribute
        self.libraries.push(Library::new(id, name, url.as_str(), kind));
        Ok(&self.libraries[self.libraries.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.libraries.len();
        self.libraries.retain(|library| library.id != id);
        self.libraries.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.libraries.iter().any(|library| library.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Library> {
        self.libraries.iter()
    }

    pub fn of_kind(&self, kind: LibraryKind) -> impl Iterator<Item = &Library> {
        self.libraries.iter().filter(move |library| library.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}
