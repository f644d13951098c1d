//! Document facets

use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// One of the three buffers of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "lowercase"))]
pub enum Facet {
    /// HTML
    #[default]
    Markup,
    /// CSS
    Style,
    /// JavaScript
    Script,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Markup, Facet::Style, Facet::Script];

    pub fn name(&self) -> &'static str {
        match self {
            Facet::Markup => "markup",
            Facet::Style => "style",
            Facet::Script => "script",
        }
    }

    /// Parses a facet name; the language names are accepted too
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "markup" | "html" => Some(Facet::Markup),
            "style" | "css" => Some(Facet::Style),
            "script" | "js" => Some(Facet::Script),
            _ => None,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three facet buffers of a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Document {
    pub markup: String,
    pub style: String,
    pub script: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, facet: Facet) -> &str {
        match facet {
            Facet::Markup => &self.markup,
            Facet::Style => &self.style,
            Facet::Script => &self.script,
        }
    }

    /// Replaces one facet's buffer
    pub fn set(&mut self, facet: Facet, text: impl Into<String>) {
        let text = text.into();
        match facet {
            Facet::Markup => self.markup = text,
            Facet::Style => self.style = text,
            Facet::Script => self.script = text,
        }
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&facet| self.get(facet).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Facet::from_name("markup"), Some(Facet::Markup));
        assert_eq!(Facet::from_name("CSS"), Some(Facet::Style));
        assert_eq!(Facet::from_name("js"), Some(Facet::Script));
        assert_eq!(Facet::from_name("xml"), None);
    }

    #[test]
    fn test_document_get_set() {
        let mut doc = Document::new();
        assert!(doc.is_empty());
        doc.set(Facet::Style, "body {}");
        assert_eq!(doc.get(Facet::Style), "body {}");
        assert_eq!(doc.get(Facet::Markup), "");
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_display_roundtrips_through_from_name() {
        for facet in Facet::ALL {
            assert_eq!(Facet::from_name(&alloc::format!("{}", facet)), Some(facet));
        }
    }
}
