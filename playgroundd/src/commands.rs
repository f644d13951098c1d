//! # Host Control Commands
//!
//! Script lines starting with `:` drive the parts of the playground that are
//! not key presses.
//!
//! ## Command Set
//!
//! - `facet markup|style|script` - Switch the edited buffer
//! - `hover <n>` - Highlight suggestion `n`
//! - `click <n>` - Apply suggestion `n`
//! - `select <start> <end>` - Set the selection (byte offsets)
//! - `library <id>` - Toggle a catalog library
//! - `library-url css|js <url> [name]` - Add a library from a URL
//! - `skeleton <id>` - Inject a template
//! - `autoclose on|off` - Toggle tag auto-closing
//! - `predictions on|off` - Toggle suggestions

use editor_core::Facet;
use playground_export::LibraryKind;
use thiserror::Error;

/// Host command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostCommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Host commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Facet(Facet),
    Hover(usize),
    Click(usize),
    Select { start: usize, end: usize },
    Library(String),
    CustomLibrary {
        kind: LibraryKind,
        url: String,
        name: String,
    },
    Skeleton(String),
    AutoClose(bool),
    Predictions(bool),
}

/// Host command parser
pub struct HostCommandParser;

impl HostCommandParser {
    /// Parses a command string (without the leading `:`)
    pub fn parse(input: &str) -> Result<HostCommand, HostCommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(HostCommandError::InvalidCommand(
                "Empty command".to_string(),
            ));
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "facet" | "tab" => {
                let name = Self::arg(args, 0, "facet (markup, style, script)")?;
                Facet::from_name(name)
                    .map(HostCommand::Facet)
                    .ok_or_else(|| HostCommandError::InvalidArgument(name.to_string()))
            }
            "hover" => Ok(HostCommand::Hover(Self::index(args, 0, "suggestion index")?)),
            "click" => Ok(HostCommand::Click(Self::index(args, 0, "suggestion index")?)),
            "select" => {
                let start = Self::index(args, 0, "selection start")?;
                let end = match args.get(1) {
                    Some(_) => Self::index(args, 1, "selection end")?,
                    None => start,
                };
                Ok(HostCommand::Select { start, end })
            }
            "library" | "lib" => Ok(HostCommand::Library(
                Self::arg(args, 0, "library id")?.to_string(),
            )),
            "library-url" => {
                let kind = match Self::arg(args, 0, "library kind (css, js)")?.to_lowercase().as_str() {
                    "css" => LibraryKind::Css,
                    "js" => LibraryKind::Js,
                    other => return Err(HostCommandError::InvalidArgument(other.to_string())),
                };
                let url = Self::arg(args, 1, "library url")?.to_string();
                let name = match args.get(2..) {
                    Some(rest) if !rest.is_empty() => rest.join(" "),
                    _ => url.clone(),
                };
                Ok(HostCommand::CustomLibrary { kind, url, name })
            }
            "skeleton" => Ok(HostCommand::Skeleton(
                Self::arg(args, 0, "skeleton id")?.to_string(),
            )),
            "autoclose" => Ok(HostCommand::AutoClose(Self::switch(args)?)),
            "predictions" => Ok(HostCommand::Predictions(Self::switch(args)?)),
            _ => Err(HostCommandError::UnknownCommand(cmd)),
        }
    }

    fn arg<'a>(args: &[&'a str], at: usize, what: &str) -> Result<&'a str, HostCommandError> {
        args.get(at)
            .copied()
            .ok_or_else(|| HostCommandError::MissingArgument(what.to_string()))
    }

    fn index(args: &[&str], at: usize, what: &str) -> Result<usize, HostCommandError> {
        let raw = Self::arg(args, at, what)?;
        raw.parse()
            .map_err(|_| HostCommandError::InvalidArgument(raw.to_string()))
    }

    fn switch(args: &[&str]) -> Result<bool, HostCommandError> {
        match Self::arg(args, 0, "on or off")?.to_lowercase().as_str() {
            "on" | "true" | "1" => Ok(true),
            "off" | "false" | "0" => Ok(false),
            other => Err(HostCommandError::InvalidArgument(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facet() {
        assert_eq!(
            HostCommandParser::parse("facet style"),
            Ok(HostCommand::Facet(Facet::Style))
        );
        assert_eq!(
            HostCommandParser::parse("FACET js"),
            Ok(HostCommand::Facet(Facet::Script))
        );
        assert!(matches!(
            HostCommandParser::parse("facet xml"),
            Err(HostCommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_indices() {
        assert_eq!(HostCommandParser::parse("hover 2"), Ok(HostCommand::Hover(2)));
        assert_eq!(HostCommandParser::parse("click 0"), Ok(HostCommand::Click(0)));
        assert!(matches!(
            HostCommandParser::parse("click -1"),
            Err(HostCommandError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            HostCommandParser::parse("select 3 7"),
            Ok(HostCommand::Select { start: 3, end: 7 })
        );
        assert_eq!(
            HostCommandParser::parse("select 4"),
            Ok(HostCommand::Select { start: 4, end: 4 })
        );
    }

    #[test]
    fn test_parse_library_and_skeleton() {
        assert_eq!(
            HostCommandParser::parse("library gsap"),
            Ok(HostCommand::Library("gsap".into()))
        );
        assert_eq!(
            HostCommandParser::parse("skeleton card-grid"),
            Ok(HostCommand::Skeleton("card-grid".into()))
        );
    }

    #[test]
    fn test_parse_library_url() {
        assert_eq!(
            HostCommandParser::parse("library-url js https://cdn.example.com/chart.js Chart JS"),
            Ok(HostCommand::CustomLibrary {
                kind: LibraryKind::Js,
                url: "https://cdn.example.com/chart.js".into(),
                name: "Chart JS".into(),
            })
        );
        assert_eq!(
            HostCommandParser::parse("library-url CSS https://a.org/x.css"),
            Ok(HostCommand::CustomLibrary {
                kind: LibraryKind::Css,
                url: "https://a.org/x.css".into(),
                name: "https://a.org/x.css".into(),
            })
        );
        assert!(matches!(
            HostCommandParser::parse("library-url wasm https://a.org/x.wasm"),
            Err(HostCommandError::InvalidArgument(_))
        ));
        assert!(matches!(
            HostCommandParser::parse("library-url js"),
            Err(HostCommandError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_parse_switches() {
        assert_eq!(
            HostCommandParser::parse("autoclose off"),
            Ok(HostCommand::AutoClose(false))
        );
        assert_eq!(
            HostCommandParser::parse("predictions ON"),
            Ok(HostCommand::Predictions(true))
        );
        assert!(HostCommandParser::parse("predictions maybe").is_err());
    }

    #[test]
    fn test_missing_argument() {
        assert!(matches!(
            HostCommandParser::parse("hover"),
            Err(HostCommandError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(matches!(
            HostCommandParser::parse("quit"),
            Err(HostCommandError::UnknownCommand(_))
        ));
        assert!(matches!(
            HostCommandParser::parse("   "),
            Err(HostCommandError::InvalidCommand(_))
        ));
    }
}
