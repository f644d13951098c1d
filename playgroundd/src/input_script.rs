//! # Input Script Parser
//!
//! Line-based scripts that drive a playground session deterministically.
//!
//! ## Format
//!
//! - Key names: `Enter`, `Escape`, `Backspace`, `Delete`, `Tab`, `Space`
//! - Navigation: `Up`, `Down`, `Left`, `Right`, `Home`, `End`
//! - Single characters: `a`, `<`, `>` (a one-character line is always typed)
//! - Modifiers: `Ctrl+z`, `Meta+z`, `Alt+Down`
//! - Text strings: `"<ul.menu"` (one key press per character; `\n` is Enter,
//!   `\t` is Tab)
//! - Host commands: `:facet style` (see [`crate::commands`])
//! - Comments: `# This is a comment`
//! - Delays: `wait 300ms`, `wait 1s`
//!
//! ## Example
//!
//! ```text
//! # Expand an abbreviation, then undo it
//! "ul.menu"
//! Enter
//! wait 300ms
//! Ctrl+z
//! ```

use crate::commands::{HostCommand, HostCommandParser};
use editor_core::{Key, KeyPress, Modifiers};
use std::collections::VecDeque;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,

    #[error("Invalid delay format: {0}")]
    InvalidDelay(String),
}

/// A single scripted input action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    /// A single key press
    Key(KeyPress),
    /// Advance the clock (in milliseconds)
    Wait(u64),
    /// A host command
    Command(HostCommand),
}

/// Input script
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    inputs: VecDeque<ScriptedInput>,
}

impl InputScript {
    /// Creates a new empty input script
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut inputs = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            // A lone '#' is a comment too; type it from a quoted string
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            inputs.extend(Self::parse_line(line, line_num + 1)?);
        }

        if inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { inputs })
    }

    /// Parses a single line of script
    fn parse_line(line: &str, line_num: usize) -> Result<Vec<ScriptedInput>, InputScriptError> {
        let at_line = |message: String| InputScriptError::ParseError {
            line: line_num,
            message,
        };

        if let Some(command) = line.strip_prefix(':') {
            let command = HostCommandParser::parse(command).map_err(|e| at_line(e.to_string()))?;
            return Ok(vec![ScriptedInput::Command(command)]);
        }

        if let Some(duration) = line.strip_prefix("wait ") {
            let millis = Self::parse_duration(duration.trim()).map_err(|e| at_line(e.to_string()))?;
            return Ok(vec![ScriptedInput::Wait(millis)]);
        }

        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            return Ok(Self::parse_text(&line[1..line.len() - 1])
                .into_iter()
                .map(|key| ScriptedInput::Key(KeyPress::plain(key)))
                .collect());
        }

        let mut chars = line.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(vec![ScriptedInput::Key(KeyPress::plain(Key::Char(c)))]);
        }

        let (modifiers, key_name) = Self::parse_modifiers(line).map_err(|e| at_line(e.to_string()))?;
        let key = Self::parse_key(key_name).map_err(|e| at_line(e.to_string()))?;

        Ok(vec![ScriptedInput::Key(KeyPress::new(key, modifiers))])
    }

    /// Expands a quoted string into keys, honoring `\n`, `\t`, `\"` and `\\`
    fn parse_text(text: &str) -> Vec<Key> {
        let mut keys = Vec::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            let key = match c {
                '\\' => match chars.next() {
                    Some('n') => Key::Enter,
                    Some('t') => Key::Tab,
                    Some(other) => Key::Char(other),
                    None => Key::Char('\\'),
                },
                c => Key::Char(c),
            };
            keys.push(key);
        }
        keys
    }

    /// Parses modifiers from a key string (e.g., "Ctrl+z" → (Modifiers::CTRL, "z"))
    fn parse_modifiers(input: &str) -> Result<(Modifiers, &str), InputScriptError> {
        let (head, key) = match input.strip_suffix("++") {
            Some(head) => (head, "+"),
            None => match input.rsplit_once('+') {
                Some(split) => split,
                None => return Ok((Modifiers::none(), input)),
            },
        };

        let mut modifiers = Modifiers::none();
        for modifier_str in head.split('+') {
            modifiers = match modifier_str.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.with(Modifiers::CTRL),
                "alt" | "option" => modifiers.with(Modifiers::ALT),
                "shift" => modifiers.with(Modifiers::SHIFT),
                "super" | "meta" | "cmd" => modifiers.with(Modifiers::META),
                other => return Err(InputScriptError::InvalidModifier(other.to_string())),
            };
        }

        Ok((modifiers, key.trim()))
    }

    /// Parses a key name
    fn parse_key(name: &str) -> Result<Key, InputScriptError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        match name.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "backspace" | "back" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "tab" => Ok(Key::Tab),
            "space" => Ok(Key::Char(' ')),

            "up" | "arrowup" => Ok(Key::Up),
            "down" | "arrowdown" => Ok(Key::Down),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),

            _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
        }
    }

    /// Parses a duration string (e.g., "100ms", "2s")
    fn parse_duration(s: &str) -> Result<u64, InputScriptError> {
        let invalid = || InputScriptError::InvalidDelay(s.to_string());

        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim().parse().map_err(|_| invalid())
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map_err(|_| invalid())?
                .checked_mul(1000)
                .ok_or_else(invalid)
        } else {
            Err(invalid())
        }
    }

    /// Gets the next input, if any
    pub fn next_input(&mut self) -> Option<ScriptedInput> {
        self.inputs.pop_front()
    }

    /// Returns true if there are more inputs
    pub fn has_more(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Returns the number of remaining inputs
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}
