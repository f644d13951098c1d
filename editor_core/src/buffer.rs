//! Selection, mutations and plain-text editing
//!
//! Buffers are whole `String`s addressed by byte offsets. Every offset handed
//! out by this module sits on a char boundary.

use alloc::string::String;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Selected range of the active buffer, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub const fn collapsed(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Builds a selection valid for `text`: ordered, in range and on char
    /// boundaries.
    pub fn clamped(text: &str, start: usize, end: usize) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: floor_boundary(text, start),
            end: floor_boundary(text, end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

/// New buffer content plus the selection to restore once it is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Mutation {
    pub text: String,
    pub cursor: Selection,
}

impl Mutation {
    pub fn new(text: String, cursor: Selection) -> Self {
        Self { text, cursor }
    }

    pub fn collapsed(text: String, at: usize) -> Self {
        Self::new(text, Selection::collapsed(at))
    }
}

impl From<markup_assist::Completion> for Mutation {
    fn from(completion: markup_assist::Completion) -> Self {
        Self::collapsed(completion.text, completion.cursor)
    }
}

/// Largest char boundary `<= offset`, capped at the text length
pub fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut at = offset.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

fn prev_boundary(text: &str, offset: usize) -> usize {
    text[..offset].chars().next_back().map_or(0, |c| offset - c.len_utf8())
}

fn next_boundary(text: &str, offset: usize) -> usize {
    text[offset..].chars().next().map_or(offset, |c| offset + c.len_utf8())
}

/// Offset of the first byte of the line containing `offset`
pub fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Offset of the `\n` ending the line containing `offset`, or the text length
pub fn line_end(text: &str, offset: usize) -> usize {
    text[offset..].find('\n').map_or(text.len(), |i| offset + i)
}

/// Number of lines in `text`; an empty text has one line
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// Characters between the start of the last line and the end of `text`
pub fn column(text: &str) -> usize {
    text[line_start(text, text.len())..].chars().count()
}

/// Offset `chars` characters into the line starting at `start`, stopping at
/// the end of that line
fn offset_at_column(text: &str, start: usize, chars: usize) -> usize {
    let end = line_end(text, start);
    text[start..end]
        .char_indices()
        .nth(chars)
        .map_or(end, |(i, _)| start + i)
}

/// Replaces the selection with `insert`
pub fn insert(text: &str, selection: Selection, insert: &str) -> Mutation {
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..selection.start]);
    out.push_str(insert);
    out.push_str(&text[selection.end..]);
    Mutation::collapsed(out, selection.start + insert.len())
}

/// Deletes the selection, or the character before a collapsed cursor
pub fn backspace(text: &str, selection: Selection) -> Option<Mutation> {
    let start = if selection.is_collapsed() {
        if selection.start == 0 {
            return None;
        }
        prev_boundary(text, selection.start)
    } else {
        selection.start
    };
    Some(insert(text, Selection { start, end: selection.end }, ""))
}

/// Deletes the selection, or the character after a collapsed cursor
pub fn delete_forward(text: &str, selection: Selection) -> Option<Mutation> {
    let end = if selection.is_collapsed() {
        if selection.end >= text.len() {
            return None;
        }
        next_boundary(text, selection.end)
    } else {
        selection.end
    };
    Some(insert(text, Selection { start: selection.start, end }, ""))
}

/// Duplicates the selection after itself (selecting the copy), or the
/// current line below itself keeping the column.
pub fn duplicate(text: &str, selection: Selection) -> Mutation {
    if !selection.is_collapsed() {
        let copied = &text[selection.start..selection.end];
        let mut out = String::with_capacity(text.len() + copied.len());
        out.push_str(&text[..selection.end]);
        out.push_str(copied);
        out.push_str(&text[selection.end..]);
        let start = selection.end;
        return Mutation::new(out, Selection { start, end: start + copied.len() });
    }

    let start = line_start(text, selection.start);
    let end = line_end(text, selection.start);
    let line = &text[start..end];
    let mut out = String::with_capacity(text.len() + line.len() + 1);
    out.push_str(&text[..end]);
    out.push('\n');
    out.push_str(line);
    out.push_str(&text[end..]);
    Mutation::collapsed(out, selection.start + line.len() + 1)
}

/// Caret movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Where the caret lands after `motion`; collapses any selection
pub fn move_caret(text: &str, selection: Selection, motion: Motion) -> usize {
    let at = selection.end;
    match motion {
        Motion::Left if !selection.is_collapsed() => selection.start,
        Motion::Right if !selection.is_collapsed() => selection.end,
        Motion::Left => prev_boundary(text, at),
        Motion::Right => next_boundary(text, at),
        Motion::Home => line_start(text, at),
        Motion::End => line_end(text, at),
        Motion::Up => {
            let start = line_start(text, at);
            if start == 0 {
                return 0;
            }
            let col = text[start..at].chars().count();
            offset_at_column(text, line_start(text, start - 1), col)
        }
        Motion::Down => {
            let end = line_end(text, at);
            if end == text.len() {
                return text.len();
            }
            let col = text[line_start(text, at)..at].chars().count();
            offset_at_column(text, end + 1, col)
        }
    }
}
