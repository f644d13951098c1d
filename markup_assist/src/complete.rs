//! Completion engine
//!
//! Every function here is side-effect free: it takes the current buffer and
//! cursor and returns the replacement buffer plus the desired cursor offset.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::detect::{self, Token};
use crate::vocabulary::{self, BOILERPLATE_HTML, COMMENT_CARET_OFFSET, COMMENT_SKELETON};

/// Result of a completion: the whole new buffer and where the cursor goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub cursor: usize,
}

impl Completion {
    /// Replaces `start..end` of `text` with `insert`; cursor lands at
    /// `start + caret` where `caret` is measured inside `insert`.
    pub fn splice(text: &str, start: usize, end: usize, insert: &str, caret: usize) -> Self {
        let mut out = String::with_capacity(text.len() + insert.len());
        out.push_str(&text[..start]);
        out.push_str(insert);
        out.push_str(&text[end..]);
        Self {
            text: out,
            cursor: start + caret,
        }
    }

    fn unchanged(text: &str, cursor: usize) -> Self {
        Self {
            text: text.to_string(),
            cursor,
        }
    }
}

/// Kind of an autocomplete suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum SuggestionKind {
    /// Tag name after `<`
    Tag,
    /// Attribute name inside an open tag
    Attribute,
    /// Tag name typed as a bare word, expanded to a full element
    EmmetTag,
}

/// Autocomplete candidate
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Suggestion {
    pub value: String,
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn new(value: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// Replaces the `!` before `cursor` with the document skeleton
pub fn expand_boilerplate(text: &str, cursor: usize) -> Completion {
    let start = cursor.saturating_sub(1);
    Completion::splice(text, start, cursor, BOILERPLATE_HTML, BOILERPLATE_HTML.len())
}

/// Replaces the `<-` before `cursor` with a comment skeleton
pub fn expand_comment(text: &str, cursor: usize) -> Completion {
    let start = cursor.saturating_sub(2);
    Completion::splice(text, start, cursor, COMMENT_SKELETON, COMMENT_CARET_OFFSET)
}

/// Tag name and attributes parsed from a shorthand token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmmetAbbreviation<'a> {
    pub tag: &'a str,
    pub classes: Vec<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> EmmetAbbreviation<'a> {
    /// Parses `tag?(.class|#id)+`; the tag defaults to `div`
    pub fn parse(token: &'a str) -> Self {
        let selectors_at = token.find(['.', '#']).unwrap_or(token.len());
        let tag = match &token[..selectors_at] {
            "" => "div",
            typed => typed,
        };

        let mut classes = Vec::new();
        let mut id = None;
        let mut rest = &token[selectors_at..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            if !name.is_empty() {
                match marker {
                    '.' => classes.push(name),
                    _ => id = Some(name),
                }
            }
            rest = &body[end..];
        }

        Self { tag, classes, id }
    }

    /// Opening tag without its closing `>`
    fn open_tag_head(&self) -> String {
        let mut head = format!("<{}", self.tag);
        if let Some(id) = self.id {
            head.push_str(&format!(" id=\"{}\"", id));
        }
        if !self.classes.is_empty() {
            head.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }
        head
    }
}

/// Expands a shorthand token into an element
///
/// The cursor is left right after the last attribute, before the `>`.
pub fn expand_emmet(text: &str, token: Token<'_>) -> Completion {
    let abbreviation = EmmetAbbreviation::parse(token.text);
    let head = abbreviation.open_tag_head();
    let element = format!("{}></{}>", head, abbreviation.tag);
    Completion::splice(text, token.start, token.end(), &element, head.len())
}

/// Splits `><` at the cursor onto an indented blank line
pub fn expand_between_tags(text: &str, cursor: usize) -> Completion {
    let line_start = text[..cursor].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..cursor];
    let indent = &line[..line.len() - line.trim_start().len()];
    let inner = format!("{}  ", indent);
    let insert = format!("\n{}\n{}", inner, indent);
    Completion::splice(text, cursor, cursor, &insert, 1 + inner.len())
}

/// Inserts `></name>` over the selection; cursor lands between the tags
pub fn auto_close(text: &str, start: usize, end: usize, tag_name: &str) -> Completion {
    let insert = format!("></{}>", tag_name);
    Completion::splice(text, start, end, &insert, 1)
}

/// Case-insensitive prefix filter preserving vocabulary order
pub fn filter_vocabulary<'v>(vocabulary: &'v [&'v str], query: &str, limit: usize) -> Vec<&'v str> {
    vocabulary
        .iter()
        .copied()
        .filter(|entry| {
            entry
                .get(..query.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(query))
        })
        .take(limit)
        .collect()
}

/// Suggestions for the text before the cursor, empty when nothing applies
pub fn suggest(text_before: &str, limit: usize) -> Vec<Suggestion> {
    let Some(context) = detect::completion_context(text_before) else {
        return Vec::new();
    };
    let vocabulary = match context.kind {
        SuggestionKind::Attribute => vocabulary::HTML_ATTRIBUTES,
        SuggestionKind::Tag | SuggestionKind::EmmetTag => vocabulary::HTML_TAGS,
    };
    let matches = filter_vocabulary(vocabulary, context.token.text, limit);
    log::trace!(
        "{:?} context {:?}: {} suggestions",
        context.kind,
        context.token.text,
        matches.len()
    );
    matches
        .into_iter()
        .map(|value| Suggestion::new(value, context.kind))
        .collect()
}

/// Applies an accepted suggestion at a collapsed cursor
///
/// Leaves the text untouched if the token the suggestion was computed for is
/// no longer before the cursor.
pub fn apply_suggestion(text: &str, cursor: usize, suggestion: &Suggestion) -> Completion {
    let Some(text_before) = text.get(..cursor) else {
        return Completion::unchanged(text, cursor);
    };
    let name = suggestion.value.as_str();
    let void = vocabulary::is_self_closing(name);

    match suggestion.kind {
        SuggestionKind::Tag => {
            let Some(context) = detect::open_tag_context(text_before) else {
                return Completion::unchanged(text, cursor);
            };
            let insert = if void {
                format!("{}>", name)
            } else {
                format!("{}></{}>", name, name)
            };
            let caret = if void { insert.len() } else { name.len() + 1 };
            Completion::splice(text, context.token.start, cursor, &insert, caret)
        }
        SuggestionKind::EmmetTag => {
            let token = detect::trailing_run(text_before, |b| b.is_ascii_alphanumeric());
            if token.text.is_empty() {
                return Completion::unchanged(text, cursor);
            }
            let insert = if void {
                format!("<{}>", name)
            } else {
                format!("<{}></{}>", name, name)
            };
            let caret = if void { insert.len() } else { name.len() + 2 };
            Completion::splice(text, token.start, cursor, &insert, caret)
        }
        SuggestionKind::Attribute => {
            let token = detect::trailing_run(text_before, detect::is_attribute_byte);
            let (insert, caret) = if let Some(prefix) = vocabulary::wildcard_prefix(name) {
                (prefix.to_string(), prefix.len())
            } else if vocabulary::is_boolean_attribute(name) {
                (name.to_string(), name.len())
            } else {
                (format!("{}=\"\"", name), name.len() + 2)
            };
            Completion::splice(text, token.start, cursor, &insert, caret)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::emmet_token;
    use alloc::vec;

    #[test]
    fn test_boilerplate_replaces_bang() {
        let done = expand_boilerplate("a!b", 2);
        assert!(done.text.starts_with("a<!DOCTYPE html>"));
        assert!(done.text.ends_with("</html>b"));
        assert_eq!(done.cursor, 1 + BOILERPLATE_HTML.len());
    }

    #[test]
    fn test_comment_cursor_between_spaces() {
        let done = expand_comment("x<-", 3);
        assert_eq!(done.text, "x<!--  -->");
        assert_eq!(done.cursor, 6);
        assert_eq!(&done.text[..done.cursor], "x<!-- ");
    }

    #[test]
    fn test_emmet_class_and_id() {
        let text = "div.card#x";
        let done = expand_emmet(text, emmet_token(text).unwrap());
        assert_eq!(done.text, "<div id=\"x\" class=\"card\"></div>");
        assert_eq!(&done.text[..done.cursor], "<div id=\"x\" class=\"card\"");
    }

    #[test]
    fn test_emmet_defaults_to_div() {
        let text = "<body>.card.wide";
        let done = expand_emmet(text, emmet_token(text).unwrap());
        assert_eq!(done.text, "<body><div class=\"card wide\"></div>");
        assert_eq!(&done.text[done.cursor..], "></div>");
    }

    #[test]
    fn test_emmet_last_id_wins() {
        let abbr = EmmetAbbreviation::parse("p#a.b#c");
        assert_eq!(abbr.tag, "p");
        assert_eq!(abbr.id, Some("c"));
        assert_eq!(abbr.classes, vec!["b"]);
    }

    #[test]
    fn test_emmet_only_id() {
        let text = "section#hero";
        let done = expand_emmet(text, emmet_token(text).unwrap());
        assert_eq!(done.text, "<section id=\"hero\"></section>");
    }

    #[test]
    fn test_between_tags_keeps_indent() {
        let text = "<ul>\n  <li></li>\n</ul>";
        let cursor = text.find("</li>").unwrap();
        let done = expand_between_tags(text, cursor);
        assert_eq!(done.text, "<ul>\n  <li>\n    \n  </li>\n</ul>");
        assert_eq!(&done.text[..done.cursor], "<ul>\n  <li>\n    ");
    }

    #[test]
    fn test_between_tags_at_column_zero() {
        let done = expand_between_tags("<p></p>", 3);
        assert_eq!(done.text, "<p>\n  \n</p>");
        assert_eq!(done.cursor, 6);
    }

    #[test]
    fn test_auto_close() {
        let done = auto_close("<p", 2, 2, "p");
        assert_eq!(done.text, "<p></p>");
        assert_eq!(done.cursor, 3);
    }

    #[test]
    fn test_auto_close_replaces_selection() {
        let done = auto_close("<pXY", 2, 4, "p");
        assert_eq!(done.text, "<p></p>");
    }

    #[test]
    fn test_filter_di_prefix() {
        let hits = filter_vocabulary(vocabulary::HTML_TAGS, "di", 15);
        assert_eq!(hits, vec!["dialog", "div"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_capped() {
        assert_eq!(filter_vocabulary(vocabulary::HTML_TAGS, "DI", 15), vec!["dialog", "div"]);
        let all = filter_vocabulary(vocabulary::HTML_TAGS, "", 15);
        assert_eq!(all.len(), 15);
        assert_eq!(all[0], "a");
        assert!(filter_vocabulary(vocabulary::HTML_TAGS, "zz", 15).is_empty());
    }

    #[test]
    fn test_filter_preserves_vocabulary_order() {
        let hits = filter_vocabulary(vocabulary::HTML_TAGS, "t", 15);
        assert_eq!(
            hits,
            vec![
                "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time",
                "title", "tr", "track"
            ]
        );
    }

    #[test]
    fn test_suggest_kinds() {
        let tags = suggest("<sp", 15);
        assert_eq!(tags, vec![Suggestion::new("span", SuggestionKind::Tag)]);

        let attrs = suggest("<a hr", 15);
        assert_eq!(
            attrs,
            vec![
                Suggestion::new("href", SuggestionKind::Attribute),
                Suggestion::new("hreflang", SuggestionKind::Attribute),
            ]
        );

        let words = suggest("<p>secti", 15);
        assert_eq!(words, vec![Suggestion::new("section", SuggestionKind::EmmetTag)]);

        assert!(suggest("plain text.", 15).is_empty());
    }

    #[test]
    fn test_apply_tag_suggestion() {
        let done = apply_suggestion("<di", 3, &Suggestion::new("div", SuggestionKind::Tag));
        assert_eq!(done.text, "<div></div>");
        assert_eq!(done.cursor, 5);
    }

    #[test]
    fn test_apply_void_tag_suggestion() {
        let done = apply_suggestion("<im", 3, &Suggestion::new("img", SuggestionKind::Tag));
        assert_eq!(done.text, "<img>");
        assert_eq!(done.cursor, 5);
    }

    #[test]
    fn test_apply_emmet_suggestion() {
        let done = apply_suggestion("x sec", 5, &Suggestion::new("section", SuggestionKind::EmmetTag));
        assert_eq!(done.text, "x <section></section>");
        assert_eq!(&done.text[..done.cursor], "x <section>");

        let done = apply_suggestion("h", 1, &Suggestion::new("hr", SuggestionKind::EmmetTag));
        assert_eq!(done.text, "<hr>");
        assert_eq!(done.cursor, 4);
    }

    #[test]
    fn test_apply_attribute_suggestions() {
        let done = apply_suggestion("<a hr>", 5, &Suggestion::new("href", SuggestionKind::Attribute));
        assert_eq!(done.text, "<a href=\"\">");
        assert_eq!(&done.text[..done.cursor], "<a href=\"");

        let done = apply_suggestion("<input di", 9, &Suggestion::new("disabled", SuggestionKind::Attribute));
        assert_eq!(done.text, "<input disabled");
        assert_eq!(done.cursor, done.text.len());

        let done = apply_suggestion("<div ar", 7, &Suggestion::new("aria-*", SuggestionKind::Attribute));
        assert_eq!(done.text, "<div aria-");
        assert_eq!(done.cursor, done.text.len());
    }

    #[test]
    fn test_apply_with_missing_token_is_noop() {
        let done = apply_suggestion("plain", 5, &Suggestion::new("div", SuggestionKind::Tag));
        assert_eq!(done.text, "plain");
        assert_eq!(done.cursor, 5);

        let done = apply_suggestion("x ", 2, &Suggestion::new("div", SuggestionKind::EmmetTag));
        assert_eq!(done.text, "x ");
    }
}
