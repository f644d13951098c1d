//! Token detectors
//!
//! Each detector classifies the text strictly before the cursor. Matches are
//! always the longest run anchored at the end of `text_before`; text after the
//! cursor never influences a token boundary (the between-tags check is the
//! single exception, since it is defined by the character after the cursor).

use crate::complete::SuggestionKind;
use crate::vocabulary;

/// A substring immediately preceding the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Byte offset of the token within the buffer
    pub start: usize,
    /// Token text
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn tail(text_before: &'a str, start: usize) -> Self {
        Self {
            start,
            text: &text_before[start..],
        }
    }

    /// Byte offset just past the token
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Completion that fires when Enter is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterTrigger<'a> {
    /// `!` before the cursor
    Boilerplate,
    /// `<-` before the cursor
    Comment,
    /// Compound shorthand such as `div.card#hero`
    Emmet(Token<'a>),
    /// Cursor sits between `>` and `<`
    BetweenTags,
}

/// Context in which autocomplete suggestions are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionContext<'a> {
    pub kind: SuggestionKind,
    /// The partial identifier being completed
    pub token: Token<'a>,
}

impl CompletionContext<'_> {
    /// Lowercased query used for prefix filtering
    pub fn query(&self) -> alloc::string::String {
        self.token.text.to_ascii_lowercase()
    }
}

pub(crate) fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || (b'1'..=b'6').contains(&b)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

pub(crate) fn is_attribute_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

/// Start of the longest run of bytes matching `pred` that ends at `end`
fn run_start(bytes: &[u8], end: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut start = end;
    while start > 0 && pred(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// Longest trailing run of bytes matching `pred` (possibly empty)
pub(crate) fn trailing_run(text_before: &str, pred: impl Fn(u8) -> bool) -> Token<'_> {
    let start = run_start(text_before.as_bytes(), text_before.len(), pred);
    Token::tail(text_before, start)
}

/// Region after the last `>`, where an unterminated tag can live
fn open_tag_region(text_before: &str) -> usize {
    text_before.rfind('>').map_or(0, |i| i + 1)
}

/// First `<name` in the unterminated region, with the name length
fn unterminated_tag(text_before: &str, needs_space: bool) -> Option<(usize, usize)> {
    let region = open_tag_region(text_before);
    let bytes = text_before.as_bytes();

    text_before[region..]
        .match_indices('<')
        .map(|(i, _)| region + i)
        .find_map(|lt| {
            let name_start = lt + 1;
            let name_len = bytes[name_start..]
                .iter()
                .take_while(|&&b| is_tag_name_byte(b))
                .count();
            if name_len == 0 {
                return None;
            }
            if needs_space {
                let after = &text_before[name_start + name_len..];
                if !after.chars().next().is_some_and(char::is_whitespace) {
                    return None;
                }
            }
            Some((name_start, name_len))
        })
}

/// `text_before` ends with `!`
pub fn is_boilerplate_trigger(text_before: &str) -> bool {
    text_before.ends_with('!')
}

/// `text_before` ends with `<-`
pub fn is_comment_trigger(text_before: &str) -> bool {
    text_before.ends_with("<-")
}

/// Trailing shorthand of the form `tag?(.class|#id)+`
pub fn emmet_token(text_before: &str) -> Option<Token<'_>> {
    let bytes = text_before.as_bytes();
    let mut start = bytes.len();
    let mut selectors = 0usize;

    loop {
        let ident = run_start(bytes, start, is_ident_byte);
        if ident < start && ident > 0 && matches!(bytes[ident - 1], b'.' | b'#') {
            start = ident - 1;
            selectors += 1;
            continue;
        }
        if selectors == 0 {
            return None;
        }
        start = run_start(bytes, start, |b| b.is_ascii_alphanumeric());
        break;
    }

    Some(Token::tail(text_before, start))
}

/// Character before the cursor is `>` and the one after is `<`
pub fn is_between_tags(text: &str, cursor: usize) -> bool {
    let bytes = text.as_bytes();
    cursor > 0 && bytes.get(cursor - 1) == Some(&b'>') && bytes.get(cursor) == Some(&b'<')
}

/// Classifies an Enter key press at a collapsed cursor
pub fn enter_trigger(text: &str, cursor: usize) -> Option<EnterTrigger<'_>> {
    let text_before = text.get(..cursor)?;

    if is_boilerplate_trigger(text_before) {
        return Some(EnterTrigger::Boilerplate);
    }
    if is_comment_trigger(text_before) {
        return Some(EnterTrigger::Comment);
    }
    if let Some(token) = emmet_token(text_before) {
        return Some(EnterTrigger::Emmet(token));
    }
    if is_between_tags(text, cursor) {
        return Some(EnterTrigger::BetweenTags);
    }
    None
}

/// Name of the tag a `>` typed now would close
pub fn tag_being_closed(text_before: &str) -> Option<&str> {
    unterminated_tag(text_before, false).map(|(start, len)| &text_before[start..start + len])
}

/// Name of the tag a `>` typed now should auto-close, if any
///
/// Void elements never get a closing tag.
pub fn auto_close_candidate(text_before: &str) -> Option<&str> {
    tag_being_closed(text_before).filter(|name| !vocabulary::is_self_closing(name))
}

/// Cursor is inside an open tag, past its name and at least one space
pub fn attribute_context(text_before: &str) -> Option<CompletionContext<'_>> {
    unterminated_tag(text_before, true)?;
    Some(CompletionContext {
        kind: SuggestionKind::Attribute,
        token: trailing_run(text_before, is_attribute_byte),
    })
}

/// Cursor directly follows `<` and a partial tag name
pub fn open_tag_context(text_before: &str) -> Option<CompletionContext<'_>> {
    let token = trailing_run(text_before, |b| b.is_ascii_alphanumeric());
    if token.start == 0 || text_before.as_bytes()[token.start - 1] != b'<' {
        return None;
    }
    Some(CompletionContext {
        kind: SuggestionKind::Tag,
        token,
    })
}

/// Bare identifier at line start, after whitespace, or after `>`
pub fn bare_word_context(text_before: &str) -> Option<CompletionContext<'_>> {
    let token = trailing_run(text_before, |b| b.is_ascii_alphanumeric());
    if token.text.is_empty() {
        return None;
    }
    let boundary_ok = text_before[..token.start]
        .chars()
        .next_back()
        .map_or(true, |c| c == '>' || c.is_whitespace());
    if !boundary_ok {
        return None;
    }
    Some(CompletionContext {
        kind: SuggestionKind::EmmetTag,
        token,
    })
}

/// Autocomplete context, in priority order: attribute, open tag, bare word
pub fn completion_context(text_before: &str) -> Option<CompletionContext<'_>> {
    attribute_context(text_before)
        .or_else(|| open_tag_context(text_before))
        .or_else(|| bare_word_context(text_before))
}

/// Open-tag name span ending at the cursor (`<` + `[A-Za-z1-6]*`)
///
/// The returned token starts after the `<`.
pub fn open_tag_name_span(text_before: &str) -> Option<Token<'_>> {
    let token = trailing_run(text_before, is_tag_name_byte);
    if token.start == 0 || text_before.as_bytes()[token.start - 1] != b'<' {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boilerplate_and_comment_triggers() {
        assert!(is_boilerplate_trigger("!"));
        assert!(is_boilerplate_trigger("text !"));
        assert!(!is_boilerplate_trigger("!a"));
        assert!(is_comment_trigger("<-"));
        assert!(!is_comment_trigger("<"));
    }

    #[test]
    fn test_emmet_token_full() {
        let token = emmet_token("div.card#hero").unwrap();
        assert_eq!(token.start, 0);
        assert_eq!(token.text, "div.card#hero");
    }

    #[test]
    fn test_emmet_token_takes_trailing_run_only() {
        let token = emmet_token("<p>hello span.note").unwrap();
        assert_eq!(token.text, "span.note");
        assert_eq!(token.start, 9);
    }

    #[test]
    fn test_emmet_token_without_tag() {
        assert_eq!(emmet_token(".card").unwrap().text, ".card");
        assert_eq!(emmet_token("x..y").unwrap().text, ".y");
    }

    #[test]
    fn test_emmet_tag_part_is_alphanumeric_only() {
        assert_eq!(emmet_token("a-b.c").unwrap().text, "b.c");
        assert_eq!(emmet_token("x_y.z").unwrap().text, "y.z");
    }

    #[test]
    fn test_emmet_selectors_allow_dash_and_underscore() {
        assert_eq!(emmet_token("li.is-active_x").unwrap().text, "li.is-active_x");
    }

    #[test]
    fn test_emmet_requires_a_selector() {
        assert_eq!(emmet_token("div"), None);
        assert_eq!(emmet_token("div."), None);
        assert_eq!(emmet_token("#"), None);
        assert_eq!(emmet_token(""), None);
    }

    #[test]
    fn test_between_tags() {
        assert!(is_between_tags("<p></p>", 3));
        assert!(!is_between_tags("<p></p>", 2));
        assert!(!is_between_tags("<p>", 3));
        assert!(!is_between_tags("", 0));
    }

    #[test]
    fn test_enter_trigger_priority() {
        assert_eq!(enter_trigger("!", 1), Some(EnterTrigger::Boilerplate));
        assert_eq!(enter_trigger("<-", 2), Some(EnterTrigger::Comment));
        assert!(matches!(
            enter_trigger("ul.menu", 7),
            Some(EnterTrigger::Emmet(_))
        ));
        assert_eq!(enter_trigger("<p></p>", 3), Some(EnterTrigger::BetweenTags));
        assert_eq!(enter_trigger("plain", 5), None);
    }

    #[test]
    fn test_enter_trigger_ignores_text_after_cursor() {
        // "!" after the cursor is not a trigger
        assert_eq!(enter_trigger("ab!", 2), None);
    }

    #[test]
    fn test_tag_being_closed() {
        assert_eq!(tag_being_closed("<p"), Some("p"));
        assert_eq!(tag_being_closed("<div class=\"a\""), Some("div"));
        assert_eq!(tag_being_closed("<h1"), Some("h1"));
        assert_eq!(tag_being_closed("</div"), None);
        assert_eq!(tag_being_closed("<!DOCTYPE html"), None);
        assert_eq!(tag_being_closed("<p>text"), None);
    }

    #[test]
    fn test_auto_close_skips_void_elements() {
        assert_eq!(auto_close_candidate("<p"), Some("p"));
        assert_eq!(auto_close_candidate("<img src=\"a.png\""), None);
        assert_eq!(auto_close_candidate("<BR"), None);
    }

    #[test]
    fn test_attribute_context() {
        let ctx = attribute_context("<input ty").unwrap();
        assert_eq!(ctx.kind, SuggestionKind::Attribute);
        assert_eq!(ctx.token.text, "ty");
        assert_eq!(ctx.token.start, 7);

        let ctx = attribute_context("<a href=\"x\" ").unwrap();
        assert_eq!(ctx.token.text, "");

        let ctx = attribute_context("<div aria-La").unwrap();
        assert_eq!(ctx.query(), "aria-la");

        assert_eq!(attribute_context("<input"), None);
        assert_eq!(attribute_context("<input x>"), None);
        assert_eq!(attribute_context("text "), None);
    }

    #[test]
    fn test_open_tag_context() {
        let ctx = open_tag_context("<di").unwrap();
        assert_eq!(ctx.kind, SuggestionKind::Tag);
        assert_eq!(ctx.token.text, "di");
        assert_eq!(ctx.token.start, 1);

        assert_eq!(open_tag_context("<").unwrap().token.text, "");
        assert_eq!(open_tag_context("di"), None);
        assert_eq!(open_tag_context("< di"), None);
    }

    #[test]
    fn test_bare_word_context() {
        assert_eq!(bare_word_context("sec").unwrap().token.text, "sec");
        assert_eq!(bare_word_context("<p>sec").unwrap().token.text, "sec");
        assert_eq!(bare_word_context("a\n  sec").unwrap().token.text, "sec");
        assert_eq!(bare_word_context("a.sec"), None);
        assert_eq!(bare_word_context("<sec"), None);
        assert_eq!(bare_word_context("word "), None);
    }

    #[test]
    fn test_completion_context_priority() {
        assert_eq!(
            completion_context("<div cl").unwrap().kind,
            SuggestionKind::Attribute
        );
        assert_eq!(completion_context("<di").unwrap().kind, SuggestionKind::Tag);
        assert_eq!(
            completion_context("<p>di").unwrap().kind,
            SuggestionKind::EmmetTag
        );
        assert_eq!(completion_context("<p>.x"), None);
    }

    #[test]
    fn test_open_tag_name_span() {
        let span = open_tag_name_span("<p>x</p><sec").unwrap();
        assert_eq!(span.text, "sec");
        assert_eq!(span.start, 9);
        assert_eq!(open_tag_name_span("<").unwrap().text, "");
        assert_eq!(open_tag_name_span("<h7"), None);
        assert_eq!(open_tag_name_span("<div "), None);
    }

    #[test]
    fn test_non_ascii_text_is_tolerated() {
        assert_eq!(bare_word_context("héllo wörld"), None);
        assert_eq!(bare_word_context("é div").unwrap().token.text, "div");
        assert_eq!(emmet_token("ü.x").unwrap().text, ".x");
    }
}
