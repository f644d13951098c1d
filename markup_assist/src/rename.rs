//! Paired tag rename
//!
//! When an edit changes the name of an opening tag, the balancing closing tag
//! is rewritten to the new name. Edits anywhere else are ignored.

use alloc::string::String;

use crate::detect::{self, is_tag_name_byte};
use crate::tag_match::find_matching_close;

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// True when the tag whose name ends at `name_end` is terminated by `>`
/// before any other tag starts
fn is_terminated(bytes: &[u8], name_end: usize) -> bool {
    bytes
        .get(name_end..)
        .and_then(|rest| rest.iter().find(|&&b| b == b'<' || b == b'>'))
        == Some(&b'>')
}

fn name_run(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| is_tag_name_byte(b)).count())
}

/// Returns `new` with the closing tag renamed, or `None` if the edit from
/// `old` to `new` did not change the name of an opening tag at `cursor`.
///
/// Only edits that change the buffer length are considered, the whole edit
/// must fall inside the tag name, and the tag must already have been
/// terminated by `>` in `old`. A tag still being typed never renames a close.
pub fn sync_renamed_tag(old: &str, new: &str, cursor: usize) -> Option<String> {
    if old.len() == new.len() {
        return None;
    }
    let before = new.get(..cursor)?;
    let span = detect::open_tag_name_span(before)?;
    let name_start = span.start;

    let (old_bytes, new_bytes) = (old.as_bytes(), new.as_bytes());
    let prefix = common_prefix(old_bytes, new_bytes);
    if prefix < name_start {
        return None;
    }
    let shorter = old.len().min(new.len());
    let suffix = common_suffix(old_bytes, new_bytes).min(shorter - prefix);

    let old_name_len = name_run(old_bytes, name_start);
    let new_name_len = name_run(new_bytes, name_start);
    if old.len() - suffix > name_start + old_name_len
        || new.len() - suffix > name_start + new_name_len
    {
        return None;
    }

    let old_name = &old[name_start..name_start + old_name_len];
    let new_name = &new[name_start..name_start + new_name_len];
    if old_name == new_name {
        return None;
    }
    if !is_terminated(old_bytes, name_start + old_name_len) {
        return None;
    }

    let close = find_matching_close(new, name_start - 1, old_name)?;
    let close_name = close + 2;
    log::debug!("rename <{}> to <{}> at {}", old_name, new_name, close);

    let mut out = String::with_capacity(new.len() + new_name.len());
    out.push_str(&new[..close_name]);
    out.push_str(new_name);
    out.push_str(&new[close_name + old_name.len()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appending_to_name() {
        let renamed = sync_renamed_tag("<div>x</div>", "<divs>x</div>", 5);
        assert_eq!(renamed.as_deref(), Some("<divs>x</divs>"));
    }

    #[test]
    fn test_backspace_in_name() {
        let renamed = sync_renamed_tag("<div>x</div>", "<di>x</div>", 3);
        assert_eq!(renamed.as_deref(), Some("<di>x</di>"));
    }

    #[test]
    fn test_whole_name_replaced() {
        let renamed = sync_renamed_tag("<div>x</div>", "<section>x</div>", 8);
        assert_eq!(renamed.as_deref(), Some("<section>x</section>"));
    }

    #[test]
    fn test_insert_in_middle_of_name() {
        let renamed = sync_renamed_tag("<dv>x</dv>", "<div>x</dv>", 3);
        assert_eq!(renamed.as_deref(), Some("<div>x</div>"));
    }

    #[test]
    fn test_only_balancing_close_is_renamed() {
        let old = "<div><div>a</div></div>";
        let renamed = sync_renamed_tag(old, "<mdiv><div>a</div></div>", 2);
        assert_eq!(renamed.as_deref(), Some("<mdiv><div>a</div></mdiv>"));
        let renamed = sync_renamed_tag(old, "<divv><div>a</div></div>", 5);
        assert_eq!(renamed.as_deref(), Some("<divv><div>a</div></divv>"));
        // Same length edits are ignored
        assert_eq!(sync_renamed_tag(old, "<nav><div>a</div></div>", 4), None);
    }

    #[test]
    fn test_inner_tag_rename() {
        let old = "<div><p>a</p></div>";
        let new = "<div><pre>a</p></div>";
        assert_eq!(
            sync_renamed_tag(old, new, 9).as_deref(),
            Some("<div><pre>a</pre></div>")
        );
    }

    #[test]
    fn test_edit_outside_tag_name_is_ignored() {
        assert_eq!(sync_renamed_tag("<div>x</div>", "<div>xy</div>", 7), None);
        assert_eq!(
            sync_renamed_tag("<div>x</div>", "<div class>x</div>", 10),
            None
        );
    }

    #[test]
    fn test_no_close_is_noop() {
        assert_eq!(sync_renamed_tag("<div>x", "<divs>x", 5), None);
    }

    #[test]
    fn test_empty_name_retyped() {
        let renamed = sync_renamed_tag("<>x</>", "<p>x</>", 2);
        assert_eq!(renamed.as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn test_unterminated_tag_leaves_parent_close_alone() {
        // Typing <pre inside <p>|</p>
        assert_eq!(sync_renamed_tag("<p><p</p>", "<p><pr</p>", 6), None);
        assert_eq!(sync_renamed_tag("<p><pr</p>", "<p><pre</p>", 7), None);
        assert_eq!(sync_renamed_tag("<b><b</b>", "<b><bu</b>", 6), None);
        assert_eq!(sync_renamed_tag("<a>x<a", "<a>x<ab", 7), None);
    }

    #[test]
    fn test_terminated_tag_with_attributes_renames() {
        let renamed = sync_renamed_tag("<p class=\"x\">a</p>", "<pre class=\"x\">a</p>", 4);
        assert_eq!(renamed.as_deref(), Some("<pre class=\"x\">a</pre>"));
    }

    #[test]
    fn test_cursor_out_of_range() {
        assert_eq!(sync_renamed_tag("<a></a>", "<ab></a>", 99), None);
    }
}
