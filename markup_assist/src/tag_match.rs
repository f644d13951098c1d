//! Depth-aware closing tag search
//!
//! Scans forward from an opening tag, counting nested openings of the same
//! name, until the balancing `</name>` is found. Matching is ASCII
//! case-insensitive. There is no caching; buffers are editor-sized.

/// Finds the offset of the `<` of the closing tag that balances the opening
/// tag starting at `open_tag_start`.
///
/// Returns `None` when the markup is unbalanced.
pub fn find_matching_close(text: &str, open_tag_start: usize, tag_name: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let name = tag_name.as_bytes();
    let mut depth = 1usize;
    let mut pos = open_tag_start.saturating_add(1);

    while pos < bytes.len() {
        let close = find_close(bytes, pos, name)?;

        match find_open(bytes, pos, name) {
            Some(open) if open < close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                pos = close + 1;
            }
        }
    }

    None
}

/// Offsets of every `<` at or after `from`
fn angle_brackets(bytes: &[u8], from: usize) -> impl Iterator<Item = usize> + '_ {
    bytes
        .iter()
        .enumerate()
        .skip(from)
        .filter(|&(_, &b)| b == b'<')
        .map(|(i, _)| i)
}

fn name_matches_at(bytes: &[u8], at: usize, name: &[u8]) -> bool {
    bytes
        .get(at..at + name.len())
        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Next `<name` followed by whitespace, `>` or end of text
fn find_open(bytes: &[u8], from: usize, name: &[u8]) -> Option<usize> {
    angle_brackets(bytes, from).find(|&lt| {
        let name_start = lt + 1;
        if !name_matches_at(bytes, name_start, name) {
            return false;
        }
        match bytes.get(name_start + name.len()) {
            None => true,
            Some(&b) => b == b'>' || b.is_ascii_whitespace(),
        }
    })
}

/// Next `</name>`
fn find_close(bytes: &[u8], from: usize, name: &[u8]) -> Option<usize> {
    angle_brackets(bytes, from).find(|&lt| {
        bytes.get(lt + 1) == Some(&b'/')
            && name_matches_at(bytes, lt + 2, name)
            && bytes.get(lt + 2 + name.len()) == Some(&b'>')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pair() {
        let html = "<div>x</div>";
        assert_eq!(find_matching_close(html, 0, "div"), Some(6));
    }

    #[test]
    fn test_nested_returns_outer_close() {
        let html = "<div><div>inner</div>outer</div>";
        assert_eq!(find_matching_close(html, 0, "div"), Some(26));
        // Inner tag matches the inner close
        assert_eq!(find_matching_close(html, 5, "div"), Some(15));
    }

    #[test]
    fn test_deeply_nested() {
        let html = "<ul><li><ul><li>a</li></ul></li></ul>";
        assert_eq!(find_matching_close(html, 0, "ul"), Some(32));
        assert_eq!(find_matching_close(html, 8, "ul"), Some(22));
    }

    #[test]
    fn test_unbalanced_returns_none() {
        assert_eq!(find_matching_close("<div>no close", 0, "div"), None);
        assert_eq!(find_matching_close("<div><div></div>", 0, "div"), None);
    }

    #[test]
    fn test_case_insensitive() {
        let html = "<DIV>x</div>";
        assert_eq!(find_matching_close(html, 0, "div"), Some(6));
        assert_eq!(find_matching_close("<p>x</P>", 0, "P"), Some(4));
    }

    #[test]
    fn test_prefix_names_are_not_openings() {
        // <divider> must not count as a nested <div
        let html = "<div><divider></divider></div>";
        assert_eq!(find_matching_close(html, 0, "div"), Some(24));
    }

    #[test]
    fn test_opening_with_attributes_counts() {
        let html = "<div><div class=\"a\"></div></div>";
        assert_eq!(find_matching_close(html, 0, "div"), Some(26));
    }

    #[test]
    fn test_truncated_close_is_not_a_close() {
        assert_eq!(find_matching_close("<div></div", 0, "div"), None);
    }

    #[test]
    fn test_open_followed_by_newline_counts() {
        let html = "<div><div\n></div></div>";
        assert_eq!(find_matching_close(html, 0, "div"), Some(17));
    }

    #[test]
    fn test_empty_name_matches_empty_close() {
        assert_eq!(find_matching_close("<>x</>", 0, ""), Some(3));
    }

    #[test]
    fn test_start_past_end() {
        assert_eq!(find_matching_close("<div>", 10, "div"), None);
    }
}
