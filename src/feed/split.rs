//! Separator splitting that ignores separators nested inside delimiters

/// Split `text` on `separator`, except where the separator sits between
/// `open` and `close` (nesting allowed).
///
/// The last segment is always kept, so the result is never empty. Unbalanced
/// delimiters are tolerated: the nesting level may go negative, in which case
/// no split happens until it comes back to zero.
pub fn split_outside_delimiters(text: &str, separator: &str, open: &str, close: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut level: i32 = 0;
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if level == 0 && !separator.is_empty() && rest.starts_with(separator) {
            result.push(std::mem::take(&mut current));
            pos += separator.len();
            continue;
        }

        if !open.is_empty() && rest.starts_with(open) {
            level += 1;
        } else if !close.is_empty() && rest.starts_with(close) {
            level -= 1;
        }

        // Advance one character; `pos` always sits on a char boundary
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };
        current.push(c);
        pos += c.len_utf8();
    }

    result.push(current);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split() {
        let parts = split_outside_delimiters("a, b, c", ", ", "(", ")");
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_separator_yields_whole_string() {
        assert_eq!(split_outside_delimiters("Jean Dupont", ", ", "(", ")"), vec!["Jean Dupont"]);
        assert_eq!(split_outside_delimiters("", ", ", "(", ")"), vec![""]);
    }

    #[test]
    fn test_separator_inside_parentheses_is_kept() {
        let parts = split_outside_delimiters(
            "Jean Dupont (Paul, le frère), Marie Curie",
            ", ",
            "(",
            ")",
        );
        assert_eq!(parts, vec!["Jean Dupont (Paul, le frère)", "Marie Curie"]);
    }

    #[test]
    fn test_nested_parentheses() {
        let parts = split_outside_delimiters("a (b, (c, d), e), f", ", ", "(", ")");
        assert_eq!(parts, vec!["a (b, (c, d), e)", "f"]);
    }

    #[test]
    fn test_trailing_separator_keeps_empty_segment() {
        assert_eq!(split_outside_delimiters("a, b, ", ", ", "(", ")"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_unbalanced_open_stops_splitting() {
        assert_eq!(split_outside_delimiters("a (b, c, d", ", ", "(", ")"), vec!["a (b, c, d"]);
    }

    #[test]
    fn test_unbalanced_close_goes_negative() {
        // Level drops to -1 after the stray ')' so later separators do not split
        assert_eq!(split_outside_delimiters("a, b), c, d", ", ", "(", ")"), vec!["a", "b), c, d"]);
    }

    #[test]
    fn test_segment_count_matches_top_level_separators() {
        let text = "x (1, 2), y, z (3), w";
        let top_level = 3;
        assert_eq!(split_outside_delimiters(text, ", ", "(", ")").len(), top_level + 1);
    }
}
