#[derive(Clone)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

pub(super) fn starts_with_at(bytes: &[u8], idx: usize, token: &[u8]) -> bool {
    bytes.get(idx..).is_some_and(|rest| rest.starts_with(token))
}

/// End offset of a parameter name starting at `start`: a letter or `_`
/// followed by letters, digits and underscores.
pub(super) fn scan_name(bytes: &[u8], start: usize) -> Option<usize> {
    let first = *bytes.get(start)?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    Some(start + len)
}

/// Recognize an opening `$tag$` at `start`; returns the tag and the offset of
/// the closing `$` of the opener.
pub(super) fn try_start_dollar_quote(bytes: &[u8], start: usize) -> Option<(String, usize)> {
    let len = bytes[start + 1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    let end = start + 1 + len;
    if bytes.get(end) != Some(&b'$') {
        return None;
    }
    // `$1` style placeholders are not quote openers.
    if bytes.get(start + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let tag = std::str::from_utf8(&bytes[start + 1..end]).ok()?;
    Some((tag.to_string(), end))
}

/// Whether the `$tag$` closer begins at `idx`.
pub(super) fn matches_dollar_tag(bytes: &[u8], idx: usize, tag: &str) -> bool {
    bytes.get(idx) == Some(&b'$')
        && starts_with_at(bytes, idx + 1, tag.as_bytes())
        && bytes.get(idx + 1 + tag.len()) == Some(&b'$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_start_with_letter_or_underscore() {
        assert_eq!(scan_name(b":first_name,", 1), Some(11));
        assert_eq!(scan_name(b":_x", 1), Some(3));
        assert_eq!(scan_name(b":1", 1), None);
        assert_eq!(scan_name(b":", 1), None);
    }

    #[test]
    fn dollar_quotes() {
        assert_eq!(try_start_dollar_quote(b"$$ body", 0), Some((String::new(), 1)));
        assert_eq!(try_start_dollar_quote(b"$fn$", 0), Some(("fn".to_string(), 3)));
        assert_eq!(try_start_dollar_quote(b"$1 ", 0), None);
        assert!(matches_dollar_tag(b"x $fn$", 2, "fn"));
        assert!(!matches_dollar_tag(b"x $fx$", 2, "fn"));
    }
}
