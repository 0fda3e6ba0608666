pub const BODY_CHAR_BUDGET: usize = 2_500;
pub const TITLE_CHAR_BUDGET: usize = 300;
pub const DESCRIPTION_CHAR_BUDGET: usize = 500;

/// First `max_chars` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn counts_chars_not_bytes() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 4), "héll");
        assert_eq!(truncate_chars(s, 0), "");
    }
}
