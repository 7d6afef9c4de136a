//! String utilities for the domain layer.
//!
//! Every length in the pipeline is counted in characters, so these helpers
//! never split a multi-byte character.

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Return the prefix of `s` holding at most `max_chars` characters.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let head = take_chars(s, max_chars);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("hello"), 5);
        assert_eq!(char_len("東京都"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_take_chars_ascii() {
        assert_eq!(take_chars("hello world", 5), "hello");
        assert_eq!(take_chars("hi", 10), "hi");
        assert_eq!(take_chars("hi", 2), "hi");
    }

    #[test]
    fn test_take_chars_multibyte() {
        // Each character here is 3 bytes; slicing must follow characters
        assert_eq!(take_chars("あのね", 2), "あの");
        assert_eq!(take_chars("Hello、世界", 7), "Hello、世");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 200), "short");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
        assert_eq!(truncate_with_ellipsis("日本語テスト", 3), "日本語...");
    }
}
