//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Keep at most `max_chars` characters of `s`.
///
/// Returns the retained prefix and whether anything was cut.
pub fn clip_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&s[..byte_index], true),
        None => (s, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is 2 bytes; target=5 falls inside the third é
        assert_eq!(truncate("éééééé", 8), "éé...");
    }

    #[test]
    fn test_clip_chars() {
        assert_eq!(clip_chars("abcdef", 3), ("abc", true));
        assert_eq!(clip_chars("abc", 3), ("abc", false));
        assert_eq!(clip_chars("", 0), ("", false));
        assert_eq!(clip_chars("日本語テキスト", 3), ("日本語", true));
    }
}
