//! Small helpers shared by the vendor clients.

/// Truncate a string for logging purposes.
///
/// Vendor error bodies can be arbitrarily large; error logs keep roughly the
/// first `max` bytes (backing off to the nearest character boundary, since
/// bodies are frequently Korean text) with an ellipsis and byte count
/// appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // Each hangul syllable is three bytes; a cut at byte 4 must back off.
        let s = "가나다라마";
        let result = truncate_for_log(s, 4);
        assert!(result.starts_with("가"));
        assert!(result.contains("…(+12 bytes)"));
    }
}
