/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// First `max_chars` characters of `s`, with `...` appended when anything was cut.
///
/// Used for log lines that echo user-supplied descriptions.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Strip markdown code fences that models like to wrap JSON in.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```JSON")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_multibyte_boundary() {
        let text = "Lampe à poser";
        let truncated = truncate_to_char_boundary(text, 7);
        assert_eq!(truncated, "Lampe ");
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn truncate_within_bounds_is_identity() {
        assert_eq!(truncate_to_char_boundary("mug", 100), "mug");
    }

    #[test]
    fn preview_marks_cut_text() {
        assert_eq!(preview("ceramic mug", 7), "ceramic...");
        assert_eq!(preview("mug", 7), "mug");
        assert_eq!(preview("日本茶碗です", 2), "日本...");
    }

    #[test]
    fn strip_code_blocks_unwraps_fenced_json() {
        assert_eq!(strip_code_blocks("```json\n{\"title\":\"Lamp\"}\n```"), "{\"title\":\"Lamp\"}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("  {}  "), "{}");
    }
}
