//! Shared utility functions.

/// Shorten a label to at most `max_chars` characters, ending in `…` when cut.
///
/// Counts characters, not bytes, so multi-byte labels never split.
pub fn truncate_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars).collect();
    format!("{}…", kept)
}
