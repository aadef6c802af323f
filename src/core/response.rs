//! Discord message limits and truncation helpers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed field value limit
pub const FIELD_LIMIT: usize = 1024;

/// Truncate text to at most `max` bytes on a UTF-8 boundary, adding an ellipsis when cut
pub fn truncate_to(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}

pub fn truncate_for_field(text: &str) -> String {
    truncate_to(text, FIELD_LIMIT)
}

/// Format a user mention
pub fn mention(user_id: u64) -> String {
    format!("<@{user_id}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_for_message("hello"), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let long = "x".repeat(MESSAGE_LIMIT + 50);
        let result = truncate_for_message(&long);
        assert_eq!(result.len(), MESSAGE_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // 4-byte emoji repeated: a naive byte cut would panic
        let text = "🐾".repeat(400);
        let result = truncate_for_field(&text);
        assert!(result.len() <= FIELD_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_mention() {
        assert_eq!(mention(42), "<@42>");
    }
}
