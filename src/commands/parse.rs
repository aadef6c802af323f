//! Splitting `!name rest` messages

/// `(name, rest)` for a message starting with `prefix`. The name is lowercased and the rest trimmed.
pub fn parse_command<'a>(content: &'a str, prefix: &str) -> Option<(String, &'a str)> {
    let body = content.trim_start().strip_prefix(prefix)?;
    let (name, rest) = match body.find(char::is_whitespace) {
        Some(at) => body.split_at(at),
        None => (body, ""),
    };
    if name.is_empty() {
        return None;
    }
    Some((name.to_lowercase(), rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        assert_eq!(
            parse_command("!remind 5 minutes  check oven ", "!"),
            Some(("remind".to_string(), "5 minutes  check oven"))
        );
    }

    #[test]
    fn test_parse_command_lowercases_name() {
        assert_eq!(parse_command("!CATS Live ON", "!"), Some(("cats".to_string(), "Live ON")));
        assert_eq!(parse_command("!Mom", "!"), Some(("mom".to_string(), "")));
    }

    #[test]
    fn test_parse_command_rejects_plain_text() {
        assert_eq!(parse_command("ur mom", "!"), None);
        assert_eq!(parse_command("!", "!"), None);
        assert_eq!(parse_command("! mom", "!"), None);
    }

    #[test]
    fn test_parse_command_custom_prefix() {
        assert_eq!(parse_command("?movie alien", "?"), Some(("movie".to_string(), "alien")));
        assert_eq!(parse_command("!movie alien", "?"), None);
        assert_eq!(
            parse_command("bot:movie\talien", "bot:"),
            Some(("movie".to_string(), "alien"))
        );
    }
}
