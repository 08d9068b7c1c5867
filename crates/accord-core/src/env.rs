//! Environment value cleaning.
//!
//! Deployment environments tend to carry inline comments in their
//! configuration values (`https://example.com  # staging override`). Values
//! are cleaned here once, before any consumer sees them.

/// Strip a trailing inline comment and surrounding whitespace from a raw
/// configuration value.
///
/// A `#` at the start of the value or preceded by whitespace begins a
/// comment that runs to the end of the string. A `#` embedded in the value
/// itself (e.g. a URL fragment) is kept. Returns `None` when nothing
/// remains after cleaning, so callers can tell "absent" apart from an empty
/// override and fall back to their default.
#[must_use]
pub fn clean_value(raw: &str) -> Option<String> {
    let mut end = raw.len();
    let mut after_whitespace = true;
    for (i, c) in raw.char_indices() {
        if c == '#' && after_whitespace {
            end = i;
            break;
        }
        after_whitespace = c.is_whitespace();
    }

    let cleaned = raw[..end].trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_trimmed() {
        assert_eq!(
            clean_value("  https://example.com  "),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_trailing_comment_is_stripped() {
        assert_eq!(
            clean_value("https://example.com # staging override"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_comment_only_value_is_absent() {
        assert_eq!(clean_value("   # just a comment"), None);
    }

    #[test]
    fn test_leading_hash_is_a_comment() {
        assert_eq!(clean_value("# disabled"), None);
    }

    #[test]
    fn test_empty_and_whitespace_are_absent() {
        assert_eq!(clean_value(""), None);
        assert_eq!(clean_value("   \t "), None);
    }

    #[test]
    fn test_embedded_hash_is_kept() {
        assert_eq!(
            clean_value("https://example.com/#pricing"),
            Some("https://example.com/#pricing".to_string())
        );
    }

    #[test]
    fn test_tab_before_hash_starts_comment() {
        assert_eq!(
            clean_value("https://example.com\t# note"),
            Some("https://example.com".to_string())
        );
    }
}
