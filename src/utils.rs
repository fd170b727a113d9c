//! Utility functions for title normalization and log-friendly truncation.

/// Normalize a title for cross-source comparison.
///
/// Trims surrounding whitespace, collapses internal whitespace runs to a
/// single space, and lowercases, so `"Clean Code"` and `"  clean   code "`
/// compare equal.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_title("  Clean   Code "), "clean code");
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Truncate a string for logging purposes.
///
/// Long payload previews are truncated to `max` bytes with an ellipsis and
/// byte count indicator appended. Splits on a char boundary so multi-byte
/// payloads stay valid UTF-8.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_trims_and_folds_case() {
        assert_eq!(normalize_title("Clean Code"), "clean code");
        assert_eq!(normalize_title("  clean code "), "clean code");
        assert_eq!(normalize_title("CLEAN\t\tCODE"), "clean code");
    }

    #[test]
    fn test_normalize_title_collapses_inner_whitespace() {
        assert_eq!(normalize_title("The   Great    Gatsby"), "the great gatsby");
    }

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
    fn test_truncate_for_log_multibyte_boundary() {
        // 'é' is two bytes; cutting at 1 must not split it.
        let result = truncate_for_log("été", 1);
        assert!(result.starts_with('é') || result.starts_with("…"));
    }
}
