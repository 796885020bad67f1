//! Terminal output sanitization.
//!
//! Document text is untrusted: a message body could carry escape sequences
//! that move the cursor or retitle the terminal. Everything the painter
//! emits from document content goes through here first.

/// Remove control characters except newline and tab.
///
/// # Example
/// ```
/// use mockdown_ansi::sanitize::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("Hello\x1b[31mWorld"), "Hello[31mWorld");
/// ```
pub fn sanitize_for_terminal(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Whether a URL may be placed inside an OSC 8 hyperlink.
///
/// Only http, https and mailto schemes are allowed, and the URL must not
/// contain control characters.
///
/// # Example
/// ```
/// use mockdown_ansi::sanitize::is_safe_url;
///
/// assert!(is_safe_url("https://example.com"));
/// assert!(!is_safe_url("javascript:alert(1)"));
/// assert!(!is_safe_url("https://evil.com\x1b]0;pwned\x07"));
/// ```
pub fn is_safe_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let safe_scheme = ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));

    safe_scheme && !url.chars().any(|c| c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_newline_and_tab() {
        assert_eq!(sanitize_for_terminal("a\tb\nc"), "a\tb\nc");
        assert_eq!(sanitize_for_terminal("bell\x07"), "bell");
    }

    #[test]
    fn test_url_schemes() {
        assert!(is_safe_url("HTTP://EXAMPLE.COM"));
        assert!(is_safe_url("mailto:someone@example.com"));
        assert!(!is_safe_url("file:///etc/passwd"));
        assert!(!is_safe_url("data:text/html,hi"));
    }
}
