//! ANSI text processing utilities.
//!
//! Width calculations here ignore escape sequences and use Unicode display
//! widths, so CJK text and emoji line up in tables and wrapped paragraphs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

/// Regex pattern for all ANSI escape sequences including OSC hyperlinks.
pub const ANSIESCAPE: &str = r"\x1b(?:\[[0-9;?]*[a-zA-Z]|\][0-9]*;[^\x1b\x07]*(?:\x1b\\|\x07))";

static ANSIESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ANSIESCAPE).unwrap());

/// Splits text into SGR codes and runs of plain text.
static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\x1b\[[0-9;]*m|\x1b\][^\x1b\x07]*(?:\x1b\\|\x07)|[^\x1b]+)").unwrap());

/// Remove all ANSI escape sequences from text.
///
/// # Example
///
/// ```
/// use mockdown_ansi::utils::visible;
/// assert_eq!(visible("\x1b[1mBold\x1b[0m text"), "Bold text");
/// ```
pub fn visible(text: &str) -> String {
    ANSIESCAPE_RE.replace_all(text, "").to_string()
}

/// Display width of text in terminal columns, ignoring escapes.
///
/// # Example
///
/// ```
/// use mockdown_ansi::utils::visible_length;
/// assert_eq!(visible_length("\x1b[1mHello\x1b[0m"), 5);
/// assert_eq!(visible_length("你好"), 4);
/// ```
pub fn visible_length(text: &str) -> usize {
    visible(text).width()
}

/// Split text into escape sequences and regular text segments.
///
/// # Example
///
/// ```
/// use mockdown_ansi::utils::split_up;
/// let parts = split_up("\x1b[1mBold\x1b[0m text");
/// assert_eq!(parts, vec!["\x1b[1m", "Bold", "\x1b[0m", " text"]);
/// ```
pub fn split_up(line: &str) -> Vec<String> {
    SPLIT_RE
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Check if a string starts with an escape sequence.
pub fn is_ansi_code(s: &str) -> bool {
    s.starts_with('\x1b')
}

/// Parse SGR parameters from a code like `\x1b[1;4m`.
///
/// An empty parameter list means reset and is returned as `[0]`.
pub fn parse_sgr_params(code: &str) -> Vec<u32> {
    let inner = code.trim_start_matches("\x1b[").trim_end_matches('m');

    if inner.is_empty() {
        return vec![0];
    }

    inner.split(';').filter_map(|s| s.parse().ok()).collect()
}

/// Wrap text to `width` columns, preserving ANSI codes.
///
/// Breaks at spaces. Formatting active at a break is closed with a reset
/// and reopened on the next line. Words wider than `width` are kept whole.
///
/// # Example
///
/// ```
/// use mockdown_ansi::utils::wrap_ansi;
/// let lines = wrap_ansi("Hello world, this is a long line", 15);
/// assert_eq!(lines, vec!["Hello world,", "this is a long", "line"]);
/// ```
pub fn wrap_ansi(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;
    let mut active_codes: Vec<String> = Vec::new();

    for segment in split_up(text) {
        if is_ansi_code(&segment) {
            if segment.starts_with("\x1b[") {
                if parse_sgr_params(&segment).contains(&0) {
                    active_codes.clear();
                } else {
                    active_codes.push(segment.clone());
                }
            }
            current_line.push_str(&segment);
            continue;
        }

        for word in segment.split_inclusive(' ') {
            let word_width = word.trim_end().width();

            if current_width + word_width > width && current_width > 0 {
                let trimmed_len = current_line.trim_end_matches(' ').len();
                current_line.truncate(trimmed_len);
                if !active_codes.is_empty() {
                    current_line.push_str(crate::codes::RESET);
                }
                lines.push(current_line);

                current_line = active_codes.join("");
                current_width = 0;
            }

            current_line.push_str(word);
            current_width += word.width();
        }
    }

    if !current_line.is_empty() || lines.is_empty() {
        let trimmed_len = current_line.trim_end_matches(' ').len();
        current_line.truncate(trimmed_len);
        lines.push(current_line);
    }

    lines
}

/// Pad `text` with spaces to `width` visible columns.
///
/// Text already at or past `width` is returned unchanged.
pub fn pad_right(text: &str, width: usize) -> String {
    let len = visible_length(text);
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible() {
        assert_eq!(visible("\x1b[1mBold\x1b[0m"), "Bold");
        assert_eq!(visible("No codes"), "No codes");
        assert_eq!(visible("\x1b[38;2;255;0;0mRed\x1b[0m"), "Red");
    }

    #[test]
    fn test_visible_strips_hyperlinks() {
        let link = crate::codes::hyperlink("https://example.com", "docs");
        assert_eq!(visible(&link), "docs");
        assert_eq!(visible_length(&link), 4);
    }

    #[test]
    fn test_visible_length() {
        assert_eq!(visible_length("\x1b[1mHello\x1b[0m"), 5);
        assert_eq!(visible_length(""), 0);
    }

    #[test]
    fn test_parse_sgr_params() {
        assert_eq!(parse_sgr_params("\x1b[1m"), vec![1]);
        assert_eq!(parse_sgr_params("\x1b[1;4m"), vec![1, 4]);
        assert_eq!(parse_sgr_params("\x1b[m"), vec![0]);
        assert_eq!(parse_sgr_params("\x1b[38;2;255;0;0m"), vec![38, 2, 255, 0, 0]);
    }

    #[test]
    fn test_wrap_plain() {
        assert_eq!(wrap_ansi("Hello world", 6), vec!["Hello", "world"]);
        assert_eq!(wrap_ansi("short", 80), vec!["short"]);
        assert_eq!(wrap_ansi("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_long_word_kept_whole() {
        assert_eq!(wrap_ansi("a verylongword b", 4), vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn test_wrap_reopens_codes() {
        let lines = wrap_ansi("\x1b[1mone two\x1b[0m", 4);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "\x1b[1mone\x1b[0m");
        assert_eq!(lines[1], "\x1b[1mtwo\x1b[0m");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("\x1b[1mab\x1b[0m", 3), "\x1b[1mab\x1b[0m ");
        assert_eq!(pad_right("abcdef", 3), "abcdef");
    }
}
