//! Math delimiter extraction.
//!
//! Splits text into literal and math spans. Recognised delimiters, in
//! priority order:
//!
//! - `$$ ... $$` - display math
//! - `\[ ... \]` - display math
//! - `$ ... $` - inline math (single line, no embedded `$`)
//! - `\( ... \)` - inline math
//!
//! A single combined pattern scanned left to right gives non-overlapping,
//! earliest-first matches. This pass must run before the inline tokenizer:
//! expressions routinely contain `*`, `_` and `~`.

use crate::inline::push_text;
use log::debug;
use mockdown_core::Span;
use regex::Regex;
use std::sync::LazyLock;

/// Combined math pattern; capture groups 1-2 are display, 3-4 inline.
static MATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$(?s:(.+?))\$\$|\\\[(?s:(.+?))\\\]|\$([^$\n]+?)\$|\\\((?s:(.+?))\\\)").unwrap()
});

/// Extract math expressions from `text`.
///
/// Returns `text`, `math-inline` and `math-display` spans in source order.
/// Delimiters are stripped and the expression is trimmed. An expression
/// that trims to nothing is kept as literal text, as is any unmatched
/// delimiter.
///
/// # Example
///
/// ```
/// use mockdown_parser::extract_math;
/// use mockdown_core::Span;
///
/// let spans = extract_math("area is $\\pi r^2$ here");
/// assert_eq!(
///     spans,
///     vec![
///         Span::text("area is "),
///         Span::math_inline("\\pi r^2"),
///         Span::text(" here"),
///     ]
/// );
/// ```
pub fn extract_math(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in MATH_RE.captures_iter(text) {
        let whole = caps.get_match();
        push_text(&mut spans, &text[last..whole.start()]);
        last = whole.end();

        let (display, expression) = if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            (true, m.as_str())
        } else if let Some(m) = caps.get(3).or_else(|| caps.get(4)) {
            (false, m.as_str())
        } else {
            (false, "")
        };

        let expression = expression.trim();
        if expression.is_empty() {
            debug!("empty math expression kept as text: {:?}", whole.as_str());
            push_text(&mut spans, whole.as_str());
        } else if display {
            spans.push(Span::math_display(expression));
        } else {
            spans.push(Span::math_inline(expression));
        }
    }

    push_text(&mut spans, &text[last..]);
    spans
}
