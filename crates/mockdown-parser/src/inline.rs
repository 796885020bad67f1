//! Inline span tokenizer.
//!
//! Turns one logical text run into an ordered list of typed spans. The scan
//! is a single non-recursive pass: at each step every enabled marker
//! pattern is searched in the remaining text and the match that starts
//! earliest wins, with ties going to the pattern listed first:
//!
//! 1. link `[label](url)`
//! 2. inline code `` `code` ``
//! 3. bold `**text**` / `*text*`
//! 4. italic `_text_`
//! 5. strikethrough `~~text~~` / `~text~`
//!
//! Text in front of a match, and the tail once nothing matches, goes
//! through the bare-URL auto-linker. Captured content is never
//! re-tokenized, so `**a _b_**` yields one bold span `a _b_`.

use crate::math::extract_math;
use mockdown_core::{Span, SpanKind};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// =============================================================================
// Regex patterns
// =============================================================================

/// Regex for `[label](url)` links
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());

/// Regex for single-backtick inline code
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// Regex for bold: `**text**` first, then `*text*`
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|\*([^*\n]+?)\*").unwrap());

/// Regex for underscore italic
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_\n]+?)_").unwrap());

/// Regex for strikethrough: `~~text~~` first, then `~text~`
static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~(.+?)~~|~([^~\n]+?)~").unwrap());

/// Regex for bare URLs; trailing sentence punctuation is left outside the link
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"]*[^\s<>".,;:!?')\]]"#).unwrap());

// =============================================================================
// Options
// =============================================================================

/// Which inline marker patterns are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSet {
    /// `[label](url)`
    pub link: bool,
    /// `` `code` ``
    pub code: bool,
    /// `**text**` and `*text*`
    pub bold: bool,
    /// `_text_`
    pub italic: bool,
    /// `~~text~~` and `~text~`
    pub strikethrough: bool,
    /// Bare `http(s)://` URLs
    pub autolink: bool,
}

impl MarkerSet {
    /// Every marker enabled.
    pub const ALL: MarkerSet = MarkerSet {
        link: true,
        code: true,
        bold: true,
        italic: true,
        strikethrough: true,
        autolink: true,
    };

    /// Every marker disabled; text passes through untouched.
    pub const NONE: MarkerSet = MarkerSet {
        link: false,
        code: false,
        bold: false,
        italic: false,
        strikethrough: false,
        autolink: false,
    };
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Named inline configurations for the three kinds of consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineProfile {
    /// Chat bubbles: emphasis, code and bare URLs, no `[label](url)` syntax
    Chat,
    /// AI assistant prose: every marker plus the math-first pass
    Assistant,
    /// Markdown documents: every marker, no math
    #[default]
    Markdown,
}

impl InlineProfile {
    /// Inline options for this profile.
    pub fn options(self) -> InlineOptions {
        match self {
            InlineProfile::Chat => InlineOptions {
                markers: MarkerSet {
                    link: false,
                    ..MarkerSet::ALL
                },
                math: false,
            },
            InlineProfile::Assistant => InlineOptions {
                markers: MarkerSet::ALL,
                math: true,
            },
            InlineProfile::Markdown => InlineOptions {
                markers: MarkerSet::ALL,
                math: false,
            },
        }
    }
}

impl std::fmt::Display for InlineProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InlineProfile::Chat => write!(f, "chat"),
            InlineProfile::Assistant => write!(f, "assistant"),
            InlineProfile::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for InlineProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(InlineProfile::Chat),
            "assistant" => Ok(InlineProfile::Assistant),
            "markdown" => Ok(InlineProfile::Markdown),
            other => Err(format!("unknown inline profile: {}", other)),
        }
    }
}

/// Full inline pass configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineOptions {
    /// Enabled marker patterns
    pub markers: MarkerSet,
    /// Run math extraction before tokenizing
    pub math: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        InlineProfile::default().options()
    }
}

// =============================================================================
// Tokenizer
// =============================================================================

/// Tokenize `text` with every marker enabled.
///
/// # Example
///
/// ```
/// use mockdown_parser::tokenize;
/// use mockdown_core::Span;
///
/// assert_eq!(
///     tokenize("*a* `b`"),
///     vec![Span::bold("a"), Span::text(" "), Span::code("b")]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Span> {
    tokenize_with(text, &MarkerSet::ALL)
}

/// Tokenize `text` with the given marker set.
pub fn tokenize_with(text: &str, markers: &MarkerSet) -> Vec<Span> {
    let patterns: [(bool, SpanKind, &Regex); 5] = [
        (markers.link, SpanKind::Link, &*LINK_RE),
        (markers.code, SpanKind::Code, &*CODE_RE),
        (markers.bold, SpanKind::Bold, &*BOLD_RE),
        (markers.italic, SpanKind::Italic, &*ITALIC_RE),
        (markers.strikethrough, SpanKind::Strikethrough, &*STRIKE_RE),
    ];

    let mut spans = Vec::new();
    let mut rest = text;

    loop {
        let mut best: Option<(SpanKind, Captures<'_>)> = None;
        for (enabled, kind, re) in patterns.iter() {
            if !*enabled {
                continue;
            }
            if let Some(caps) = re.captures(rest) {
                let start = caps.get_match().start();
                let earlier = match &best {
                    Some((_, b)) => start < b.get_match().start(),
                    None => true,
                };
                if earlier {
                    best = Some((*kind, caps));
                }
            }
        }

        let Some((kind, caps)) = best else {
            autolink(rest, markers.autolink, &mut spans);
            break;
        };

        let whole = caps.get_match();
        autolink(&rest[..whole.start()], markers.autolink, &mut spans);

        let captured = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let span = if kind == SpanKind::Link {
            let href = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            Span::link(captured, href)
        } else {
            Span::new(kind, captured)
        };
        spans.push(span);

        rest = &rest[whole.end()..];
    }

    spans
}

/// Run the full inline pass for a consumer.
///
/// With `options.math` set, math spans are extracted first and only the
/// literal text between them is tokenized for emphasis markers.
///
/// # Example
///
/// ```
/// use mockdown_parser::{parse_inline, InlineProfile};
/// use mockdown_core::Span;
///
/// let spans = parse_inline("$a*b*c$", &InlineProfile::Assistant.options());
/// assert_eq!(spans, vec![Span::math_inline("a*b*c")]);
/// ```
pub fn parse_inline(text: &str, options: &InlineOptions) -> Vec<Span> {
    if !options.math {
        return tokenize_with(text, &options.markers);
    }

    let mut spans = Vec::new();
    for span in extract_math(text) {
        if span.kind == SpanKind::Text {
            spans.extend(tokenize_with(&span.content, &options.markers));
        } else {
            spans.push(span);
        }
    }
    spans
}

/// Split `text` into text and bare-URL link spans.
fn autolink(text: &str, enabled: bool, spans: &mut Vec<Span>) {
    if !enabled {
        push_text(spans, text);
        return;
    }

    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        push_text(spans, &text[last..m.start()]);
        spans.push(Span::link(m.as_str(), m.as_str()));
        last = m.end();
    }
    push_text(spans, &text[last..]);
}

/// Append literal text, merging with a preceding text span.
pub(crate) fn push_text(spans: &mut Vec<Span>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.kind == SpanKind::Text {
            last.content.push_str(text);
            return;
        }
    }
    spans.push(Span::text(text));
}
