//! Core enums for the mockdown document model.
//!
//! These name the block and span kinds produced by the parser and the
//! presentation variants understood by the render dispatcher.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of a block-level unit of document structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Run of plain lines joined with spaces
    Paragraph,
    /// `#`..`######` heading
    Heading,
    /// Fenced code block
    Code,
    /// Run of `>`-prefixed lines
    Blockquote,
    /// Flat ordered or unordered list
    List,
    /// Horizontal rule
    Hr,
    /// Pipe table
    Table,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Paragraph => write!(f, "paragraph"),
            BlockKind::Heading => write!(f, "heading"),
            BlockKind::Code => write!(f, "code"),
            BlockKind::Blockquote => write!(f, "blockquote"),
            BlockKind::List => write!(f, "list"),
            BlockKind::Hr => write!(f, "hr"),
            BlockKind::Table => write!(f, "table"),
        }
    }
}

/// The kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    /// Literal text
    Text,
    /// `**text**` or `*text*`
    Bold,
    /// `_text_`
    Italic,
    /// `~~text~~` or `~text~`
    Strikethrough,
    /// `` `code` ``
    Code,
    /// `[label](url)` or a bare URL
    Link,
    /// `$...$` or `\(...\)`
    MathInline,
    /// `$$...$$` or `\[...\]`
    MathDisplay,
}

impl SpanKind {
    /// Whether this span holds a math expression.
    pub fn is_math(&self) -> bool {
        matches!(self, SpanKind::MathInline | SpanKind::MathDisplay)
    }
}

impl std::fmt::Display for SpanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpanKind::Text => write!(f, "text"),
            SpanKind::Bold => write!(f, "bold"),
            SpanKind::Italic => write!(f, "italic"),
            SpanKind::Strikethrough => write!(f, "strikethrough"),
            SpanKind::Code => write!(f, "code"),
            SpanKind::Link => write!(f, "link"),
            SpanKind::MathInline => write!(f, "math-inline"),
            SpanKind::MathDisplay => write!(f, "math-display"),
        }
    }
}

/// Presentation variant used by the render dispatcher.
///
/// Variants only change spacing and typography, never the parse result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Document-style rendering with generous spacing
    #[default]
    Full,
    /// Chat-bubble rendering
    Compact,
    /// Smallest footprint, used for previews and notifications
    Minimal,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Full => write!(f, "full"),
            Variant::Compact => write!(f, "compact"),
            Variant::Minimal => write!(f, "minimal"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Variant::Full),
            "compact" => Ok(Variant::Compact),
            "minimal" => Ok(Variant::Minimal),
            other => Err(format!("unknown variant: {}", other)),
        }
    }
}
