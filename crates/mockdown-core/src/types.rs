//! Document model: blocks and inline spans.
//!
//! A document is an ordered `Vec<Block>`; a block's text is turned into an
//! ordered `Vec<Span>` by the inline pass. Both are plain values created
//! fresh on every parse call.

use crate::enums::{BlockKind, SpanKind};
use serde::{Deserialize, Serialize};

/// Language recorded for a code block whose fence carries no tag.
pub const PLAIN_LANGUAGE: &str = "plain";

/// Kind-specific payload of a [`Block`].
///
/// Exactly one payload exists per block, so the enum carries it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockContent {
    /// Lines joined with single spaces
    Paragraph { text: String },
    /// Heading of `level` 1-6
    Heading { level: u8, text: String },
    /// Fenced code, content kept verbatim
    Code { language: String, code: String },
    /// Quoted lines with the marker stripped, joined with newlines
    Blockquote { text: String },
    /// Flat list, one entry per source line
    List { ordered: bool, items: Vec<String> },
    /// Horizontal rule
    Hr,
    /// Table rows; row 0 is the header, ragged rows kept as-is
    Table { rows: Vec<Vec<String>> },
}

/// A typed unit of document structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// 0-indexed number of the first source line consumed
    pub start_line: usize,
    /// Source lines consumed to produce this block
    pub raw_lines: Vec<String>,
    /// Kind-specific payload
    pub content: BlockContent,
}

impl Block {
    /// Create a block from its payload and the lines it consumed.
    pub fn new(start_line: usize, raw_lines: Vec<String>, content: BlockContent) -> Self {
        Self {
            start_line,
            raw_lines,
            content,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self.content {
            BlockContent::Paragraph { .. } => BlockKind::Paragraph,
            BlockContent::Heading { .. } => BlockKind::Heading,
            BlockContent::Code { .. } => BlockKind::Code,
            BlockContent::Blockquote { .. } => BlockKind::Blockquote,
            BlockContent::List { .. } => BlockKind::List,
            BlockContent::Hr => BlockKind::Hr,
            BlockContent::Table { .. } => BlockKind::Table,
        }
    }

    /// One past the last source line consumed.
    pub fn end_line(&self) -> usize {
        self.start_line + self.raw_lines.len()
    }

    /// Text of a paragraph, heading or blockquote.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Paragraph { text }
            | BlockContent::Heading { text, .. }
            | BlockContent::Blockquote { text } => Some(text),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<u8> {
        match self.content {
            BlockContent::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Code { language, .. } => Some(language),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Code { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn ordered(&self) -> Option<bool> {
        match self.content {
            BlockContent::List { ordered, .. } => Some(ordered),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[String]> {
        match &self.content {
            BlockContent::List { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<&[Vec<String>]> {
        match &self.content {
            BlockContent::Table { rows } => Some(rows),
            _ => None,
        }
    }
}

impl std::fmt::Display for Block {
    /// One outline line: 1-based inclusive line range, kind, payload.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}-{} {}", self.start_line + 1, self.end_line(), self.kind())?;
        match &self.content {
            BlockContent::Paragraph { text } | BlockContent::Blockquote { text } => {
                write!(f, " {:?}", text)
            }
            BlockContent::Heading { level, text } => write!(f, " h{} {:?}", level, text),
            BlockContent::Code { language, code } => write!(f, " {} {:?}", language, code),
            BlockContent::List { ordered, items } => {
                let style = if *ordered { "ordered" } else { "unordered" };
                write!(f, " {} {:?}", style, items)
            }
            BlockContent::Hr => Ok(()),
            BlockContent::Table { rows } => write!(f, " {:?}", rows),
        }
    }
}

/// Render a document as a textual outline, one block per line.
///
/// # Example
///
/// ```
/// use mockdown_core::{outline, Block, BlockContent};
///
/// let blocks = vec![Block::new(
///     0,
///     vec!["# Hi".to_string()],
///     BlockContent::Heading { level: 1, text: "Hi".to_string() },
/// )];
/// assert_eq!(outline(&blocks), "L1-1 heading h1 \"Hi\"");
/// ```
pub fn outline(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A typed unit of inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub kind: SpanKind,
    /// Text to render with markers stripped; the label for links and the
    /// raw expression source for math.
    pub content: String,
    /// Target of a link span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Span {
    /// Create a span of any non-link kind.
    pub fn new(kind: SpanKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            href: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(SpanKind::Text, content)
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Self::new(SpanKind::Bold, content)
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Self::new(SpanKind::Italic, content)
    }

    pub fn strikethrough(content: impl Into<String>) -> Self {
        Self::new(SpanKind::Strikethrough, content)
    }

    pub fn code(content: impl Into<String>) -> Self {
        Self::new(SpanKind::Code, content)
    }

    pub fn math_inline(content: impl Into<String>) -> Self {
        Self::new(SpanKind::MathInline, content)
    }

    pub fn math_display(content: impl Into<String>) -> Self {
        Self::new(SpanKind::MathDisplay, content)
    }

    /// Create a link span.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Link,
            content: label.into(),
            href: Some(href.into()),
        }
    }
}

/// Concatenate the content of a span sequence.
///
/// For input with balanced markers this reproduces the source text with
/// only the marker syntax removed.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.content.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_accessors() {
        let block = Block::new(
            3,
            vec!["# Title".to_string()],
            BlockContent::Heading {
                level: 1,
                text: "Title".to_string(),
            },
        );
        assert_eq!(block.kind(), BlockKind::Heading);
        assert_eq!(block.level(), Some(1));
        assert_eq!(block.text(), Some("Title"));
        assert_eq!(block.language(), None);
        assert_eq!(block.items(), None);
        assert_eq!(block.end_line(), 4);
    }

    #[test]
    fn test_list_accessors() {
        let block = Block::new(
            0,
            vec!["1. a".to_string(), "2. b".to_string()],
            BlockContent::List {
                ordered: true,
                items: vec!["a".to_string(), "b".to_string()],
            },
        );
        assert_eq!(block.kind(), BlockKind::List);
        assert_eq!(block.ordered(), Some(true));
        assert_eq!(block.items().map(|i| i.len()), Some(2));
        assert_eq!(block.text(), None);
    }

    #[test]
    fn test_span_constructors() {
        let link = Span::link("docs", "https://example.com");
        assert_eq!(link.kind, SpanKind::Link);
        assert_eq!(link.content, "docs");
        assert_eq!(link.href.as_deref(), Some("https://example.com"));

        let bold = Span::bold("hi");
        assert_eq!(bold.kind, SpanKind::Bold);
        assert!(bold.href.is_none());
    }

    #[test]
    fn test_outline_lines() {
        let blocks = vec![
            Block::new(
                0,
                vec!["```js".to_string(), "x".to_string(), "```".to_string(), "".to_string()],
                BlockContent::Code {
                    language: "js".to_string(),
                    code: "x".to_string(),
                },
            ),
            Block::new(4, vec!["---".to_string()], BlockContent::Hr),
        ];
        assert_eq!(outline(&blocks), "L1-4 code js \"x\"\nL5-5 hr");
    }

    #[test]
    fn test_plain_text() {
        let spans = vec![Span::text("a "), Span::bold("b"), Span::code(" c")];
        assert_eq!(plain_text(&spans), "a b c");
    }
}
