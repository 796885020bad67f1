//! Mockdown Parser
//!
//! Turns a flat string (message body, email body, assistant reply) into an
//! ordered sequence of typed blocks, and a block's text into ordered inline
//! spans.
//!
//! # Overview
//!
//! - [`segment`] - block pass: one forward scan over lines, 1-line lookahead
//! - [`tokenize`] / [`parse_inline`] - inline pass: earliest-match markers
//! - [`extract_math`] - `$`/`$$`/`\(`/`\[` delimiter extraction
//!
//! Every function here is pure: no shared state, no errors. Malformed input
//! degrades to paragraphs, ragged rows or literal text.
//!
//! # Example
//!
//! ```
//! use mockdown_parser::segment;
//! use mockdown_core::BlockKind;
//!
//! let blocks = segment("# Hello\n\nSome *text*.\n\n- one\n- two");
//! let kinds: Vec<_> = blocks.iter().map(|b| b.kind()).collect();
//! assert_eq!(kinds, vec![BlockKind::Heading, BlockKind::Paragraph, BlockKind::List]);
//! ```

pub mod inline;
pub mod math;

pub use inline::{parse_inline, tokenize, tokenize_with, InlineOptions, InlineProfile, MarkerSet};
pub use math::extract_math;

use log::debug;
use mockdown_core::{Block, BlockContent, PLAIN_LANGUAGE};
use regex::Regex;
use std::sync::LazyLock;

// =============================================================================
// Regex patterns
// =============================================================================

/// Regex for an opening code fence: ``` or ~~~ followed by the language tag
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(```+|~~~+)(.*)$").unwrap());

/// Regex for a closing code fence
static CODE_FENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(```+|~~~+)\s*$").unwrap());

/// Regex for headings; the space after the markers is mandatory
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*)$").unwrap());

/// Regex for horizontal rules (matched against the trimmed line)
static HR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());

/// Regex for blockquote lines
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*>[ \t]?(.*)$").unwrap());

/// Regex for unordered list items: -, *, +
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+][ \t]+(.*)$").unwrap());

/// Regex for ordered list items: 1.
static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.[ \t]+(.*)$").unwrap());

/// Regex for a table separator row (only contains |, -, :, spaces)
static TABLE_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s|:-]+$").unwrap());

/// Characters a backslash may escape at the start of a line.
const ESCAPABLE: &[char] = &['#', '>', '-', '*', '+', '_', '~', '|', '`'];

// =============================================================================
// Segmenter
// =============================================================================

/// Options for the block pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Treat `\#`, `\>`, `\-`, `\1.` etc. at line start as literal paragraph
    /// text, dropping the backslash. Off by default.
    pub backslash_escape: bool,
}

/// Block segmenter.
///
/// Stateless apart from its options; one instance can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter {
    options: SegmentOptions,
}

/// Segment a document with default options.
pub fn segment(document: &str) -> Vec<Block> {
    Segmenter::new().segment(document)
}

impl Segmenter {
    /// Create a segmenter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a segmenter with specific options.
    pub fn with_options(options: SegmentOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Partition `document` into blocks.
    ///
    /// Rules are tried at each line start in a fixed order (fence, heading,
    /// rule, quote, list, table, paragraph) and the first match wins. Blank
    /// lines produce no block of their own: they are recorded in the raw
    /// lines of the preceding block, or of the first block when they lead
    /// the document, so consumed lines always partition the input.
    pub fn segment(&self, document: &str) -> Vec<Block> {
        let lines: Vec<&str> = document.lines().collect();
        let mut blocks: Vec<Block> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if lines[i].trim().is_empty() {
                if let Some(block) = blocks.last_mut() {
                    block.raw_lines.push(lines[i].to_string());
                }
                i += 1;
                continue;
            }

            let (content, end) = self
                .try_structural(&lines, i)
                .unwrap_or_else(|| self.parse_paragraph(&lines, i));

            // Leading blank lines belong to the first block
            let start = if blocks.is_empty() { 0 } else { i };
            let raw_lines = lines[start..end].iter().map(|l| l.to_string()).collect();
            blocks.push(Block::new(start, raw_lines, content));
            i = end;
        }

        blocks
    }

    /// Try rules 1-6 at line `i`, returning the block and the index one past
    /// its last line.
    fn try_structural(&self, lines: &[&str], i: usize) -> Option<(BlockContent, usize)> {
        if self.is_escaped(lines[i]) {
            return None;
        }
        parse_code_fence(lines, i)
            .or_else(|| parse_heading(lines[i]).map(|c| (c, i + 1)))
            .or_else(|| parse_hr(lines[i]).map(|c| (c, i + 1)))
            .or_else(|| parse_blockquote(lines, i))
            .or_else(|| parse_list(lines, i))
            .or_else(|| parse_table(lines, i))
    }

    /// Whether the line at `i` would open a structural block. Used to stop
    /// paragraph and table accumulation without consuming anything.
    fn opens_block(&self, lines: &[&str], i: usize) -> bool {
        let line = lines[i];
        if self.is_escaped(line) {
            return false;
        }
        open_fence(line).is_some()
            || HEADING_RE.is_match(line)
            || HR_RE.is_match(line.trim())
            || QUOTE_RE.is_match(line)
            || BULLET_RE.is_match(line)
            || ORDERED_RE.is_match(line)
            || is_table_start(lines, i)
    }

    fn is_escaped(&self, line: &str) -> bool {
        if !self.options.backslash_escape {
            return false;
        }
        let mut chars = line.trim_start().chars();
        chars.next() == Some('\\')
            && chars
                .next()
                .is_some_and(|c| ESCAPABLE.contains(&c) || c.is_ascii_digit())
    }

    /// Rule 8: join consecutive plain lines with single spaces.
    fn parse_paragraph(&self, lines: &[&str], i: usize) -> (BlockContent, usize) {
        let mut parts = vec![self.unescape(lines[i])];
        let mut j = i + 1;

        while j < lines.len() && !lines[j].trim().is_empty() && !self.opens_block(lines, j) {
            parts.push(self.unescape(lines[j]));
            j += 1;
        }

        (BlockContent::Paragraph { text: parts.join(" ") }, j)
    }

    fn unescape(&self, line: &str) -> String {
        let trimmed = line.trim();
        if self.is_escaped(line) {
            trimmed[1..].to_string()
        } else {
            trimmed.to_string()
        }
    }
}

// =============================================================================
// Block rules
// =============================================================================

/// Split an opening fence line into its fence and trimmed language tag.
///
/// A tag containing the fence character does not open a fence, so
/// `~~~gone~~~` and "```js```" stay paragraph text.
fn open_fence(line: &str) -> Option<(&str, &str)> {
    let caps = CODE_FENCE_RE.captures(line)?;
    let fence = caps.get(1)?.as_str();
    let tag = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    if tag.contains(&fence[..1]) {
        return None;
    }
    Some((fence, tag))
}

/// Rule 1: fenced code. An unterminated fence consumes to end of input.
fn parse_code_fence(lines: &[&str], i: usize) -> Option<(BlockContent, usize)> {
    let (fence, tag) = open_fence(lines[i])?;
    let language = if tag.is_empty() {
        PLAIN_LANGUAGE.to_string()
    } else {
        tag.to_string()
    };

    let mut body = Vec::new();
    let mut j = i + 1;
    let mut closed = false;

    while j < lines.len() {
        if closes_fence(lines[j], fence) {
            closed = true;
            j += 1;
            break;
        }
        body.push(lines[j]);
        j += 1;
    }

    if !closed {
        debug!(
            "unterminated code fence at line {}, consuming {} line(s) to end of input",
            i + 1,
            body.len()
        );
    }

    Some((
        BlockContent::Code {
            language,
            code: body.join("\n"),
        },
        j,
    ))
}

/// A closing fence uses the opening character and is at least as long.
fn closes_fence(line: &str, fence: &str) -> bool {
    let Some(caps) = CODE_FENCE_END_RE.captures(line) else {
        return false;
    };
    let end = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    end.starts_with(&fence[..1]) && end.len() >= fence.len()
}

/// Rule 2: `#` heading, levels 1-6.
fn parse_heading(line: &str) -> Option<BlockContent> {
    let caps = HEADING_RE.captures(line)?;
    let level = caps.get(1).map(|m| m.as_str().len()).unwrap_or(1) as u8;
    let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    Some(BlockContent::Heading {
        level,
        text: text.to_string(),
    })
}

/// Rule 3: `---`, `***` or `___`, three or more.
fn parse_hr(line: &str) -> Option<BlockContent> {
    HR_RE.is_match(line.trim()).then_some(BlockContent::Hr)
}

/// Rule 4: consecutive quote lines merged into one block.
///
/// Quote lines with nothing after the marker are kept in the raw lines but
/// left out of the text, which stays free of blank lines.
fn parse_blockquote(lines: &[&str], i: usize) -> Option<(BlockContent, usize)> {
    if !QUOTE_RE.is_match(lines[i]) {
        return None;
    }

    let mut parts = Vec::new();
    let mut j = i;
    while j < lines.len() {
        let Some(caps) = QUOTE_RE.captures(lines[j]) else {
            break;
        };
        let content = caps.get(1).map(|m| m.as_str().trim_end()).unwrap_or("");
        if !content.trim().is_empty() {
            parts.push(content);
        }
        j += 1;
    }

    Some((BlockContent::Blockquote { text: parts.join("\n") }, j))
}

/// Rule 5: flat list; switching between bullets and numbers ends the run.
fn parse_list(lines: &[&str], i: usize) -> Option<(BlockContent, usize)> {
    let (ordered, re) = if BULLET_RE.is_match(lines[i]) {
        (false, &*BULLET_RE)
    } else if ORDERED_RE.is_match(lines[i]) {
        (true, &*ORDERED_RE)
    } else {
        return None;
    };

    let mut items = Vec::new();
    let mut j = i;
    while j < lines.len() {
        let Some(caps) = re.captures(lines[j]) else {
            break;
        };
        items.push(caps.get(1).map(|m| m.as_str().trim_end()).unwrap_or("").to_string());
        j += 1;
    }

    Some((BlockContent::List { ordered, items }, j))
}

/// Whether line `i` holds a column separator and line `i + 1` is a
/// dash separator row.
fn is_table_start(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|') && lines.get(i + 1).is_some_and(|next| is_separator_row(next))
}

/// Dashes, colons and pipes only, with at least one dash, and either a pipe
/// or three dashes so a lone `-` is not taken for a separator.
fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    let dashes = trimmed.chars().filter(|&c| c == '-').count();
    TABLE_SEP_RE.is_match(trimmed) && dashes > 0 && (trimmed.contains('|') || dashes >= 3)
}

/// Rule 6: pipe table.
///
/// The header row fixes nothing: rows are stored exactly as split, so a
/// short or long row stays short or long. The body runs until a blank line,
/// end of input, or a line that opens another block.
fn parse_table(lines: &[&str], i: usize) -> Option<(BlockContent, usize)> {
    if !is_table_start(lines, i) {
        return None;
    }

    let header = split_row(lines[i]);
    let columns = header.len();
    let mut rows = vec![header];
    let mut j = i + 2;

    while j < lines.len() {
        let line = lines[j];
        if line.trim().is_empty() || opens_non_table_block(line) {
            break;
        }
        let row = split_row(line);
        if row.len() != columns {
            debug!(
                "ragged table row at line {}: {} cell(s), header has {}",
                j + 1,
                row.len(),
                columns
            );
        }
        rows.push(row);
        j += 1;
    }

    Some((BlockContent::Table { rows }, j))
}

fn opens_non_table_block(line: &str) -> bool {
    open_fence(line).is_some()
        || HEADING_RE.is_match(line)
        || HR_RE.is_match(line.trim())
        || QUOTE_RE.is_match(line)
        || BULLET_RE.is_match(line)
        || ORDERED_RE.is_match(line)
}

/// Split a table row on `|`, dropping one outer pipe on each side.
fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}
