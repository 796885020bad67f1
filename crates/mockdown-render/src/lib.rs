//! Mockdown Render
//!
//! This crate turns segmented blocks into visual nodes and paints them for
//! the terminal.
//!
//! # Features
//!
//! - **Render dispatch** - one visual node per block, typography picked by variant
//! - **Code blocks** - alias/theme resolution, highlighting, stable line numbers
//! - **Copy feedback** - clipboard write plus a timed "copied" indicator
//! - **Math** - typeset inline and display math with a raw-source fallback
//! - **Terminal painting** - headings, lists, tables, quotes and code as ANSI lines
//!
//! A failure while rendering one block never affects the others: collaborator
//! errors and panics fall back per block, and nothing escapes
//! [`render_document`].
//!
//! # Example
//!
//! ```
//! use mockdown_core::Variant;
//! use mockdown_parser::segment;
//! use mockdown_render::{render_document, Painter, VisualNode};
//!
//! let blocks = segment("# Title\n\nSome **bold** text.");
//! let nodes = render_document(&blocks, Variant::Full);
//! assert!(matches!(nodes[0], VisualNode::Heading { level: 1, .. }));
//!
//! let lines = Painter::new(40).paint(&nodes);
//! assert!(!lines.is_empty());
//! ```

pub mod clipboard;
pub mod code;
pub mod copy;
pub mod heading;
pub mod inline;
pub mod list;
pub mod painter;
pub mod palette;
pub mod table;
pub mod text;
pub mod timer;
pub mod typography;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard, MAX_CLIPBOARD_SIZE};
pub use code::{paint_code, CodeLine, CodeRenderer, RenderedCode};
pub use copy::{CopyFeedback, CopyState, COPY_RESET};
pub use inline::{build_inline, visible_text, InlineNode};
pub use painter::Painter;
pub use palette::Palette;
pub use timer::{ManualScheduler, Scheduler, ThreadScheduler, TimerId};
pub use typography::{typography, Typography, Weight};

use log::warn;
use mockdown_config::Config;
use mockdown_core::{Block, BlockContent, BlockKind, Variant};
use mockdown_math::{Typesetter, UnicodeTypesetter};
use mockdown_parser::{InlineOptions, InlineProfile};
use mockdown_syntax::{Highlighter, SyntaxHighlighter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Visual representation of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualNode {
    Heading {
        level: u8,
        content: Vec<InlineNode>,
        typography: Typography,
    },
    Paragraph {
        content: Vec<InlineNode>,
        typography: Typography,
    },
    /// One inline run per quoted line
    Quote {
        lines: Vec<Vec<InlineNode>>,
        typography: Typography,
    },
    List {
        ordered: bool,
        items: Vec<Vec<InlineNode>>,
        typography: Typography,
    },
    /// Rows of cells; the first row is the header
    Table {
        rows: Vec<Vec<Vec<InlineNode>>>,
        typography: Typography,
    },
    Rule {
        typography: Typography,
    },
    Code {
        code: RenderedCode,
        typography: Typography,
    },
}

impl VisualNode {
    pub fn typography(&self) -> &Typography {
        match self {
            VisualNode::Heading { typography, .. }
            | VisualNode::Paragraph { typography, .. }
            | VisualNode::Quote { typography, .. }
            | VisualNode::List { typography, .. }
            | VisualNode::Table { typography, .. }
            | VisualNode::Rule { typography }
            | VisualNode::Code { typography, .. } => typography,
        }
    }

    /// Block kind this node was dispatched from.
    pub fn kind(&self) -> BlockKind {
        match self {
            VisualNode::Heading { .. } => BlockKind::Heading,
            VisualNode::Paragraph { .. } => BlockKind::Paragraph,
            VisualNode::Quote { .. } => BlockKind::Blockquote,
            VisualNode::List { .. } => BlockKind::List,
            VisualNode::Table { .. } => BlockKind::Table,
            VisualNode::Rule { .. } => BlockKind::Hr,
            VisualNode::Code { .. } => BlockKind::Code,
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Maps blocks to visual nodes.
///
/// Holds the collaborators used while dispatching: the syntax highlighter
/// for code blocks, the math typesetter, and the inline options of the
/// consuming surface.
pub struct Dispatcher {
    highlighter: Box<dyn SyntaxHighlighter>,
    typesetter: Box<dyn Typesetter>,
    inline: InlineOptions,
    theme: Option<String>,
    dark: bool,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("inline", &self.inline)
            .field("theme", &self.theme)
            .field("dark", &self.dark)
            .finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// A dispatcher with the syntect highlighter, the Unicode typesetter
    /// and the markdown inline profile.
    pub fn new() -> Self {
        Self {
            highlighter: Box::new(Highlighter::new()),
            typesetter: Box::new(UnicodeTypesetter::new()),
            inline: InlineProfile::Markdown.options(),
            theme: None,
            dark: true,
        }
    }

    /// A dispatcher configured from `[features]` and `[style]`.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_inline_options(config.features.inline_options())
            .with_theme(Some(config.style.theme.clone()), config.style.dark)
    }

    pub fn with_highlighter(mut self, highlighter: Box<dyn SyntaxHighlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn with_typesetter(mut self, typesetter: Box<dyn Typesetter>) -> Self {
        self.typesetter = typesetter;
        self
    }

    pub fn with_inline_options(mut self, options: InlineOptions) -> Self {
        self.inline = options;
        self
    }

    /// Code theme name and background; unknown names fall back by `dark`.
    pub fn with_theme(mut self, theme: Option<String>, dark: bool) -> Self {
        self.theme = theme;
        self.dark = dark;
        self
    }

    pub fn inline_options(&self) -> &InlineOptions {
        &self.inline
    }

    fn inline(&self, text: &str) -> Vec<InlineNode> {
        build_inline(text, &self.inline, self.typesetter.as_ref())
    }

    /// Map one block to its visual node.
    ///
    /// Code blocks and rules are never inline-parsed. List items and table
    /// cells are parsed one by one.
    pub fn dispatch(&self, block: &Block, variant: Variant) -> VisualNode {
        let level = block.level().unwrap_or(0);
        let typography = typography(block.kind(), level, variant);

        match &block.content {
            BlockContent::Heading { level, text } => VisualNode::Heading {
                level: *level,
                content: self.inline(text),
                typography,
            },
            BlockContent::Paragraph { text } => VisualNode::Paragraph {
                content: self.inline(text),
                typography,
            },
            BlockContent::Blockquote { text } => VisualNode::Quote {
                lines: text.split('\n').map(|line| self.inline(line)).collect(),
                typography,
            },
            BlockContent::List { ordered, items } => VisualNode::List {
                ordered: *ordered,
                items: items.iter().map(|item| self.inline(item)).collect(),
                typography,
            },
            BlockContent::Table { rows } => VisualNode::Table {
                rows: rows
                    .iter()
                    .map(|row| row.iter().map(|cell| self.inline(cell)).collect())
                    .collect(),
                typography,
            },
            BlockContent::Hr => VisualNode::Rule { typography },
            BlockContent::Code { language, code } => VisualNode::Code {
                code: CodeRenderer::new(self.highlighter.as_ref(), self.dark).render(
                    language,
                    code,
                    self.theme.as_deref(),
                ),
                typography,
            },
        }
    }

    /// Map every block independently.
    ///
    /// A block whose dispatch panics is shown as a plain paragraph of its
    /// raw lines; the remaining blocks are unaffected.
    pub fn render_document(&self, blocks: &[Block], variant: Variant) -> Vec<VisualNode> {
        blocks
            .iter()
            .map(|block| {
                catch_unwind(AssertUnwindSafe(|| self.dispatch(block, variant))).unwrap_or_else(|_| {
                    warn!(
                        "rendering {} block at line {} failed, showing raw text",
                        block.kind(),
                        block.start_line
                    );
                    raw_fallback(block, variant)
                })
            })
            .collect()
    }
}

fn raw_fallback(block: &Block, variant: Variant) -> VisualNode {
    let text = block
        .raw_lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    VisualNode::Paragraph {
        content: vec![InlineNode::Text(text)],
        typography: typography(BlockKind::Paragraph, 0, variant),
    }
}

thread_local! {
    static DEFAULT_DISPATCHER: Dispatcher = Dispatcher::new();
}

/// Map one block with the default dispatcher.
pub fn dispatch(block: &Block, variant: Variant) -> VisualNode {
    DEFAULT_DISPATCHER.with(|d| d.dispatch(block, variant))
}

/// Map a whole document with the default dispatcher.
pub fn render_document(blocks: &[Block], variant: Variant) -> Vec<VisualNode> {
    DEFAULT_DISPATCHER.with(|d| d.render_document(blocks, variant))
}
