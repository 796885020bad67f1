//! Terminal painter.
//!
//! Lays visual nodes out as ANSI-styled lines: a left margin on every
//! non-empty line, and blank lines between nodes taken from the larger of
//! the previous node's `space_after` and the next node's `space_before`.

use crate::code::paint_code;
use crate::heading::paint_heading;
use crate::list::paint_list;
use crate::palette::Palette;
use crate::table::paint_table;
use crate::text::paint_paragraph;
use crate::VisualNode;
use mockdown_ansi::style::TextStyle;
use mockdown_config::Config;

/// Narrowest content area the painter will lay out into.
const MIN_CONTENT_WIDTH: usize = 10;

/// Paints visual nodes for a terminal of a given width.
#[derive(Debug, Clone)]
pub struct Painter {
    width: usize,
    margin: usize,
    line_numbers: bool,
    palette: Palette,
}

impl Painter {
    /// A painter for `width` columns, no margin, dark palette.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            margin: 0,
            line_numbers: true,
            palette: Palette::dark(),
        }
    }

    /// A painter configured from `[style]`. `detected_width` is used when
    /// the configured width is 0.
    pub fn from_config(config: &Config, detected_width: usize) -> Self {
        Self::new(config.style.effective_width(detected_width))
            .with_margin(config.style.margin)
            .with_line_numbers(config.style.line_numbers)
            .with_palette(Palette::for_background(config.style.dark))
    }

    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Columns available to content after the margin.
    pub fn content_width(&self) -> usize {
        self.width.saturating_sub(self.margin).max(MIN_CONTENT_WIDTH)
    }

    /// Paint one node, without margin or surrounding spacing.
    pub fn paint_node(&self, node: &VisualNode) -> Vec<String> {
        let width = self.content_width();
        let palette = &self.palette;

        match node {
            VisualNode::Heading {
                level,
                content,
                typography,
            } => paint_heading(*level, content, typography, width, palette),
            VisualNode::Paragraph { content, typography } => {
                paint_paragraph(content, width, palette, typography.centered)
            }
            VisualNode::Quote { lines, .. } => {
                let bar = TextStyle::new().fg(palette.symbol).paint("│");
                let inner = width.saturating_sub(2).max(1);
                lines
                    .iter()
                    .flat_map(|line| paint_paragraph(line, inner, palette, false))
                    .map(|line| format!("{} {}", bar, line))
                    .collect()
            }
            VisualNode::List { ordered, items, .. } => paint_list(*ordered, items, width, palette),
            VisualNode::Table { rows, .. } => paint_table(rows, width, palette),
            VisualNode::Rule { .. } => vec![TextStyle::new().fg(palette.grey).paint(&"─".repeat(width))],
            VisualNode::Code { code, .. } => paint_code(code, width, self.line_numbers, palette),
        }
    }

    /// Paint a document.
    pub fn paint(&self, nodes: &[VisualNode]) -> Vec<String> {
        let margin = " ".repeat(self.margin);
        let mut out = Vec::new();
        let mut previous_after: Option<u8> = None;

        for node in nodes {
            let typography = node.typography();
            if let Some(after) = previous_after {
                let gap = after.max(typography.space_before);
                out.extend(std::iter::repeat(String::new()).take(usize::from(gap)));
            }

            for line in self.paint_node(node) {
                if line.is_empty() {
                    out.push(line);
                } else {
                    out.push(format!("{}{}", margin, line));
                }
            }
            previous_after = Some(typography.space_after);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_document;
    use mockdown_ansi::utils::{visible, visible_length};
    use mockdown_core::Variant;
    use mockdown_parser::segment;

    fn plain(lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| visible(l)).collect()
    }

    #[test]
    fn test_spacing_by_variant() {
        let blocks = segment("one\n\ntwo");
        let full = Painter::new(40).paint(&render_document(&blocks, Variant::Full));
        assert_eq!(plain(&full), vec!["one", "", "two"]);

        let minimal = Painter::new(40).paint(&render_document(&blocks, Variant::Minimal));
        assert_eq!(plain(&minimal), vec!["one", "two"]);
    }

    #[test]
    fn test_margin_applied() {
        let blocks = segment("text\n\nmore");
        let lines = Painter::new(40).with_margin(2).paint(&render_document(&blocks, Variant::Full));
        assert_eq!(plain(&lines), vec!["  text", "", "  more"]);
    }

    #[test]
    fn test_quote_bar() {
        let blocks = segment("> a\n> b");
        let lines = Painter::new(40).paint(&render_document(&blocks, Variant::Full));
        assert_eq!(plain(&lines), vec!["│ a", "│ b"]);
    }

    #[test]
    fn test_rule_spans_width() {
        let blocks = segment("---");
        let lines = Painter::new(20).with_margin(4).paint(&render_document(&blocks, Variant::Full));
        assert_eq!(visible_length(&lines[0]), 20);
    }

    #[test]
    fn test_lines_fit_width() {
        let doc = "# A heading that is fairly long\n\nSome paragraph text that needs wrapping at narrow widths.\n\n- item one\n- item two is longer than the rest\n\n| col | other |\n|---|---|\n| 1 | 2 |";
        let width = 30;
        let lines = Painter::new(width).paint(&render_document(&segment(doc), Variant::Full));
        for line in &lines {
            assert!(visible_length(line) <= width, "too wide: {:?}", visible(line));
        }
    }

    #[test]
    fn test_from_config() {
        let config = Config::from_layers(&["[style]\nWidth = 50\nMargin = 3\nDark = false"]).unwrap();
        let painter = Painter::from_config(&config, 120);
        assert_eq!(painter.content_width(), 47);
        assert_eq!(painter.palette, Palette::light());

        let config = Config::default();
        assert_eq!(Painter::from_config(&config, 100).content_width(), 98);
    }
}
