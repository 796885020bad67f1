//! Inline styling and paragraph layout.

use crate::inline::InlineNode;
use crate::palette::Palette;
use mockdown_ansi::codes::hyperlink;
use mockdown_ansi::sanitize::{is_safe_url, sanitize_for_terminal};
use mockdown_ansi::style::TextStyle;
use mockdown_ansi::utils::{visible_length, wrap_ansi};

/// Style a sequence of inline nodes as one ANSI string.
///
/// Newlines inside nodes are flattened to spaces; line layout is the
/// caller's job.
pub fn paint_inline(nodes: &[InlineNode], palette: &Palette) -> String {
    nodes.iter().map(|node| paint_node(node, palette)).collect()
}

fn clean(text: &str) -> String {
    sanitize_for_terminal(text).replace(['\n', '\t'], " ")
}

fn paint_node(node: &InlineNode, palette: &Palette) -> String {
    match node {
        InlineNode::Text(s) => clean(s),
        InlineNode::Bold(s) => TextStyle::new().bold().paint(&clean(s)),
        InlineNode::Italic(s) => TextStyle::new().italic().paint(&clean(s)),
        InlineNode::Strike(s) => TextStyle::new().strikethrough().paint(&clean(s)),
        InlineNode::Code(s) => TextStyle::new()
            .bg(palette.code_bg)
            .paint(&format!(" {} ", clean(s))),
        InlineNode::Link { label, href } => {
            let styled = TextStyle::new().fg(palette.link).underline().paint(&clean(label));
            if is_safe_url(href) {
                hyperlink(href, &styled)
            } else {
                styled
            }
        }
        InlineNode::Math { text, fallback, .. } => {
            let style = if *fallback {
                TextStyle::new().fg(palette.grey)
            } else {
                TextStyle::new().fg(palette.math).italic()
            };
            style.paint(&clean(text))
        }
    }
}

/// Centre `line` within `width` columns.
pub fn center(line: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_length(line)) / 2;
    format!("{}{}", " ".repeat(pad), line)
}

/// Lay out inline content as wrapped lines.
///
/// Display math breaks out of the running text onto its own centred
/// lines, one per line of the typeset expression.
pub fn paint_paragraph(nodes: &[InlineNode], width: usize, palette: &Palette, centered: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut run: Vec<InlineNode> = Vec::new();

    let flush = |run: &mut Vec<InlineNode>, lines: &mut Vec<String>| {
        if run.is_empty() {
            return;
        }
        let painted = paint_inline(run, palette);
        let trimmed = painted.trim();
        if !trimmed.is_empty() {
            for line in wrap_ansi(trimmed, width) {
                lines.push(if centered { center(&line, width) } else { line });
            }
        }
        run.clear();
    };

    for node in nodes {
        if let InlineNode::Math {
            text,
            display: true,
            fallback,
            ..
        } = node
        {
            flush(&mut run, &mut lines);
            let style = if *fallback {
                TextStyle::new().fg(palette.grey)
            } else {
                TextStyle::new().fg(palette.math)
            };
            for row in text.lines() {
                lines.push(center(&style.paint(&sanitize_for_terminal(row)), width));
            }
        } else {
            run.push(node.clone());
        }
    }
    flush(&mut run, &mut lines);

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
