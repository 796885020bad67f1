//! Heading rendering.
//!
//! Each level gets its own colour from the palette; weight and alignment
//! come from the node's typography. Levels 1 and 2 also get a rule
//! underneath when the typography is large enough to call for one.

use crate::inline::InlineNode;
use crate::palette::Palette;
use crate::text::{center, paint_inline};
use crate::typography::Typography;
use mockdown_ansi::style::TextStyle;
use mockdown_ansi::utils::{visible_length, wrap_ansi};

/// Size at which a heading is underlined.
const UNDERLINE_SIZE: u8 = 24;

/// Render a heading to lines.
pub fn paint_heading(
    level: u8,
    content: &[InlineNode],
    typography: &Typography,
    width: usize,
    palette: &Palette,
) -> Vec<String> {
    let mut style = TextStyle::new().fg(palette.heading(level));
    if typography.weight.is_bold() {
        style = style.bold();
    }
    if level >= 6 {
        style = style.italic();
    }

    let text = paint_inline(content, palette);
    let mut lines: Vec<String> = wrap_ansi(text.trim(), width)
        .into_iter()
        .map(|line| {
            let painted = style.paint(&line);
            if typography.centered {
                center(&painted, width)
            } else {
                painted
            }
        })
        .collect();

    if typography.size >= UNDERLINE_SIZE && level <= 2 {
        let rule_char = if level == 1 { "═" } else { "─" };
        let rule_width = lines.iter().map(|l| visible_length(l.trim_start())).max().unwrap_or(0);
        let rule = TextStyle::new()
            .fg(palette.heading(level))
            .paint(&rule_char.repeat(rule_width));
        lines.push(if typography.centered { center(&rule, width) } else { rule });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockdown_ansi::utils::visible;
    use mockdown_core::{BlockKind, Variant};
    use crate::typography::typography;

    fn heading(level: u8, variant: Variant, text: &str, width: usize) -> Vec<String> {
        paint_heading(
            level,
            &[InlineNode::Text(text.to_string())],
            &typography(BlockKind::Heading, level, variant),
            width,
            &Palette::dark(),
        )
    }

    #[test]
    fn test_h1_full_centered_and_underlined() {
        let lines = heading(1, Variant::Full, "Title", 20);
        assert_eq!(lines.len(), 2);
        assert_eq!(visible(&lines[0]), "       Title");
        assert_eq!(visible(&lines[1]), "       ═════");
        assert!(lines[0].contains("\x1b[1;"));
    }

    #[test]
    fn test_h3_left_aligned() {
        let lines = heading(3, Variant::Full, "Section", 40);
        assert_eq!(lines.len(), 1);
        assert_eq!(visible(&lines[0]), "Section");
    }

    #[test]
    fn test_minimal_h1_not_underlined() {
        let lines = heading(1, Variant::Minimal, "Title", 40);
        assert_eq!(lines.len(), 1);
        assert_eq!(visible(&lines[0]), "Title");
    }

    #[test]
    fn test_levels_have_distinct_styles() {
        let painted: Vec<String> = (1..=6)
            .map(|level| heading(level, Variant::Compact, "x", 40)[0].clone())
            .collect();
        for i in 0..6 {
            for j in i + 1..6 {
                assert_ne!(painted[i], painted[j]);
            }
        }
    }
}
