//! List rendering.
//!
//! Items are flat. Unordered items get a bullet, ordered items a number
//! right-aligned to the widest one; wrapped item text hangs under the
//! first character after the marker.

use crate::inline::InlineNode;
use crate::palette::Palette;
use crate::text::paint_inline;
use mockdown_ansi::style::TextStyle;
use mockdown_ansi::utils::wrap_ansi;

/// Bullet for unordered items.
pub const BULLET: &str = "•";

/// Marker text for item `index` (0-based), padded to `marker_width`.
fn marker(ordered: bool, index: usize, marker_width: usize) -> String {
    if ordered {
        format!("{:>w$}", format!("{}.", index + 1), w = marker_width)
    } else {
        BULLET.to_string()
    }
}

/// Render list items to lines.
pub fn paint_list(ordered: bool, items: &[Vec<InlineNode>], width: usize, palette: &Palette) -> Vec<String> {
    let marker_width = if ordered {
        format!("{}.", items.len()).len()
    } else {
        1
    };
    let indent = marker_width + 1;
    let text_width = width.saturating_sub(indent).max(1);
    let marker_style = TextStyle::new().fg(palette.symbol);

    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let painted = paint_inline(item, palette);
        for (j, line) in wrap_ansi(painted.trim(), text_width).into_iter().enumerate() {
            if j == 0 {
                lines.push(format!(
                    "{} {}",
                    marker_style.paint(&marker(ordered, i, marker_width)),
                    line
                ));
            } else {
                lines.push(format!("{}{}", " ".repeat(indent), line));
            }
        }
    }
    lines
}
