//! Table rendering.
//!
//! Columns size to their content and shrink (widest first, never below
//! [`MIN_COL_WIDTH`]) when the table would overflow. Cells wrap inside
//! their column. Ragged rows are drawn with blank trailing cells; the
//! first row is the header.

use crate::inline::InlineNode;
use crate::palette::Palette;
use crate::text::paint_inline;
use mockdown_ansi::style::TextStyle;
use mockdown_ansi::utils::{pad_right, visible_length, wrap_ansi};

/// Minimum column width (characters)
pub const MIN_COL_WIDTH: usize = 8;

/// Total width of a table with the given column widths.
///
/// Each cell is padded with one space per side and columns are joined by a
/// one-character separator.
pub fn total_width(widths: &[usize]) -> usize {
    let content: usize = widths.iter().sum();
    content + widths.len() * 2 + widths.len().saturating_sub(1)
}

/// Fit column widths into `available` columns.
///
/// # Example
///
/// ```
/// use mockdown_render::table::fit_widths;
/// assert_eq!(fit_widths(&[3, 5], 80), vec![3, 5]);
/// assert_eq!(fit_widths(&[30, 10], 30), vec![15, 10]);
/// ```
pub fn fit_widths(natural: &[usize], available: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = natural.iter().map(|w| (*w).max(1)).collect();

    while total_width(&widths) > available {
        let Some((widest, &width)) = widths.iter().enumerate().max_by_key(|(i, w)| (**w, usize::MAX - i)) else {
            break;
        };
        if width <= MIN_COL_WIDTH {
            break;
        }
        widths[widest] -= 1;
    }
    widths
}

/// Render table rows to lines.
pub fn paint_table(rows: &[Vec<Vec<InlineNode>>], width: usize, palette: &Palette) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let painted: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| paint_inline(cell, palette).trim().to_string()).collect())
        .collect();

    let natural: Vec<usize> = (0..columns)
        .map(|col| {
            painted
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| visible_length(cell))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let widths = fit_widths(&natural, width);

    let separator = TextStyle::new().fg(palette.symbol).paint("│");
    let mut lines = Vec::new();

    for (index, row) in painted.iter().enumerate() {
        let is_header = index == 0;
        let cell_style = if is_header {
            TextStyle::new().bold().bg(palette.header_bg)
        } else {
            TextStyle::new()
        };

        let wrapped: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(col, &w)| match row.get(col) {
                Some(cell) => wrap_ansi(cell, w),
                None => vec![String::new()],
            })
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line_index in 0..height {
            let parts: Vec<String> = wrapped
                .iter()
                .zip(&widths)
                .map(|(cell_lines, &w)| {
                    let content = cell_lines.get(line_index).map(String::as_str).unwrap_or("");
                    let cell = format!(" {} ", pad_right(content, w));
                    if is_header {
                        // Reapply the header background after inner resets
                        cell_style.paint(&cell.replace("\x1b[0m", &format!("\x1b[0m{}", cell_style.to_ansi())))
                    } else {
                        cell
                    }
                })
                .collect();
            lines.push(parts.join(&separator));
        }

        if is_header && painted.len() > 1 {
            let rule = widths
                .iter()
                .map(|w| "─".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("┼");
            lines.push(TextStyle::new().fg(palette.grey).paint(&rule));
        }
    }

    lines
}
