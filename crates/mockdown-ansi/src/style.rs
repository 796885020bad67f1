//! Composable text styles.

use crate::codes;

/// A complete text style: attributes plus optional 24-bit colours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Option<(u8, u8, u8)>,
    pub bg: Option<(u8, u8, u8)>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, rgb: (u8, u8, u8)) -> Self {
        self.fg = Some(rgb);
        self
    }

    pub fn bg(mut self, rgb: (u8, u8, u8)) -> Self {
        self.bg = Some(rgb);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// The combined SGR sequence, or an empty string for a plain style.
    pub fn to_ansi(&self) -> String {
        let mut params = Vec::new();

        for (on, code) in [
            (self.bold, codes::SGR_BOLD),
            (self.dim, codes::SGR_DIM),
            (self.italic, codes::SGR_ITALIC),
            (self.underline, codes::SGR_UNDERLINE),
            (self.strikethrough, codes::SGR_STRIKE),
        ] {
            if on {
                params.push(code.to_string());
            }
        }
        if let Some((r, g, b)) = self.fg {
            params.push(codes::fg_params(r, g, b));
        }
        if let Some((r, g, b)) = self.bg {
            params.push(codes::bg_params(r, g, b));
        }

        if params.is_empty() {
            String::new()
        } else {
            codes::sgr(&params)
        }
    }

    /// Apply the style to `text`, resetting afterwards.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", self.to_ansi(), text, codes::RESET)
    }
}
