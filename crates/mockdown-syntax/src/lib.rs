//! Mockdown Syntax
//!
//! This crate prepares code blocks for highlighting and wraps the syntect
//! library as the highlighting collaborator.
//!
//! # Features
//!
//! - **Language normalization** - map fence tags (py, js, sh) to canonical names
//! - **Named themes** - a fixed theme enumeration with a light/dark fallback
//! - **Styled tokens** - per-line token streams with foreground and font style
//!
//! # Example
//!
//! ```
//! use mockdown_syntax::{Highlighter, SyntaxHighlighter, CodeTheme};
//!
//! let highlighter = Highlighter::new();
//! let lines = highlighter
//!     .highlight("rust", "fn main() {}\nlet x = 1;", CodeTheme::OceanDark)
//!     .unwrap();
//! assert_eq!(lines.len(), 2);
//! ```

mod languages;
mod themes;

pub use languages::{aliases_for, normalize_language, syntax_name, LANGUAGE_ALIASES, SYNTAX_NAMES};
pub use themes::{resolve_theme, CodeTheme};

use mockdown_core::{MockdownError, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Visual style of one highlighted token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStyle {
    /// Foreground colour as RGB; `None` means the terminal default
    pub foreground: Option<(u8, u8, u8)>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl From<Style> for TokenStyle {
    fn from(style: Style) -> Self {
        let fg = style.foreground;
        Self {
            foreground: Some((fg.r, fg.g, fg.b)),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }
    }
}

/// A run of code text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledToken {
    pub text: String,
    pub style: TokenStyle,
}

impl StyledToken {
    /// An unstyled token.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TokenStyle::default(),
        }
    }
}

/// Highlighting collaborator.
///
/// Receives an already-normalized language, the code, and a theme. Returns
/// one token list per source line, without line terminators.
pub trait SyntaxHighlighter {
    fn highlight(&self, language: &str, code: &str, theme: CodeTheme) -> Result<Vec<Vec<StyledToken>>>;
}

/// Syntect-backed highlighter.
pub struct Highlighter {
    /// Syntax definitions
    syntax_set: SyntaxSet,
    /// Color themes
    theme_set: ThemeSet,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .field("themes", &self.theme_set.themes.len())
            .finish()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Create a highlighter with syntect's bundled syntaxes and themes.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Find the syntax definition for a normalized language name.
    ///
    /// Tries the mapped syntect name first, then syntect's own token and
    /// extension matching on the raw name.
    pub fn syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        if let Some(name) = syntax_name(language) {
            if let Some(syntax) = self.syntax_set.find_syntax_by_name(name) {
                return Some(syntax);
            }
        }

        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
    }

    /// Get the plain text syntax (for unknown languages).
    pub fn plain_text(&self) -> &SyntaxReference {
        self.syntax_set.find_syntax_plain_text()
    }

    /// Look up the syntect theme object for a named theme.
    pub fn theme(&self, theme: CodeTheme) -> Result<&Theme> {
        self.theme_set
            .themes
            .get(theme.syntect_name())
            .ok_or_else(|| MockdownError::Highlight(format!("theme not loaded: {}", theme.syntect_name())))
    }

    /// Check if a language has a syntax definition.
    pub fn has_language(&self, language: &str) -> bool {
        self.syntax_for_language(language).is_some()
    }
}

impl SyntaxHighlighter for Highlighter {
    fn highlight(&self, language: &str, code: &str, theme: CodeTheme) -> Result<Vec<Vec<StyledToken>>> {
        let syntax = self.syntax_for_language(language).unwrap_or_else(|| {
            log::debug!("no syntax for {:?}, highlighting as plain text", language);
            self.plain_text()
        });
        let mut state = HighlightLines::new(syntax, self.theme(theme)?);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ranges = state
                .highlight_line(line, &self.syntax_set)
                .map_err(|e| MockdownError::Highlight(e.to_string()))?;

            let tokens = ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let text = text.trim_end_matches(['\n', '\r']);
                    (!text.is_empty()).then(|| StyledToken {
                        text: text.to_string(),
                        style: style.into(),
                    })
                })
                .collect();
            lines.push(tokens);
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(tokens: &[StyledToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_syntax_for_language() {
        let h = Highlighter::new();
        assert!(h.syntax_for_language("rust").is_some());
        assert!(h.syntax_for_language("python").is_some());
        assert!(h.syntax_for_language("bash").is_some());
        assert!(h.syntax_for_language("javascript").is_some());
        assert!(h.syntax_for_language("no-such-language").is_none());
        assert!(h.has_language("go"));
        assert!(!h.has_language("no-such-language"));
    }

    #[test]
    fn test_every_theme_loads() {
        let h = Highlighter::new();
        for theme in CodeTheme::ALL {
            assert!(h.theme(theme).is_ok(), "missing {}", theme);
        }
    }

    #[test]
    fn test_highlight_preserves_text() {
        let h = Highlighter::new();
        let code = "fn main() {\n    println!(\"Hello\");\n}";
        let lines = h.highlight("rust", code, CodeTheme::OceanDark).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "fn main() {");
        assert_eq!(line_text(&lines[1]), "    println!(\"Hello\");");
        assert!(lines[0].iter().all(|t| t.style.foreground.is_some()));
    }

    #[test]
    fn test_blank_lines_kept() {
        let h = Highlighter::new();
        let lines = h.highlight("python", "a = 1\n\nb = 2\n", CodeTheme::GitHub).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_unknown_language_as_plain_text() {
        let h = Highlighter::new();
        let lines = h
            .highlight("unknown-lang-xyz", "just some text", CodeTheme::OceanDark)
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "just some text");
    }

    #[test]
    fn test_multiline_token() {
        let h = Highlighter::new();
        let lines = h
            .highlight(
                "rust",
                "/* this is a\n   multi-line comment */\nlet x = 1;",
                CodeTheme::MochaDark,
            )
            .unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[1]), "   multi-line comment */");
    }
}
