//! Code block rendering.
//!
//! [`CodeRenderer`] resolves the language alias and theme, hands the code to
//! the highlighting collaborator and numbers the resulting lines.
//! [`paint_code`] draws the result as a padded terminal block with an
//! optional line-number gutter.

use crate::palette::Palette;
use log::warn;
use mockdown_ansi::sanitize::sanitize_for_terminal;
use mockdown_ansi::style::TextStyle;
use mockdown_ansi::utils::visible_length;
use mockdown_core::PLAIN_LANGUAGE;
use mockdown_syntax::{normalize_language, resolve_theme, CodeTheme, StyledToken, SyntaxHighlighter};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Characters for the code block borders.
pub const CODEPAD_TOP: char = '▄';
pub const CODEPAD_BOTTOM: char = '▀';

/// Tabs are expanded to this many spaces when painting.
const TAB_WIDTH: usize = 4;

/// One numbered line of a code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    /// 1-based line number
    pub number: usize,
    pub tokens: Vec<StyledToken>,
}

impl CodeLine {
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// A highlighted, numbered code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCode {
    /// Normalized language name
    pub language: String,
    pub theme: CodeTheme,
    pub lines: Vec<CodeLine>,
    /// False when the highlighter failed and the tokens are unstyled
    pub highlighted: bool,
}

impl RenderedCode {
    /// The code text, lines joined with `\n`.
    pub fn source(&self) -> String {
        self.lines
            .iter()
            .map(CodeLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split code into lines. A single trailing newline does not start a line.
///
/// # Example
///
/// ```
/// use mockdown_render::code::split_code_lines;
/// assert_eq!(split_code_lines("a\n\nb\n"), vec!["a", "", "b"]);
/// assert!(split_code_lines("").is_empty());
/// ```
pub fn split_code_lines(code: &str) -> Vec<&str> {
    if code.is_empty() {
        return Vec::new();
    }
    let body = code.strip_suffix('\n').unwrap_or(code);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Code block renderer bound to a highlighting collaborator.
pub struct CodeRenderer<'a> {
    highlighter: &'a dyn SyntaxHighlighter,
    dark: bool,
}

impl<'a> CodeRenderer<'a> {
    /// `dark` picks the fallback theme when a theme name is not recognised.
    pub fn new(highlighter: &'a dyn SyntaxHighlighter, dark: bool) -> Self {
        Self { highlighter, dark }
    }

    /// Render `code` tagged with `language_tag`.
    ///
    /// Never fails: if the highlighter errors, panics, or returns the wrong
    /// number of lines, the code is returned as unstyled tokens with
    /// `highlighted` unset.
    pub fn render(&self, language_tag: &str, code: &str, theme_name: Option<&str>) -> RenderedCode {
        let language = normalize_language(language_tag);
        let theme = resolve_theme(theme_name, self.dark);
        let source_lines = split_code_lines(code);

        let result = catch_unwind(AssertUnwindSafe(|| self.highlighter.highlight(&language, code, theme)));
        let highlighted = match result {
            Ok(Ok(lines)) if lines.len() == source_lines.len() => Some(lines),
            Ok(Ok(lines)) => {
                warn!(
                    "highlighter returned {} lines for {} source lines, using plain text",
                    lines.len(),
                    source_lines.len()
                );
                None
            }
            Ok(Err(e)) => {
                warn!("highlighting {} failed: {}", language, e);
                None
            }
            Err(_) => {
                warn!("highlighter panicked on {} code", language);
                None
            }
        };

        let is_highlighted = highlighted.is_some();
        let token_lines = highlighted.unwrap_or_else(|| {
            source_lines
                .iter()
                .map(|line| {
                    if line.is_empty() {
                        Vec::new()
                    } else {
                        vec![StyledToken::plain(*line)]
                    }
                })
                .collect()
        });

        RenderedCode {
            language,
            theme,
            lines: token_lines
                .into_iter()
                .enumerate()
                .map(|(i, tokens)| CodeLine { number: i + 1, tokens })
                .collect(),
            highlighted: is_highlighted,
        }
    }
}

/// Paint a rendered code block `width` columns wide.
pub fn paint_code(code: &RenderedCode, width: usize, line_numbers: bool, palette: &Palette) -> Vec<String> {
    let bg = TextStyle::new().bg(palette.code_bg);
    let border = TextStyle::new().fg(palette.code_bg);
    let gutter_width = if line_numbers {
        code.lines.len().to_string().len()
    } else {
        0
    };

    let mut lines = Vec::with_capacity(code.lines.len() + 3);
    lines.push(border.paint(&CODEPAD_TOP.to_string().repeat(width)));

    if code.language != PLAIN_LANGUAGE {
        let label = TextStyle::new().fg(palette.symbol).bg(palette.code_bg);
        let text = format!("[{}]", sanitize_for_terminal(&code.language));
        let padding = width.saturating_sub(visible_length(&text));
        lines.push(format!("{}{}", label.paint(&text), bg.paint(&" ".repeat(padding))));
    }

    for line in &code.lines {
        let mut out = String::new();
        let mut used = 0;

        if line_numbers {
            let gutter = format!("{:>w$} │ ", line.number, w = gutter_width);
            used += visible_length(&gutter);
            out.push_str(&TextStyle::new().fg(palette.grey).bg(palette.code_bg).paint(&gutter));
        }

        for token in &line.tokens {
            let text = sanitize_for_terminal(&token.text).replace('\t', &" ".repeat(TAB_WIDTH));
            used += visible_length(&text);
            let mut style = TextStyle::new().bg(palette.code_bg);
            style.fg = token.style.foreground;
            style.bold = token.style.bold;
            style.italic = token.style.italic;
            style.underline = token.style.underline;
            out.push_str(&style.paint(&text));
        }

        out.push_str(&bg.paint(&" ".repeat(width.saturating_sub(used))));
        lines.push(out);
    }

    lines.push(border.paint(&CODEPAD_BOTTOM.to_string().repeat(width)));
    lines
}
