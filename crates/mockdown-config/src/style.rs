//! Style configuration.

use mockdown_core::Variant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before a copied code block reverts to idle.
pub const DEFAULT_COPY_RESET_MS: u64 = 2000;

/// Style configuration.
///
/// Controls the presentation variant, code block theme, and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StyleConfig {
    /// Presentation variant: full, compact or minimal.
    /// Default: full
    #[serde(default)]
    pub variant: Variant,

    /// Code block theme name. Unknown names fall back by `Dark`.
    /// Default: "ocean-dark"
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Dark background.
    /// Default: true
    #[serde(default = "default_true")]
    pub dark: bool,

    /// Show line numbers in code blocks.
    /// Default: true
    #[serde(default = "default_true")]
    pub line_numbers: bool,

    /// Milliseconds before "copied" feedback reverts.
    /// Default: 2000
    #[serde(default = "default_copy_reset_ms")]
    pub copy_reset_ms: u64,

    /// Output width in columns, 0 to detect the terminal width.
    /// Default: 0
    #[serde(default)]
    pub width: usize,

    /// Left margin in columns.
    /// Default: 2
    #[serde(default = "default_margin")]
    pub margin: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Full,
            theme: default_theme(),
            dark: true,
            line_numbers: true,
            copy_reset_ms: DEFAULT_COPY_RESET_MS,
            width: 0,
            margin: default_margin(),
        }
    }
}

impl StyleConfig {
    pub fn copy_reset(&self) -> Duration {
        Duration::from_millis(self.copy_reset_ms)
    }

    /// Width to render at, given a detected terminal width.
    pub fn effective_width(&self, detected: usize) -> usize {
        if self.width > 0 {
            self.width
        } else {
            detected
        }
    }
}

fn default_theme() -> String {
    "ocean-dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_copy_reset_ms() -> u64 {
    DEFAULT_COPY_RESET_MS
}

fn default_margin() -> usize {
    2
}
