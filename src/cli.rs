//! Command-line interface for mockdown.

use clap::Parser;
use mockdown_config::Config;
use mockdown_core::Variant;
use mockdown_parser::InlineProfile;
use mockdown_syntax::CodeTheme;
use std::path::PathBuf;

/// Mockdown - preview chat, assistant and email message text in the terminal.
///
/// Segments structured text into blocks, parses inline markers and math,
/// and paints the result the way a mockup surface would show it.
#[derive(Parser, Debug)]
#[command(
    name = "mockdown",
    author = "Mockdown Contributors",
    version,
    about = "Preview structured message text as it renders in a mockup",
    after_help = "Examples:\n  \
                  cat reply.md | mockdown\n  \
                  mockdown --variant compact --profile chat message.md\n  \
                  mockdown --outline notes.md\n  \
                  mockdown -c '[style]\\nTheme = \"github\"' email.md"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Presentation variant (full, compact, minimal)
    #[arg(long = "variant")]
    pub variant: Option<Variant>,

    /// Inline profile (chat, assistant, markdown)
    #[arg(long = "profile")]
    pub profile: Option<InlineProfile>,

    /// Code block theme
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Set the output width (0 = auto-detect from terminal)
    #[arg(short = 'w', long = "width", default_value = "0")]
    pub width: u16,

    /// Print the block outline instead of rendering
    #[arg(long = "outline")]
    pub outline: bool,

    /// Copy the last code block to the clipboard (OSC 52)
    #[arg(long = "copy")]
    pub copy: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,

    /// List the code block themes and exit
    #[arg(long = "themes")]
    pub list_themes: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(variant) = self.variant {
            config.style.variant = variant;
        }
        if let Some(profile) = self.profile {
            config.features.profile = profile;
        }
        if let Some(theme) = &self.theme {
            config.style.theme = theme.clone();
        }
        if self.width > 0 {
            config.style.width = usize::from(self.width);
        }
    }

    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }
}

/// Detected terminal width, 80 when it cannot be determined.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(80)
}

/// Show paths information.
pub fn show_paths() {
    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}

/// List the named code themes, one per line.
pub fn show_themes() {
    for theme in CodeTheme::ALL {
        let shade = if theme.is_dark() { "dark" } else { "light" };
        println!("{:<16}{}", theme.name(), shade);
    }
}
