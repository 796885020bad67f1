//! Named code themes.
//!
//! A fixed set of themes, each backed by one of syntect's bundled theme
//! definitions. Unknown names fall back to a light or dark default.

use std::fmt;
use std::str::FromStr;

/// A named code block theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeTheme {
    OceanDark,
    OceanLight,
    EightiesDark,
    MochaDark,
    GitHub,
    SolarizedDark,
    SolarizedLight,
}

impl CodeTheme {
    pub const ALL: [CodeTheme; 7] = [
        CodeTheme::OceanDark,
        CodeTheme::OceanLight,
        CodeTheme::EightiesDark,
        CodeTheme::MochaDark,
        CodeTheme::GitHub,
        CodeTheme::SolarizedDark,
        CodeTheme::SolarizedLight,
    ];

    /// Short name accepted in configuration.
    pub fn name(self) -> &'static str {
        match self {
            CodeTheme::OceanDark => "ocean-dark",
            CodeTheme::OceanLight => "ocean-light",
            CodeTheme::EightiesDark => "eighties-dark",
            CodeTheme::MochaDark => "mocha-dark",
            CodeTheme::GitHub => "github",
            CodeTheme::SolarizedDark => "solarized-dark",
            CodeTheme::SolarizedLight => "solarized-light",
        }
    }

    /// Key of the theme in syntect's default theme set.
    pub fn syntect_name(self) -> &'static str {
        match self {
            CodeTheme::OceanDark => "base16-ocean.dark",
            CodeTheme::OceanLight => "base16-ocean.light",
            CodeTheme::EightiesDark => "base16-eighties.dark",
            CodeTheme::MochaDark => "base16-mocha.dark",
            CodeTheme::GitHub => "InspiredGitHub",
            CodeTheme::SolarizedDark => "Solarized (dark)",
            CodeTheme::SolarizedLight => "Solarized (light)",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(
            self,
            CodeTheme::OceanDark
                | CodeTheme::EightiesDark
                | CodeTheme::MochaDark
                | CodeTheme::SolarizedDark
        )
    }

    /// Fallback theme for the given background.
    pub fn default_for(dark: bool) -> Self {
        if dark {
            CodeTheme::OceanDark
        } else {
            CodeTheme::GitHub
        }
    }
}

impl fmt::Display for CodeTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CodeTheme {
    type Err = String;

    /// Accepts either the short name or the syntect name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CodeTheme::ALL
            .into_iter()
            .find(|t| {
                t.name().eq_ignore_ascii_case(wanted) || t.syntect_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown theme: {}", s))
    }
}

/// Resolve a theme name, falling back to the light/dark default.
///
/// # Example
/// ```
/// use mockdown_syntax::{resolve_theme, CodeTheme};
///
/// assert_eq!(resolve_theme(Some("solarized-light"), true), CodeTheme::SolarizedLight);
/// assert_eq!(resolve_theme(Some("no-such-theme"), true), CodeTheme::OceanDark);
/// assert_eq!(resolve_theme(None, false), CodeTheme::GitHub);
/// ```
pub fn resolve_theme(name: Option<&str>, dark: bool) -> CodeTheme {
    match name {
        Some(name) => name.parse().unwrap_or_else(|_| {
            log::debug!("unknown theme {:?}, using default", name);
            CodeTheme::default_for(dark)
        }),
        None => CodeTheme::default_for(dark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_syntect_names() {
        assert_eq!("github".parse::<CodeTheme>(), Ok(CodeTheme::GitHub));
        assert_eq!("InspiredGitHub".parse::<CodeTheme>(), Ok(CodeTheme::GitHub));
        assert_eq!(
            "solarized (dark)".parse::<CodeTheme>(),
            Ok(CodeTheme::SolarizedDark)
        );
        assert!("dracula".parse::<CodeTheme>().is_err());
    }

    #[test]
    fn test_fallback_pair() {
        assert_eq!(resolve_theme(Some("dracula"), true), CodeTheme::OceanDark);
        assert_eq!(resolve_theme(Some("dracula"), false), CodeTheme::GitHub);
        assert!(CodeTheme::default_for(true).is_dark());
        assert!(!CodeTheme::default_for(false).is_dark());
    }

    #[test]
    fn test_display_round_trips() {
        for theme in CodeTheme::ALL {
            assert_eq!(theme.to_string().parse::<CodeTheme>(), Ok(theme));
        }
    }
}
