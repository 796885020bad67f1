//! Mockdown Config
//!
//! This crate handles configuration loading for mockdown, supporting TOML
//! configuration files.
//!
//! # Overview
//!
//! Configuration is layered, later layers winning key by key:
//!
//! 1. Built-in defaults ([`Config::default_toml`])
//! 2. The platform config file, if present:
//!    - Linux: `~/.config/mockdown/config.toml`
//!    - macOS: `~/Library/Application Support/mockdown/config.toml`
//!    - Windows: `%APPDATA%\mockdown\config.toml`
//! 3. An override, given either as a file path or as inline TOML
//!
//! # Example
//!
//! ```
//! use mockdown_config::Config;
//! use mockdown_core::Variant;
//!
//! let config = Config::from_layers(&["[style]\nVariant = \"compact\""]).unwrap();
//! assert_eq!(config.style.variant, Variant::Compact);
//! assert!(config.features.clipboard);
//! ```

mod features;
mod style;

pub use features::FeaturesConfig;
pub use style::{StyleConfig, DEFAULT_COPY_RESET_MS};

use log::debug;
use mockdown_core::{MockdownError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[features]
Profile         = "markdown"
BackslashEscape = false
Clipboard       = true
# Math          = true
# Autolink      = true
# Strikethrough = true

[style]
Variant     = "full"
Theme       = "ocean-dark"
Dark        = true
LineNumbers = true
CopyResetMs = 2000
Width       = 0
Margin      = 2
"#;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Feature flags configuration
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Style configuration
    #[serde(default)]
    pub style: StyleConfig,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use mockdown_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[features]"));
    /// assert!(toml.contains("[style]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mockdown")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Build a config from the defaults plus TOML layers, in order.
    pub fn from_layers(layers: &[&str]) -> Result<Self> {
        let mut merged = parse_table(DEFAULT_TOML, "default config")?;
        for (i, layer) in layers.iter().enumerate() {
            let table = parse_table(layer, &format!("layer {}", i + 1))?;
            merge_tables(&mut merged, table);
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| MockdownError::Config(format!("Invalid config: {}", e)))
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        match Self::user_layer()? {
            Some(content) => Self::from_layers(&[&content]),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path, on top of the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_layers(&[&content]).map_err(|e| match e {
            MockdownError::Config(msg) => {
                MockdownError::Config(format!("{} in {}", msg, path.display()))
            }
            other => other,
        })
    }

    /// Load configuration with an optional override file or string.
    ///
    /// The override is read as a file when the path exists and parsed as
    /// inline TOML otherwise. It is merged over the platform config.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mockdown_config::Config;
    ///
    /// let config = Config::load_with_override(Some("./custom.toml")).unwrap();
    /// let config = Config::load_with_override(Some("[features]\nClipboard = false")).unwrap();
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut layers = Vec::new();
        if let Some(content) = Self::user_layer()? {
            layers.push(content);
        }

        if let Some(override_str) = override_config {
            let override_path = Path::new(override_str);
            if override_path.is_file() {
                debug!("config override from {}", override_path.display());
                layers.push(std::fs::read_to_string(override_path)?);
            } else {
                debug!("config override from inline TOML");
                layers.push(override_str.to_string());
            }
        }

        let layers: Vec<&str> = layers.iter().map(String::as_str).collect();
        Self::from_layers(&layers)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MockdownError::Config(format!("Serialization error: {}", e)))
    }

    fn user_layer() -> Result<Option<String>> {
        match Self::config_path() {
            Some(path) if path.is_file() => {
                debug!("loading config from {}", path.display());
                Ok(Some(std::fs::read_to_string(path)?))
            }
            _ => Ok(None),
        }
    }
}

fn parse_table(content: &str, what: &str) -> Result<toml::Table> {
    content
        .parse::<toml::Table>()
        .map_err(|e| MockdownError::Config(format!("Parse error in {}: {}", what, e)))
}

/// Merge `overlay` into `base`; nested tables merge, other values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => {
                if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                    merge_tables(base_table, overlay_table);
                } else {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockdown_core::Variant;
    use mockdown_parser::InlineProfile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.features.profile, InlineProfile::Markdown);
        assert!(config.features.clipboard);
        assert!(!config.features.backslash_escape);
        assert_eq!(config.style.variant, Variant::Full);
        assert_eq!(config.style.copy_reset_ms, 2000);
        assert_eq!(config.style.margin, 2);
    }

    #[test]
    fn test_default_toml_matches_struct_defaults() {
        let from_toml = Config::default();
        let from_structs = Config {
            features: FeaturesConfig::default(),
            style: StyleConfig::default(),
        };
        assert_eq!(from_toml, from_structs);
    }

    #[test]
    fn test_layer_overrides_single_key() {
        let config = Config::from_layers(&["[style]\nMargin = 4"]).unwrap();
        assert_eq!(config.style.margin, 4);
        // Untouched keys keep their defaults
        assert_eq!(config.style.theme, "ocean-dark");
        assert!(config.style.dark);
    }

    #[test]
    fn test_later_layers_win() {
        let config = Config::from_layers(&[
            "[features]\nProfile = \"chat\"\nClipboard = false",
            "[features]\nProfile = \"assistant\"",
        ])
        .unwrap();
        assert_eq!(config.features.profile, InlineProfile::Assistant);
        assert!(!config.features.clipboard);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_layers(&["[style"]).unwrap_err();
        assert!(matches!(err, MockdownError::Config(_)));

        let err = Config::from_layers(&["[style]\nVariant = \"huge\""]).unwrap_err();
        assert!(matches!(err, MockdownError::Config(_)));
    }

    #[test]
    fn test_config_path() {
        if let Some(p) = Config::config_path() {
            assert!(p.to_string_lossy().contains("mockdown"));
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::from_layers(&["[features]\nMath = true"]).unwrap();
        let parsed = Config::from_layers(&[&config.to_toml().unwrap()]).unwrap();
        assert_eq!(config, parsed);
    }
}
