//! Feature flags configuration.
//!
//! The inline profile picks a baseline marker set; the optional flags
//! below override individual parts of it.

use mockdown_parser::{InlineOptions, InlineProfile, SegmentOptions};
use serde::{Deserialize, Serialize};

/// Feature flags configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeaturesConfig {
    /// Inline profile: chat, assistant or markdown.
    /// Default: markdown
    #[serde(default)]
    pub profile: InlineProfile,

    /// Run math extraction before inline markers. Unset follows the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub math: Option<bool>,

    /// Link bare URLs. Unset follows the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autolink: Option<bool>,

    /// Recognise `~~text~~`. Unset follows the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    /// Treat a backslash before a block marker as an escape.
    /// Default: false
    #[serde(default)]
    pub backslash_escape: bool,

    /// Copy code blocks to the clipboard (OSC 52).
    /// Default: true
    #[serde(default = "default_true")]
    pub clipboard: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            profile: InlineProfile::default(),
            math: None,
            autolink: None,
            strikethrough: None,
            backslash_escape: false,
            clipboard: true,
        }
    }
}

impl FeaturesConfig {
    /// Inline options: the profile's, with any explicit flags applied.
    pub fn inline_options(&self) -> InlineOptions {
        let mut options = self.profile.options();
        if let Some(math) = self.math {
            options.math = math;
        }
        if let Some(autolink) = self.autolink {
            options.markers.autolink = autolink;
        }
        if let Some(strikethrough) = self.strikethrough {
            options.markers.strikethrough = strikethrough;
        }
        options
    }

    pub fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            backslash_escape: self.backslash_escape,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_profile() {
        let features = FeaturesConfig::default();
        assert_eq!(features.inline_options(), InlineProfile::Markdown.options());
        assert!(!features.segment_options().backslash_escape);
    }

    #[test]
    fn test_overrides_apply() {
        let features = FeaturesConfig {
            profile: InlineProfile::Assistant,
            math: Some(false),
            autolink: Some(false),
            ..Default::default()
        };
        let options = features.inline_options();
        assert!(!options.math);
        assert!(!options.markers.autolink);
        assert!(options.markers.strikethrough);
    }

    #[test]
    fn test_deserialize_partial() {
        let features: FeaturesConfig = toml::from_str("Profile = \"chat\"\nMath = true").unwrap();
        assert_eq!(features.profile, InlineProfile::Chat);
        assert_eq!(features.math, Some(true));
        assert!(features.clipboard);
        assert!(features.inline_options().math);
        assert!(!features.inline_options().markers.link);
    }
}
