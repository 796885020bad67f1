//! ANSI escape code constants.

/// Control Sequence Introducer
pub const CSI: &str = "\x1b[";

/// Reset all attributes
pub const RESET: &str = "\x1b[0m";

// SGR attribute parameters
pub const SGR_BOLD: u8 = 1;
pub const SGR_DIM: u8 = 2;
pub const SGR_ITALIC: u8 = 3;
pub const SGR_UNDERLINE: u8 = 4;
pub const SGR_STRIKE: u8 = 9;

/// OSC 8 hyperlink opener; followed by the URL and [`ST`]
pub const LINK_START: &str = "\x1b]8;;";

/// OSC string terminator
pub const ST: &str = "\x1b\\";

/// Join SGR parameters into one escape sequence.
///
/// # Example
///
/// ```
/// use mockdown_ansi::codes::sgr;
/// assert_eq!(sgr(&["1".to_string(), "4".to_string()]), "\x1b[1;4m");
/// ```
pub fn sgr(params: &[String]) -> String {
    format!("{}{}m", CSI, params.join(";"))
}

/// SGR parameters for a 24-bit foreground colour.
pub fn fg_params(r: u8, g: u8, b: u8) -> String {
    format!("38;2;{};{};{}", r, g, b)
}

/// SGR parameters for a 24-bit background colour.
pub fn bg_params(r: u8, g: u8, b: u8) -> String {
    format!("48;2;{};{};{}", r, g, b)
}

/// Wrap `text` in an OSC 8 hyperlink to `url`.
///
/// The caller is responsible for checking the URL first; see
/// [`crate::sanitize::is_safe_url`].
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("{LINK_START}{url}{ST}{text}{LINK_START}{ST}")
}
