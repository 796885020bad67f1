//! Mockdown ANSI
//!
//! ANSI escape code utilities used by mockdown's terminal painter.
//!
//! # Overview
//!
//! - [`codes`] - ANSI escape code constants and SGR helpers
//! - [`style`] - A composable [`TextStyle`]
//! - [`utils`] - Visible width, ANSI stripping, wrapping and padding
//! - [`sanitize`] - Keeping document text from injecting escapes
//!
//! # Example
//!
//! ```
//! use mockdown_ansi::{utils, TextStyle};
//!
//! let text = TextStyle::new().bold().fg((255, 0, 0)).paint("bold text");
//! assert_eq!(utils::visible_length(&text), 9);
//! ```

pub mod codes;
pub mod sanitize;
pub mod style;
pub mod utils;

pub use codes::*;
pub use sanitize::*;
pub use style::*;
pub use utils::*;
