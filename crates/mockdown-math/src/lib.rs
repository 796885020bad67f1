//! Mockdown Math
//!
//! Math typesetting for expressions pulled out by the math delimiter
//! extractor. The renderer talks to a [`Typesetter`]; the bundled
//! [`UnicodeTypesetter`] turns common LaTeX into Unicode text suitable for a
//! terminal or a plain-text mockup.
//!
//! A typesetter reports malformed input as an error. It is the caller's job
//! to fall back to the raw expression; nothing here panics on bad input.
//!
//! # Example
//!
//! ```
//! use mockdown_math::{Typesetter, UnicodeTypesetter};
//!
//! let ts = UnicodeTypesetter::new();
//! assert_eq!(ts.typeset(r"\alpha^2 \leq \beta", false).unwrap(), "α² ≤ β");
//! assert!(ts.typeset(r"\frac{a}{b", false).is_err());
//! ```

pub mod latex;

pub use latex::{latex_to_unicode, UnicodeTypesetter};

use mockdown_core::Result;

/// Math typesetting collaborator.
pub trait Typesetter {
    /// Render `expression` (delimiters already stripped). `display` is true
    /// for block-level math.
    fn typeset(&self, expression: &str, display: bool) -> Result<String>;
}
