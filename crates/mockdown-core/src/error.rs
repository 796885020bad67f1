//! Error types for mockdown

use thiserror::Error;

/// Main error type for mockdown operations.
///
/// Parsing never produces one of these: malformed input degrades to a
/// documented fallback instead. Errors only come from collaborators
/// (highlighter, typesetter, clipboard) and from configuration loading.
#[derive(Error, Debug)]
pub enum MockdownError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Syntax highlighter failed on a code block
    #[error("Highlight error: {0}")]
    Highlight(String),

    /// Math typesetting failed on an expression
    #[error("Typeset error: {0}")]
    Typeset(String),

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Result type alias for mockdown operations
pub type Result<T> = std::result::Result<T, MockdownError>;
