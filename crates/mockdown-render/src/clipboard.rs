//! Clipboard sinks.
//!
//! The terminal clipboard is reached through the OSC 52 escape sequence,
//! which most modern terminals (and tmux with `set-clipboard on`) accept.

use base64::Engine;
use mockdown_core::{MockdownError, Result};
use std::io::Write;

/// Maximum payload accepted by [`Osc52Clipboard`], in bytes.
///
/// Terminals truncate or ignore larger OSC 52 sequences.
pub const MAX_CLIPBOARD_SIZE: usize = 50_000;

/// Destination for copied text.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// Writes OSC 52 clipboard sequences to a terminal.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    writer: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Build the OSC 52 sequence that places `text` on the system clipboard.
///
/// # Example
///
/// ```
/// use mockdown_render::clipboard::osc52_sequence;
/// assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
/// ```
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x07", encoded)
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        if text.len() > MAX_CLIPBOARD_SIZE {
            return Err(MockdownError::Clipboard(format!(
                "{} bytes exceeds the {} byte OSC 52 limit",
                text.len(),
                MAX_CLIPBOARD_SIZE
            )));
        }

        self.writer
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| MockdownError::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Vec<String>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn failing() -> Self {
        Self {
            writes: Vec::new(),
            fail: true,
        }
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Most recent successful write.
    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(MockdownError::Clipboard("clipboard unavailable".to_string()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_writes_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write("let x = 1;").unwrap();
        let out = String::from_utf8(clipboard.into_inner()).unwrap();
        assert!(out.starts_with("\x1b]52;c;"));
        assert!(out.ends_with('\x07'));

        let payload = &out["\x1b]52;c;".len()..out.len() - 1];
        let decoded = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, b"let x = 1;");
    }

    #[test]
    fn test_osc52_rejects_oversized() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        let big = "x".repeat(MAX_CLIPBOARD_SIZE + 1);
        let err = clipboard.write(&big).unwrap_err();
        assert!(matches!(err, MockdownError::Clipboard(_)));
        assert!(clipboard.into_inner().is_empty());
    }

    #[test]
    fn test_osc52_accepts_limit() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        assert!(clipboard.write(&"x".repeat(MAX_CLIPBOARD_SIZE)).is_ok());
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.write("a").unwrap();
        clipboard.write("b").unwrap();
        assert_eq!(clipboard.writes(), ["a", "b"]);
        assert_eq!(clipboard.contents(), Some("b"));

        let mut failing = MemoryClipboard::failing();
        assert!(failing.write("a").is_err());
        assert!(failing.writes().is_empty());
    }
}
