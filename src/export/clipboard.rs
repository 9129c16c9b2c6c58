//! Clipboard Operations
//!
//! This module provides cross-platform clipboard functionality for copying
//! the markdown source to the system clipboard using the arboard crate.

// - enum_variant_names: Error variants follow standard naming convention
#![allow(clippy::enum_variant_names)]

use arboard::Clipboard;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access clipboard
    AccessError(String),
    /// Failed to set clipboard content
    WriteError(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::AccessError(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::WriteError(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::WriteError(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Writers
// ─────────────────────────────────────────────────────────────────────────────

/// Something the shell can write plain text to.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, opened lazily on first write and kept open.
///
/// Some platforms drop clipboard contents when the owning handle is
/// dropped, so the handle lives as long as the application.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let opened = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?,
        };
        let clipboard = self.clipboard.insert(opened);

        clipboard.set_text(text)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::AccessError("test".to_string());
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_clipboard_error_write() {
        let err = ClipboardError::WriteError("write failed".to_string());
        assert!(err.to_string().contains("write failed"));
    }

    // Note: Actual clipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
