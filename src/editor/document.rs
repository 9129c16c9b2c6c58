//! The editable markdown document
//!
//! A single string with a hard character cap. Every accepted change
//! replaces the whole value, recomputes statistics and bumps the revision.

use super::TextStats;
use crate::error::{Error, Result};
use log::debug;

/// Maximum document length in characters.
pub const MAX_DOCUMENT_CHARS: usize = 50_000;

/// The markdown source being edited, with its derived statistics.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    stats: TextStats,
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            stats: TextStats::from_text(""),
            revision: 0,
        }
    }

    /// Create a document with initial content, subject to the cap.
    pub fn with_text(text: impl Into<String>) -> Result<Self> {
        let mut document = Self::new();
        document.replace(text.into())?;
        Ok(document)
    }

    /// The current markdown source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Statistics for the current source.
    pub fn stats(&self) -> TextStats {
        self.stats
    }

    /// Counter bumped on every accepted change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole document.
    ///
    /// Fails with `Error::DocumentTooLarge`, leaving the document untouched,
    /// when `text` is longer than [`MAX_DOCUMENT_CHARS`].
    pub fn replace(&mut self, text: String) -> Result<()> {
        // Byte length bounds the char count from above
        if text.len() > MAX_DOCUMENT_CHARS {
            let length = text.chars().count();
            if length > MAX_DOCUMENT_CHARS {
                return Err(Error::DocumentTooLarge {
                    length,
                    limit: MAX_DOCUMENT_CHARS,
                });
            }
        }

        if text == self.text {
            return Ok(());
        }

        self.stats = TextStats::from_text(&text);
        self.text = text;
        self.revision += 1;
        debug!(
            "Document revision {}: {}",
            self.revision,
            self.stats.format_compact()
        );
        Ok(())
    }

    /// Reset the document to the empty string.
    pub fn clear(&mut self) {
        // An empty string always fits
        let _ = self.replace(String::new());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.stats().lines, 1);
        assert_eq!(doc.revision(), 0);
    }

    #[test]
    fn test_replace_updates_stats_and_revision() {
        let mut doc = Document::new();
        doc.replace("# Title\n\nSome words here".to_string()).unwrap();
        assert_eq!(doc.text(), "# Title\n\nSome words here");
        assert_eq!(doc.stats().words, 5);
        assert_eq!(doc.stats().lines, 3);
        assert_eq!(doc.revision(), 1);
    }

    #[test]
    fn test_replace_same_text_keeps_revision() {
        let mut doc = Document::with_text("abc").unwrap();
        let revision = doc.revision();
        doc.replace("abc".to_string()).unwrap();
        assert_eq!(doc.revision(), revision);
    }

    #[test]
    fn test_exactly_at_limit_is_accepted() {
        let mut doc = Document::new();
        let text = "a".repeat(MAX_DOCUMENT_CHARS);
        assert!(doc.replace(text.clone()).is_ok());
        assert_eq!(doc.stats().characters, MAX_DOCUMENT_CHARS);
        assert_eq!(doc.text(), text);
    }

    #[test]
    fn test_over_limit_is_rejected_and_unchanged() {
        let mut doc = Document::with_text("keep me").unwrap();
        let revision = doc.revision();
        let result = doc.replace("a".repeat(MAX_DOCUMENT_CHARS + 1));
        assert!(matches!(
            result,
            Err(Error::DocumentTooLarge { length, limit })
                if length == MAX_DOCUMENT_CHARS + 1 && limit == MAX_DOCUMENT_CHARS
        ));
        assert_eq!(doc.text(), "keep me");
        assert_eq!(doc.revision(), revision);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let mut doc = Document::new();
        // Each 'é' is two bytes, so this is 100k bytes but 50k chars
        let text = "é".repeat(MAX_DOCUMENT_CHARS);
        assert!(doc.replace(text).is_ok());
        assert!(doc.replace("é".repeat(MAX_DOCUMENT_CHARS + 1)).is_err());
    }

    #[test]
    fn test_clear_empties_any_document() {
        let mut doc = Document::with_text("lots\nof\ntext").unwrap();
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.stats(), TextStats::from_text(""));
    }

    #[test]
    fn test_with_text_over_limit_fails() {
        assert!(Document::with_text("x".repeat(MAX_DOCUMENT_CHARS + 5)).is_err());
    }
}
