//! Text statistics for the editor
//!
//! This module provides counting of characters, words and lines for
//! display in the status bar.

// ─────────────────────────────────────────────────────────────────────────────
// TextStats
// ─────────────────────────────────────────────────────────────────────────────

/// Text statistics for a document.
///
/// # Example
///
/// ```ignore
/// let stats = TextStats::from_text("Hello, World!\n\nNew paragraph.");
/// assert_eq!(stats.words, 4);
/// assert_eq!(stats.lines, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of characters including whitespace
    pub characters: usize,
    /// Number of words (maximal runs of non-whitespace characters)
    pub words: usize,
    /// Number of lines: line separators plus one
    pub lines: usize,
}

impl TextStats {
    /// Calculate statistics from the given text in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self {
            lines: 1,
            ..Self::default()
        };
        let mut in_word = false;

        for ch in text.chars() {
            stats.characters += 1;

            if ch == '\n' {
                stats.lines += 1;
            }

            if ch.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                stats.words += 1;
            }
        }

        stats
    }

    /// Format the statistics for display in the status bar.
    ///
    /// Returns a compact string like "150 words | 892 chars | 25 lines"
    pub fn format_compact(&self) -> String {
        format!(
            "{} words | {} chars | {} lines",
            self.words, self.characters, self.lines
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty_text() {
        let stats = TextStats::from_text("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_stats_single_word() {
        let stats = TextStats::from_text("Hello");
        assert_eq!(stats.words, 1);
        assert_eq!(stats.characters, 5);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_stats_simple_sentence() {
        let stats = TextStats::from_text("Hello, World!");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 13);
    }

    #[test]
    fn test_stats_multiple_lines() {
        let stats = TextStats::from_text("Line one\nLine two\nLine three");
        assert_eq!(stats.words, 6);
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_stats_trailing_newline() {
        let stats = TextStats::from_text("Hello\n");
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.words, 1);
    }

    #[test]
    fn test_stats_only_whitespace() {
        let stats = TextStats::from_text("   \n\n   ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 8);
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn test_stats_only_newlines() {
        let stats = TextStats::from_text("\n\n\n");
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn test_stats_unicode() {
        let stats = TextStats::from_text("Привет мир! 你好世界");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.characters, 16);
    }

    #[test]
    fn test_stats_mixed_whitespace() {
        let stats = TextStats::from_text("  word1  word2\t\tword3\r\n");
        assert_eq!(stats.words, 3);
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn test_stats_match_split_whitespace() {
        for text in ["", " a ", "a\u{00a0}b", "x\ny\n\nz", "\t\t", "one,two three"] {
            let stats = TextStats::from_text(text);
            let expected = if text.trim().is_empty() {
                0
            } else {
                text.split_whitespace().count()
            };
            assert_eq!(stats.words, expected, "word count for {:?}", text);
            assert_eq!(stats.characters, text.chars().count());
            assert_eq!(stats.lines, text.matches('\n').count() + 1);
        }
    }

    #[test]
    fn test_stats_format_compact() {
        let stats = TextStats {
            words: 150,
            characters: 892,
            lines: 25,
        };
        assert_eq!(stats.format_compact(), "150 words | 892 chars | 25 lines");
    }
}
