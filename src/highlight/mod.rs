//! Code highlighting for fenced code blocks
//!
//! This module classifies code into string, comment, number and keyword
//! tokens using ordered regex passes, producing HTML-safe markup with
//! `hl-*` classification spans.
//!
//! # Example
//! ```ignore
//! use crate::highlight::{classify_code, classified_segments};
//!
//! let html = classify_code("def f(n):\n    return n  # base", "python");
//! let segments = classified_segments(&html);
//! ```

use eframe::egui::Color32;

mod classifier;
pub mod keywords;
mod segments;

pub use classifier::{classify_code, escape_html};
pub use segments::{classified_segments, ClassifiedSegment};

// ─────────────────────────────────────────────────────────────────────────────
// Token Classes
// ─────────────────────────────────────────────────────────────────────────────

/// The classification a highlighted span carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    String,
    Comment,
    Number,
    Keyword,
}

impl TokenClass {
    /// Closing tag shared by every classification span.
    pub const CLOSE_TAG: &'static str = "</span>";

    /// All classes, in pass order.
    pub fn all() -> &'static [TokenClass] {
        &[
            TokenClass::String,
            TokenClass::Comment,
            TokenClass::Number,
            TokenClass::Keyword,
        ]
    }

    /// CSS class name used in the markup.
    pub fn css_class(&self) -> &'static str {
        match self {
            TokenClass::String => "hl-string",
            TokenClass::Comment => "hl-comment",
            TokenClass::Number => "hl-number",
            TokenClass::Keyword => "hl-keyword",
        }
    }

    /// Opening span tag for this class.
    pub fn open_tag(&self) -> &'static str {
        match self {
            TokenClass::String => "<span class=\"hl-string\">",
            TokenClass::Comment => "<span class=\"hl-comment\">",
            TokenClass::Number => "<span class=\"hl-number\">",
            TokenClass::Keyword => "<span class=\"hl-keyword\">",
        }
    }

    /// Display colour on a light or dark background.
    pub fn color(&self, dark: bool) -> Color32 {
        match (self, dark) {
            (TokenClass::String, false) => Color32::from_rgb(0, 128, 0), // Green
            (TokenClass::Comment, false) => Color32::from_rgb(128, 128, 128), // Gray
            (TokenClass::Number, false) => Color32::from_rgb(0, 128, 128), // Teal
            (TokenClass::Keyword, false) => Color32::from_rgb(175, 0, 175), // Purple
            (TokenClass::String, true) => Color32::from_rgb(152, 195, 121),
            (TokenClass::Comment, true) => Color32::from_rgb(92, 99, 112),
            (TokenClass::Number, true) => Color32::from_rgb(209, 154, 102),
            (TokenClass::Keyword, true) => Color32::from_rgb(198, 120, 221),
        }
    }
}
