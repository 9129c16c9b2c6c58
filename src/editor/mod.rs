//! Editor module for Livemark
//!
//! This module holds the editable markdown document and the statistics
//! derived from it.

mod document;
mod stats;

pub use document::{Document, MAX_DOCUMENT_CHARS};
pub use stats::TextStats;
