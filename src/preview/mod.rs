//! Native preview for Livemark
//!
//! The document is rendered into a `PreviewNode` tree through the same
//! element walker as the HTML export, then painted with egui widgets.

mod elements;
mod paint;

pub use elements::{build_preview, PreviewNode};
pub use paint::{paint_preview, paint_unavailable};
