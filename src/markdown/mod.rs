//! Markdown parsing and rendering module
//!
//! This module parses markdown with comrak, a CommonMark + GFM compatible
//! parser, and renders the resulting tree through the `ElementRenderer`
//! trait. Fenced code blocks are highlighted by `crate::highlight`.
//!
//! # Features
//! - Parse markdown text to an owned AST
//! - Per-element rendering with sanitized URLs and escaped raw HTML
//! - Markup rendering with the preview's element overrides
//! - Failure isolation for the live preview
//!
//! # Example
//! ```ignore
//! use crate::markdown::{parse_markdown, render_document, HtmlElements};
//!
//! let doc = parse_markdown("```python\ndef f(): pass\n```")?;
//! let html = render_document(&doc, &mut HtmlElements);
//! ```

mod boundary;
mod parser;
mod render;
pub mod sanitize;

pub(crate) use boundary::catch_render;
pub use boundary::{RenderBoundary, RenderState};
pub use parser::{parse_markdown, TableAlignment};
pub use render::{render_document, ElementRenderer, HtmlElements};
