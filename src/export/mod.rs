//! Document Export Module for Livemark
//!
//! This module gets the document out of the editor: onto the clipboard, into
//! a markdown file or into a standalone HTML page.
//!
//! # Architecture
//!
//! - `clipboard.rs` - Platform clipboard operations
//! - `download.rs` - Blobs and the save-dialog download sink
//! - `html.rs` - Standalone HTML page generation

pub mod clipboard;
pub mod download;
pub mod html;

pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use download::{Blob, DownloadSink, FileDialogDownloads};
pub use html::generate_html_document;
