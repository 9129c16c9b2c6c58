//! Document downloads
//!
//! A download packages content as a `Blob` and hands it to a
//! `DownloadSink`. Hand-off is fire-and-forget: the sink reports problems
//! through the log, never back to the caller.

use crate::error::{Error, Result};
use crate::files::dialogs::save_file_dialog;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File name for markdown downloads.
pub const MARKDOWN_FILE_NAME: &str = "document.md";
/// MIME type for markdown downloads.
pub const MARKDOWN_MIME: &str = "text/markdown";
/// File name for HTML exports.
pub const HTML_FILE_NAME: &str = "document.html";
/// MIME type for HTML exports.
pub const HTML_MIME: &str = "text/html";

// ─────────────────────────────────────────────────────────────────────────────
// Blob
// ─────────────────────────────────────────────────────────────────────────────

/// Content to save, with its suggested file name and MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    /// The markdown source, verbatim.
    pub fn markdown(source: &str) -> Self {
        Self {
            file_name: MARKDOWN_FILE_NAME.to_string(),
            mime: MARKDOWN_MIME.to_string(),
            bytes: source.as_bytes().to_vec(),
        }
    }

    /// A standalone HTML page.
    pub fn html(page: String) -> Self {
        Self {
            file_name: HTML_FILE_NAME.to_string(),
            mime: HTML_MIME.to_string(),
            bytes: page.into_bytes(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Download Sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Receives blobs to save.
pub trait DownloadSink {
    fn save(&mut self, blob: Blob);
}

/// Saves blobs through the native save dialog.
///
/// Remembers the directory of the last successful save as the starting
/// point for the next dialog.
#[derive(Debug, Default)]
pub struct FileDialogDownloads {
    last_dir: Option<PathBuf>,
}

impl FileDialogDownloads {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DownloadSink for FileDialogDownloads {
    fn save(&mut self, blob: Blob) {
        let Some(path) = save_file_dialog(self.last_dir.as_ref(), &blob.file_name, &blob.mime)
        else {
            debug!("Save dialog cancelled for {}", blob.file_name);
            return;
        };

        match write_blob(&path, &blob) {
            Ok(()) => {
                info!("Saved {} ({} bytes)", path.display(), blob.bytes.len());
                self.last_dir = path.parent().map(Path::to_path_buf);
            }
            Err(e) => warn!("{}", e),
        }
    }
}

/// Write a blob's bytes to `path`.
pub fn write_blob(path: &Path, blob: &Blob) -> Result<()> {
    fs::write(path, &blob.bytes).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_blob_is_verbatim() {
        let source = "# Title\r\n\nünïcode `code`\n";
        let blob = Blob::markdown(source);
        assert_eq!(blob.file_name, "document.md");
        assert_eq!(blob.mime, "text/markdown");
        assert_eq!(blob.bytes, source.as_bytes());
    }

    #[test]
    fn test_html_blob() {
        let blob = Blob::html("<p>x</p>".to_string());
        assert_eq!(blob.file_name, "document.html");
        assert_eq!(blob.mime, "text/html");
        assert_eq!(blob.bytes, b"<p>x</p>");
    }

    #[test]
    fn test_write_blob_to_disk() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("document.md");
        write_blob(&path, &Blob::markdown("hello")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_blob_reports_path_on_failure() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("document.md");
        let err = write_blob(&path, &Blob::markdown("hello")).unwrap_err();
        assert!(matches!(err, Error::FileWrite { path: p, .. } if p == path));
    }
}
