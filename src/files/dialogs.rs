//! Native file dialog integration using the rfd crate
//!
//! This module opens the native save dialog used by downloads.

use rfd::FileDialog;
use std::path::PathBuf;

/// File extension filters for the files Livemark writes.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Pick the dialog filter matching a MIME type.
fn filter_for_mime(mime: &str) -> Option<(&'static str, &'static [&'static str])> {
    match mime {
        "text/markdown" => Some(("Markdown Files", MARKDOWN_EXTENSIONS)),
        "text/html" => Some(("HTML Files", HTML_EXTENSIONS)),
        _ => None,
    }
}

/// Opens a native save dialog for saving a file.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_file_dialog(
    initial_dir: Option<&PathBuf>,
    default_name: &str,
    mime: &str,
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save File")
        .set_file_name(default_name);

    if let Some((name, extensions)) = filter_for_mime(mime) {
        dialog = dialog.add_filter(name, extensions);
    }
    dialog = dialog.add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_known_mime_types() {
        assert_eq!(
            filter_for_mime("text/markdown").map(|(name, _)| name),
            Some("Markdown Files")
        );
        assert_eq!(
            filter_for_mime("text/html").map(|(_, ext)| ext),
            Some(HTML_EXTENSIONS)
        );
        assert!(filter_for_mime("application/octet-stream").is_none());
    }
}
