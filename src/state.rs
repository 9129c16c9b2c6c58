//! Application state management for Livemark
//!
//! This module defines the central `ShellState` struct that owns the
//! document, the preview render boundary, pending notices and the viewer
//! settings. All user actions go through its methods; the UI layer only
//! reads from it and drains its notices.

use crate::config::Settings;
use crate::editor::{Document, TextStats, MAX_DOCUMENT_CHARS};
use crate::error::{Error, Result};
use crate::export::{generate_html_document, Blob, ClipboardWriter, DownloadSink};
use crate::markdown::{catch_render, RenderBoundary, RenderState};
use crate::notice::Notice;
use crate::preview::{build_preview, PreviewNode};
use log::{debug, info, warn};

/// Document shown on first launch.
pub const WELCOME_DOCUMENT: &str = r#"# Welcome to Livemark

Type markdown on the left and watch the **preview** update on the right.

## Features

- GitHub-style *tables*, ~~strikethrough~~ and task lists
- [x] Live preview
- [ ] Your next document

| Action | Shortcut |
|--------|:--------:|
| Download | Ctrl+S |
| Copy | Ctrl+Shift+C |
| Export HTML | Ctrl+Shift+E |
| Toggle preview | Ctrl+Shift+P |

> Raw HTML is shown as text, and only web links are clickable.

```rust
// Fenced code with a language tag is highlighted
fn main() {
    let answer = 42;
    println!("{}", answer);
}
```
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Shell State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
#[derive(Debug)]
pub struct ShellState {
    /// The markdown being edited
    document: Document,
    /// Memoized native preview, isolated from render failures
    preview: RenderBoundary<PreviewNode>,
    /// Notices not yet shown
    notices: Vec<Notice>,
    /// Viewer preferences (loaded from config)
    settings: Settings,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl ShellState {
    /// Create the state with the welcome document and the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        let document = Document::with_text(WELCOME_DOCUMENT).unwrap_or_default();
        info!("ShellState initialized");
        debug!("Initial document: {}", document.stats().format_compact());

        Self {
            document,
            preview: RenderBoundary::new(),
            notices: Vec::new(),
            settings,
            settings_dirty: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document
    // ─────────────────────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn stats(&self) -> TextStats {
        self.document.stats()
    }

    /// Replace the document with `text`.
    ///
    /// Text over the character cap is rejected with an Error notice and the
    /// document is left as it was. Returns whether the text was accepted.
    pub fn update_document(&mut self, text: String) -> bool {
        match self.document.replace(text) {
            Ok(()) => true,
            Err(Error::DocumentTooLarge { length, limit }) => {
                warn!("Rejected edit: {} characters (limit {})", length, limit);
                self.push_notice(Notice::error(
                    "Document too large",
                    format!("Documents are limited to {} characters.", limit),
                ));
                false
            }
            Err(e) => {
                warn!("Rejected edit: {}", e);
                self.push_notice(Notice::error("Edit rejected", e.to_string()));
                false
            }
        }
    }

    /// Reset the document to the empty string.
    pub fn clear_document(&mut self) {
        self.document.clear();
        info!("Document cleared");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Write the markdown source to the clipboard. Failures are reported,
    /// not retried.
    pub fn copy_document(&mut self, clipboard: &mut dyn ClipboardWriter) {
        match clipboard.write_text(self.document.text()) {
            Ok(()) => {
                info!("Copied {} characters", self.document.stats().characters);
                self.push_notice(Notice::success(
                    "Copied",
                    "Markdown copied to the clipboard.",
                ));
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.push_notice(Notice::error("Copy failed", e.to_string()));
            }
        }
    }

    /// Hand the markdown source to the download sink.
    ///
    /// The sink reports its own problems, so this always counts as a success.
    pub fn download_document(&mut self, sink: &mut dyn DownloadSink) {
        let blob = Blob::markdown(self.document.text());
        let description = format!("Saving {}", blob.file_name);
        sink.save(blob);
        self.push_notice(Notice::success("Download started", description));
    }

    /// Render the document as a standalone HTML page and hand it to the
    /// download sink. A failing or panicking render is reported as an Error
    /// notice and nothing is saved.
    pub fn export_html(&mut self, sink: &mut dyn DownloadSink) {
        self.export_with(sink, |text| generate_html_document(text, None));
    }

    fn export_with<F>(&mut self, sink: &mut dyn DownloadSink, render: F)
    where
        F: FnOnce(&str) -> Result<String>,
    {
        let text = self.document.text();
        match catch_render(|| render(text)) {
            Ok(page) => {
                let blob = Blob::html(page);
                let description = format!("Saving {}", blob.file_name);
                sink.save(blob);
                self.push_notice(Notice::success("Export started", description));
            }
            Err(e) => {
                warn!("HTML export failed: {}", e);
                self.push_notice(Notice::error("Export failed", e.to_string()));
            }
        }
    }

    /// Acknowledge pasted text. The editor applies the paste itself.
    pub fn handle_paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let count = text.chars().count();
        debug!("Paste of {} characters", count);
        self.push_notice(Notice::info(
            "Pasted",
            format!("Pasted {} characters from the clipboard.", count),
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────

    /// Bring the preview up to date with the document.
    ///
    /// Does nothing when the current revision is already rendered or the
    /// boundary is in the failed state.
    pub fn refresh_preview(&mut self) -> &RenderState<PreviewNode> {
        self.refresh_with(build_preview)
    }

    fn refresh_with<F>(&mut self, render: F) -> &RenderState<PreviewNode>
    where
        F: FnOnce(&str) -> Result<PreviewNode>,
    {
        let text = self.document.text();
        self.preview
            .render(self.document.revision(), || render(text))
    }

    /// Clear a preview failure so the next refresh renders again.
    pub fn retry_preview(&mut self) {
        self.preview.retry();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────────────────────

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drain pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings access; marks the settings for saving.
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.settings_dirty = true;
        &mut self.settings
    }

    /// Show or hide the preview pane.
    pub fn toggle_preview(&mut self) -> bool {
        let settings = self.settings_mut();
        settings.show_preview = !settings.show_preview;
        settings.show_preview
    }

    /// Whether settings changed since the last call, resetting the flag.
    pub fn take_settings_dirty(&mut self) -> bool {
        std::mem::take(&mut self.settings_dirty)
    }

    /// Largest document the shell accepts, in characters.
    pub fn max_chars(&self) -> usize {
        MAX_DOCUMENT_CHARS
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::clipboard::ClipboardError;
    use crate::notice::Severity;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Vec<String>,
    }

    impl ClipboardWriter for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    struct FailingClipboard;

    impl ClipboardWriter for FailingClipboard {
        fn write_text(&mut self, _text: &str) -> std::result::Result<(), ClipboardError> {
            Err(ClipboardError::AccessError("no display".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        blobs: Vec<Blob>,
    }

    impl DownloadSink for RecordingSink {
        fn save(&mut self, blob: Blob) {
            self.blobs.push(blob);
        }
    }

    /// Run `f` on a thread with a main-thread sized stack instead of the
    /// smaller default test thread stack.
    fn on_large_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(f)
            .expect("Failed to spawn test thread")
            .join()
            .expect("Test thread panicked")
    }

    fn empty_state() -> ShellState {
        let mut state = ShellState::default();
        state.clear_document();
        state
    }

    #[test]
    fn test_starts_with_welcome_document() {
        let state = ShellState::default();
        assert_eq!(state.text(), WELCOME_DOCUMENT);
        assert!(state.stats().words > 0);
        assert!(WELCOME_DOCUMENT.chars().count() <= MAX_DOCUMENT_CHARS);
    }

    #[test]
    fn test_update_within_limit() {
        let mut state = empty_state();
        assert!(state.update_document("hello big world".to_string()));
        assert_eq!(state.text(), "hello big world");
        assert_eq!(state.stats().words, 3);
        assert_eq!(state.stats().characters, 15);
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_update_at_exact_limit_accepted() {
        let mut state = empty_state();
        let text = "é".repeat(MAX_DOCUMENT_CHARS);
        assert!(state.update_document(text.clone()));
        assert_eq!(state.text(), text);
    }

    #[test]
    fn test_update_over_limit_rejected() {
        let mut state = empty_state();
        state.update_document("keep me".to_string());
        let revision = state.document().revision();

        assert!(!state.update_document("x".repeat(MAX_DOCUMENT_CHARS + 1)));
        assert_eq!(state.text(), "keep me");
        assert_eq!(state.document().revision(), revision);

        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert_eq!(notices[0].title, "Document too large");
    }

    #[test]
    fn test_clear_document() {
        let mut state = ShellState::default();
        state.clear_document();
        assert_eq!(state.text(), "");
        assert_eq!(state.stats().characters, 0);
        assert_eq!(state.stats().words, 0);
    }

    #[test]
    fn test_copy_success() {
        let mut state = empty_state();
        state.update_document("# copy me".to_string());
        let mut clipboard = RecordingClipboard::default();

        state.copy_document(&mut clipboard);

        assert_eq!(clipboard.writes, vec!["# copy me".to_string()]);
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Success);
    }

    #[test]
    fn test_copy_failure_reports_error() {
        let mut state = ShellState::default();
        state.copy_document(&mut FailingClipboard);

        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].description.contains("no display"));
    }

    #[test]
    fn test_download_blob_matches_document() {
        let mut state = empty_state();
        state.update_document("# Title\n\nbody ünïcode".to_string());
        let mut sink = RecordingSink::default();

        state.download_document(&mut sink);

        assert_eq!(sink.blobs.len(), 1);
        assert_eq!(sink.blobs[0].mime, "text/markdown");
        assert_eq!(sink.blobs[0].file_name, "document.md");
        assert_eq!(sink.blobs[0].bytes, state.text().as_bytes());
        assert_eq!(state.take_notices()[0].severity, Severity::Success);
    }

    #[test]
    fn test_export_html_blob() {
        let mut state = empty_state();
        state.update_document("# Report\n\n```python\nx = 1\n```".to_string());
        let mut sink = RecordingSink::default();

        state.export_html(&mut sink);

        assert_eq!(sink.blobs.len(), 1);
        assert_eq!(sink.blobs[0].mime, "text/html");
        let page = String::from_utf8(sink.blobs[0].bytes.clone()).unwrap();
        assert!(page.contains("<title>Report</title>"));
        assert!(page.contains("<span class=\"hl-number\">1</span>"));
    }

    #[test]
    fn test_export_render_panic_reports_error() {
        let mut state = empty_state();
        state.update_document("# Report".to_string());
        let mut sink = RecordingSink::default();

        state.export_with(&mut sink, |_| panic!("export renderer exploded"));

        assert!(sink.blobs.is_empty());
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert_eq!(notices[0].title, "Export failed");
        assert!(notices[0].description.contains("export renderer exploded"));
    }

    #[test]
    fn test_export_of_deeply_nested_document_fails_cleanly() {
        let (saved, title) = on_large_stack(|| {
            let mut state = empty_state();
            state.update_document(">".repeat(MAX_DOCUMENT_CHARS));
            let mut sink = RecordingSink::default();

            state.export_html(&mut sink);

            let title = state.take_notices().first().map(|n| n.title.clone());
            (sink.blobs.len(), title)
        });
        assert_eq!(saved, 0);
        assert_eq!(title.as_deref(), Some("Export failed"));
    }

    #[test]
    fn test_paste_notice_only_for_text() {
        let mut state = empty_state();
        state.handle_paste("");
        assert!(state.take_notices().is_empty());

        state.handle_paste("abc");
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Info);
        assert_eq!(state.text(), "");
    }

    #[test]
    fn test_take_notices_drains() {
        let mut state = ShellState::default();
        state.handle_paste("x");
        assert_eq!(state.take_notices().len(), 1);
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_refresh_preview_memoizes_by_revision() {
        let mut state = empty_state();
        state.update_document("# Hi".to_string());

        let revision = state.document().revision();
        assert!(matches!(
            state.refresh_preview(),
            RenderState::Rendered { revision: r, .. } if *r == revision
        ));

        let mut calls = 0;
        state.refresh_with(|_| {
            calls += 1;
            Ok(PreviewNode::Document(Vec::new()))
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_failed_preview_sticks_until_retry() {
        let mut state = empty_state();
        assert!(matches!(
            state.refresh_with(|_| panic!("bad node")),
            RenderState::Failed { message } if message.contains("bad node")
        ));

        state.update_document("changed".to_string());
        assert!(matches!(
            state.refresh_preview(),
            RenderState::Failed { .. }
        ));

        state.retry_preview();
        assert!(matches!(
            state.refresh_preview(),
            RenderState::Rendered { .. }
        ));
    }

    #[test]
    fn test_deeply_nested_document_fails_preview_without_crashing() {
        let failed = on_large_stack(|| {
            let mut state = empty_state();
            assert!(state.update_document(">".repeat(MAX_DOCUMENT_CHARS)));
            let failed = matches!(
                state.refresh_preview(),
                RenderState::Failed { message } if message.contains("nests too deeply")
            );
            failed
        });
        assert!(failed);
    }

    #[test]
    fn test_toggle_preview_marks_settings_dirty() {
        let mut state = ShellState::default();
        assert!(!state.take_settings_dirty());

        let shown = state.settings().show_preview;
        assert_eq!(state.toggle_preview(), !shown);
        assert!(state.take_settings_dirty());
        assert!(!state.take_settings_dirty());
    }
}
