//! Toolbar UI Component for Livemark
//!
//! A single row of action buttons above the editor. The toolbar only
//! reports what was clicked; the app applies the action.

use eframe::egui::{self, Response, RichText, Ui, Vec2};

/// Height of the toolbar row.
const TOOLBAR_HEIGHT: f32 = 32.0;

/// Minimum size of toolbar buttons.
const BUTTON_SIZE: Vec2 = Vec2::new(28.0, 24.0);

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Copy the markdown source to the clipboard
    Copy,
    /// Save the markdown source as a file
    Download,
    /// Save the rendered document as a standalone HTML page
    ExportHtml,
    /// Empty the editor
    Clear,
    /// Show or hide the preview pane
    TogglePreview,
}

impl ToolbarAction {
    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            ToolbarAction::Copy => "📋 Copy",
            ToolbarAction::Download => "💾 Download",
            ToolbarAction::ExportHtml => "🌐 Export HTML",
            ToolbarAction::Clear => "🗑 Clear",
            ToolbarAction::TogglePreview => "👁 Preview",
        }
    }

    /// Hover text, with the keyboard shortcut where there is one.
    pub fn tooltip(&self) -> &'static str {
        match self {
            ToolbarAction::Copy => "Copy markdown (Ctrl+Shift+C)",
            ToolbarAction::Download => "Download document.md (Ctrl+S)",
            ToolbarAction::ExportHtml => "Export document.html (Ctrl+Shift+E)",
            ToolbarAction::Clear => "Clear the editor",
            ToolbarAction::TogglePreview => "Toggle preview (Ctrl+Shift+P)",
        }
    }

    /// Actions that do nothing on an empty document.
    pub fn needs_content(&self) -> bool {
        matches!(self, ToolbarAction::Clear)
    }
}

/// Toolbar rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toolbar;

impl Toolbar {
    pub fn new() -> Self {
        Self
    }

    /// Render the toolbar and return any triggered action.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `has_content` - Whether the document is non-empty
    /// * `show_preview` - Whether the preview pane is currently visible
    pub fn show(&self, ui: &mut Ui, has_content: bool, show_preview: bool) -> Option<ToolbarAction> {
        let mut action: Option<ToolbarAction> = None;

        ui.horizontal(|ui| {
            ui.set_height(TOOLBAR_HEIGHT);
            ui.spacing_mut().item_spacing.x = 4.0;

            for candidate in [
                ToolbarAction::Copy,
                ToolbarAction::Download,
                ToolbarAction::ExportHtml,
                ToolbarAction::Clear,
            ] {
                let enabled = has_content || !candidate.needs_content();
                if toolbar_button(ui, candidate, enabled, false).clicked() {
                    action = Some(candidate);
                }
            }

            ui.separator();

            if toolbar_button(ui, ToolbarAction::TogglePreview, true, show_preview)
                .clicked()
            {
                action = Some(ToolbarAction::TogglePreview);
            }
        });

        action
    }
}

fn toolbar_button(ui: &mut Ui, action: ToolbarAction, enabled: bool, selected: bool) -> Response {
    let button = egui::Button::new(RichText::new(action.label()).size(13.0))
        .frame(false)
        .selected(selected)
        .min_size(BUTTON_SIZE);

    ui.add_enabled(enabled, button)
        .on_hover_text(action.tooltip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltips_name_shortcuts() {
        assert!(ToolbarAction::Download.tooltip().contains("Ctrl+S"));
        assert!(ToolbarAction::Copy.tooltip().contains("Ctrl+Shift+C"));
        assert!(ToolbarAction::ExportHtml.tooltip().contains("Ctrl+Shift+E"));
        assert!(ToolbarAction::TogglePreview.tooltip().contains("Ctrl+Shift+P"));
    }

    #[test]
    fn test_content_actions() {
        assert!(ToolbarAction::Clear.needs_content());
        assert!(!ToolbarAction::Download.needs_content());
        assert!(!ToolbarAction::TogglePreview.needs_content());
    }
}
