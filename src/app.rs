//! Main application module for Livemark
//!
//! This module implements the eframe App trait: the toolbar, the editor,
//! the preview pane, the status bar and the toast area around a
//! `ShellState`.

use crate::config::{save_config_silent, Settings, WindowSize};
use crate::export::{FileDialogDownloads, SystemClipboard};
use crate::markdown::RenderState;
use crate::preview::{paint_preview, paint_unavailable};
use crate::state::ShellState;
use crate::ui::{Toasts, Toolbar, ToolbarAction};
use eframe::egui::{self, FontId, Key, Modifiers, RichText};
use log::{debug, info};

/// Application name shown in the title bar.
pub const APP_NAME: &str = "Livemark";

// ─────────────────────────────────────────────────────────────────────────────
// Keyboard Shortcuts
// ─────────────────────────────────────────────────────────────────────────────

/// Shortcut table. Checked in order; all entries need Ctrl.
const SHORTCUTS: &[(bool, Key, ToolbarAction)] = &[
    (true, Key::C, ToolbarAction::Copy),
    (true, Key::E, ToolbarAction::ExportHtml),
    (true, Key::P, ToolbarAction::TogglePreview),
    (false, Key::S, ToolbarAction::Download),
];

/// Map a key press to the action it triggers.
fn shortcut_action(modifiers: Modifiers, key: Key) -> Option<ToolbarAction> {
    if !modifiers.ctrl || modifiers.alt {
        return None;
    }
    SHORTCUTS
        .iter()
        .find(|(shift, shortcut_key, _)| *shift == modifiers.shift && *shortcut_key == key)
        .map(|(_, _, action)| *action)
}

// ─────────────────────────────────────────────────────────────────────────────
// Application
// ─────────────────────────────────────────────────────────────────────────────

/// The main application struct.
pub struct LivemarkApp {
    /// Shell state (document, preview, notices, settings)
    state: ShellState,
    /// Text bound to the editor widget; reset to the document after a
    /// rejected edit
    editor_buffer: String,
    /// Toolbar UI component
    toolbar: Toolbar,
    /// On-screen notices
    toasts: Toasts,
    /// System clipboard, opened on first copy
    clipboard: SystemClipboard,
    /// Save-dialog download sink
    downloads: FileDialogDownloads,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
}

impl LivemarkApp {
    /// Create a new LivemarkApp instance with the loaded settings.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", APP_NAME);

        let state = ShellState::with_settings(settings);
        let editor_buffer = state.text().to_string();

        Self {
            state,
            editor_buffer,
            toolbar: Toolbar::new(),
            toasts: Toasts::new(),
            clipboard: SystemClipboard::new(),
            downloads: FileDialogDownloads::new(),
            last_window_size: None,
            last_window_pos: None,
        }
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let Some(rect) = ctx.input(|i| i.viewport().outer_rect) else {
            return false;
        };
        let current_size = rect.size();
        let current_pos = rect.min;

        let size_changed = self
            .last_window_size
            .map(|s| (s - current_size).length() > 1.0)
            .unwrap_or(true);
        let pos_changed = self
            .last_window_pos
            .map(|p| (p - current_pos).length() > 1.0)
            .unwrap_or(true);

        if !size_changed && !pos_changed {
            return false;
        }

        // The first observation is the restored geometry, not a change
        let first_frame = self.last_window_size.is_none();
        self.last_window_size = Some(current_size);
        self.last_window_pos = Some(current_pos);
        if first_frame {
            return false;
        }

        let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));
        self.state.settings_mut().window_size = WindowSize {
            width: current_size.x,
            height: current_size.y,
            x: Some(current_pos.x),
            y: Some(current_pos.y),
            maximized,
        };
        debug!(
            "Window state updated: {}x{} at ({}, {}), maximized: {}",
            current_size.x, current_size.y, current_pos.x, current_pos.y, maximized
        );
        true
    }

    /// Consume the first matching shortcut of this frame.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) -> Option<ToolbarAction> {
        ctx.input_mut(|i| {
            let mut found = None;
            i.events.retain(|event| {
                if found.is_some() {
                    return true;
                }
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    found = shortcut_action(*modifiers, *key);
                }
                found.is_none()
            });
            if let Some(action) = found {
                debug!("Keyboard shortcut: {:?}", action);
            }
            found
        })
    }

    /// Pasted text arriving this frame, before the editor applies it.
    fn handle_paste_events(&mut self, ctx: &egui::Context) {
        let pasted: Vec<String> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Paste(text) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        });
        for text in pasted {
            self.state.handle_paste(&text);
        }
    }

    fn apply_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Copy => self.state.copy_document(&mut self.clipboard),
            ToolbarAction::Download => self.state.download_document(&mut self.downloads),
            ToolbarAction::ExportHtml => self.state.export_html(&mut self.downloads),
            ToolbarAction::Clear => self.state.clear_document(),
            ToolbarAction::TogglePreview => {
                let shown = self.state.toggle_preview();
                info!("Preview {}", if shown { "shown" } else { "hidden" });
            }
        }
        self.sync_editor_buffer();
    }

    /// Make the editor show the document.
    fn sync_editor_buffer(&mut self) {
        if self.editor_buffer != self.state.text() {
            self.editor_buffer = self.state.text().to_string();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panels
    // ─────────────────────────────────────────────────────────────────────────

    fn show_editor(&mut self, ui: &mut egui::Ui) {
        let font_size = self.state.settings().editor_font_size;

        egui::ScrollArea::vertical()
            .id_source("editor_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let response = ui.add_sized(
                    ui.available_size(),
                    egui::TextEdit::multiline(&mut self.editor_buffer)
                        .code_editor()
                        .font(FontId::monospace(font_size))
                        .hint_text("Type some markdown…")
                        .desired_width(f32::INFINITY),
                );

                if response.changed() && !self.state.update_document(self.editor_buffer.clone()) {
                    self.editor_buffer = self.state.text().to_string();
                }
            });
    }

    fn show_preview(&mut self, ui: &mut egui::Ui) {
        let retry = match self.state.refresh_preview() {
            RenderState::Rendered { output, .. } => {
                egui::ScrollArea::vertical()
                    .id_source("preview_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| paint_preview(ui, output));
                false
            }
            RenderState::Failed { message } => paint_unavailable(ui, message),
            RenderState::NotAttempted => false,
        };

        if retry {
            info!("Retrying preview render");
            self.state.retry_preview();
            ui.ctx().request_repaint();
        }
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        let stats = self.state.stats();
        ui.horizontal(|ui| {
            ui.label(RichText::new(stats.format_compact()).small());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!(
                        "{} / {}",
                        stats.characters,
                        self.state.max_chars()
                    ))
                    .small()
                    .monospace(),
                );
            });
        });
    }
}

impl eframe::App for LivemarkApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_window_state(ctx);
        self.handle_paste_events(ctx);

        let mut action = self.handle_keyboard_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let has_content = !self.state.document().is_empty();
            let show_preview = self.state.settings().show_preview;
            if let Some(clicked) = self.toolbar.show(ui, has_content, show_preview) {
                action = Some(clicked);
            }
        });

        if let Some(action) = action {
            self.apply_action(action);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        if self.state.settings().show_preview {
            let total = ctx.screen_rect().width();
            let split = self.state.settings().split_ratio;
            let panel = egui::SidePanel::right("preview_panel")
                .resizable(true)
                .default_width(total * (1.0 - split))
                .width_range(
                    total * (1.0 - Settings::MAX_SPLIT_RATIO)..=total * (1.0 - Settings::MIN_SPLIT_RATIO),
                )
                .show(ctx, |ui| self.show_preview(ui));

            if total > 0.0 {
                let ratio = (1.0 - panel.response.rect.width() / total)
                    .clamp(Settings::MIN_SPLIT_RATIO, Settings::MAX_SPLIT_RATIO);
                if (ratio - split).abs() > 0.01 {
                    self.state.settings_mut().split_ratio = ratio;
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| self.show_editor(ui));

        let now = ctx.input(|i| i.time);
        let duration = self.state.settings().notice_duration_secs;
        for notice in self.state.take_notices() {
            self.toasts.push(notice, now, duration);
        }
        self.toasts.show(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        if self.state.take_settings_dirty() {
            save_config_silent(self.state.settings());
        }
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        if self.state.take_settings_dirty() {
            debug!("Saving settings");
            save_config_silent(self.state.settings());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
