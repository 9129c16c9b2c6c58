//! Toast notifications
//!
//! Notices drained from the shell state are queued here with an expiry time
//! and painted as a stack in the bottom-right corner of the window.

use crate::notice::{Notice, Severity};
use eframe::egui::{self, Color32, RichText};
use std::collections::VecDeque;
use std::time::Duration;

/// Maximum number of toasts on screen at once; older ones are dropped.
const MAX_VISIBLE: usize = 4;

/// Width of a toast card.
const TOAST_WIDTH: f32 = 280.0;

#[derive(Debug, Clone)]
struct ActiveToast {
    notice: Notice,
    /// Expiry as seconds since app start (egui input time)
    expires_at: f64,
}

/// Queue of on-screen toasts.
#[derive(Debug, Default)]
pub struct Toasts {
    active: VecDeque<ActiveToast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice shown from `now` for `duration_secs`.
    pub fn push(&mut self, notice: Notice, now: f64, duration_secs: f32) {
        self.active.push_back(ActiveToast {
            notice,
            expires_at: now + f64::from(duration_secs),
        });
        while self.active.len() > MAX_VISIBLE {
            self.active.pop_front();
        }
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: f64) {
        self.active.retain(|toast| toast.expires_at > now);
    }

    /// Seconds until the next toast expires.
    fn next_expiry(&self, now: f64) -> Option<f64> {
        self.active
            .iter()
            .map(|toast| (toast.expires_at - now).max(0.0))
            .reduce(f64::min)
    }

    /// Prune and paint the queue.
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.prune(now);
        if self.active.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("livemark_toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -36.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.active {
                    paint_toast(ui, &toast.notice);
                    ui.add_space(6.0);
                }
            });

        // Repaint when the next toast should disappear
        if let Some(secs) = self.next_expiry(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(secs));
        }
    }
}

fn severity_color(severity: Severity, dark: bool) -> Color32 {
    match (severity, dark) {
        (Severity::Info, false) => Color32::from_rgb(9, 105, 218),
        (Severity::Info, true) => Color32::from_rgb(88, 166, 255),
        (Severity::Success, false) => Color32::from_rgb(26, 127, 55),
        (Severity::Success, true) => Color32::from_rgb(63, 185, 80),
        (Severity::Error, false) => Color32::from_rgb(207, 34, 46),
        (Severity::Error, true) => Color32::from_rgb(248, 81, 73),
    }
}

fn paint_toast(ui: &mut egui::Ui, notice: &Notice) {
    let accent = severity_color(notice.severity, ui.visuals().dark_mode);

    egui::Frame::popup(ui.style())
        .stroke(egui::Stroke::new(1.0, accent))
        .show(ui, |ui| {
            ui.set_width(TOAST_WIDTH);
            ui.label(RichText::new(&notice.title).strong().color(accent));
            if !notice.description.is_empty() {
                ui.label(&notice.description);
            }
        });
}
