//! User settings and preferences for Livemark
//!
//! This module defines the `Settings` struct that holds the viewer
//! preferences, with serde support for JSON persistence. The document
//! itself is never persisted.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Window Size
// ─────────────────────────────────────────────────────────────────────────────

/// Window geometry restored on the next launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Viewer preferences.
///
/// Serialized to JSON in the user's config directory. Missing fields fall
/// back to their defaults via `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last window geometry
    pub window_size: WindowSize,

    /// Whether the preview pane is shown next to the editor
    pub show_preview: bool,

    /// Editor share of the window width when the preview is shown (0.0 - 1.0)
    pub split_ratio: f32,

    /// Editor font size in points
    pub editor_font_size: f32,

    /// How long toasts stay on screen, in seconds
    pub notice_duration_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: WindowSize::default(),
            show_preview: true,
            split_ratio: 0.5,
            editor_font_size: 14.0,
            notice_duration_secs: 4.0,
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Minimum allowed window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum allowed window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Narrowest share either pane may get.
    pub const MIN_SPLIT_RATIO: f32 = 0.2;
    /// Widest share the editor may get.
    pub const MAX_SPLIT_RATIO: f32 = 0.8;
    /// Shortest toast lifetime.
    pub const MIN_NOTICE_SECS: f32 = 1.0;
    /// Longest toast lifetime.
    pub const MAX_NOTICE_SECS: f32 = 30.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.editor_font_size = clamp_or(
            self.editor_font_size,
            Self::MIN_FONT_SIZE,
            Self::MAX_FONT_SIZE,
            14.0,
        );

        self.window_size.width = clamp_or(
            self.window_size.width,
            Self::MIN_WINDOW_SIZE,
            Self::MAX_WINDOW_SIZE,
            1200.0,
        );
        self.window_size.height = clamp_or(
            self.window_size.height,
            Self::MIN_WINDOW_SIZE,
            Self::MAX_WINDOW_SIZE,
            800.0,
        );

        self.split_ratio = clamp_or(
            self.split_ratio,
            Self::MIN_SPLIT_RATIO,
            Self::MAX_SPLIT_RATIO,
            0.5,
        );

        self.notice_duration_secs = clamp_or(
            self.notice_duration_secs,
            Self::MIN_NOTICE_SECS,
            Self::MAX_NOTICE_SECS,
            4.0,
        );
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

/// `f32::clamp` with a fallback for NaN, which would otherwise pass through.
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.show_preview);
        assert_eq!(settings.split_ratio, 0.5);
        assert_eq!(settings.editor_font_size, 14.0);
        assert_eq!(settings.notice_duration_secs, 4.0);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            show_preview: false,
            split_ratio: 0.3,
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{"show_preview": false}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert!(!settings.show_preview);
        assert_eq!(settings.editor_font_size, 14.0);
        assert_eq!(settings.window_size, WindowSize::default());
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"split_ratio": 0.4, "future_feature": true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.split_ratio, 0.4);
    }

    #[test]
    fn test_sanitize_clamps_values() {
        let json = r#"{
            "editor_font_size": 4.0,
            "split_ratio": 1.5,
            "notice_duration_secs": 0.0,
            "window_size": {"width": 50000.0, "height": 10.0}
        }"#;
        let settings = Settings::from_json_sanitized(json).unwrap();

        assert_eq!(settings.editor_font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.split_ratio, Settings::MAX_SPLIT_RATIO);
        assert_eq!(settings.notice_duration_secs, Settings::MIN_NOTICE_SECS);
        assert_eq!(settings.window_size.width, Settings::MAX_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MIN_WINDOW_SIZE);
    }

    #[test]
    fn test_sanitize_replaces_nan() {
        let mut settings = Settings {
            split_ratio: f32::NAN,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.split_ratio, 0.5);
    }

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert_eq!(size.width, 1200.0);
        assert_eq!(size.height, 800.0);
        assert!(size.x.is_none());
        assert!(!size.maximized);
    }
}
