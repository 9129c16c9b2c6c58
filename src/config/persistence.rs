//! Configuration file persistence for Livemark
//!
//! This module handles loading and saving configuration files to
//! platform-specific directories with robust error handling and
//! graceful fallback to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "livemark";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Backup configuration file extension (used during atomic writes)
const CONFIG_BACKUP_EXTENSION: &str = "json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// Returns the appropriate directory based on the operating system:
/// - **Windows**: `%APPDATA%\livemark\`
/// - **macOS**: `~/Library/Application Support/livemark/`
/// - **Linux**: `~/.config/livemark/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return defaults
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load configuration from an explicit file path.
pub fn load_config_from(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::from(e)
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigSave`: Failed to write the config file
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(&get_config_file_path()?, settings)
}

/// Save configuration to an explicit file path.
///
/// This performs an atomic write by writing a sibling backup file first and
/// then renaming it over the original. Missing parent directories are
/// created.
pub fn save_config_to(config_path: &Path, settings: &Settings) -> Result<()> {
    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            debug!("Creating config directory: {}", config_dir.display());
            fs::create_dir_all(config_dir).map_err(|e| Error::ConfigSave {
                path: config_dir.to_path_buf(),
                source: Box::new(e),
            })?;
        }
    }

    let backup_path = config_path.with_extension(CONFIG_BACKUP_EXTENSION);
    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, config_path).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

/// Save configuration, ignoring errors.
///
/// This is useful for "best effort" saves where failure shouldn't
/// interrupt the application flow (e.g., saving on exit).
///
/// # Returns
///
/// Returns `true` if the save was successful, `false` otherwise.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary config directory.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_file = temp_dir.path().join(APP_NAME).join(CONFIG_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            if let Some(dir) = self.config_file.parent() {
                fs::create_dir_all(dir).expect("Failed to create config dir");
            }
            fs::write(&self.config_file, content).expect("Failed to write config");
        }
    }

    #[test]
    fn test_get_config_file_path_names_app() {
        if let Ok(path) = get_config_file_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
        }
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let env = TestEnv::new();
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupted_config_returns_parse_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");
        let err = load_config_from(&env.config_file).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_config_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"editor_font_size": 400.0}"#);
        let settings = load_config_from(&env.config_file).unwrap();
        assert_eq!(settings.editor_font_size, Settings::MAX_FONT_SIZE);
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let env = TestEnv::new();
        let original = Settings {
            show_preview: false,
            split_ratio: 0.35,
            ..Settings::default()
        };

        save_config_to(&env.config_file, &original).unwrap();
        assert!(env.config_file.exists());
        assert!(!env.config_file.with_extension(CONFIG_BACKUP_EXTENSION).exists());

        let loaded = load_config_from(&env.config_file).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let env = TestEnv::new();
        env.write_config(r#"{"show_preview": true}"#);

        let settings = Settings {
            show_preview: false,
            ..Settings::default()
        };
        save_config_to(&env.config_file, &settings).unwrap();

        let contents = fs::read_to_string(&env.config_file).unwrap();
        assert!(contents.contains("\"show_preview\": false"));
    }
}
