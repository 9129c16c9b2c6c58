//! Centralized error handling for Livemark
//!
//! This module provides a unified error type that covers all error scenarios
//! in the application: file writes, configuration, document limits and
//! rendering.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // File I/O Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to write file contents
    FileWrite { path: PathBuf, source: io::Error },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// An edit would grow the document past the character cap
    DocumentTooLarge { length: usize, limit: usize },

    /// A renderer failed or panicked
    Render(String),
}

// Implement From traits for convenient error conversion

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // File I/O Errors
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }

            // Document Errors
            Error::DocumentTooLarge { length, limit } => {
                write!(
                    f,
                    "Document is too large ({} characters, limit is {})",
                    length, limit
                )
            }
            Error::Render(msg) => write!(f, "Rendering failed: {}", msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::ConfigDirNotFound | Error::DocumentTooLarge { .. } | Error::Render(_) => {
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_write_error() {
        let path = PathBuf::from("/test/document.md");
        let io_err = io::Error::new(io::ErrorKind::Other, "write failed");
        let err = Error::FileWrite {
            path: path.clone(),
            source: io_err,
        };
        assert!(matches!(err, Error::FileWrite { path: p, .. } if p == path));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("invalid json");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_display_document_too_large() {
        let err = Error::DocumentTooLarge {
            length: 50_001,
            limit: 50_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("50001"));
        assert!(msg.contains("50000"));
    }

    #[test]
    fn test_display_render_error() {
        let err = Error::Render("boom".to_string());
        assert_eq!(err.to_string(), "Rendering failed: boom");
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_file_write() {
        use std::error::Error as StdError;
        let err = Error::FileWrite {
            path: PathBuf::from("/x"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_simple_variants() {
        use std::error::Error as StdError;
        assert!(Error::ConfigDirNotFound.source().is_none());
        assert!(Error::Render("test".to_string()).source().is_none());
        assert!(Error::DocumentTooLarge { length: 2, limit: 1 }
            .source()
            .is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        let result: Result<i32> = Ok(42);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        let result: Result<i32> = Err(Error::Render("test".to_string()));
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 0);
    }
}
