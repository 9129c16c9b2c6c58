//! User-facing notices
//!
//! Shell operations report their outcome as `Notice` values; the UI shows
//! them as transient toasts.

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient message about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        assert_eq!(Notice::info("a", "b").severity, Severity::Info);
        assert_eq!(Notice::success("a", "b").severity, Severity::Success);
        let notice = Notice::error("Copy failed", "no clipboard");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.title, "Copy failed");
        assert_eq!(notice.description, "no clipboard");
    }
}
