//! Sanitization applied while rendering the markdown tree
//!
//! Raw HTML from the source is never passed through: renderers emit it as
//! escaped text. Link and image targets are filtered by URL scheme.

use crate::highlight::escape_html;

/// Where a URL is going to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlContext {
    /// `href` of an anchor
    Link,
    /// `src` of an image
    Image,
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];
const IMAGE_SCHEMES: &[&str] = &["http", "https"];

/// Escape text for use in element content or a quoted attribute value.
pub fn escape_text(text: &str) -> String {
    escape_html(text)
}

/// Return the URL if it is safe to emit in `context`.
///
/// Relative URLs (no scheme) are always allowed. Absolute URLs must use one
/// of the schemes allowed for the context.
pub fn safe_url(url: &str, context: UrlContext) -> Option<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let allowed = match context {
        UrlContext::Link => LINK_SCHEMES,
        UrlContext::Image => IMAGE_SCHEMES,
    };

    match url_scheme(trimmed) {
        None => Some(trimmed),
        Some(scheme) if allowed.contains(&scheme.as_str()) => Some(trimmed),
        Some(_) => None,
    }
}

/// Lowercased scheme of an absolute URL, ignoring embedded whitespace and
/// control characters (`java\tscript:` is still `javascript`).
fn url_scheme(url: &str) -> Option<String> {
    let mut scheme = String::new();

    for ch in url.chars() {
        match ch {
            ':' => return (!scheme.is_empty()).then_some(scheme),
            '/' | '?' | '#' => return None,
            c if c.is_whitespace() || c.is_control() => continue,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
                scheme.push(c.to_ascii_lowercase())
            }
            _ => return None,
        }
    }

    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_links_allowed() {
        assert_eq!(
            safe_url("https://example.com", UrlContext::Link),
            Some("https://example.com")
        );
        assert_eq!(
            safe_url("mailto:a@b.c", UrlContext::Link),
            Some("mailto:a@b.c")
        );
    }

    #[test]
    fn test_relative_urls_allowed() {
        assert_eq!(safe_url("#section", UrlContext::Link), Some("#section"));
        assert_eq!(safe_url("/docs/page", UrlContext::Link), Some("/docs/page"));
        assert_eq!(safe_url("img.png", UrlContext::Image), Some("img.png"));
        assert_eq!(safe_url("a/b:c", UrlContext::Link), Some("a/b:c"));
    }

    #[test]
    fn test_script_schemes_rejected() {
        assert_eq!(safe_url("javascript:alert(1)", UrlContext::Link), None);
        assert_eq!(safe_url("JavaScript:alert(1)", UrlContext::Link), None);
        assert_eq!(safe_url("java\tscript:alert(1)", UrlContext::Link), None);
        assert_eq!(safe_url("vbscript:x", UrlContext::Link), None);
        assert_eq!(safe_url("data:text/html,hi", UrlContext::Link), None);
    }

    #[test]
    fn test_image_schemes_are_narrower() {
        assert_eq!(safe_url("mailto:a@b.c", UrlContext::Image), None);
        assert_eq!(
            safe_url("https://x.org/a.png", UrlContext::Image),
            Some("https://x.org/a.png")
        );
    }

    #[test]
    fn test_empty_url_rejected() {
        assert_eq!(safe_url("   ", UrlContext::Link), None);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<script>"), "&lt;script&gt;");
    }
}
