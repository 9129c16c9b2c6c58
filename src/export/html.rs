//! HTML Export Generation
//!
//! This module wraps the rendered document in a complete HTML page with
//! inlined CSS for standalone viewing. Markup comes from `HtmlElements`, so
//! the page carries the same `md-*` element classes and `hl-*` code token
//! spans as the preview.

use crate::error::Result;
use crate::highlight::TokenClass;
use crate::markdown::{parse_markdown, render_document, HtmlElements};
use eframe::egui::Color32;

/// Title used when the document has no heading.
const DEFAULT_TITLE: &str = "Exported Document";

// ─────────────────────────────────────────────────────────────────────────────
// HTML Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Generate a complete HTML document from markdown content.
///
/// # Arguments
///
/// * `markdown` - The markdown source text
/// * `title` - Optional document title; defaults to the first heading
///
/// # Returns
///
/// A complete HTML document as a string.
pub fn generate_html_document(markdown: &str, title: Option<&str>) -> Result<String> {
    let doc = parse_markdown(markdown)?;
    let body = render_document(&doc, &mut HtmlElements);
    let doc_title = title
        .map(str::to_string)
        .or_else(|| doc.first_heading())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Livemark">
    <title>{title}</title>
    <style>
{base_css}
{token_css}
    </style>
</head>
<body>
    <article class="markdown-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(&doc_title),
        base_css = BASE_CSS,
        token_css = generate_token_css(),
        body = body,
    );

    Ok(html)
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for the rendered element classes (layout, typography).
const BASE_CSS: &str = r#"
*, *::before, *::after {
    box-sizing: border-box;
}

:root {
    color-scheme: light dark;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
}

.markdown-body {
    max-width: 900px;
    margin: 0 auto;
    padding: 32px 24px;
}

/* Headings */
.md-h1, .md-h2, .md-h3 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

.md-h1 { font-size: 2em; border-bottom: 1px solid rgba(128, 128, 128, 0.3); padding-bottom: 0.3em; }
.md-h2 { font-size: 1.5em; border-bottom: 1px solid rgba(128, 128, 128, 0.3); padding-bottom: 0.3em; }
.md-h3 { font-size: 1.25em; }

.md-p {
    margin-top: 0;
    margin-bottom: 16px;
}

.md-link {
    color: #0969da;
    text-decoration: none;
}

.md-link:hover {
    text-decoration: underline;
}

/* Lists */
.md-ul, .md-ol {
    margin-top: 0;
    margin-bottom: 16px;
    padding-left: 2em;
}

.md-li + .md-li {
    margin-top: 4px;
}

.md-task {
    list-style-type: none;
}

.md-task input[type="checkbox"] {
    margin: 0 0.3em 0 -1.4em;
}

/* Blockquotes */
.md-quote {
    margin: 0 0 16px 0;
    padding: 0 1em;
    border-left: 4px solid rgba(128, 128, 128, 0.4);
    opacity: 0.85;
}

/* Code */
.md-code, .md-pre {
    font-family: 'JetBrains Mono', 'Fira Code', 'Consolas', 'Monaco', monospace;
    background-color: rgba(128, 128, 128, 0.12);
}

.md-code {
    font-size: 0.9em;
    padding: 0.2em 0.4em;
    border-radius: 4px;
}

.md-pre {
    margin-top: 0;
    margin-bottom: 16px;
    padding: 16px;
    overflow: auto;
    border-radius: 6px;
    line-height: 1.45;
    font-size: 0.875em;
}

/* Tables */
.md-table-wrap {
    overflow-x: auto;
    margin-bottom: 16px;
}

.md-table {
    border-collapse: collapse;
    width: 100%;
}

.md-th, .md-td {
    padding: 8px 12px;
    border: 1px solid rgba(128, 128, 128, 0.3);
}

.md-th {
    font-weight: 600;
    text-align: left;
}

.md-tr:nth-child(even) .md-td {
    background-color: rgba(128, 128, 128, 0.05);
}

.md-hr {
    height: 2px;
    margin: 24px 0;
    border: none;
    background-color: rgba(128, 128, 128, 0.3);
}

img {
    max-width: 100%;
    height: auto;
}
"#;

/// Colour rules for the code token classes, light and dark.
fn generate_token_css() -> String {
    let mut css = String::from("/* Code tokens */\n");
    for class in TokenClass::all() {
        css.push_str(&token_rule(*class, false));
    }

    css.push_str("@media (prefers-color-scheme: dark) {\n");
    for class in TokenClass::all() {
        css.push_str("    ");
        css.push_str(&token_rule(*class, true));
    }
    css.push_str("}\n");
    css
}

fn token_rule(class: TokenClass, dark: bool) -> String {
    let style = if class == TokenClass::Comment {
        " font-style: italic;"
    } else {
        ""
    };
    format!(
        ".{} {{ color: {};{} }}\n",
        class.css_class(),
        color32_to_css(class.color(dark)),
        style
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert Color32 to CSS color string.
fn color32_to_css(color: Color32) -> String {
    format!("rgb({}, {}, {})", color.r(), color.g(), color.b())
}

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_html_document() {
        let markdown = "# Test\n\nParagraph text.";
        let html = generate_html_document(markdown, Some("Test Doc")).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test Doc</title>"));
        assert!(html.contains("<article class=\"markdown-body\">"));
        assert!(html.contains("</article>"));
        assert!(html.contains("<h1 class=\"md-h1\">Test</h1>"));
        assert!(html.contains("<p class=\"md-p\">Paragraph text.</p>"));
    }

    #[test]
    fn test_title_defaults_to_first_heading() {
        let html = generate_html_document("intro\n\n## Notes & Ideas ##\n", None).unwrap();
        assert!(html.contains("<title>Notes &amp; Ideas</title>"));

        let html = generate_html_document("#hashtag only", None).unwrap();
        assert!(html.contains("<title>Exported Document</title>"));
    }

    #[test]
    fn test_title_ignores_comments_in_code() {
        let html = generate_html_document("```python\n# setup\n```\n", None).unwrap();
        assert!(html.contains("<title>Exported Document</title>"));
    }

    #[test]
    fn test_code_tokens_are_styled() {
        let html = generate_html_document("```python\nx = 1\n```", None).unwrap();
        assert!(html.contains("<span class=\"hl-number\">1</span>"));
        assert!(html.contains(".hl-number { color: rgb(0, 128, 128); }"));
        assert!(html.contains(".hl-comment { color: rgb(128, 128, 128); font-style: italic; }"));
        assert!(html.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn test_raw_html_is_not_passed_through() {
        let html = generate_html_document("<script>alert(1)</script>", None).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_color32_to_css() {
        let color = Color32::from_rgb(255, 128, 64);
        assert_eq!(color32_to_css(color), "rgb(255, 128, 64)");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Hello"), "Hello");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
    }
}
