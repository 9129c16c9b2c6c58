//! Element-by-element rendering of the markdown tree
//!
//! `ElementRenderer` has one method per element kind. `render_document`
//! walks a parsed document bottom-up, applies sanitization, and hands each
//! element its already-rendered children. `HtmlElements` is the markup
//! implementation with the preview's element overrides; the native preview
//! supplies another implementation.

use super::parser::{MarkdownDocument, MarkdownNode, MarkdownNodeType, TableAlignment};
use super::sanitize::{escape_text, safe_url, UrlContext};
use crate::highlight::classify_code;

// ─────────────────────────────────────────────────────────────────────────────
// ElementRenderer
// ─────────────────────────────────────────────────────────────────────────────

/// A set of per-element rendering methods.
///
/// Children arrive already rendered, in document order. URLs arrive already
/// sanitized: `None` means the target was rejected and only the content
/// should be shown.
pub trait ElementRenderer {
    type Output;

    fn document(&mut self, children: Vec<Self::Output>) -> Self::Output;

    /// Heading of `level` 1 to 6.
    fn heading(&mut self, level: u8, children: Vec<Self::Output>) -> Self::Output;
    fn paragraph(&mut self, children: Vec<Self::Output>) -> Self::Output;
    /// Inline content without a block wrapper (paragraphs of tight lists).
    fn inlines(&mut self, children: Vec<Self::Output>) -> Self::Output;
    fn blockquote(&mut self, children: Vec<Self::Output>) -> Self::Output;
    /// List; `start` is `Some` for ordered lists.
    fn list(&mut self, start: Option<u32>, items: Vec<Self::Output>) -> Self::Output;
    /// List item; `task` is `Some(checked)` for task list items.
    fn list_item(&mut self, task: Option<bool>, children: Vec<Self::Output>) -> Self::Output;
    fn table(&mut self, head: Vec<Self::Output>, body: Vec<Self::Output>) -> Self::Output;
    fn table_row(&mut self, header: bool, cells: Vec<Self::Output>) -> Self::Output;
    fn table_cell(
        &mut self,
        header: bool,
        alignment: TableAlignment,
        children: Vec<Self::Output>,
    ) -> Self::Output;
    fn thematic_break(&mut self) -> Self::Output;
    /// Code block; `language` is `Some` only for fenced blocks with a tag.
    fn code_block(&mut self, language: Option<&str>, code: &str) -> Self::Output;
    /// Raw HTML from the source, to be shown as text.
    fn raw_html(&mut self, html: &str, block: bool) -> Self::Output;

    fn text(&mut self, text: &str) -> Self::Output;
    fn inline_code(&mut self, code: &str) -> Self::Output;
    fn emphasis(&mut self, children: Vec<Self::Output>) -> Self::Output;
    fn strong(&mut self, children: Vec<Self::Output>) -> Self::Output;
    fn strikethrough(&mut self, children: Vec<Self::Output>) -> Self::Output;
    fn soft_break(&mut self) -> Self::Output;
    fn line_break(&mut self) -> Self::Output;
    fn link(
        &mut self,
        href: Option<&str>,
        title: &str,
        children: Vec<Self::Output>,
    ) -> Self::Output;
    fn image(&mut self, src: Option<&str>, alt: &str, title: &str) -> Self::Output;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree Walker
// ─────────────────────────────────────────────────────────────────────────────

/// Render a parsed document with the given renderer.
pub fn render_document<R: ElementRenderer>(doc: &MarkdownDocument, renderer: &mut R) -> R::Output {
    render_node(&doc.root, renderer, false)
}

fn render_children<R: ElementRenderer>(
    node: &MarkdownNode,
    renderer: &mut R,
    tight: bool,
) -> Vec<R::Output> {
    node.children
        .iter()
        .map(|child| render_node(child, renderer, tight))
        .collect()
}

/// Render one node. `tight` is set for the direct children of an item in a
/// tight list, whose paragraphs lose their block wrapper.
fn render_node<R: ElementRenderer>(node: &MarkdownNode, renderer: &mut R, tight: bool) -> R::Output {
    match &node.node_type {
        MarkdownNodeType::Document => {
            let children = render_children(node, renderer, false);
            renderer.document(children)
        }
        MarkdownNodeType::Heading { level } => {
            let children = render_children(node, renderer, false);
            renderer.heading(*level, children)
        }
        MarkdownNodeType::Paragraph => {
            let children = render_children(node, renderer, false);
            if tight {
                renderer.inlines(children)
            } else {
                renderer.paragraph(children)
            }
        }
        MarkdownNodeType::BlockQuote => {
            let children = render_children(node, renderer, false);
            renderer.blockquote(children)
        }
        MarkdownNodeType::List { start, tight } => {
            let items = node
                .children
                .iter()
                .map(|item| render_node(item, renderer, *tight))
                .collect();
            renderer.list(*start, items)
        }
        MarkdownNodeType::Item => {
            let children = render_children(node, renderer, tight);
            renderer.list_item(None, children)
        }
        MarkdownNodeType::TaskItem { checked } => {
            let children = render_children(node, renderer, tight);
            renderer.list_item(Some(*checked), children)
        }
        MarkdownNodeType::Table { alignments } => render_table(node, alignments, renderer),
        // Rows and cells outside a table do not occur in comrak output
        MarkdownNodeType::TableRow { .. } | MarkdownNodeType::TableCell => {
            let children = render_children(node, renderer, false);
            renderer.inlines(children)
        }
        MarkdownNodeType::ThematicBreak => renderer.thematic_break(),
        MarkdownNodeType::CodeBlock {
            language,
            literal,
            fenced,
        } => {
            let language = (*fenced && !language.is_empty()).then_some(language.as_str());
            renderer.code_block(language, literal)
        }
        MarkdownNodeType::HtmlBlock(html) => renderer.raw_html(html, true),
        MarkdownNodeType::HtmlInline(html) => renderer.raw_html(html, false),
        MarkdownNodeType::Text(text) => renderer.text(text),
        MarkdownNodeType::Code(code) => renderer.inline_code(code),
        MarkdownNodeType::Emphasis => {
            let children = render_children(node, renderer, false);
            renderer.emphasis(children)
        }
        MarkdownNodeType::Strong => {
            let children = render_children(node, renderer, false);
            renderer.strong(children)
        }
        MarkdownNodeType::Strikethrough => {
            let children = render_children(node, renderer, false);
            renderer.strikethrough(children)
        }
        MarkdownNodeType::SoftBreak => renderer.soft_break(),
        MarkdownNodeType::LineBreak => renderer.line_break(),
        MarkdownNodeType::Link { url, title } => {
            let children = render_children(node, renderer, false);
            renderer.link(safe_url(url, UrlContext::Link), title, children)
        }
        MarkdownNodeType::Image { url, title } => {
            let alt = node.text_content();
            renderer.image(safe_url(url, UrlContext::Image), &alt, title)
        }
        MarkdownNodeType::Unsupported => {
            let children = render_children(node, renderer, false);
            renderer.inlines(children)
        }
    }
}

fn render_table<R: ElementRenderer>(
    node: &MarkdownNode,
    alignments: &[TableAlignment],
    renderer: &mut R,
) -> R::Output {
    let mut head = Vec::new();
    let mut body = Vec::new();

    for row in &node.children {
        let header = matches!(row.node_type, MarkdownNodeType::TableRow { header: true });
        let cells = row
            .children
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                let children = render_children(cell, renderer, false);
                let alignment = alignments.get(column).copied().unwrap_or_default();
                renderer.table_cell(header, alignment, children)
            })
            .collect();
        let rendered = renderer.table_row(header, cells);

        if header {
            head.push(rendered);
        } else {
            body.push(rendered);
        }
    }

    renderer.table(head, body)
}

// ─────────────────────────────────────────────────────────────────────────────
// HtmlElements
// ─────────────────────────────────────────────────────────────────────────────

/// Markup renderer with the preview's element overrides.
///
/// Headings 1-3, quotes, tables, lists, links, paragraphs and rules carry
/// `md-*` classes; links open in a new context without a referrer; fenced
/// code with a language goes through the token classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlElements;

impl ElementRenderer for HtmlElements {
    type Output = String;

    fn document(&mut self, children: Vec<String>) -> String {
        children.concat()
    }

    fn heading(&mut self, level: u8, children: Vec<String>) -> String {
        let level = level.clamp(1, 6);
        if level <= 3 {
            format!(
                "<h{level} class=\"md-h{level}\">{}</h{level}>\n",
                children.concat()
            )
        } else {
            format!("<h{level}>{}</h{level}>\n", children.concat())
        }
    }

    fn paragraph(&mut self, children: Vec<String>) -> String {
        format!("<p class=\"md-p\">{}</p>\n", children.concat())
    }

    fn inlines(&mut self, children: Vec<String>) -> String {
        children.concat()
    }

    fn blockquote(&mut self, children: Vec<String>) -> String {
        format!(
            "<blockquote class=\"md-quote\">\n{}</blockquote>\n",
            children.concat()
        )
    }

    fn list(&mut self, start: Option<u32>, items: Vec<String>) -> String {
        match start {
            Some(1) => format!("<ol class=\"md-ol\">\n{}</ol>\n", items.concat()),
            Some(n) => format!(
                "<ol class=\"md-ol\" start=\"{}\">\n{}</ol>\n",
                n,
                items.concat()
            ),
            None => format!("<ul class=\"md-ul\">\n{}</ul>\n", items.concat()),
        }
    }

    fn list_item(&mut self, task: Option<bool>, children: Vec<String>) -> String {
        match task {
            Some(checked) => format!(
                "<li class=\"md-li md-task\"><input type=\"checkbox\" disabled=\"\"{} /> {}</li>\n",
                if checked { " checked=\"\"" } else { "" },
                children.concat()
            ),
            None => format!("<li class=\"md-li\">{}</li>\n", children.concat()),
        }
    }

    fn table(&mut self, head: Vec<String>, body: Vec<String>) -> String {
        let mut html = String::from("<div class=\"md-table-wrap\"><table class=\"md-table\">\n");
        if !head.is_empty() {
            html.push_str("<thead>\n");
            html.push_str(&head.concat());
            html.push_str("</thead>\n");
        }
        if !body.is_empty() {
            html.push_str("<tbody>\n");
            html.push_str(&body.concat());
            html.push_str("</tbody>\n");
        }
        html.push_str("</table></div>\n");
        html
    }

    fn table_row(&mut self, _header: bool, cells: Vec<String>) -> String {
        format!("<tr class=\"md-tr\">\n{}</tr>\n", cells.concat())
    }

    fn table_cell(&mut self, header: bool, alignment: TableAlignment, children: Vec<String>) -> String {
        let (tag, class) = if header { ("th", "md-th") } else { ("td", "md-td") };
        let align = alignment
            .as_attr()
            .map(|a| format!(" align=\"{}\"", a))
            .unwrap_or_default();
        format!(
            "<{tag} class=\"{class}\"{align}>{}</{tag}>\n",
            children.concat()
        )
    }

    fn thematic_break(&mut self) -> String {
        "<hr class=\"md-hr\" />\n".to_string()
    }

    fn code_block(&mut self, language: Option<&str>, code: &str) -> String {
        match language {
            Some(language) => format!(
                "<pre class=\"md-pre\"><code class=\"language-{}\">{}</code></pre>\n",
                escape_text(language),
                classify_code(code, language)
            ),
            None => format!(
                "<pre class=\"md-pre\"><code>{}</code></pre>\n",
                escape_text(code)
            ),
        }
    }

    fn raw_html(&mut self, html: &str, block: bool) -> String {
        if block {
            format!("<p class=\"md-p\">{}</p>\n", escape_text(html.trim_end()))
        } else {
            escape_text(html)
        }
    }

    fn text(&mut self, text: &str) -> String {
        escape_text(text)
    }

    fn inline_code(&mut self, code: &str) -> String {
        format!("<code class=\"md-code\">{}</code>", escape_text(code))
    }

    fn emphasis(&mut self, children: Vec<String>) -> String {
        format!("<em>{}</em>", children.concat())
    }

    fn strong(&mut self, children: Vec<String>) -> String {
        format!("<strong>{}</strong>", children.concat())
    }

    fn strikethrough(&mut self, children: Vec<String>) -> String {
        format!("<del>{}</del>", children.concat())
    }

    fn soft_break(&mut self) -> String {
        "\n".to_string()
    }

    fn line_break(&mut self) -> String {
        "<br />\n".to_string()
    }

    fn link(&mut self, href: Option<&str>, title: &str, children: Vec<String>) -> String {
        let Some(href) = href else {
            return format!("<a class=\"md-link\">{}</a>", children.concat());
        };

        let title = if title.is_empty() {
            String::new()
        } else {
            format!(" title=\"{}\"", escape_text(title))
        };
        format!(
            "<a class=\"md-link\" href=\"{}\"{} target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_text(href),
            title,
            children.concat()
        )
    }

    fn image(&mut self, src: Option<&str>, alt: &str, title: &str) -> String {
        let Some(src) = src else {
            return escape_text(alt);
        };

        let title = if title.is_empty() {
            String::new()
        } else {
            format!(" title=\"{}\"", escape_text(title))
        };
        format!(
            "<img src=\"{}\" alt=\"{}\"{} />",
            escape_text(src),
            escape_text(alt),
            title
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
