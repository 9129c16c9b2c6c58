//! Markdown parser implementation using comrak
//!
//! This module wraps comrak's parser and converts its arena-allocated AST
//! into an owned `MarkdownNode` tree that renderers can walk freely.

use comrak::{
    nodes::{AstNode, ListType as ComrakListType, NodeValue, TableAlignment as ComrakTableAlignment},
    parse_document, Arena, Options,
};

use crate::error::{Error, Result};

/// Deepest block or inline nesting the converted tree may have.
///
/// Deeper documents (e.g. thousands of `>` markers) are rejected so that
/// converting, walking and dropping the tree stay within the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown parsing.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Enable GitHub Flavored Markdown tables
    pub tables: bool,
    /// Enable strikethrough syntax (~~text~~)
    pub strikethrough: bool,
    /// Enable autolink URLs and emails
    pub autolink: bool,
    /// Enable task lists (- [ ] and - [x])
    pub tasklist: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    fn to_comrak_options(&self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = self.strikethrough;
        options.extension.table = self.tables;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;

        // Raw HTML is escaped by our renderers, never passed through
        options.render.unsafe_ = false;

        options
    }
}

/// Table cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableAlignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<ComrakTableAlignment> for TableAlignment {
    fn from(align: ComrakTableAlignment) -> Self {
        match align {
            ComrakTableAlignment::None => TableAlignment::None,
            ComrakTableAlignment::Left => TableAlignment::Left,
            ComrakTableAlignment::Center => TableAlignment::Center,
            ComrakTableAlignment::Right => TableAlignment::Right,
        }
    }
}

impl TableAlignment {
    /// Value for an HTML `align` attribute, if any.
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            TableAlignment::None => None,
            TableAlignment::Left => Some("left"),
            TableAlignment::Center => Some("center"),
            TableAlignment::Right => Some("right"),
        }
    }
}

/// Represents the type of a markdown node.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownNodeType {
    /// Root document node
    Document,
    /// Block quote (>)
    BlockQuote,
    /// List container; `start` is set for ordered lists
    List { start: Option<u32>, tight: bool },
    /// List item
    Item,
    /// Task list item (- [ ] / - [x])
    TaskItem { checked: bool },
    /// Code block; `fenced` is false for indented blocks
    CodeBlock {
        language: String,
        literal: String,
        fenced: bool,
    },
    /// Raw HTML block
    HtmlBlock(String),
    /// Paragraph
    Paragraph,
    /// Heading (1-6)
    Heading { level: u8 },
    /// Thematic break (horizontal rule)
    ThematicBreak,
    /// Table with per-column alignment
    Table { alignments: Vec<TableAlignment> },
    /// Table row
    TableRow { header: bool },
    /// Table cell
    TableCell,
    /// Inline text content
    Text(String),
    /// Soft line break
    SoftBreak,
    /// Hard line break
    LineBreak,
    /// Inline code
    Code(String),
    /// Inline raw HTML
    HtmlInline(String),
    /// Emphasis (italic)
    Emphasis,
    /// Strong emphasis (bold)
    Strong,
    /// Strikethrough
    Strikethrough,
    /// Link
    Link { url: String, title: String },
    /// Image
    Image { url: String, title: String },
    /// Anything the renderers do not handle; children are still walked
    Unsupported,
}

/// A node in the markdown AST.
#[derive(Debug, Clone)]
pub struct MarkdownNode {
    /// The type of this node
    pub node_type: MarkdownNodeType,
    /// Child nodes
    pub children: Vec<MarkdownNode>,
}

impl MarkdownNode {
    fn new(node_type: MarkdownNodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
        }
    }

    /// Get all text content from this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, output: &mut String) {
        match &self.node_type {
            MarkdownNodeType::Text(t) => output.push_str(t),
            MarkdownNodeType::Code(t) => output.push_str(t),
            MarkdownNodeType::SoftBreak => output.push(' '),
            MarkdownNodeType::LineBreak => output.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(output);
        }
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    /// Root node of the AST
    pub root: MarkdownNode,
}

impl MarkdownDocument {
    /// Plain text of the first non-empty heading, in document order.
    pub fn first_heading(&self) -> Option<String> {
        find_heading(&self.root)
    }
}

fn find_heading(node: &MarkdownNode) -> Option<String> {
    node.children.iter().find_map(|child| match child.node_type {
        MarkdownNodeType::Heading { .. } => {
            let text = child.text_content();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        // Code blocks have no children, so `# lines` inside them never match
        _ => find_heading(child),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse markdown text into an AST document.
///
/// # Example
/// ```ignore
/// let doc = parse_markdown("# Hello\n\nWorld")?;
/// assert_eq!(doc.root.children.len(), 2);
/// ```
pub fn parse_markdown(markdown: &str) -> Result<MarkdownDocument> {
    parse_markdown_with_options(markdown, &MarkdownOptions::default())
}

/// Parse markdown text with custom options.
pub fn parse_markdown_with_options(
    markdown: &str,
    options: &MarkdownOptions,
) -> Result<MarkdownDocument> {
    let arena = Arena::new();
    let comrak_options = options.to_comrak_options();

    let root = parse_document(&arena, markdown, &comrak_options);

    Ok(MarkdownDocument {
        root: convert_node(root, 0)?,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Internal Conversion Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a comrak AST node to our MarkdownNode structure.
///
/// `depth` is the nesting level of `node`; the root is 0.
fn convert_node<'a>(node: &'a AstNode<'a>, depth: usize) -> Result<MarkdownNode> {
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::Render("document nests too deeply".to_string()));
    }

    let node_type = convert_node_value(&node.data.borrow().value);
    let mut markdown_node = MarkdownNode::new(node_type);

    for child in node.children() {
        markdown_node.children.push(convert_node(child, depth + 1)?);
    }

    Ok(markdown_node)
}

/// Convert a comrak NodeValue to our MarkdownNodeType.
fn convert_node_value(value: &NodeValue) -> MarkdownNodeType {
    match value {
        NodeValue::Document => MarkdownNodeType::Document,
        NodeValue::BlockQuote => MarkdownNodeType::BlockQuote,
        NodeValue::List(list) => MarkdownNodeType::List {
            start: match list.list_type {
                ComrakListType::Bullet => None,
                ComrakListType::Ordered => Some(list.start as u32),
            },
            tight: list.tight,
        },
        NodeValue::Item(_) => MarkdownNodeType::Item,
        NodeValue::TaskItem(checked) => MarkdownNodeType::TaskItem {
            checked: checked.map(|c| c == 'x' || c == 'X').unwrap_or(false),
        },
        NodeValue::CodeBlock(code) => MarkdownNodeType::CodeBlock {
            language: code
                .info
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
            literal: code.literal.clone(),
            fenced: code.fenced,
        },
        NodeValue::HtmlBlock(html) => MarkdownNodeType::HtmlBlock(html.literal.clone()),
        NodeValue::Paragraph => MarkdownNodeType::Paragraph,
        NodeValue::Heading(heading) => MarkdownNodeType::Heading {
            level: heading.level,
        },
        NodeValue::ThematicBreak => MarkdownNodeType::ThematicBreak,
        NodeValue::Table(table) => MarkdownNodeType::Table {
            alignments: table
                .alignments
                .iter()
                .map(|a| TableAlignment::from(*a))
                .collect(),
        },
        NodeValue::TableRow(header) => MarkdownNodeType::TableRow { header: *header },
        NodeValue::TableCell => MarkdownNodeType::TableCell,
        NodeValue::Text(text) => MarkdownNodeType::Text(text.clone()),
        NodeValue::SoftBreak => MarkdownNodeType::SoftBreak,
        NodeValue::LineBreak => MarkdownNodeType::LineBreak,
        NodeValue::Code(code) => MarkdownNodeType::Code(code.literal.clone()),
        NodeValue::HtmlInline(html) => MarkdownNodeType::HtmlInline(html.clone()),
        NodeValue::Emph => MarkdownNodeType::Emphasis,
        NodeValue::Strong => MarkdownNodeType::Strong,
        NodeValue::Strikethrough => MarkdownNodeType::Strikethrough,
        NodeValue::Link(link) => MarkdownNodeType::Link {
            url: link.url.clone(),
            title: link.title.clone(),
        },
        NodeValue::Image(image) => MarkdownNodeType::Image {
            url: image.url.clone(),
            title: image.title.clone(),
        },
        _ => MarkdownNodeType::Unsupported,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_markdown("").unwrap();
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_parse_simple_paragraph() {
        let doc = parse_markdown("Hello, world!").unwrap();
        assert_eq!(doc.root.children.len(), 1);
        assert!(matches!(
            doc.root.children[0].node_type,
            MarkdownNodeType::Paragraph
        ));
    }

    #[test]
    fn test_parse_heading_levels() {
        let doc = parse_markdown("# One\n\n### Three").unwrap();
        assert!(matches!(
            doc.root.children[0].node_type,
            MarkdownNodeType::Heading { level: 1 }
        ));
        assert!(matches!(
            doc.root.children[1].node_type,
            MarkdownNodeType::Heading { level: 3 }
        ));
    }

    #[test]
    fn test_parse_lists() {
        let doc = parse_markdown("- a\n- b\n\n3. c\n4. d").unwrap();
        assert!(matches!(
            doc.root.children[0].node_type,
            MarkdownNodeType::List { start: None, .. }
        ));
        assert_eq!(doc.root.children[0].children.len(), 2);
        assert!(matches!(
            doc.root.children[1].node_type,
            MarkdownNodeType::List { start: Some(3), .. }
        ));
    }

    #[test]
    fn test_parse_task_list() {
        let doc = parse_markdown("- [ ] open\n- [x] done").unwrap();
        let items = &doc.root.children[0].children;
        assert!(matches!(
            items[0].node_type,
            MarkdownNodeType::TaskItem { checked: false }
        ));
        assert!(matches!(
            items[1].node_type,
            MarkdownNodeType::TaskItem { checked: true }
        ));
    }

    #[test]
    fn test_parse_fenced_code_language_is_first_word() {
        let doc = parse_markdown("```python title=x\nprint(1)\n```").unwrap();
        match &doc.root.children[0].node_type {
            MarkdownNodeType::CodeBlock {
                language,
                literal,
                fenced,
            } => {
                assert_eq!(language, "python");
                assert_eq!(literal, "print(1)\n");
                assert!(*fenced);
            }
            other => panic!("Expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_indented_code_is_not_fenced() {
        let doc = parse_markdown("    let x = 1;").unwrap();
        assert!(matches!(
            doc.root.children[0].node_type,
            MarkdownNodeType::CodeBlock { fenced: false, .. }
        ));
    }

    #[test]
    fn test_parse_table() {
        let doc = parse_markdown("| a | b |\n|:--|--:|\n| 1 | 2 |").unwrap();
        let table = &doc.root.children[0];
        match &table.node_type {
            MarkdownNodeType::Table { alignments } => {
                assert_eq!(alignments, &vec![TableAlignment::Left, TableAlignment::Right]);
            }
            other => panic!("Expected table, got {:?}", other),
        }
        assert!(matches!(
            table.children[0].node_type,
            MarkdownNodeType::TableRow { header: true }
        ));
        assert_eq!(table.children.len(), 2);
    }

    #[test]
    fn test_parse_link_and_text_content() {
        let doc = parse_markdown("See [docs](https://example.com \"Docs\") now").unwrap();
        let para = &doc.root.children[0];
        let link = para
            .children
            .iter()
            .find(|n| matches!(n.node_type, MarkdownNodeType::Link { .. }))
            .expect("link node");
        assert!(matches!(
            &link.node_type,
            MarkdownNodeType::Link { url, title } if url == "https://example.com" && title == "Docs"
        ));
        assert_eq!(para.text_content(), "See docs now");
    }

    #[test]
    fn test_parse_nesting_at_limit_accepted() {
        let doc = parse_markdown(&"> ".repeat(MAX_NESTING_DEPTH - 1)).unwrap();
        assert!(matches!(
            doc.root.children[0].node_type,
            MarkdownNodeType::BlockQuote
        ));
    }

    #[test]
    fn test_parse_rejects_deep_nesting() {
        // Parse on a main-thread sized stack
        let rejected = std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(|| {
                matches!(
                    parse_markdown(&">".repeat(50_000)),
                    Err(Error::Render(msg)) if msg.contains("nests too deeply")
                )
            })
            .expect("Failed to spawn test thread")
            .join()
            .expect("Test thread panicked");
        assert!(rejected);
    }

    #[test]
    fn test_first_heading_skips_code_and_empty_headings() {
        let doc = parse_markdown("```python\n# setup\n```\n\n#\n\n> ## Quoted *title*\n").unwrap();
        assert_eq!(doc.first_heading().as_deref(), Some("Quoted title"));

        let doc = parse_markdown("Setext\n======\n").unwrap();
        assert_eq!(doc.first_heading().as_deref(), Some("Setext"));

        assert_eq!(parse_markdown("no headings").unwrap().first_heading(), None);
    }

    #[test]
    fn test_parse_raw_html_kept_as_node() {
        let doc = parse_markdown("<div>hi</div>").unwrap();
        assert!(matches!(
            doc.root.children[0].node_type,
            MarkdownNodeType::HtmlBlock(_)
        ));
    }
}
