//! Preview tree construction
//!
//! `PreviewElements` renders a markdown document into a `PreviewNode` tree
//! that the painter can lay out with egui widgets. Inline content collapses
//! into flat runs of styled `InlineSpan`s.

use crate::highlight::{classified_segments, classify_code, ClassifiedSegment};
use crate::markdown::{ElementRenderer, TableAlignment};

// ─────────────────────────────────────────────────────────────────────────────
// Inline Spans
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulated inline formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub code: bool,
    /// Sanitized link target
    pub link: Option<String>,
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    /// True for the forced line break marker.
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Nodes
// ─────────────────────────────────────────────────────────────────────────────

/// A block of the native preview.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewNode {
    Document(Vec<PreviewNode>),
    Heading {
        level: u8,
        spans: Vec<InlineSpan>,
    },
    Paragraph(Vec<InlineSpan>),
    /// Inline content outside a paragraph, also the result of every inline
    /// element before it is folded into its block
    Inline(Vec<InlineSpan>),
    BlockQuote(Vec<PreviewNode>),
    List {
        start: Option<u32>,
        items: Vec<PreviewNode>,
    },
    ListItem {
        task: Option<bool>,
        blocks: Vec<PreviewNode>,
    },
    Table {
        head: Vec<PreviewNode>,
        body: Vec<PreviewNode>,
    },
    TableRow(Vec<PreviewNode>),
    TableCell {
        header: bool,
        alignment: TableAlignment,
        spans: Vec<InlineSpan>,
    },
    Rule,
    CodeBlock {
        language: Option<String>,
        segments: Vec<ClassifiedSegment>,
    },
}

impl PreviewNode {
    /// Flatten rendered inline children into one span list.
    fn into_spans(children: Vec<PreviewNode>) -> Vec<InlineSpan> {
        let mut spans = Vec::new();
        for child in children {
            match child {
                PreviewNode::Inline(inner) | PreviewNode::Paragraph(inner) => spans.extend(inner),
                PreviewNode::Heading { spans: inner, .. }
                | PreviewNode::TableCell { spans: inner, .. } => spans.extend(inner),
                // Blocks never nest inside inline content
                _ => {}
            }
        }
        spans
    }
}

/// Apply `update` to every span of the rendered children.
fn styled(children: Vec<PreviewNode>, update: impl Fn(&mut SpanStyle)) -> PreviewNode {
    let mut spans = PreviewNode::into_spans(children);
    for span in &mut spans {
        update(&mut span.style);
    }
    PreviewNode::Inline(spans)
}

// ─────────────────────────────────────────────────────────────────────────────
// PreviewElements
// ─────────────────────────────────────────────────────────────────────────────

/// Renderer producing the native preview tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreviewElements;

impl ElementRenderer for PreviewElements {
    type Output = PreviewNode;

    fn document(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Document(children)
    }

    fn heading(&mut self, level: u8, children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Heading {
            level,
            spans: PreviewNode::into_spans(children),
        }
    }

    fn paragraph(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Paragraph(PreviewNode::into_spans(children))
    }

    fn inlines(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Inline(PreviewNode::into_spans(children))
    }

    fn blockquote(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::BlockQuote(children)
    }

    fn list(&mut self, start: Option<u32>, items: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::List { start, items }
    }

    fn list_item(&mut self, task: Option<bool>, children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::ListItem {
            task,
            blocks: children,
        }
    }

    fn table(&mut self, head: Vec<PreviewNode>, body: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Table { head, body }
    }

    fn table_row(&mut self, _header: bool, cells: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::TableRow(cells)
    }

    fn table_cell(
        &mut self,
        header: bool,
        alignment: TableAlignment,
        children: Vec<PreviewNode>,
    ) -> PreviewNode {
        PreviewNode::TableCell {
            header,
            alignment,
            spans: PreviewNode::into_spans(children),
        }
    }

    fn thematic_break(&mut self) -> PreviewNode {
        PreviewNode::Rule
    }

    fn code_block(&mut self, language: Option<&str>, code: &str) -> PreviewNode {
        let segments = match language {
            Some(language) => classified_segments(&classify_code(code, language)),
            None => vec![ClassifiedSegment {
                text: code.to_string(),
                class: None,
            }],
        };
        PreviewNode::CodeBlock {
            language: language.map(str::to_string),
            segments,
        }
    }

    fn raw_html(&mut self, html: &str, block: bool) -> PreviewNode {
        if block {
            PreviewNode::Paragraph(vec![InlineSpan::plain(html.trim_end())])
        } else {
            PreviewNode::Inline(vec![InlineSpan::plain(html)])
        }
    }

    fn text(&mut self, text: &str) -> PreviewNode {
        PreviewNode::Inline(vec![InlineSpan::plain(text)])
    }

    fn inline_code(&mut self, code: &str) -> PreviewNode {
        let mut span = InlineSpan::plain(code);
        span.style.code = true;
        PreviewNode::Inline(vec![span])
    }

    fn emphasis(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        styled(children, |style| style.emphasis = true)
    }

    fn strong(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        styled(children, |style| style.strong = true)
    }

    fn strikethrough(&mut self, children: Vec<PreviewNode>) -> PreviewNode {
        styled(children, |style| style.strikethrough = true)
    }

    fn soft_break(&mut self) -> PreviewNode {
        PreviewNode::Inline(vec![InlineSpan::plain(" ")])
    }

    fn line_break(&mut self) -> PreviewNode {
        PreviewNode::Inline(vec![InlineSpan::plain("\n")])
    }

    fn link(&mut self, href: Option<&str>, _title: &str, children: Vec<PreviewNode>) -> PreviewNode {
        match href {
            Some(href) => styled(children, |style| style.link = Some(href.to_string())),
            None => PreviewNode::Inline(PreviewNode::into_spans(children)),
        }
    }

    fn image(&mut self, src: Option<&str>, alt: &str, _title: &str) -> PreviewNode {
        // No image loader; show the alt text, linked to the source when safe
        let label = if alt.is_empty() { "image" } else { alt };
        let mut span = InlineSpan::plain(format!("[{}]", label));
        span.style.emphasis = true;
        span.style.link = src.map(str::to_string);
        PreviewNode::Inline(vec![span])
    }
}

/// Parse and render markdown into a preview tree.
pub fn build_preview(markdown: &str) -> crate::error::Result<PreviewNode> {
    let doc = crate::markdown::parse_markdown(markdown)?;
    Ok(crate::markdown::render_document(&doc, &mut PreviewElements))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
