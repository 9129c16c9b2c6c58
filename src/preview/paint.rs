//! egui painting for the preview tree

use super::elements::{InlineSpan, PreviewNode};
use crate::markdown::TableAlignment;
use eframe::egui::{
    self, text::LayoutJob, Align, Color32, FontId, Layout, RichText, TextFormat, Ui,
};

/// Body text size in points.
const BODY_SIZE: f32 = 14.0;
/// Code text size in points.
const CODE_SIZE: f32 = 13.0;
/// Indent per nesting level for lists and quotes.
const INDENT: f32 = 18.0;

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 21.0,
        3 => 18.0,
        _ => 16.0,
    }
}

/// Paint a preview tree.
pub fn paint_preview(ui: &mut Ui, node: &PreviewNode) {
    paint_block(ui, node, 0);
}

/// The static panel shown while the preview is unavailable.
///
/// Returns `true` when "Try again" was clicked.
pub fn paint_unavailable(ui: &mut Ui, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.label(RichText::new("Preview unavailable").size(18.0).strong());
        ui.add_space(4.0);
        ui.label(RichText::new(message).weak());
        ui.add_space(12.0);
        retry = ui.button("Try again").clicked();
    });
    retry
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocks
// ─────────────────────────────────────────────────────────────────────────────

fn paint_block(ui: &mut Ui, node: &PreviewNode, depth: usize) {
    match node {
        PreviewNode::Document(children) => {
            for child in children {
                paint_block(ui, child, depth);
                ui.add_space(6.0);
            }
        }
        PreviewNode::Heading { level, spans } => {
            paint_spans(ui, spans, heading_size(*level), true);
            if *level <= 2 {
                ui.separator();
            }
        }
        PreviewNode::Paragraph(spans) | PreviewNode::Inline(spans) => {
            paint_spans(ui, spans, BODY_SIZE, false);
        }
        PreviewNode::BlockQuote(children) => {
            let bar = ui.visuals().widgets.noninteractive.bg_stroke.color;
            egui::Frame::none()
                .stroke(egui::Stroke::new(1.0, bar))
                .inner_margin(egui::Margin {
                    left: 10.0,
                    right: 4.0,
                    top: 4.0,
                    bottom: 4.0,
                })
                .show(ui, |ui| {
                    for child in children {
                        paint_block(ui, child, depth + 1);
                    }
                });
        }
        PreviewNode::List { start, items } => {
            for (index, item) in items.iter().enumerate() {
                let marker = match start {
                    Some(first) => format!("{}.", *first as usize + index),
                    None => "•".to_string(),
                };
                paint_list_item(ui, item, &marker, depth);
            }
        }
        PreviewNode::ListItem { .. } => paint_list_item(ui, node, "•", depth),
        PreviewNode::Table { head, body } => paint_table(ui, head, body),
        PreviewNode::TableRow(cells) => {
            ui.horizontal_wrapped(|ui| {
                for cell in cells {
                    paint_block(ui, cell, depth);
                }
            });
        }
        PreviewNode::TableCell { header, spans, .. } => {
            paint_spans(ui, spans, BODY_SIZE, *header);
        }
        PreviewNode::Rule => {
            ui.separator();
        }
        PreviewNode::CodeBlock { segments, .. } => {
            let dark = ui.visuals().dark_mode;
            let text_color = ui.visuals().text_color();
            let mut job = LayoutJob::default();
            for segment in segments {
                let color = segment
                    .class
                    .map_or(text_color, |class| class.color(dark));
                job.append(
                    &segment.text,
                    0.0,
                    TextFormat {
                        font_id: FontId::monospace(CODE_SIZE),
                        color,
                        ..Default::default()
                    },
                );
            }

            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(job);
                });
        }
    }
}

fn paint_list_item(ui: &mut Ui, item: &PreviewNode, marker: &str, depth: usize) {
    let PreviewNode::ListItem { task, blocks } = item else {
        paint_block(ui, item, depth);
        return;
    };

    ui.horizontal(|ui| {
        ui.add_space(INDENT * depth as f32);
        match task {
            Some(checked) => {
                let mut checked = *checked;
                ui.add_enabled(false, egui::Checkbox::without_text(&mut checked));
            }
            None => {
                ui.label(RichText::new(marker).size(BODY_SIZE));
            }
        }
        ui.vertical(|ui| {
            for block in blocks {
                paint_block(ui, block, depth + 1);
            }
        });
    });
}

fn paint_table(ui: &mut Ui, head: &[PreviewNode], body: &[PreviewNode]) {
    let id = ui.next_auto_id();
    egui::ScrollArea::horizontal()
        .id_source(id)
        .show(ui, |ui| {
            egui::Grid::new(id.with("grid"))
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for row in head.iter().chain(body.iter()) {
                        let PreviewNode::TableRow(cells) = row else {
                            continue;
                        };
                        for cell in cells {
                            paint_table_cell(ui, cell);
                        }
                        ui.end_row();
                    }
                });
        });
}

fn paint_table_cell(ui: &mut Ui, cell: &PreviewNode) {
    let PreviewNode::TableCell {
        header,
        alignment,
        spans,
    } = cell
    else {
        paint_block(ui, cell, 0);
        return;
    };

    let align = match alignment {
        TableAlignment::Center => Align::Center,
        TableAlignment::Right => Align::Max,
        TableAlignment::Left | TableAlignment::None => Align::Min,
    };
    ui.with_layout(Layout::top_down(align), |ui| {
        paint_spans(ui, spans, BODY_SIZE, *header);
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Content
// ─────────────────────────────────────────────────────────────────────────────

fn paint_spans(ui: &mut Ui, spans: &[InlineSpan], size: f32, strong: bool) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            if span.is_line_break() {
                ui.end_row();
                continue;
            }
            let text = rich_span(ui, span, size, strong);
            match &span.style.link {
                Some(url) => {
                    ui.hyperlink_to(text, url).on_hover_text(url.as_str());
                }
                None => {
                    ui.label(text);
                }
            }
        }
    });
}

fn rich_span(ui: &Ui, span: &InlineSpan, size: f32, strong: bool) -> RichText {
    let mut text = RichText::new(&span.text).size(size);
    if span.style.code {
        text = text
            .family(egui::FontFamily::Monospace)
            .background_color(ui.visuals().faint_bg_color);
    }
    if strong || span.style.strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    if span.style.strikethrough {
        text = text.strikethrough();
    }
    if span.style.link.is_some() {
        text = text.color(link_color(ui));
    }
    text
}

fn link_color(ui: &Ui) -> Color32 {
    ui.visuals().hyperlink_color
}
