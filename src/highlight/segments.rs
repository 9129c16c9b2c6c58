//! Decode classifier markup into plain-text segments
//!
//! The native preview has no HTML engine, so the classifier's output is
//! split back into runs of text tagged with their innermost token class.

use super::TokenClass;

// ─────────────────────────────────────────────────────────────────────────────
// ClassifiedSegment
// ─────────────────────────────────────────────────────────────────────────────

/// A run of decoded code text and the class it is highlighted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSegment {
    /// The decoded text content
    pub text: String,
    /// Innermost enclosing class, `None` for unclassified code
    pub class: Option<TokenClass>,
}

/// Entities produced by the escaping pass.
const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
];

/// Split classifier markup into segments.
///
/// Adjacent text with the same class is merged. Tags other than the
/// classification spans are kept as literal text.
pub fn classified_segments(markup: &str) -> Vec<ClassifiedSegment> {
    let mut segments: Vec<ClassifiedSegment> = Vec::new();
    let mut stack: Vec<TokenClass> = Vec::new();
    let mut rest = markup;

    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(TokenClass::CLOSE_TAG) && !stack.is_empty() {
            stack.pop();
            rest = &rest[TokenClass::CLOSE_TAG.len()..];
            continue;
        }

        if let Some(class) = TokenClass::all()
            .iter()
            .find(|class| rest.starts_with(class.open_tag()))
        {
            stack.push(*class);
            rest = &rest[class.open_tag().len()..];
            continue;
        }

        let (decoded, consumed) = ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
            .map(|(entity, decoded)| (*decoded, entity.len()))
            .unwrap_or((ch, ch.len_utf8()));

        push_char(&mut segments, decoded, stack.last().copied());
        rest = &rest[consumed..];
    }

    segments
}

fn push_char(segments: &mut Vec<ClassifiedSegment>, ch: char, class: Option<TokenClass>) {
    match segments.last_mut() {
        Some(last) if last.class == class => last.text.push(ch),
        _ => segments.push(ClassifiedSegment {
            text: ch.to_string(),
            class,
        }),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
