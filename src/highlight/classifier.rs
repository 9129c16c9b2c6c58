//! Regex-based token classifier for fenced code blocks
//!
//! `classify_code` turns raw code into HTML-safe markup with classification
//! spans. It runs five passes in a fixed order, each over the output of the
//! previous one:
//!
//! 1. escape the five HTML metacharacters
//! 2. wrap string literals
//! 3. wrap comments
//! 4. wrap numerals
//! 5. wrap the language's keywords, in table order
//!
//! Passes 3 to 5 skip candidates that already sit inside produced markup.
//! That check only looks at the current line, so the second and later lines
//! of a multi-line block comment can still pick up number and keyword spans.
//! Highlighting is cosmetic and this approximation is intentional.

use super::keywords::{canonical_language, KEYWORD_TABLE};
use super::TokenClass;
use log::{debug, error};
use std::collections::HashMap;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Backtick, double-quote and single-quote spans, as they look after escaping.
const STRING_PATTERN: &str = r"`[^`\n]*?`|&quot;.*?&quot;|&#39;.*?&#39;";

/// Line, block and hash comments. A `#` right after `&` starts an entity.
const COMMENT_PATTERN: &str = r"//[^\n]*|/\*[\s\S]*?\*/|(?<!&)#[^\n]*";

/// Decimal numerals with an optional fraction, outside entities and not
/// directly before a closing span.
const NUMBER_PATTERN: &str = r"(?<!&#)\b\d+(?:\.\d+)?\b(?!</span>)";

static STRING_RE: OnceLock<Option<regex::Regex>> = OnceLock::new();
static COMMENT_RE: OnceLock<Option<fancy_regex::Regex>> = OnceLock::new();
static NUMBER_RE: OnceLock<Option<fancy_regex::Regex>> = OnceLock::new();
static KEYWORD_RES: OnceLock<HashMap<&'static str, Vec<regex::Regex>>> = OnceLock::new();

fn string_regex() -> Option<&'static regex::Regex> {
    STRING_RE
        .get_or_init(|| {
            regex::Regex::new(STRING_PATTERN)
                .map_err(|e| error!("String pattern failed to compile: {}", e))
                .ok()
        })
        .as_ref()
}

fn comment_regex() -> Option<&'static fancy_regex::Regex> {
    COMMENT_RE
        .get_or_init(|| {
            fancy_regex::Regex::new(COMMENT_PATTERN)
                .map_err(|e| error!("Comment pattern failed to compile: {}", e))
                .ok()
        })
        .as_ref()
}

fn number_regex() -> Option<&'static fancy_regex::Regex> {
    NUMBER_RE
        .get_or_init(|| {
            fancy_regex::Regex::new(NUMBER_PATTERN)
                .map_err(|e| error!("Number pattern failed to compile: {}", e))
                .ok()
        })
        .as_ref()
}

/// Whole-word patterns for every table, compiled once on first use.
fn keyword_regexes(language: &str) -> &'static [regex::Regex] {
    let tables = KEYWORD_RES.get_or_init(|| {
        debug!("Compiling keyword patterns for {} languages", KEYWORD_TABLE.len());
        KEYWORD_TABLE
            .iter()
            .map(|(name, words)| {
                let compiled = words
                    .iter()
                    .filter_map(|word| {
                        regex::Regex::new(&format!(r"\b{}\b", regex::escape(word)))
                            .map_err(|e| error!("Keyword {:?} failed to compile: {}", word, e))
                            .ok()
                    })
                    .collect();
                (*name, compiled)
            })
            .collect()
    });

    canonical_language(language)
        .and_then(|name| tables.get(name))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Classify `code` written in `language` into highlighted markup.
///
/// Never fails: unknown languages get no keyword spans and empty input
/// yields an empty string.
///
/// # Example
/// ```ignore
/// let html = classify_code("\"hi\" + 42", "javascript");
/// assert_eq!(
///     html,
///     "<span class=\"hl-string\">&quot;hi&quot;</span> + <span class=\"hl-number\">42</span>"
/// );
/// ```
pub fn classify_code(code: &str, language: &str) -> String {
    let escaped = escape_html(code);
    let with_strings = wrap_strings(&escaped);
    let with_comments = wrap_comments(&with_strings);
    let with_numbers = wrap_numbers(&with_comments);
    wrap_keywords(&with_numbers, language)
}

/// Escape `&`, `<`, `>`, `"` and `'` to their entity forms.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ─────────────────────────────────────────────────────────────────────────────
// Passes
// ─────────────────────────────────────────────────────────────────────────────

fn wrap_strings(text: &str) -> String {
    match string_regex() {
        Some(re) => wrap_matches(text, TokenClass::String, false, |pos| {
            re.find_at(text, pos).map(|m| (m.start(), m.end()))
        }),
        None => text.to_string(),
    }
}

fn wrap_comments(text: &str) -> String {
    match comment_regex() {
        Some(re) => wrap_matches(text, TokenClass::Comment, true, |pos| {
            fancy_find(re, text, pos)
        }),
        None => text.to_string(),
    }
}

fn wrap_numbers(text: &str) -> String {
    match number_regex() {
        Some(re) => wrap_matches(text, TokenClass::Number, true, |pos| {
            fancy_find(re, text, pos)
        }),
        None => text.to_string(),
    }
}

fn wrap_keywords(text: &str, language: &str) -> String {
    keyword_regexes(language)
        .iter()
        .fold(text.to_string(), |current, re| {
            wrap_matches(&current, TokenClass::Keyword, true, |pos| {
                re.find_at(&current, pos).map(|m| (m.start(), m.end()))
            })
        })
}

/// Run a fancy-regex search, treating engine errors (e.g. backtrack limits)
/// as the end of the matches.
fn fancy_find(re: &fancy_regex::Regex, text: &str, pos: usize) -> Option<(usize, usize)> {
    match re.find_from_pos(text, pos) {
        Ok(found) => found.map(|m| (m.start(), m.end())),
        Err(e) => {
            debug!("Highlight search stopped at byte {}: {}", pos, e);
            None
        }
    }
}

/// Wrap every match produced by `find` in a span of `class`.
///
/// `find(pos)` returns the next match at or after byte `pos`. When `guarded`
/// is set, matches that start inside existing markup are left alone and the
/// search resumes one character later, so a skipped match never hides the
/// candidates that follow it.
fn wrap_matches<F>(text: &str, class: TokenClass, guarded: bool, mut find: F) -> String
where
    F: FnMut(usize) -> Option<(usize, usize)>,
{
    let mut output = String::with_capacity(text.len());
    let mut guard = MarkupGuard::new(text);
    let mut copied = 0;
    let mut pos = 0;

    while pos <= text.len() {
        let Some((start, end)) = find(pos) else {
            break;
        };

        if end <= start || (guarded && guard.inside_markup(start)) {
            pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
            continue;
        }

        output.push_str(&text[copied..start]);
        output.push_str(class.open_tag());
        output.push_str(&text[start..end]);
        output.push_str(TokenClass::CLOSE_TAG);
        copied = end;
        pos = end;
    }

    output.push_str(&text[copied..]);
    output
}

/// Tracks whether a position lies inside a tag or an unclosed span, judged
/// from the current line only.
///
/// Queries must come in non-decreasing order; the scanner only moves
/// forward, so a whole pass costs one walk over the text.
struct MarkupGuard<'a> {
    bytes: &'a [u8],
    /// Bytes before `cursor` have been folded into the counters
    cursor: usize,
    /// A `<` was seen on this line with no `>` after it
    in_tag: bool,
    opened: usize,
    closed: usize,
}

impl<'a> MarkupGuard<'a> {
    const OPEN: &'static [u8] = b"<span";

    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            cursor: 0,
            in_tag: false,
            opened: 0,
            closed: 0,
        }
    }

    fn inside_markup(&mut self, pos: usize) -> bool {
        let close = TokenClass::CLOSE_TAG.as_bytes();
        let target = pos.min(self.bytes.len());

        while self.cursor < target {
            let byte = self.bytes[self.cursor];
            self.cursor += 1;
            match byte {
                b'\n' => {
                    self.in_tag = false;
                    self.opened = 0;
                    self.closed = 0;
                    continue;
                }
                b'<' => self.in_tag = true,
                b'>' => self.in_tag = false,
                _ => {}
            }
            let seen = &self.bytes[..self.cursor];
            if seen.ends_with(Self::OPEN) {
                self.opened += 1;
            } else if seen.ends_with(close) {
                self.closed += 1;
            }
        }

        self.in_tag || self.opened > self.closed
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
