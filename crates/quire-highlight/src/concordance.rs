//! Concordance (keyword-in-context) extraction.
//!
//! Long field text is condensed to windows of context around the first
//! occurrence of each search term. Nearby windows are fused; distinct windows
//! are joined with an ellipsis.

use quire_span::{CharIndex, Span, fuse_within};

use crate::pattern::{is_searchable, literal_pattern};

/// Marker for text cut away at a window edge.
pub const ELLIPSIS: &str = "...";

/// Separator between distinct windows.
const WINDOW_SEPARATOR: &str = " ... ";

/// Tuning for [`concordance_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcordanceOptions {
    /// Characters of context on each side of a match.
    pub context_chars: usize,
    /// Only this many leading terms are searched for.
    pub max_terms: usize,
    /// Windows separated by fewer characters than this are fused. The bound
    /// is exclusive: a gap of exactly `fuse_gap` keeps the windows apart.
    pub fuse_gap: usize,
}

impl Default for ConcordanceOptions {
    fn default() -> Self {
        Self {
            context_chars: 100,
            max_terms: 5,
            fuse_gap: 20,
        }
    }
}

/// Condenses `text` to context windows around `terms`.
pub fn concordance(text: &str, terms: &[String], context_chars: usize) -> String {
    concordance_with(
        text,
        terms,
        &ConcordanceOptions {
            context_chars,
            ..ConcordanceOptions::default()
        },
    )
}

/// Condenses `text` to context windows around `terms` with explicit options.
///
/// Two windows fuse only when the gap between them is strictly less than
/// `fuse_gap` characters, so a match starting exactly `context_chars +
/// fuse_gap` characters after the previous window's end opens a new window.
///
/// Without any match the text is returned whole if it fits in twice the
/// context size, and cut to that size with a trailing ellipsis otherwise.
pub fn concordance_with(text: &str, terms: &[String], options: &ConcordanceOptions) -> String {
    let index = CharIndex::new(text);
    let len = index.char_len();

    let windows: Vec<Span> = terms
        .iter()
        .take(options.max_terms)
        .filter(|t| is_searchable(t))
        .filter_map(|t| first_match(&index, t))
        .map(|m| m.widen(options.context_chars, len))
        .collect();

    if windows.is_empty() {
        let limit = options.context_chars.saturating_mul(2);
        if len <= limit {
            return text.to_string();
        }
        return format!("{}{ELLIPSIS}", index.slice(Span::new(0, limit)));
    }

    fuse_within(windows, options.fuse_gap)
        .into_iter()
        .map(|window| {
            let mut excerpt = String::new();
            if window.start > 0 {
                excerpt.push_str(ELLIPSIS);
            }
            excerpt.push_str(index.slice(window));
            if window.end < len {
                excerpt.push_str(ELLIPSIS);
            }
            excerpt
        })
        .collect::<Vec<_>>()
        .join(WINDOW_SEPARATOR)
}

/// Character span of the first case-insensitive occurrence of `term`.
fn first_match(index: &CharIndex<'_>, term: &str) -> Option<Span> {
    let m = literal_pattern(term)?.find(index.text())?;
    Some(index.span_of_bytes(m.start(), m.end()))
}
