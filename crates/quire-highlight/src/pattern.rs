//! Literal, case-insensitive term patterns.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Terms this short are never matched.
pub const MIN_TERM_CHARS: usize = 2;

/// True if `term` is long enough to highlight or search for.
pub fn is_searchable(term: &str) -> bool {
    term.chars().count() >= MIN_TERM_CHARS
}

/// Compiles `term` into a case-insensitive literal matcher.
///
/// Returns `None` (after logging) if the escaped pattern exceeds the regex
/// size limits.
pub fn literal_pattern(term: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(term, error = %e, "skipping term that cannot be matched");
            None
        }
    }
}
