//! Cache key computation.
//!
//! A key is a 64-bit SipHash-2-4 fingerprint of every input that changes a
//! cell's rendered segments.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use siphasher::sip::SipHasher24;

/// Characters of cell text that take part in the key by default.
pub const DEFAULT_PREFIX_CHARS: usize = 100;

/// Inputs that determine a cell's rendered output.
#[derive(Debug, Clone, Copy)]
pub struct KeyParts<'a> {
    /// Document identifier.
    pub document_id: &'a str,
    /// Field name within the document.
    pub field: &'a str,
    /// Full field text; only a prefix is hashed.
    pub text: &'a str,
    /// Whether the entity overlay is applied.
    pub entities: bool,
    /// Whether the text is condensed to a concordance.
    pub concordance: bool,
    /// Highlight terms, in any order.
    pub terms: &'a [String],
}

/// Fingerprint of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Computes the key, hashing the first [`DEFAULT_PREFIX_CHARS`] characters of text.
    pub fn new(parts: &KeyParts<'_>) -> Self {
        Self::with_prefix(parts, DEFAULT_PREFIX_CHARS)
    }

    /// Computes the key, hashing the first `prefix_chars` characters of text.
    ///
    /// Terms are sorted first so their order does not matter.
    pub fn with_prefix(parts: &KeyParts<'_>, prefix_chars: usize) -> Self {
        let mut terms: Vec<&str> = parts.terms.iter().map(String::as_str).collect();
        terms.sort_unstable();

        let mut hasher = SipHasher24::new();
        parts.document_id.hash(&mut hasher);
        parts.field.hash(&mut hasher);
        char_prefix(parts.text, prefix_chars).hash(&mut hasher);
        parts.entities.hash(&mut hasher);
        parts.concordance.hash(&mut hasher);
        terms.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// The raw 64-bit value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The first `chars` characters of `text`.
fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
