//! Character ↔ byte offset translation.

use crate::Span;

/// Offset table mapping character positions of a string to byte positions.
///
/// Built once per text; lookups are O(1) for char → byte and O(log n) for
/// byte → char.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    /// The indexed text.
    text: &'a str,
    /// Byte offset of every character, followed by `text.len()`.
    bytes: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    /// Indexes `text`.
    pub fn new(text: &'a str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        bytes.push(text.len());
        Self { text, bytes }
    }

    /// Returns the indexed text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Byte offset of character `pos`, saturating at the end of the text.
    pub fn byte_of(&self, pos: usize) -> usize {
        self.bytes[pos.min(self.char_len())]
    }

    /// Character position of byte offset `byte`.
    ///
    /// Offsets inside a multi-byte character resolve to that character.
    pub fn char_of(&self, byte: usize) -> usize {
        match self.bytes.binary_search(&byte) {
            Ok(i) => i,
            Err(pos) => pos.saturating_sub(1),
        }
    }

    /// Converts a byte range into a character span.
    pub fn span_of_bytes(&self, start: usize, end: usize) -> Span {
        Span::new(self.char_of(start), self.char_of(end))
    }

    /// Slices the text by character span, clipping to the text.
    pub fn slice(&self, span: Span) -> &'a str {
        let span = span.clip(self.char_len());
        &self.text[self.byte_of(span.start)..self.byte_of(span.end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_offsets_are_identity() {
        let index = CharIndex::new("hello");
        assert_eq!(index.char_len(), 5);
        assert_eq!(index.byte_of(3), 3);
        assert_eq!(index.char_of(3), 3);
    }

    #[test]
    fn multibyte_offsets() {
        // "привет" is two bytes per character
        let index = CharIndex::new("привет");
        assert_eq!(index.char_len(), 6);
        assert_eq!(index.byte_of(2), 4);
        assert_eq!(index.char_of(4), 2);
        assert_eq!(index.char_of(5), 2);
        assert_eq!(index.slice(Span::new(1, 3)), "ри");
    }

    #[test]
    fn slice_clips_out_of_range() {
        let index = CharIndex::new("abc");
        assert_eq!(index.slice(Span::new(1, 99)), "bc");
        assert_eq!(index.slice(Span::new(7, 99)), "");
        assert_eq!(index.byte_of(42), 3);
    }

    #[test]
    fn empty_text() {
        let index = CharIndex::new("");
        assert_eq!(index.char_len(), 0);
        assert_eq!(index.slice(Span::new(0, 4)), "");
    }

    #[test]
    fn span_of_bytes_roundtrips_match_offsets() {
        let text = "naïve café";
        let index = CharIndex::new(text);
        let start = text.find("café").unwrap();
        let span = index.span_of_bytes(start, start + "café".len());
        assert_eq!(span, Span::new(6, 10));
        assert_eq!(index.slice(span), "café");
    }
}
