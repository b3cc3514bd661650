//! Span and character-offset utilities for quire.
//!
//! Everything above this crate speaks in *character* offsets, because that is
//! what the search backend reports for entity annotations and what users count
//! when they ask for "100 characters of context". Rust strings are indexed by
//! byte, so this crate provides:
//!
//! - [`Span`]: a half-open `[start, end)` interval with clipping and overlap tests
//! - [`fuse_within`]: sorts spans and fuses neighbours separated by less than a gap
//! - [`CharIndex`]: a char ↔ byte offset table for safe slicing of UTF-8 text
//!
//! # Example
//!
//! ```
//! use quire_span::{CharIndex, Span, fuse_within};
//!
//! let fused = fuse_within(vec![Span::new(0, 5), Span::new(8, 12)], 4);
//! assert_eq!(fused, vec![Span::new(0, 12)]);
//!
//! let index = CharIndex::new("héllo");
//! assert_eq!(index.slice(Span::new(1, 3)), "él");
//! ```

#![warn(missing_docs)]

mod chars;
mod span;

pub use chars::CharIndex;
pub use span::{Span, fuse_within};
