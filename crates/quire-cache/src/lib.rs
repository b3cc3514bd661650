//! Annotation caching for quire.
//!
//! Annotating a result cell (entity overlay, highlight splitting, optional
//! concordance) is repeated every time a result list is redrawn. This crate
//! keeps the finished segments of recently rendered cells:
//!
//! - [`CacheKey`] fingerprints everything that affects a cell's output
//! - [`AnnotationCache`] is a bounded, insertion-ordered store shared across threads
//! - [`CellRenderer`] runs the full pipeline for one cell through the cache
//!
//! # Example
//!
//! ```
//! use quire_cache::{Cell, CellRenderer};
//!
//! let renderer = CellRenderer::default();
//! let cell = Cell::new("doc-1", "title", "Perpetual peace").with_terms(vec!["peace".into()]);
//!
//! let first = renderer.render(&cell);
//! let second = renderer.render(&cell);
//! assert_eq!(first, second);
//! assert_eq!(renderer.cache().len(), 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod cell;
mod key;

pub use cache::{AnnotationCache, DEFAULT_CAPACITY, DEFAULT_RETAIN_RATIO};
pub use cell::{Cell, CellRenderer};
pub use key::{CacheKey, DEFAULT_PREFIX_CHARS, KeyParts};
