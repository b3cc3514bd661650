//! Result-text annotation for quire.
//!
//! Turns a document field's raw text, the entity spans reported by the search
//! backend and the user's search terms into an ordered list of typed
//! [`Segment`]s ready for display:
//!
//! - [`annotate`] overlays entities first and search-term highlights second;
//!   entities always win where the two overlap
//! - [`concordance`] condenses long text to windows of context around matches
//! - [`render_ansi`] draws segments for a terminal
//!
//! Concatenating the text of the produced segments always reproduces the input
//! text exactly.
//!
//! # Example
//!
//! ```
//! use quire_highlight::{LabelTable, Segment, annotate};
//!
//! let segments = annotate(
//!     "Kant wrote on peace",
//!     None,
//!     &["peace".to_string()],
//!     true,
//!     &LabelTable::default(),
//! );
//! assert_eq!(segments[1], Segment::highlight("peace"));
//! ```

#![warn(missing_docs)]

mod concordance;
mod entity;
mod error;
mod labels;
mod merge;
mod pattern;
mod render;
mod segment;

pub use concordance::{ConcordanceOptions, ELLIPSIS, concordance, concordance_with};
pub use entity::{EntityAnnotation, NerResult};
pub use error::AnnotationError;
pub use labels::{DEFAULT_ENTITY_COLOR, LabelStyle, LabelTable};
pub use merge::{annotate, annotate_ner, plain_segments};
pub use render::{colors, dim, header, render_ansi, subheader, success, warning};
pub use segment::{Segment, reconstruct};
