//! Error types for annotation input.

use thiserror::Error;

/// Malformed entity annotation input.
///
/// These never reach callers of [`annotate_ner`](crate::annotate_ner); the
/// merger logs them and falls back to unannotated text.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// The parallel offset and label arrays differ in length.
    #[error("annotation arrays differ in length: {starts} starts, {ends} ends, {labels} labels")]
    LengthMismatch {
        /// Number of start offsets.
        starts: usize,
        /// Number of end offsets.
        ends: usize,
        /// Number of label lists.
        labels: usize,
    },

    /// Confidence scores are present but do not line up with the spans.
    #[error("expected {expected} confidence scores, found {found}")]
    ConfidenceMismatch {
        /// Number of spans.
        expected: usize,
        /// Number of confidence scores.
        found: usize,
    },

    /// An offset is negative.
    #[error("annotation {index} has negative offset {value}")]
    NegativeOffset {
        /// Position of the annotation in the arrays.
        index: usize,
        /// The offending offset.
        value: i64,
    },

    /// An annotation carries no label.
    #[error("annotation {index} has no label")]
    MissingLabel {
        /// Position of the annotation in the arrays.
        index: usize,
    },

    /// The annotation payload is not shaped like parallel arrays.
    #[error("malformed annotation payload: {0}")]
    Shape(#[from] serde_json::Error),
}
