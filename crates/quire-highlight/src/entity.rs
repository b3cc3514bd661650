//! Entity annotations as delivered by the search backend.

use quire_span::Span;
use serde::{Deserialize, Serialize};

use crate::AnnotationError;

/// A labeled character span within one document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    /// Character offsets `[start, end)`.
    #[serde(flatten)]
    pub span: Span,
    /// Raw label, e.g. `PER`.
    pub label: String,
    /// Model confidence, carried through unchanged.
    pub confidence: f64,
}

impl EntityAnnotation {
    /// Creates an annotation.
    pub fn new(start: usize, end: usize, label: impl Into<String>, confidence: f64) -> Self {
        Self {
            span: Span::new(start, end),
            label: label.into(),
            confidence,
        }
    }
}

/// Per-field NER output: parallel arrays, one position per entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NerResult {
    /// Start offsets.
    pub starts: Vec<i64>,
    /// End offsets.
    pub ends: Vec<i64>,
    /// Labels per entity; only the first is used.
    pub labels: Vec<Vec<String>>,
    /// Confidence per entity; may be omitted entirely.
    pub confidences: Vec<f64>,
}

impl NerResult {
    /// Reads a NER result from an arbitrary JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AnnotationError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Validates the arrays and zips them into annotations.
    pub fn to_annotations(&self) -> Result<Vec<EntityAnnotation>, AnnotationError> {
        let count = self.starts.len();
        if self.ends.len() != count || self.labels.len() != count {
            return Err(AnnotationError::LengthMismatch {
                starts: count,
                ends: self.ends.len(),
                labels: self.labels.len(),
            });
        }
        if !self.confidences.is_empty() && self.confidences.len() != count {
            return Err(AnnotationError::ConfidenceMismatch {
                expected: count,
                found: self.confidences.len(),
            });
        }

        (0..count)
            .map(|index| {
                let start = offset(index, self.starts[index])?;
                let end = offset(index, self.ends[index])?;
                let label = self.labels[index]
                    .first()
                    .ok_or(AnnotationError::MissingLabel { index })?;
                let confidence = self.confidences.get(index).copied().unwrap_or(0.0);
                Ok(EntityAnnotation::new(start, end, label.clone(), confidence))
            })
            .collect()
    }
}

/// Converts a wire offset, rejecting negatives.
fn offset(index: usize, value: i64) -> Result<usize, AnnotationError> {
    usize::try_from(value).map_err(|_| AnnotationError::NegativeOffset { index, value })
}
