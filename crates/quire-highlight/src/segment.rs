//! Typed runs of output text.

use serde::{Deserialize, Serialize};

/// One contiguous, type-tagged run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Unannotated text.
    Plain {
        /// The text.
        text: String,
    },
    /// A named entity.
    Entity {
        /// The text.
        text: String,
        /// Display name of the entity label.
        label: String,
        /// Base color of the label, `#rrggbb`.
        color: String,
    },
    /// A search-term match.
    Highlight {
        /// The text.
        text: String,
    },
}

impl Segment {
    /// Creates a plain segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    /// Creates an entity segment.
    pub fn entity(
        text: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self::Entity {
            text: text.into(),
            label: label.into(),
            color: color.into(),
        }
    }

    /// Creates a highlight segment.
    pub fn highlight(text: impl Into<String>) -> Self {
        Self::Highlight { text: text.into() }
    }

    /// The segment's text.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } | Self::Entity { text, .. } | Self::Highlight { text } => text,
        }
    }
}

/// Concatenates segment text back into the annotated string.
pub fn reconstruct(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}
