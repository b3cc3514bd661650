//! The per-cell rendering pipeline.

use std::sync::Arc;

use quire_config::Config;
use quire_highlight::{
    ConcordanceOptions, LabelStyle, LabelTable, NerResult, Segment, annotate, annotate_ner,
    concordance_with, plain_segments,
};
use tracing::trace;

use crate::{AnnotationCache, CacheKey, DEFAULT_PREFIX_CHARS, KeyParts};

/// One field of one result document, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Document identifier.
    pub document_id: String,
    /// Field name.
    pub field: String,
    /// Raw field text.
    pub text: String,
    /// Entity annotations reported for this field.
    pub ner: Option<NerResult>,
    /// The backend sent entity annotations that could not be read.
    pub ner_unreadable: bool,
    /// Terms to highlight.
    pub terms: Vec<String>,
    /// Apply the entity overlay.
    pub entities: bool,
    /// Condense the text to context windows around the terms.
    pub concordance: bool,
}

impl Cell {
    /// Creates a cell with entities enabled and no terms.
    pub fn new(
        document_id: impl Into<String>,
        field: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            field: field.into(),
            text: text.into(),
            ner: None,
            ner_unreadable: false,
            terms: Vec::new(),
            entities: true,
            concordance: false,
        }
    }

    /// Attaches entity annotations.
    pub fn with_ner(mut self, ner: NerResult) -> Self {
        self.ner = Some(ner);
        self.ner_unreadable = false;
        self
    }

    /// Marks the field's entity annotations as unreadable.
    ///
    /// With entities enabled such a cell renders as one plain segment.
    pub fn with_unreadable_ner(mut self) -> Self {
        self.ner = None;
        self.ner_unreadable = true;
        self
    }

    /// Sets the highlight terms.
    pub fn with_terms(mut self, terms: Vec<String>) -> Self {
        self.terms = terms;
        self
    }

    /// Enables or disables the entity overlay.
    pub fn with_entities(mut self, enabled: bool) -> Self {
        self.entities = enabled;
        self
    }

    /// Enables or disables the concordance view.
    pub fn with_concordance(mut self, enabled: bool) -> Self {
        self.concordance = enabled;
        self
    }

    /// The inputs that identify this cell's output.
    fn key_parts(&self) -> KeyParts<'_> {
        KeyParts {
            document_id: &self.document_id,
            field: &self.field,
            text: &self.text,
            entities: self.entities,
            concordance: self.concordance,
            terms: &self.terms,
        }
    }
}

/// Renders cells to segments through an [`AnnotationCache`].
#[derive(Debug)]
pub struct CellRenderer {
    /// Finished cells.
    cache: AnnotationCache,
    /// Entity label styles.
    labels: LabelTable,
    /// Concordance tuning.
    concordance: ConcordanceOptions,
    /// Characters of text that take part in the cache key.
    prefix_chars: usize,
}

impl Default for CellRenderer {
    fn default() -> Self {
        Self::new(
            AnnotationCache::new(),
            LabelTable::default(),
            ConcordanceOptions::default(),
        )
    }
}

impl CellRenderer {
    /// Creates a renderer from its parts.
    pub fn new(cache: AnnotationCache, labels: LabelTable, concordance: ConcordanceOptions) -> Self {
        Self {
            cache,
            labels,
            concordance,
            prefix_chars: DEFAULT_PREFIX_CHARS,
        }
    }

    /// Creates a renderer from configured settings.
    ///
    /// Configured labels extend the built-in label table.
    pub fn from_config(config: &Config) -> Self {
        let mut labels = LabelTable::default();
        labels.set_default_color(config.entities.default_color.as_str());
        for (label, style) in &config.entities.labels {
            labels.insert(
                label.as_str(),
                LabelStyle::new(style.name.as_str(), style.color.as_str()),
            );
        }
        let concordance = ConcordanceOptions {
            context_chars: config.concordance.context_chars,
            max_terms: config.concordance.max_terms,
            fuse_gap: config.concordance.fuse_gap,
        };
        Self {
            cache: AnnotationCache::from_settings(&config.cache),
            labels,
            concordance,
            prefix_chars: config.cache.prefix_chars,
        }
    }

    /// The label table used for entities.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// The underlying cache.
    pub fn cache(&self) -> &AnnotationCache {
        &self.cache
    }

    /// Renders one cell, reusing a cached result when the same inputs were seen before.
    ///
    /// With concordance enabled the text is condensed first and entities are
    /// not applied, since their offsets refer to the full text.
    pub fn render(&self, cell: &Cell) -> Arc<[Segment]> {
        let key = CacheKey::with_prefix(&cell.key_parts(), self.prefix_chars);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        trace!(
            %key,
            document = %cell.document_id,
            field = %cell.field,
            "rendering cell"
        );
        let segments = if cell.concordance {
            let condensed = concordance_with(&cell.text, &cell.terms, &self.concordance);
            annotate(&condensed, None, &cell.terms, false, &self.labels)
        } else if cell.entities && cell.ner_unreadable {
            plain_segments(&cell.text)
        } else {
            annotate_ner(
                &cell.text,
                cell.ner.as_ref(),
                &cell.terms,
                cell.entities,
                &self.labels,
            )
        };

        let segments: Arc<[Segment]> = Arc::from(segments);
        self.cache.set(key, Arc::clone(&segments));
        segments
    }
}

#[cfg(test)]
mod tests {
    use quire_config::LabelSettings;
    use quire_highlight::reconstruct;

    use super::*;

    /// NER marking "Kant" at the start of the text.
    fn kant_ner() -> NerResult {
        NerResult {
            starts: vec![0],
            ends: vec![4],
            labels: vec![vec!["PER".into()]],
            confidences: vec![0.98],
        }
    }

    #[test]
    fn renders_entities_and_highlights() {
        let renderer = CellRenderer::default();
        let cell = Cell::new("d1", "body", "Kant wrote on peace")
            .with_ner(kant_ner())
            .with_terms(vec!["peace".into()]);

        let segments = renderer.render(&cell);
        assert_eq!(
            segments.as_ref(),
            &[
                Segment::entity("Kant", "Person", "#e57373"),
                Segment::plain(" wrote on "),
                Segment::highlight("peace"),
            ]
        );
    }

    #[test]
    fn second_render_is_a_cache_hit() {
        let renderer = CellRenderer::default();
        let cell = Cell::new("d1", "body", "Kant wrote on peace").with_ner(kant_ner());

        let first = renderer.render(&cell);
        let second = renderer.render(&cell);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(renderer.cache().len(), 1);
    }

    #[test]
    fn disabling_entities_is_a_different_cell() {
        let renderer = CellRenderer::default();
        let cell = Cell::new("d1", "body", "Kant wrote").with_ner(kant_ner());

        let with = renderer.render(&cell);
        let without = renderer.render(&cell.clone().with_entities(false));
        assert_eq!(renderer.cache().len(), 2);
        assert!(matches!(with[0], Segment::Entity { .. }));
        assert_eq!(without.as_ref(), &[Segment::plain("Kant wrote")]);
    }

    #[test]
    fn concordance_skips_entities() {
        let renderer = CellRenderer::default();
        let text = format!("Kant {} peace {}", "x".repeat(300), "y".repeat(300));
        let cell = Cell::new("d1", "body", text)
            .with_ner(kant_ner())
            .with_terms(vec!["peace".into()])
            .with_concordance(true);

        let segments = renderer.render(&cell);
        assert!(
            segments
                .iter()
                .all(|s| !matches!(s, Segment::Entity { .. }))
        );
        assert!(segments.contains(&Segment::highlight("peace")));
        assert!(reconstruct(&segments).starts_with("..."));
    }

    #[test]
    fn malformed_ner_renders_plain() {
        let renderer = CellRenderer::default();
        let ner = NerResult {
            starts: vec![0, 5],
            ends: vec![4],
            labels: vec![vec!["PER".into()]],
            confidences: vec![],
        };
        let cell = Cell::new("d1", "body", "Kant wrote")
            .with_ner(ner)
            .with_terms(vec!["wrote".into()]);
        assert_eq!(
            renderer.render(&cell).as_ref(),
            &[Segment::plain("Kant wrote")]
        );
    }

    #[test]
    fn unreadable_ner_renders_plain() {
        let renderer = CellRenderer::default();
        let cell = Cell::new("d1", "body", "Kant wrote")
            .with_terms(vec!["wrote".into()])
            .with_unreadable_ner();
        assert_eq!(
            renderer.render(&cell).as_ref(),
            &[Segment::plain("Kant wrote")]
        );

        let without_entities = cell.with_entities(false);
        assert_eq!(
            renderer.render(&without_entities).as_ref(),
            &[Segment::plain("Kant "), Segment::highlight("wrote")]
        );
    }

    #[test]
    fn from_config_applies_labels_and_cache_size() {
        let mut config = Config::default();
        config.cache.capacity = 3;
        config.entities.labels.insert(
            "PER".into(),
            LabelSettings {
                name: "Human".into(),
                color: "#010203".into(),
            },
        );
        let renderer = CellRenderer::from_config(&config);
        assert_eq!(renderer.cache().capacity(), 3);
        assert_eq!(renderer.labels().style("PER").name, "Human");
        assert_eq!(renderer.labels().style("ORG").name, "Organization");

        let cell = Cell::new("d1", "body", "Kant wrote").with_ner(kant_ner());
        assert_eq!(
            renderer.render(&cell)[0],
            Segment::entity("Kant", "Human", "#010203")
        );
    }
}
