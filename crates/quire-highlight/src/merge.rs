//! Span annotation merging.
//!
//! Two independent annotation sources are layered onto one text:
//!
//! 1. Entity overlay: backend entity spans, sorted by start. The first span in
//!    scan order claims its characters; later spans that reach back into an
//!    already-claimed range are dropped.
//! 2. Highlight overlay: search terms, longest first, split out of the
//!    remaining plain runs only. Entity segments are never re-tagged.

use std::cmp::Reverse;

use quire_span::{CharIndex, Span};
use regex::Regex;
use tracing::warn;

use crate::{
    EntityAnnotation, LabelTable, NerResult, Segment,
    pattern::{is_searchable, literal_pattern},
};

/// Annotates `text` with entity spans and search-term highlights.
///
/// Entities are applied only if `apply_entities` is set and annotations are
/// present; otherwise the whole text starts as one plain run. Terms shorter
/// than two characters are ignored. Zero-length segments are never emitted.
pub fn annotate(
    text: &str,
    entities: Option<&[EntityAnnotation]>,
    terms: &[String],
    apply_entities: bool,
    labels: &LabelTable,
) -> Vec<Segment> {
    let segments = match entities {
        Some(entities) if apply_entities && !entities.is_empty() => {
            entity_overlay(text, entities, labels)
        }
        _ => plain_segments(text),
    };
    highlight_overlay(segments, terms)
}

/// Annotates `text` with a raw backend NER result.
///
/// Malformed NER input is logged and the whole field degrades to a single
/// plain segment, with no highlights; it never reaches the caller as an error.
pub fn annotate_ner(
    text: &str,
    ner: Option<&NerResult>,
    terms: &[String],
    apply_entities: bool,
    labels: &LabelTable,
) -> Vec<Segment> {
    if !apply_entities {
        return annotate(text, None, terms, false, labels);
    }
    match ner.map(NerResult::to_annotations).transpose() {
        Ok(entities) => annotate(text, entities.as_deref(), terms, true, labels),
        Err(e) => {
            warn!(error = %e, "ignoring malformed entity annotations");
            plain_segments(text)
        }
    }
}

/// The whole text as a single plain run; empty text yields no segments.
pub fn plain_segments(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::plain(text)]
    }
}

/// Splits `text` into plain and entity runs.
fn entity_overlay(text: &str, entities: &[EntityAnnotation], labels: &LabelTable) -> Vec<Segment> {
    let index = CharIndex::new(text);
    let len = index.char_len();

    let mut ordered: Vec<&EntityAnnotation> = entities.iter().collect();
    ordered.sort_by_key(|a| a.span.start);

    let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut last = 0;

    for annotation in ordered {
        let span = annotation.span.clip(len);
        if span.is_empty() || Span::new(0, last).overlaps(&span) {
            continue;
        }
        if span.start > last {
            segments.push(Segment::plain(index.slice(Span::new(last, span.start))));
        }
        let style = labels.style(&annotation.label);
        segments.push(Segment::entity(index.slice(span), style.name, style.color));
        last = span.end;
    }

    if last < len {
        segments.push(Segment::plain(index.slice(Span::new(last, len))));
    }

    segments
}

/// Splits highlight runs out of the plain segments, one term at a time.
fn highlight_overlay(segments: Vec<Segment>, terms: &[String]) -> Vec<Segment> {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(String::as_str)
        .filter(|t| is_searchable(t))
        .collect();
    terms.sort_by_key(|t| Reverse(t.chars().count()));

    terms
        .into_iter()
        .filter_map(literal_pattern)
        .fold(segments, |segments, pattern| split_plain(segments, &pattern))
}

/// Re-emits every plain segment split on `pattern`; other segments pass through.
fn split_plain(segments: Vec<Segment>, pattern: &Regex) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Plain { text } => split_text(&text, pattern, &mut out),
            other => out.push(other),
        }
    }
    out
}

/// Appends alternating plain/highlight runs of `text` to `out`.
fn split_text(text: &str, pattern: &Regex, out: &mut Vec<Segment>) {
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.is_empty() {
            continue;
        }
        if m.start() > last {
            out.push(Segment::plain(&text[last..m.start()]));
        }
        out.push(Segment::highlight(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        out.push(Segment::plain(&text[last..]));
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::reconstruct;

    /// Annotates with the default label table.
    fn run(
        text: &str,
        entities: &[EntityAnnotation],
        terms: &[&str],
        apply_entities: bool,
    ) -> Vec<Segment> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        annotate(text, Some(entities), &terms, apply_entities, &LabelTable::default())
    }

    /// Shorthand for an annotation with full confidence.
    fn ent(start: usize, end: usize, label: &str) -> EntityAnnotation {
        EntityAnnotation::new(start, end, label, 1.0)
    }

    #[test]
    fn plain_text_without_annotations() {
        let segments = run("just text", &[], &[], true);
        assert_eq!(segments, vec![Segment::plain("just text")]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(run("", &[ent(0, 3, "PER")], &["ab"], true).is_empty());
    }

    #[test]
    fn entities_split_text() {
        let text = "Kant met Hume in Berlin";
        let segments = run(text, &[ent(17, 23, "LOC"), ent(0, 4, "PER")], &[], true);
        assert_eq!(
            segments,
            vec![
                Segment::entity("Kant", "Person", "#e57373"),
                Segment::plain(" met Hume in "),
                Segment::entity("Berlin", "Location", "#64b5f6"),
            ]
        );
    }

    #[test]
    fn entities_ignored_when_disabled() {
        let segments = run("Kant met Hume", &[ent(0, 4, "PER")], &[], false);
        assert_eq!(segments, vec![Segment::plain("Kant met Hume")]);
    }

    #[test]
    fn overlapping_entity_first_wins() {
        let text = "New York City";
        let segments = run(text, &[ent(0, 8, "LOC"), ent(4, 13, "GPE")], &[], true);
        assert_eq!(
            segments,
            vec![
                Segment::entity("New York", "Location", "#64b5f6"),
                Segment::plain(" City"),
            ]
        );
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let segments = run("Paris", &[ent(0, 5, "GPE"), ent(0, 5, "LOC")], &[], true);
        assert_eq!(
            segments,
            vec![Segment::entity("Paris", "Geopolitical entity", "#4db6ac")]
        );
    }

    #[test]
    fn out_of_range_entities_are_clipped_or_skipped() {
        let segments = run("Kant", &[ent(2, 40, "PER"), ent(10, 12, "LOC")], &[], true);
        assert_eq!(
            segments,
            vec![
                Segment::plain("Ka"),
                Segment::entity("nt", "Person", "#e57373"),
            ]
        );
    }

    #[test]
    fn multibyte_offsets_are_characters() {
        let text = "Zürich und Genève";
        let segments = run(text, &[ent(11, 17, "LOC")], &[], true);
        assert_eq!(segments[1], Segment::entity("Genève", "Location", "#64b5f6"));
    }

    #[test]
    fn highlight_is_case_insensitive() {
        let segments = run("Peace and peace", &[], &["PEACE"], true);
        assert_eq!(
            segments,
            vec![
                Segment::highlight("Peace"),
                Segment::plain(" and "),
                Segment::highlight("peace"),
            ]
        );
    }

    #[test]
    fn longer_terms_take_precedence() {
        let segments = run("perpetual peace", &[], &["peace", "perpetual peace"], true);
        assert_eq!(segments, vec![Segment::highlight("perpetual peace")]);
    }

    #[test]
    fn single_character_terms_are_ignored() {
        let segments = run("a b c", &[], &["a", "b"], true);
        assert_eq!(segments, vec![Segment::plain("a b c")]);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let segments = run("cost: $5 (net)", &[], &["$5 (net)"], true);
        assert_eq!(
            segments,
            vec![Segment::plain("cost: "), Segment::highlight("$5 (net)")]
        );
    }

    #[test]
    fn entities_take_precedence_over_highlights() {
        let text = "Immanuel Kant wrote";
        let segments = run(text, &[ent(0, 13, "PER")], &["kant wrote"], true);
        assert_eq!(
            segments,
            vec![
                Segment::entity("Immanuel Kant", "Person", "#e57373"),
                Segment::plain(" wrote"),
            ]
        );

        let segments = run(text, &[ent(0, 13, "PER")], &["Kant"], true);
        assert!(segments.iter().all(|s| !matches!(s, Segment::Highlight { .. })));
    }

    #[test]
    fn highlights_apply_between_entities() {
        let text = "Kant on peace in Berlin";
        let segments = run(text, &[ent(0, 4, "PER"), ent(17, 23, "LOC")], &["peace"], true);
        assert_eq!(
            segments,
            vec![
                Segment::entity("Kant", "Person", "#e57373"),
                Segment::plain(" on "),
                Segment::highlight("peace"),
                Segment::plain(" in "),
                Segment::entity("Berlin", "Location", "#64b5f6"),
            ]
        );
    }

    #[test]
    fn malformed_ner_degrades_to_plain() {
        let ner = NerResult {
            starts: vec![0, 5],
            ends: vec![4],
            labels: vec![],
            confidences: vec![],
        };
        let segments = annotate_ner("Kant met Hume", Some(&ner), &[], true, &LabelTable::default());
        assert_eq!(segments, vec![Segment::plain("Kant met Hume")]);
    }

    #[test]
    fn malformed_ner_suppresses_highlights() {
        let ner = NerResult {
            starts: vec![0, 5],
            ends: vec![4],
            labels: vec![],
            confidences: vec![],
        };
        let terms = vec!["hume".to_string()];
        let segments = annotate_ner("Kant met Hume", Some(&ner), &terms, true, &LabelTable::default());
        assert_eq!(segments, vec![Segment::plain("Kant met Hume")]);
    }

    #[test]
    fn malformed_ner_unused_when_entities_disabled() {
        let ner = NerResult {
            starts: vec![0, 5],
            ends: vec![4],
            labels: vec![],
            confidences: vec![],
        };
        let terms = vec!["hume".to_string()];
        let segments = annotate_ner("Kant met Hume", Some(&ner), &terms, false, &LabelTable::default());
        assert_eq!(
            segments,
            vec![Segment::plain("Kant met "), Segment::highlight("Hume")]
        );
    }

    #[test]
    fn valid_ner_is_applied() {
        let ner = NerResult {
            starts: vec![0],
            ends: vec![4],
            labels: vec![vec!["PER".into()]],
            confidences: vec![0.99],
        };
        let terms = vec!["hume".to_string()];
        let segments = annotate_ner("Kant met Hume", Some(&ner), &terms, true, &LabelTable::default());
        assert_eq!(
            segments,
            vec![
                Segment::entity("Kant", "Person", "#e57373"),
                Segment::plain(" met "),
                Segment::highlight("Hume"),
            ]
        );
    }

    /// Strategy for annotations that may overlap, invert or overrun the text.
    fn arb_entities() -> impl Strategy<Value = Vec<EntityAnnotation>> {
        prop::collection::vec(
            (0usize..40, 0usize..40, prop::sample::select(vec!["PER", "LOC", "XYZ"])),
            0..8,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(start, end, label)| EntityAnnotation::new(start, end, label, 0.5))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn segments_reconstruct_input(
            text in "[a-zA-Zé ]{0,30}",
            entities in arb_entities(),
            terms in prop::collection::vec("[a-zé]{0,4}", 0..4),
            apply in any::<bool>(),
        ) {
            let segments = annotate(&text, Some(&entities), &terms, apply, &LabelTable::default());
            prop_assert_eq!(reconstruct(&segments), text);
            prop_assert!(segments.iter().all(|s| !s.text().is_empty()));
        }

        #[test]
        fn entity_text_is_never_highlighted(
            text in "[a-c ]{1,30}",
            start in 0usize..30,
            len in 1usize..10,
            terms in prop::collection::vec("[a-c]{2,3}", 1..4),
        ) {
            let entities = vec![EntityAnnotation::new(start, start + len, "PER", 1.0)];
            let with_terms = annotate(&text, Some(&entities), &terms, true, &LabelTable::default());
            let without = annotate(&text, Some(&entities), &[], true, &LabelTable::default());
            let entity_runs = |segments: &[Segment]| -> Vec<Segment> {
                segments
                    .iter()
                    .filter(|s| matches!(s, Segment::Entity { .. }))
                    .cloned()
                    .collect()
            };
            prop_assert_eq!(entity_runs(&with_terms), entity_runs(&without));
        }
    }
}
