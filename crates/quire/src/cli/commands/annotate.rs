//! Implementation of `quire annotate`.

use std::{collections::HashSet, process::ExitCode, sync::Arc};

use quire_cache::{Cell, CellRenderer};
use quire_highlight::{NerResult, Segment};
use quire_query::FilterMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::{
    args::AnnotateCommand,
    context::CommandContext,
    input::read_json,
    output::{self, dim, header, indent, render_ansi, warning},
};

/// One result cell as read from the input.
#[derive(Deserialize)]
struct InputCell {
    /// Document identifier.
    id: String,
    /// Field name.
    field: String,
    /// Field text.
    text: String,
    /// Backend NER output, checked when the cell is rendered.
    #[serde(default)]
    ner: Option<serde_json::Value>,
    /// Terms to highlight.
    #[serde(default)]
    terms: Vec<String>,
    /// Filters whose positive terms are highlighted.
    #[serde(default)]
    filters: Option<FilterMap>,
}

/// JSON output for one rendered cell.
#[derive(Serialize)]
struct JsonCell<'a> {
    /// Document identifier.
    id: &'a str,
    /// Field name.
    field: &'a str,
    /// Annotated segments.
    segments: &'a [Segment],
}

/// Renders each input cell through one shared cache.
pub fn run(ctx: &CommandContext, cmd: &AnnotateCommand) -> ExitCode {
    let inputs = match read_json::<Vec<InputCell>>(cmd.file.as_deref(), "cell list") {
        Ok(inputs) => inputs,
        Err(code) => return code,
    };

    let renderer = CellRenderer::from_config(&ctx.config);
    let rendered: Vec<(&InputCell, Arc<[Segment]>)> = inputs
        .iter()
        .map(|input| (input, renderer.render(&to_cell(input, cmd))))
        .collect();
    debug!(
        cells = rendered.len(),
        cached = renderer.cache().len(),
        "annotation finished"
    );

    if cmd.json {
        let cells: Vec<JsonCell<'_>> = rendered
            .iter()
            .map(|(input, segments)| JsonCell {
                id: &input.id,
                field: &input.field,
                segments,
            })
            .collect();
        return output::print_json(&cells);
    }

    if rendered.is_empty() {
        println!("{}", warning("no cells in input"));
        return ExitCode::SUCCESS;
    }
    for (input, segments) in &rendered {
        println!("{} {}", header(&input.id), dim(&input.field));
        println!("{}", indent(&render_ansi(segments)));
        println!();
    }
    ExitCode::SUCCESS
}

/// Builds the renderable cell for one input.
fn to_cell(input: &InputCell, cmd: &AnnotateCommand) -> Cell {
    let mut cell = Cell::new(input.id.as_str(), input.field.as_str(), input.text.as_str())
        .with_terms(cell_terms(input, &cmd.terms))
        .with_entities(!cmd.no_entities)
        .with_concordance(cmd.concordance);

    if let Some(value) = &input.ner {
        match NerResult::from_value(value.clone()) {
            Ok(ner) => cell = cell.with_ner(ner),
            Err(e) => {
                warn!(id = %input.id, error = %e, "ignoring unreadable entity annotations");
                cell = cell.with_unreadable_ner();
            }
        }
    }
    cell
}

/// Command-line terms, then the cell's own terms, then terms from its filters,
/// de-duplicated case-insensitively.
fn cell_terms(input: &InputCell, extra: &[String]) -> Vec<String> {
    let from_filters = input
        .filters
        .as_ref()
        .map(FilterMap::highlight_terms)
        .unwrap_or_default();

    let mut seen = HashSet::new();
    extra
        .iter()
        .chain(&input.terms)
        .chain(&from_filters)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .map(str::to_string)
        .collect()
}
