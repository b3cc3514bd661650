//! Implementation of `quire compile`.

use std::process::ExitCode;

use quire_query::{
    CompileRequest, DateRange, FilterMap, QueryMode, build_clause, compile, compile_encoded,
};
use serde::Serialize;

use crate::cli::{args::CompileCommand, context::CommandContext, input::read_input, output};

/// JSON output for `quire compile --json`.
#[derive(Serialize)]
struct JsonCompileOutput<'a> {
    /// Mode the query was compiled in.
    mode: QueryMode,
    /// Readable query string.
    query: String,
    /// Percent-encoded query string.
    encoded: String,
    /// Terms to highlight in results.
    terms: Vec<String>,
    /// Explicit date range, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<&'a DateRange>,
}

/// Compiles a filter map into a query string.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let settings = &ctx.config.query;

    let mode = cmd.mode.unwrap_or(if cmd.raw.is_some() {
        QueryMode::Raw
    } else {
        settings.mode
    });

    // A raw query needs no filters unless a file was named explicitly.
    let filters = if cmd.file.is_none() && mode == QueryMode::Raw && cmd.raw.is_some() {
        FilterMap::new()
    } else {
        match read_filters(cmd) {
            Ok(filters) => filters,
            Err(code) => return code,
        }
    };

    let date_range = match (&cmd.min_date, &cmd.max_date) {
        (Some(min), Some(max)) => Some(DateRange::new(min.trim(), max.trim())),
        _ => None,
    };

    let request = CompileRequest::new(&filters)
        .mode(mode)
        .custom_grouping(cmd.custom_grouping.unwrap_or(settings.custom_grouping))
        .raw_query(cmd.raw.as_deref())
        .date_range(date_range.as_ref())
        .date_field(&settings.date_field);

    if cmd.explain {
        print!("{}", build_clause(&request));
        return ExitCode::SUCCESS;
    }

    if cmd.json {
        return output::print_json(&JsonCompileOutput {
            mode,
            query: compile(&request),
            encoded: compile_encoded(&request),
            terms: filters.highlight_terms(),
            date_range: date_range.as_ref(),
        });
    }

    let query = if cmd.encoded {
        compile_encoded(&request)
    } else {
        compile(&request)
    };
    if query.is_empty() {
        eprintln!("{}", output::warning("warning: no active filters; query is empty"));
    }
    println!("{query}");
    ExitCode::SUCCESS
}

/// Reads the filter map named on the command line, or from stdin.
fn read_filters(cmd: &CompileCommand) -> Result<FilterMap, ExitCode> {
    let json = read_input(cmd.file.as_deref())?;
    FilterMap::from_json(&json).map_err(|e| {
        eprintln!("error: {e}");
        if let Some(hint) = e.suggestion() {
            eprintln!("{}", output::dim(hint));
        }
        ExitCode::FAILURE
    })
}
