//! Implementation of `quire concordance`.

use std::process::ExitCode;

use quire_highlight::{ConcordanceOptions, LabelTable, annotate, concordance_with};

use crate::cli::{
    args::ConcordanceCommand, context::CommandContext, input::read_input, output::render_ansi,
};

/// Prints the context windows around each term, with the terms highlighted.
pub fn run(ctx: &CommandContext, cmd: &ConcordanceCommand) -> ExitCode {
    let text = match read_input(cmd.file.as_deref()) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let settings = &ctx.config.concordance;
    let context_chars = cmd.context.unwrap_or(settings.context_chars);
    if context_chars == 0 {
        eprintln!("error: --context must be greater than 0");
        return ExitCode::FAILURE;
    }
    let options = ConcordanceOptions {
        context_chars,
        max_terms: settings.max_terms,
        fuse_gap: settings.fuse_gap,
    };

    let condensed = concordance_with(text.trim_end_matches('\n'), &cmd.terms, &options);
    let segments = annotate(&condensed, None, &cmd.terms, false, &LabelTable::default());
    println!("{}", render_ansi(&segments));
    ExitCode::SUCCESS
}
