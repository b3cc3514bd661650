//! Command implementations and dispatch.

pub mod annotate;
pub mod compile;
pub mod concordance;
pub mod config;
pub mod init;
pub mod labels;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Compile(cmd) => compile::run(ctx, &cmd),
        Commands::Annotate(cmd) => annotate::run(ctx, &cmd),
        Commands::Concordance(cmd) => concordance::run(ctx, &cmd),
        Commands::Labels => labels::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
