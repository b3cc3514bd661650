//! Implementation of `quire config`.

use std::process::ExitCode;

use quire_config::{discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, indent, subheader},
};

/// Shows the config files in effect and the merged settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let files = discover_config_files(&ctx.cwd);

    println!("{}", subheader("Config files (highest precedence first):"));
    if files.is_empty() {
        println!("  {}", dim("(none; run 'quire init' to create one)"));
    } else {
        for path in &files {
            if is_global_config(path) {
                println!("  {} {}", path.display(), dim("(user)"));
            } else {
                println!("  {}", path.display());
            }
        }
    }
    println!();

    println!("{}", subheader("Effective settings:"));
    println!("{}", indent(&ctx.config.settings_to_toml()));
    ExitCode::SUCCESS
}
