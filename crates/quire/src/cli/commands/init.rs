//! Implementation of `quire init`.

use std::{fs, process::ExitCode};

use quire_config::{CONFIG_FILENAME, local_template};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{indent, subheader, success},
};

/// Writes a commented `.quire.toml` into the current directory.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let config_path = ctx.cwd.join(CONFIG_FILENAME);

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = local_template();
    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("{}", success(&format!("Created {}", config_path.display())));
    println!();
    println!("{}", subheader("Configuration written:"));
    println!("{}", indent(&template));
    ExitCode::SUCCESS
}
