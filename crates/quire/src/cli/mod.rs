//! CLI support for the `quire` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod input;
pub mod logging;
pub mod output;

pub use context::CommandContext;
