//! Diagnostic logging setup.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "QUIRE_LOG";

/// Installs a stderr subscriber. Call once, before any command runs.
///
/// `QUIRE_LOG` wins when set; otherwise each `-v` raises the level from `warn`.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// The level selected by the `-v` count.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
