//! Locating `.quire.toml` files.
//!
//! A search starts in the working directory and climbs through its ancestors.
//! Every `.quire.toml` on the way is a source, nearest first. A file declaring
//! `root = true` ends the climb and also shuts out the per-user file in the
//! home directory; otherwise that file is consulted last.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".quire.toml";

/// Lists the config files that apply to `cwd`, highest precedence first.
///
/// The per-user file is appended only when no `root = true` file was met and
/// it was not already found while climbing (as it is when `cwd` sits below
/// the home directory).
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for candidate in cwd.ancestors().map(|dir| dir.join(CONFIG_FILENAME)) {
        if !candidate.is_file() {
            continue;
        }
        let stops = is_root_config(&candidate);
        configs.push(candidate);
        if stops {
            return configs;
        }
    }

    if let Some(user) = global_config_path().filter(|p| p.is_file())
        && !configs.contains(&user)
    {
        configs.push(user);
    }
    configs
}

/// Path of the per-user config file, `~/.quire.toml`.
///
/// `None` when no home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the per-user config file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| global == path)
}
