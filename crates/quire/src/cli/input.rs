//! Reading command input from a file or stdin.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use serde::de::DeserializeOwned;

/// Reads `file`, or all of stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> Result<String, ExitCode> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: failed to read {}: {e}", path.display());
            ExitCode::FAILURE
        }),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|e| {
                eprintln!("error: failed to read stdin: {e}");
                ExitCode::FAILURE
            })?;
            Ok(buf)
        }
    }
}

/// Reads and deserializes JSON input, naming `what` in errors.
pub fn read_json<T: DeserializeOwned>(file: Option<&Path>, what: &str) -> Result<T, ExitCode> {
    let contents = read_input(file)?;
    serde_json::from_str(&contents).map_err(|e| {
        eprintln!("error: invalid {what}: {e}");
        ExitCode::FAILURE
    })
}
