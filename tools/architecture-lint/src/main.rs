//! `architecture-lint [BACKEND_DIR]`
//!
//! Defaults to the `backend` crate beside this tool.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let backend_dir = std::env::args_os().nth(1).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../backend"),
        PathBuf::from,
    );
    match architecture_lint::lint_backend(&backend_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
