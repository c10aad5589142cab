use std::path::PathBuf;

use miette::Context;
use miette::IntoDiagnostic;

/// Get the current working directory of the process with [`std::env::current_dir`].
pub fn current_dir() -> miette::Result<PathBuf> {
    std::env::current_dir()
        .into_diagnostic()
        .wrap_err("Failed to get current directory")
}
