//! Persists variables for later job steps through the runner's `GITHUB_ENV` file.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

/// Appends `name=value` to the environment file at `path`.
///
/// The runner reads this file after the step finishes and exports every
/// line to the steps that follow.
///
/// # Errors
///
/// Returns an error if the value contains a newline or the file cannot be
/// opened for appending.
pub fn export_variable(path: &Path, name: &str, value: &str) -> Result<()> {
    anyhow::ensure!(
        !value.contains('\n') && !name.contains('\n'),
        "cannot export multi-line value for {name}"
    );
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writeln!(file, "{name}={value}").with_context(|| format!("writing {}", path.display()))
}
