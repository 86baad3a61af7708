use std::process::{Command, Output};

use anyhow::{anyhow, bail, Context, Result};

/// Runs a command line to completion, capturing its output. A command that
/// cannot be spawned or exits non-zero is an error.
pub(crate) fn exec(command_line: &str) -> Result<Output> {
    let words = shell_words::split(command_line)
        .with_context(|| format!("cannot parse command `{command_line}`"))?;
    let (program, args) = words
        .split_first()
        .ok_or_else(|| anyhow!("empty command"))?;

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("cannot run `{command_line}`"))?;

    if !output.status.success() {
        bail!("`{command_line}` exited with {}", output.status);
    }

    Ok(output)
}
