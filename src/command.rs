//! Encoder command-line templating and execution.
//!
//! Encoder invocations are configured as full shell command lines with
//! `$name$` placeholders (`$input$`, `$output$`, `$title$`, ...). This
//! module fills the placeholders and runs the result through the shell,
//! capturing exit status and output so the caller can decide whether a
//! nonzero exit is fatal.

use std::process::Command;

use crate::pipeline::errors::{StepError, StepResult};

/// Captured result of one external command run.
#[derive(Debug)]
pub struct CommandOutput {
    /// Exit code, or -1 if the process was killed by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Replace every `$name$` placeholder in `template` with its value.
///
/// Placeholder names are disjoint, so substitution order does not
/// matter. Unrecognized placeholders are left untouched; no escaping is
/// performed.
pub fn fill_template(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (name, value) in replacements {
        let placeholder = format!("${}$", name);
        output = output.replace(&placeholder, value);
    }
    output
}

/// Run a fully substituted command line through the shell.
///
/// Templates are shell command lines (quoting included), so they are
/// executed via `sh -c` rather than tokenized here. Blocking; this is
/// the workers' sole suspension point.
pub fn run_command(command_line: &str) -> StepResult<CommandOutput> {
    tracing::debug!("Running: {}", command_line);

    let output = Command::new("sh")
        .arg("-c")
        .arg(command_line)
        .output()
        .map_err(|e| StepError::io_error(format!("spawning `{}`", command_line), e))?;

    Ok(CommandOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
