//! External code formatter step
//!
//! After generation or removal the configured formatter (`ruff format src` by
//! default) runs from the project root. Failures never abort a run; they are
//! returned for the caller to report.

use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Why the formatter did not complete
#[derive(Debug, Error)]
pub enum FormatterFailure {
    /// No program configured
    #[error("formatter command is empty")]
    EmptyCommand,

    /// The program could not be started
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure
    #[error("`{command}` exited with {status}: {stderr}")]
    ExitStatus {
        /// Full command line
        command: String,
        /// Exit status
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },
}

/// Run `command` with `root` as the working directory
///
/// # Errors
///
/// Returns a [`FormatterFailure`] if the command is empty, cannot be spawned
/// or exits unsuccessfully.
pub fn run_formatter(command: &[String], root: &Path) -> Result<(), FormatterFailure> {
    let (program, args) = command.split_first().ok_or(FormatterFailure::EmptyCommand)?;

    tracing::debug!(%program, ?args, root = %root.display(), "running formatter");

    let output = Command::new(program)
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|source| FormatterFailure::Spawn {
            program: program.clone(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    Err(FormatterFailure::ExitStatus {
        command: command.join(" "),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
