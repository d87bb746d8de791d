//! External process execution
//!
//! Every lifecycle stage that talks to the build tool goes through
//! `run_command`: spawn, wait for completion, capture output. There is no
//! timeout and no retry here - cancellation policy belongs to the external
//! tool, and the lifecycle treats every non-zero exit as fatal.

use kiln_errors::Error;
use kiln_events::{AppEvent, BuildEvent, EventEmitter, EventSender};
use std::path::Path;
use tokio::process::Command;

/// Outcome of one external command
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Run an external command to completion and capture its output
///
/// # Errors
///
/// Returns an I/O error if the process cannot be spawned; a non-zero exit
/// is reported through `CommandResult::success`, not as an error, so the
/// caller can attach stage-specific context.
pub async fn run_command(
    program: &Path,
    args: &[String],
    cwd: &Path,
    events: Option<&EventSender>,
) -> Result<CommandResult, Error> {
    if let Some(sender) = events {
        sender.emit(AppEvent::Build(BuildEvent::CommandStarted {
            command: format!("{} {}", program.display(), args.join(" ")),
            working_dir: cwd.to_path_buf(),
        }));
    }

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| Error::io_with_path(&e, program))?;

    Ok(CommandResult {
        success: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
