use crate::error::ExecError;
use crate::types::ExecutionResult;
use std::process::{Command, ExitStatus, Stdio};

/// Exit code shells use for a child killed by SIGINT.
const SIGINT_EXIT_CODE: i32 = 130;
#[cfg(unix)]
const SIGINT: i32 = 2;

/// Runs approved commands. Behind a trait so the pipeline can be driven
/// without spawning processes.
pub trait CommandRunner: Send {
    fn run(&self, command: &str) -> Result<ExecutionResult, ExecError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<ExecutionResult, ExecError> {
        execute(command)
    }
}

/// Run `command` through the shell. Output streams straight to the
/// terminal; a non-zero exit is a normal result, not an error.
pub fn execute(command: &str) -> Result<ExecutionResult, ExecError> {
    tracing::debug!(command, "spawning shell");
    let status = shell_command(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    let result = result_from_status(status);
    tracing::debug!(?result, "command finished");
    Ok(result)
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

fn result_from_status(status: ExitStatus) -> ExecutionResult {
    if status.success() {
        return ExecutionResult::succeeded();
    }
    if killed_by_sigint(&status) || status.code() == Some(SIGINT_EXIT_CODE) {
        return ExecutionResult::interrupted();
    }
    ExecutionResult::failed(status.code())
}

#[cfg(unix)]
fn killed_by_sigint(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: &ExitStatus) -> bool {
    false
}
