use crate::command::{ExecutableCommand, Flow};
use crate::lexer::Tokens;
use anyhow::{Context, Result};
use std::io::Write;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Launches programs that are not builtins and waits for them.
///
/// The child inherits the interpreter's environment, working directory and standard
/// streams; nothing is captured. The program name is resolved against the search path the
/// same way `execvp` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct Launcher;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    /// Normal exit with the given status code.
    Exited(i32),
    /// Killed by the given signal.
    Signaled(i32),
}

impl ChildStatus {
    /// The status as a shell would report it in `$?`: signals map to `128 + signal`.
    pub fn code(self) -> i32 {
        match self {
            ChildStatus::Exited(code) => code,
            ChildStatus::Signaled(signal) => 128 + signal,
        }
    }
}

impl From<ExitStatus> for ChildStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ChildStatus::Exited(code),
            None => terminated_by_signal(status),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ChildStatus {
    use std::os::unix::process::ExitStatusExt;
    // `wait` only returns for exited or signaled children, so a signal is always present.
    ChildStatus::Signaled(status.signal().unwrap_or(0))
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> ChildStatus {
    ChildStatus::Exited(-1)
}

impl Launcher {
    /// Spawns `args[0]` with the remaining tokens as its arguments and blocks until it has
    /// exited or been killed.
    ///
    /// Fails when the program cannot be started at all (not found, not executable, no
    /// resources for a new process). The child's own outcome is returned, never an error.
    pub fn launch(&self, args: &Tokens<'_>) -> Result<ChildStatus> {
        let program = args.program().context("no program to launch")?;

        let mut child = Command::new(program)
            .args(args.args())
            .spawn()
            .with_context(|| program.to_string())?;
        let pid = child.id();
        debug!(pid, program, "spawned child");

        let status = ChildStatus::from(
            child
                .wait()
                .with_context(|| format!("{program}: wait for pid {pid}"))?,
        );
        debug!(pid, ?status, code = status.code(), "child terminated");
        Ok(status)
    }
}

impl ExecutableCommand for Launcher {
    fn execute(&self, args: &Tokens<'_>, _stdout: &mut dyn Write) -> Result<Flow> {
        self.launch(args)?;
        Ok(Flow::Continue)
    }
}
