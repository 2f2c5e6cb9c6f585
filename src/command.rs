use crate::lexer::Tokens;
use anyhow::Result;
use std::io::Write;

/// Whether the interpreter keeps reading commands after one has run.
///
/// Every dispatch path yields one of these. Only `exit` asks to terminate; failures of any
/// other command still continue the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Leave the loop and end the process successfully.
    Terminate,
}

/// Object-safe trait for anything the dispatcher can run.
///
/// This is implemented by the built-in commands and by the external program launcher.
pub trait ExecutableCommand {
    /// Executes the command.
    ///
    /// `args` is the full token sequence, with the command name at index 0. Output meant for
    /// the user goes to `stdout`; external programs write to the inherited terminal instead.
    ///
    /// An `Err` is a user-visible failure: the dispatcher reports it on standard error and
    /// continues with the next line.
    fn execute(&self, args: &Tokens<'_>, stdout: &mut dyn Write) -> Result<Flow>;
}
