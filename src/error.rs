use rustyline::error::ReadlineError;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Conditions the interpreter cannot continue from.
///
/// Every variant ends the process with a failure status. Problems a user can recover from
/// (a bad `cd` target, a program that cannot be started) are reported by the dispatcher
/// instead and never reach this type.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading standard input failed.
    #[error("getline: {0}")]
    Read(#[source] io::Error),

    /// The terminal line editor failed for a reason other than end-of-input or Ctrl-C.
    #[error("readline: {0}")]
    Editor(#[source] ReadlineError),

    /// Writing the prompt or an error report failed.
    #[error("write: {0}")]
    Write(#[source] io::Error),

    /// A line or token buffer could not grow.
    #[error("allocation error")]
    Alloc(#[from] TryReserveError),
}
