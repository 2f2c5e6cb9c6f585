use crate::builtin::Builtin;
use crate::command::{ExecutableCommand, Flow};
use crate::error::ShellError;
use crate::external::Launcher;
use crate::lexer::{self, Tokens};
use crate::reader::{LineReader, ReadOutcome};
use std::io::Write;
use tracing::debug;

/// Prompt shown before each line unless overridden with [`Interpreter::with_prompt`].
pub const DEFAULT_PROMPT: &str = "> ";

/// Runs one tokenized command line.
///
/// An empty line does nothing. Otherwise the builtins are consulted first and any other
/// name is launched as an external program. Failures a user can act on are written to
/// `stderr` as `lsh: <reason>` and the loop continues; only a failure to write that report
/// is returned as an error.
pub fn dispatch(
    tokens: &Tokens<'_>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<Flow, ShellError> {
    let Some(name) = tokens.program() else {
        return Ok(Flow::Continue);
    };

    let builtin = Builtin::lookup(name);
    let command: &dyn ExecutableCommand = match &builtin {
        Some(builtin) => builtin,
        None => &Launcher,
    };
    debug!(command = name, builtin = builtin.is_some(), "dispatching");

    match command.execute(tokens, stdout) {
        Ok(flow) => Ok(flow),
        Err(err) => {
            writeln!(stderr, "lsh: {err:#}").map_err(ShellError::Write)?;
            Ok(Flow::Continue)
        }
    }
}

/// A minimal interactive interpreter.
///
/// Reads a line, splits it into tokens and dispatches it, over and over, until the input
/// ends or a command asks to terminate. Both endings are successful; only a
/// [`ShellError`] makes [`Interpreter::run`] fail.
///
/// Example
/// ```
/// use lsh::{Interpreter, StreamReader};
/// use std::io::{self, Cursor};
///
/// let input = Cursor::new(b"help\nexit\n".to_vec());
/// let mut sh = Interpreter::new(StreamReader::new(input, io::sink()));
/// let mut out = Vec::new();
/// sh.run(&mut out, &mut io::sink()).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("  exit\n"));
/// ```
pub struct Interpreter<R> {
    reader: R,
    prompt: String,
}

impl<R: LineReader> Interpreter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Runs the read-dispatch loop until end-of-input or `exit`.
    pub fn run(
        &mut self,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<(), ShellError> {
        loop {
            let line = match self.reader.read_line(&self.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof => {
                    debug!("end of input");
                    return Ok(());
                }
            };

            let tokens = lexer::split_into_tokens(&line)?;
            if dispatch(&tokens, stdout, stderr)? == Flow::Terminate {
                debug!("terminated by command");
                return Ok(());
            }
        }
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}
