//! A tiny interactive command interpreter.
//!
//! Each line read from the terminal is split on whitespace into a command name and its
//! arguments. The name is looked up among the built-in commands (`cd`, `help`, `exit`);
//! anything else is launched as an external program and waited for before the next prompt.
//!
//! The main entry point is [`Interpreter`], which drives any [`LineReader`] until the input
//! ends or `exit` is entered. [`dispatch`] runs a single already-tokenized command line and is
//! useful on its own for embedding and tests.

mod builtin;
pub mod command;
mod error;
mod external;
mod interpreter;
pub mod lexer;
pub mod logging;
pub mod reader;

pub use builtin::{BUILTINS, Builtin};
pub use error::ShellError;
pub use external::{ChildStatus, Launcher};
/// Just a convenient re-export of the interactive loop and its dispatcher.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::{DEFAULT_PROMPT, Interpreter, dispatch};
pub use reader::{LineReader, ReadOutcome, StreamReader, TerminalReader};
