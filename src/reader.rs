//! Acquiring one line of input at a time.
//!
//! Two readers share the [`LineReader`] contract: [`StreamReader`] accumulates bytes from any
//! buffered stream (pipes, files, tests), and [`TerminalReader`] wraps a line editor for
//! interactive terminals.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, ErrorKind, Write};
use tracing::trace;

/// Number of bytes reserved for a line before any input is read.
pub const LINE_CAPACITY: usize = 1024;

/// Result of a single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line without its terminator.
    Line(String),
    /// The input ended before any character of a new line was read.
    Eof,
}

/// Source of command lines for the interpreter.
pub trait LineReader {
    /// Shows `prompt` and reads the next line.
    ///
    /// End-of-input is a normal outcome, not an error.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;
}

/// Reads newline-terminated lines from a byte stream, writing the prompt to `output`.
///
/// A final line without a trailing newline is still returned as a line; the following read
/// reports [`ReadOutcome::Eof`]. Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub struct StreamReader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn show_prompt(&mut self, prompt: &str) -> Result<(), ShellError> {
        self.output
            .write_all(prompt.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(ShellError::Write)
    }
}

impl<R: BufRead, W: Write> LineReader for StreamReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        self.show_prompt(prompt)?;

        let mut line = Vec::new();
        line.try_reserve_exact(LINE_CAPACITY)?;

        loop {
            let available = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Read(e)),
            };
            if available.is_empty() {
                if line.is_empty() {
                    return Ok(ReadOutcome::Eof);
                }
                break;
            }

            let newline = available.iter().position(|&b| b == b'\n');
            let chunk = &available[..newline.unwrap_or(available.len())];
            reserve_for(&mut line, chunk.len())?;
            line.extend_from_slice(chunk);

            let consumed = chunk.len() + usize::from(newline.is_some());
            self.input.consume(consumed);
            if newline.is_some() {
                break;
            }
        }

        trace!(len = line.len(), capacity = line.capacity(), "read line");
        Ok(ReadOutcome::Line(into_text(line)))
    }
}

/// Makes room for `additional` more bytes, at least doubling the buffer when it is full.
fn reserve_for(line: &mut Vec<u8>, additional: usize) -> Result<(), ShellError> {
    let needed = line.len() + additional;
    if needed > line.capacity() {
        let target = needed.max(line.capacity() * 2);
        line.try_reserve_exact(target - line.len())?;
    }
    Ok(())
}

fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Line editor for interactive terminals.
///
/// Lines are never added to the editor's history. Ctrl-C discards the line being typed and
/// yields an empty line, so the interpreter just prompts again.
pub struct TerminalReader {
    editor: DefaultEditor,
}

impl TerminalReader {
    pub fn new() -> Result<Self, ShellError> {
        let editor = DefaultEditor::new().map_err(ShellError::Editor)?;
        Ok(Self { editor })
    }
}

impl LineReader for TerminalReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Line(String::new())),
            Err(err) => Err(ShellError::Editor(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    fn reader(input: &[u8]) -> StreamReader<Cursor<Vec<u8>>, Vec<u8>> {
        StreamReader::new(Cursor::new(input.to_vec()), Vec::new())
    }

    fn line(s: &str) -> ReadOutcome {
        ReadOutcome::Line(s.to_string())
    }

    #[test]
    fn test_reads_lines_without_terminator() {
        let mut r = reader(b"ls -la\npwd\n");
        assert_eq!(r.read_line("> ").unwrap(), line("ls -la"));
        assert_eq!(r.read_line("> ").unwrap(), line("pwd"));
        assert_eq!(r.read_line("> ").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_empty_stream_is_eof() {
        let mut r = reader(b"");
        assert_eq!(r.read_line("> ").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_blank_line_is_not_eof() {
        let mut r = reader(b"\n");
        assert_eq!(r.read_line("> ").unwrap(), line(""));
        assert_eq!(r.read_line("> ").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_unterminated_last_line_is_returned() {
        let mut r = reader(b"exit");
        assert_eq!(r.read_line("> ").unwrap(), line("exit"));
        assert_eq!(r.read_line("> ").unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_prompt_written_before_each_read() {
        let mut r = reader(b"a\n");
        r.read_line("> ").unwrap();
        r.read_line("> ").unwrap();
        let (_, out) = r.into_inner();
        assert_eq!(out, b"> > ");
    }

    #[test]
    fn test_long_line_grows_buffer() {
        let long = "x".repeat(LINE_CAPACITY * 5 + 3);
        let input = format!("{long}\nnext\n");
        // A tiny buffer forces the line to arrive in many chunks.
        let mut r = StreamReader::new(
            BufReader::with_capacity(7, Cursor::new(input.into_bytes())),
            io::sink(),
        );
        assert_eq!(r.read_line("").unwrap(), line(&long));
        assert_eq!(r.read_line("").unwrap(), line("next"));
    }

    #[test]
    fn test_carriage_return_is_kept_for_the_lexer() {
        let mut r = reader(b"ls\r\n");
        assert_eq!(r.read_line("").unwrap(), line("ls\r"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut r = reader(b"echo \xff\n");
        assert_eq!(r.read_line("").unwrap(), line("echo \u{fffd}"));
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_read_error_is_fatal() {
        let mut r = StreamReader::new(BufReader::new(Broken), io::sink());
        let err = r.read_line("> ").unwrap_err();
        assert!(matches!(err, ShellError::Read(_)));
        assert_eq!(err.to_string(), "getline: device gone");
    }
}
