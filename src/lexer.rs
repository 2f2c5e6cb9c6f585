//! Splitting an input line into whitespace-delimited tokens.
//!
//! No quoting, escaping or comment syntax is recognized: `"foo bar"` is the two tokens
//! `"foo` and `bar"`.

use crate::error::ShellError;
use tracing::trace;

/// Number of token slots reserved before the first token is stored.
pub const TOKEN_CAPACITY: usize = 64;

/// Characters separating tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// The tokens of one input line, borrowed from that line.
///
/// Indexing past the last token yields `None`, which plays the role of the end-of-tokens
/// marker: an empty line is a sequence with no tokens, and `program()` on it is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens<'a> {
    items: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    /// The command name, if the line had any tokens at all.
    pub fn program(&self) -> Option<&'a str> {
        self.get(0)
    }

    /// The token at `index`, or `None` past the end of the sequence.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.items.get(index).copied()
    }

    /// Tokens following the command name.
    pub fn args(&self) -> &[&'a str] {
        self.items.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Splits `line` on runs of delimiter characters.
///
/// Consecutive delimiters count as a single separator, so no empty tokens are produced.
/// The token buffer starts at [`TOKEN_CAPACITY`] slots and doubles whenever it fills up;
/// a failed growth is reported as [`ShellError::Alloc`].
pub fn split_into_tokens(line: &str) -> Result<Tokens<'_>, ShellError> {
    let mut items = Vec::new();
    items.try_reserve_exact(TOKEN_CAPACITY)?;

    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        if items.len() == items.capacity() {
            items.try_reserve_exact(items.capacity())?;
        }
        items.push(token);
    }

    trace!(tokens = ?items, "split line");
    Ok(Tokens { items })
}
