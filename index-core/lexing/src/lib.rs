//! Tokenizer shared by partially qualified names and index documents.

mod lexer;
mod quoting;

use std::fmt;
use std::sync::Arc;

pub use lexer::Lexer;
pub use quoting::{ElementAndProperty, unquote, unquote_element_and_property};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Default for Position {
    fn default() -> Self {
        Position { offset: 0, line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Name,
    Number,
    Tab,
    Newline,
    EndOfFile,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::Tab => "tab",
            TokenKind::Newline => "newline",
            TokenKind::EndOfFile => "end of file",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: Position,
}

impl<'a> Token<'a> {
    pub fn is(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Passes the token through if its kind is one of `kinds`.
    pub fn expect(self, kinds: &[TokenKind]) -> Result<Token<'a>, ParseError> {
        if self.is(kinds) {
            return Ok(self);
        }
        let expected: Vec<String> = kinds.iter().map(|kind| kind.to_string()).collect();
        let message = format!("Expected {}, found {}", expected.join(" or "), self.kind);
        Err(ParseError::new(self.position, message))
    }
}

/// An error in a PQN or an index document, located at a line and column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{position}: {message}")]
pub struct ParseError {
    pub position: Position,
    pub message: Arc<str>,
}

impl ParseError {
    pub fn new(position: Position, message: impl Into<Arc<str>>) -> ParseError {
        let message = message.into();
        ParseError { position, message }
    }
}
