//! The character-based lexer with a single token of lookahead.

use std::str::Chars;

use crate::{ParseError, Position, Token, TokenKind};

const EOF_CHAR: char = '\0';

const STOP_CHARS: &str = ":/\n\r\"";

pub struct Lexer<'a> {
    source: &'a str,
    chars: Chars<'a>,
    line: u32,
    column: u32,
    stop_chars: &'a str,
    pushed: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer::with_stop_chars(source, "")
    }

    /// Creates a lexer that ends its input at the first unquoted character
    /// of `stop_chars`; [`Lexer::remainder`] holds the text from there on.
    pub fn with_stop_chars(source: &'a str, stop_chars: &'a str) -> Lexer<'a> {
        let chars = source.chars();
        let line = 1;
        let column = 1;
        let pushed = None;
        Lexer { source, chars, line, column, stop_chars, pushed }
    }

    /// The source text not consumed yet.
    pub fn remainder(&self) -> &'a str {
        self.chars.as_str()
    }

    pub fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn consumed(&self) -> usize {
        self.source.len() - self.chars.as_str().len()
    }

    pub fn position(&self) -> Position {
        let offset = self.consumed();
        let line = self.line;
        let column = self.column;
        Position { offset, line, column }
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    fn take(&mut self) -> char {
        let result = self.chars.next().unwrap_or(EOF_CHAR);
        if result == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        result
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.take();
        }
    }

    fn token(&self, kind: TokenKind, position: Position) -> Token<'a> {
        let text = &self.source[position.offset..self.consumed()];
        Token { kind, text, position }
    }
}

impl<'a> Lexer<'a> {
    /// Returns `token` to the stream; the next call to [`Lexer::next_token`] yields it again.
    pub fn push_token(&mut self, token: Token<'a>) {
        debug_assert!(self.pushed.is_none(), "only one token can be pushed back");
        self.pushed = Some(token);
    }

    /// Discards a `#` comment on the very first line of the source.
    ///
    /// Comments are otherwise only recognised after a newline.
    pub fn skip_leading_comment(&mut self) {
        if self.consumed() == 0 && self.first() == '#' {
            self.take_while(|c| c != '\n');
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        if let Some(token) = self.pushed.take() {
            return Ok(token);
        }

        loop {
            let position = self.position();
            if self.is_eof() {
                return Ok(self.token(TokenKind::EndOfFile, position));
            }
            match self.first() {
                ' ' | '\r' => {
                    self.take();
                }
                '\t' => {
                    self.take();
                    return Ok(self.token(TokenKind::Tab, position));
                }
                '\n' => {
                    self.take();
                    let token = self.token(TokenKind::Newline, position);
                    if self.first() == '#' {
                        self.take_while(|c| c != '\n');
                    }
                    return Ok(token);
                }
                '/' | ':' => {
                    self.take();
                    if self.first() == ':' {
                        self.take();
                    }
                    return if self.first().is_ascii_digit() {
                        self.take_number()
                    } else {
                        self.take_name()
                    };
                }
                c if self.stop_chars.contains(c) => {
                    return Ok(self.token(TokenKind::EndOfFile, position));
                }
                _ => return self.take_name(),
            }
        }
    }

    fn take_number(&mut self) -> Result<Token<'a>, ParseError> {
        let position = self.position();
        let mut valid = true;
        while !self.is_eof() && !matches!(self.first(), ':' | '\n') {
            let c = self.take();
            if !c.is_ascii_digit() && c != '\r' {
                valid = false;
            }
        }
        if valid {
            Ok(self.token(TokenKind::Number, position))
        } else {
            Err(ParseError::new(self.position(), "Number expected"))
        }
    }

    fn take_name(&mut self) -> Result<Token<'a>, ParseError> {
        let position = self.position();
        let stop_chars = self.stop_chars;
        loop {
            self.take_while(|c| !STOP_CHARS.contains(c) && !stop_chars.contains(c));
            if self.first() != '"' || self.is_eof() {
                break;
            }
            self.take_quoted()?;
        }
        Ok(self.token(TokenKind::Name, position))
    }

    fn take_quoted(&mut self) -> Result<(), ParseError> {
        let position = self.position();
        self.take();
        loop {
            if self.is_eof() {
                return Err(ParseError::new(position, "Unterminated quoted name"));
            }
            match self.take() {
                '\\' if self.first() == '"' => {
                    self.take();
                }
                '"' => return Ok(()),
                _ => (),
            }
        }
    }
}
