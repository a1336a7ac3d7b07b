use std::fmt;
use std::ops::Deref;

use indexing::IndexEntry;
use lexing::{ElementAndProperty, Lexer, ParseError, TokenKind};
use smol_str::SmolStr;

const PQN_TOKENS: &[TokenKind] =
    &[TokenKind::Name, TokenKind::Tab, TokenKind::Newline, TokenKind::EndOfFile];

/// A partially qualified name, as a stack of segments ordered most
/// specific first.
///
/// `n4/format:DateTimeFormat@withStyle` becomes
/// `[withStyle, @, DateTimeFormat, format, n4]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pqn {
    segments: Vec<SmolStr>,
}

impl Pqn {
    pub fn parse(source: &str) -> Result<Pqn, ParseError> {
        let mut lexer = Lexer::new(source);

        let mut names = vec![];
        loop {
            let token = lexer.next_token()?.expect(PQN_TOKENS)?;
            match token.kind {
                TokenKind::Name => names.push(token.text),
                TokenKind::EndOfFile => break,
                _ => (),
            }
        }

        let Some((last, path)) = names.split_last() else {
            return Ok(Pqn::default());
        };

        let ElementAndProperty { element, delimiter, property } =
            lexing::unquote_element_and_property(last);

        let mut segments: Vec<SmolStr> = Vec::with_capacity(names.len() + 2);
        for part in [property, delimiter, element] {
            if !part.is_empty() {
                segments.push(part.into());
            }
        }
        segments.extend(path.iter().rev().map(|name| SmolStr::from(lexing::unquote(name))));

        Ok(Pqn { segments })
    }

    /// The fully qualified name of `entry`.
    pub fn from_entry(entry: &IndexEntry) -> Pqn {
        let segments = entry.hierarchy.iter().rev().cloned().collect();
        Pqn { segments }
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }
}

impl Deref for Pqn {
    type Target = [SmolStr];

    fn deref(&self) -> &[SmolStr] {
        &self.segments
    }
}

fn is_delimiter(segment: &str) -> bool {
    matches!(segment, "#" | "@" | "#<" | "#>" | "@<" | "@>")
}

impl fmt::Display for Pqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut glued = true;
        for segment in self.segments.iter().rev() {
            if is_delimiter(segment) {
                glued = true;
            } else if !glued {
                f.write_str(":")?;
            } else {
                glued = false;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}
