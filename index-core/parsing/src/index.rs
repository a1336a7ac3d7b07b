//! Parser for index documents.
//!
//! Each line is a name indented by tabs; the indentation is the nesting
//! depth. A name followed by `::line::start::end` declares an entry,
//! using the names of its enclosing lines as its location.

use std::path::{Path, PathBuf};
use std::{fs, io};

use indexing::{Declaration, EntryError, TrueOrigin};
use lexing::{ElementAndProperty, Lexer, ParseError, Position, Token, TokenKind};
use resolving::SourceIndexDatabase;
use smol_str::SmolStr;

#[derive(Debug, thiserror::Error)]
pub enum IndexFileError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}:{error}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: ParseError,
    },
}

/// Parses an index document into a [`SourceIndexDatabase`].
///
/// The first malformed line aborts the parse.
pub fn parse_index(source: &str) -> Result<SourceIndexDatabase, ParseError> {
    let _span = tracing::debug_span!("parse_index").entered();

    let mut parser = IndexParser::new(source);
    parser.parse()?;

    let database = parser.database;
    tracing::debug!(entries = database.len(), "Parsed source index");
    Ok(database)
}

/// Reads an index document from `path` and parses it.
pub fn parse_index_file(path: &Path) -> Result<SourceIndexDatabase, IndexFileError> {
    let _span = tracing::info_span!("parse_index_file", path = %path.display()).entered();

    let source = fs::read_to_string(path)
        .map_err(|source| IndexFileError::Io { path: path.to_path_buf(), source })?;

    parse_index(&source).map_err(|error| IndexFileError::Parse { path: path.to_path_buf(), error })
}

struct IndexParser<'a> {
    lexer: Lexer<'a>,
    database: SourceIndexDatabase,
    /// Names of the enclosing lines, outermost first; its length is one
    /// more than the depth of the previous line.
    names: Vec<SmolStr>,
}

impl<'a> IndexParser<'a> {
    fn new(source: &'a str) -> IndexParser<'a> {
        let lexer = Lexer::new(source);
        let database = SourceIndexDatabase::default();
        let names = vec![];
        IndexParser { lexer, database, names }
    }

    fn parse(&mut self) -> Result<(), ParseError> {
        self.lexer.skip_leading_comment();
        loop {
            let depth = self.take_indentation()?;
            let mut token = self.lexer.next_token()?;
            if token.kind == TokenKind::Name {
                token = self.take_line(depth, token)?;
            }
            if token.kind != TokenKind::Newline {
                token.expect(&[TokenKind::EndOfFile])?;
                return Ok(());
            }
        }
    }

    fn take_indentation(&mut self) -> Result<usize, ParseError> {
        let mut depth = 0;
        loop {
            let token = self.lexer.next_token()?;
            if token.kind != TokenKind::Tab {
                self.lexer.push_token(token);
                return Ok(depth);
            }
            depth += 1;
        }
    }

    /// Consumes the rest of a line starting with `name`, returning the token that ends it.
    fn take_line(&mut self, depth: usize, name: Token<'a>) -> Result<Token<'a>, ParseError> {
        let token = self.lexer.next_token()?.expect(&[TokenKind::Number, TokenKind::Newline])?;
        if token.kind == TokenKind::Newline {
            self.push_name(depth, lexing::unquote(name.text).into(), name.position)?;
            return Ok(token);
        }

        let ElementAndProperty { element, delimiter, property } =
            lexing::unquote_element_and_property(name.text);

        let source_line = number(token)?;
        let offset_start = self.take_number()?;
        let offset_end = self.take_number()?;

        let mut end = self.lexer.next_token()?.expect(&[
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::EndOfFile,
        ])?;

        let true_origin = if end.kind == TokenKind::Name {
            let repository = lexing::unquote(end.text).into();
            let path = self.take_name()?;
            let project = self.take_name()?;
            let folder = self.take_name()?;
            end = self.lexer.next_token()?.expect(&[TokenKind::Newline, TokenKind::EndOfFile])?;
            Some(TrueOrigin { repository, path, project, folder })
        } else {
            None
        };

        self.push_name(depth, element.into(), name.position)?;

        let declaration = Declaration {
            delimiter: delimiter.into(),
            property: property.into(),
            source_line,
            offset_start,
            offset_end,
            true_origin,
        };
        self.insert_entry(&declaration, name.position)?;

        Ok(end)
    }

    fn take_number(&mut self) -> Result<i32, ParseError> {
        let token = self.lexer.next_token()?.expect(&[TokenKind::Number])?;
        number(token)
    }

    fn take_name(&mut self) -> Result<SmolStr, ParseError> {
        let token = self.lexer.next_token()?.expect(&[TokenKind::Name])?;
        Ok(lexing::unquote(token.text).into())
    }

    fn push_name(
        &mut self,
        depth: usize,
        name: SmolStr,
        position: Position,
    ) -> Result<(), ParseError> {
        if depth > self.names.len() {
            return Err(ParseError::new(position, "Too many tabs"));
        }
        self.names.truncate(depth);
        self.names.push(name);
        Ok(())
    }

    fn insert_entry(
        &mut self,
        declaration: &Declaration,
        position: Position,
    ) -> Result<(), ParseError> {
        let name_stack: Vec<SmolStr> = self.names.iter().rev().cloned().collect();

        let entry = indexing::build_entry(&name_stack, declaration).map_err(|error| match error {
            EntryError::Incomplete { .. } => ParseError::new(position, "Incomplete index entry"),
            error => ParseError::new(position, format!("Malformed index entry: {error}")),
        })?;

        self.database
            .insert(entry)
            .map_err(|_| ParseError::new(position, "Index contains duplicates"))?;

        Ok(())
    }
}

fn number(token: Token) -> Result<i32, ParseError> {
    let digits = token.text.trim_end_matches('\r');
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseError::new(token.position, "Number expected"));
    }
    digits.parse().map_err(|_| ParseError::new(token.position, "Number out of range"))
}
