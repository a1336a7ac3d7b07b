//! Parsers for partially qualified names and index documents.

mod index;
mod pqn;

pub use index::{IndexFileError, parse_index, parse_index_file};
pub use lexing::{ParseError, Position};
pub use pqn::Pqn;
