use smol_str::SmolStr;

/// Outcomes of a lookup that did not produce exactly one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("not in the source index")]
    NotInIndex,
    #[error("ambiguous, more than one entry matches")]
    Ambiguous,
}

/// The kind of errors produced when inserting into the source index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    #[error("entry already in the source index: {entry}")]
    Duplicate { entry: SmolStr },
    #[error("entry collides with an existing entry: {entry}")]
    Collision { entry: SmolStr },
}
