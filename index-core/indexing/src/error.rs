use smol_str::SmolStr;

/// Errors emitted while building an [`IndexEntry`](crate::IndexEntry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("expected {expected} enclosing names, found {found}")]
    Incomplete { expected: usize, found: usize },

    #[error("'{name}' is missing the '{separator}' separator")]
    MissingSeparator { name: SmolStr, separator: char },

    #[error("'{canonical}' has {found} fields, expected at least 6")]
    TooFewFields { canonical: SmolStr, found: usize },

    #[error("'{canonical}' has a partial location, expected line, start and end")]
    PartialLocation { canonical: SmolStr },

    #[error("'{canonical}' has a partial true origin, expected four fields")]
    PartialTrueOrigin { canonical: SmolStr },

    #[error("'{text}' is not a number")]
    InvalidNumber { text: SmolStr },
}
