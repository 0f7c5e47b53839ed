//! Error types for tokenizing and editing argument trees.

/// Errors produced while tokenizing text.
///
/// Positions are character offsets into `text`, which is the input the
/// failing tokenizer was working on (the trimmed document for the tree
/// tokenizer, the single token for the leaf tokenizer).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A quote-start marker without its quote-end marker
    #[error("literal starting at {position} in '{text}' is not terminated")]
    UnterminatedLiteral { text: String, position: usize },

    /// A children-start marker whose group is never closed
    #[error("group starting at {position} in '{text}' is not closed")]
    UnterminatedGroup { text: String, position: usize },

    /// Input remains after a name or value but no delimiter follows
    #[error("expected a parameter after {after} at position {position} in '{text}'")]
    MissingDelimiter {
        text: String,
        position: usize,
        after: &'static str,
    },
}

/// Errors produced by tree and argument operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Children requested from a leaf node
    #[error("'{0}' has no children")]
    NotNested(String),

    /// Argument requested from a nested node
    #[error("'{0}' has children")]
    NotLeaf(String),

    /// `one()` found more than one value for the delimiter
    #[error("'{text}' has multiple values for '{delimiter}'")]
    Ambiguous { text: String, delimiter: String },

    /// `split()` on a group without children
    #[error("cannot split the empty group '{0}'")]
    EmptyGroup(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
