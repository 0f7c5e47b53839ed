//! CLI support for argtree
//!
//! Provides programmatic access to the argtree commands so other tools can
//! embed them without spawning the binary.

mod docs;
mod json;
mod run;

pub use docs::get_notation_reference;
pub use json::tree_to_json;
pub use run::{Command, RunOptions, RunResult, execute};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Tree(#[from] crate::Error),

    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass the text as an argument or pipe it to stdin.")]
    NoInput,
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Tree(e.into())
    }
}
