//! Execute argtree commands against input text

use log::debug;

use super::{CliError, tree_to_json};
use crate::{ParseOptions, parse_with};

/// What to do with the parsed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the canonical serialization
    Format,
    /// Print the tree structure as JSON
    Tree { pretty: bool },
    /// Print the leaves containing the selector
    Select { selector: String },
}

/// Options for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub command: Command,
    /// Text to parse
    pub input: Option<String>,
    /// JSON object overriding the default parse options
    pub options: Option<String>,
}

/// Result of a run
#[derive(Debug)]
pub enum RunResult {
    Text(String),
    Json { value: serde_json::Value, pretty: bool },
}

fn load_options(json: Option<&str>) -> Result<ParseOptions, CliError> {
    match json {
        Some(json) => Ok(ParseOptions::from_json(json)?),
        None => Ok(ParseOptions::default()),
    }
}

/// Execute a command
pub fn execute(run: &RunOptions) -> Result<RunResult, CliError> {
    let input = run.input.as_deref().ok_or(CliError::NoInput)?;
    let options = load_options(run.options.as_deref())?;
    debug!("running {:?} with {:?}", run.command, options);

    let mut tree = parse_with(input, options)?;
    let root = tree.root();

    match &run.command {
        Command::Format => {
            // Tokenize every leaf so the output is canonical, not echoed.
            tree.apply_all(root, |_| {})?;
            Ok(RunResult::Text(tree.to_text()))
        }
        Command::Tree { pretty } => Ok(RunResult::Json {
            value: tree_to_json(&tree, root)?,
            pretty: *pretty,
        }),
        Command::Select { selector } => {
            let view = tree.select_all(root, selector.as_str())?;
            Ok(RunResult::Text(tree.text(view)))
        }
    }
}
