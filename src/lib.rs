pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod lexer;
pub mod matcher;
pub mod options;
pub mod output;
pub mod parser;
pub mod transform;

pub use ast::{Arg, NodeId, Parameter, Part, Tree, concat};
pub use error::{Error, ParseError};
pub use lexer::ArgLexer;
pub use matcher::{Matcher, NameReplacer, Replacement, Replacer, Selector};
pub use options::{DEFAULT_DELIMITERS, ParseOptions};
pub use parser::{NodeParser, parse, parse_one, parse_one_with, parse_with};
pub use transform::ArgMut;
