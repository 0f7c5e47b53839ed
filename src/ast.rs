//! # Argument trees
//!
//! This module defines the in-memory form of the shorthand notation:
//!
//! - **[arg]** - A single token: a name plus ordered `(delimiter, value)` parameters
//! - **[node]** - Node handles and arena slots (leaf or nested group)
//! - **[tree]** - The arena owning every node of one document, with the
//!   structural operations (`push`, `unshift`, `split`, `concat`, cloning)
//!
//! ## Notation
//!
//! ```text
//! r.t.s1 {c.p4 a b} `any text`.x:y@z
//! ```
//!
//! - Whitespace separates tokens, `{...}` groups them
//! - A token is `name(delimiter value)*`; the default delimiters are `.`, `:` and `@`
//! - Backticks quote a name or value, so it may contain delimiters,
//!   whitespace or brackets
//!
//! ## Parent links
//!
//! Every node slot records the nested node that lists it. The links are
//! recomputed from the root after each structural change, so a leaf
//! transform can always reach its siblings through
//! [`ArgMut::parent`](crate::transform::ArgMut::parent).
//!
//! ## Lazy leaves
//!
//! The tree tokenizer only stores a leaf's raw text. The leaf tokenizer runs
//! the first time the leaf's [`Arg`] is requested; a leaf that is never
//! inspected serializes back as its source text.
pub mod arg;
pub mod node;
pub mod tree;

pub use arg::{Arg, Parameter};
pub use node::NodeId;
pub use tree::{Part, Tree, concat};
