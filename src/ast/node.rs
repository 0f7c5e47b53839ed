use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::{ast::Arg, error::ParseError, options::ParseOptions};

/// Handle to a node inside one [`Tree`](crate::ast::Tree).
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A token whose [`Arg`] is tokenized on first use.
#[derive(Debug, Clone)]
pub(crate) struct Leaf {
    raw: String,
    parsed: OnceCell<Arg>,
}

impl Leaf {
    pub(crate) fn raw(raw: impl Into<String>) -> Self {
        Leaf {
            raw: raw.into(),
            parsed: OnceCell::new(),
        }
    }

    pub(crate) fn parsed(arg: Arg) -> Self {
        Leaf {
            raw: String::new(),
            parsed: OnceCell::with_value(arg),
        }
    }

    pub(crate) fn arg(&self, options: &Rc<ParseOptions>) -> Result<&Arg, ParseError> {
        self.parsed
            .get_or_try_init(|| Arg::parse_with(&self.raw, Rc::clone(options)))
    }

    pub(crate) fn arg_mut(&mut self, options: &Rc<ParseOptions>) -> Result<&mut Arg, ParseError> {
        self.arg(options)?;
        match self.parsed.get_mut() {
            Some(arg) => Ok(arg),
            None => unreachable!("leaf argument is initialised by the lookup above"),
        }
    }

    /// The argument if it has been tokenized already.
    pub(crate) fn parsed_arg(&self) -> Option<&Arg> {
        self.parsed.get()
    }

    /// Source text of a leaf nobody has inspected yet.
    pub(crate) fn source(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Leaf(Leaf),
    Nested(Vec<NodeId>),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeSlot {
    pub(crate) kind: NodeKind,
    /// Nested node listing this one, refreshed by `Tree::relink`
    pub(crate) parent: Option<NodeId>,
}

impl NodeSlot {
    pub(crate) fn new(kind: NodeKind) -> Self {
        NodeSlot { kind, parent: None }
    }
}
