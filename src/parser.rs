use std::rc::Rc;

use log::{debug, trace};

use crate::{
    ast::{
        Arg, Tree,
        node::{Leaf, NodeId, NodeKind},
    },
    error::ParseError,
    options::ParseOptions,
};

/// Tokenizer for whole documents: whitespace-separated tokens and
/// `{...}` groups.
///
/// Leaves keep their raw text; their [`Arg`] is tokenized on first use.
pub struct NodeParser {
    text: String,
    input: Vec<char>,
    position: usize,
    options: Rc<ParseOptions>,
}

impl NodeParser {
    pub fn new(text: &str, options: Rc<ParseOptions>) -> Self {
        let text = text.trim();
        NodeParser {
            text: text.to_string(),
            input: text.chars().collect(),
            position: 0,
            options,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self, end: usize) {
        while self.position < end {
            match self.current_char() {
                Some(ch) if ch.is_whitespace() => self.advance(),
                _ => break,
            }
        }
    }

    /// Moves past a quoted span starting at the cursor.
    fn skip_quoted(&mut self, end: usize) -> Result<(), ParseError> {
        let start = self.position;
        self.advance(); // opening quote

        while self.position < end {
            let ch = self.input[self.position];
            self.advance();
            if ch == self.options.quote_end {
                return Ok(());
            }
        }

        Err(ParseError::UnterminatedLiteral {
            text: self.text.clone(),
            position: start,
        })
    }

    /// Index of the marker closing the group that opens at the cursor.
    /// Leaves the cursor where it was.
    fn find_group_end(&mut self) -> Result<usize, ParseError> {
        let start = self.position;
        let mut depth = 0usize;

        while let Some(ch) = self.current_char() {
            if ch == self.options.quote_start {
                self.skip_quoted(self.input.len())?;
                continue;
            }
            if ch == self.options.children_start {
                depth += 1;
            } else if ch == self.options.children_end {
                depth -= 1;
                if depth == 0 {
                    let end = self.position;
                    self.position = start;
                    return Ok(end);
                }
            }
            self.advance();
        }

        Err(ParseError::UnterminatedGroup {
            text: self.text.clone(),
            position: start,
        })
    }

    fn parse_group(&mut self, tree: &mut Tree) -> Result<NodeId, ParseError> {
        let close = self.find_group_end()?;
        self.advance(); // children start

        let children = self.parse_nodes(tree, close)?;
        self.position = close + 1;

        debug!("parsed group with {} child node(s)", children.len());
        Ok(tree.alloc(NodeKind::Nested(children)))
    }

    fn parse_leaf(&mut self, tree: &mut Tree, end: usize) -> Result<NodeId, ParseError> {
        let start = self.position;

        while self.position < end {
            let ch = self.input[self.position];
            if ch == self.options.quote_start {
                self.skip_quoted(end)?;
            } else if ch.is_whitespace() {
                break;
            } else {
                self.advance();
            }
        }

        let raw: String = self.input[start..self.position].iter().collect();
        trace!("leaf '{}' at {}", raw, start);
        Ok(tree.alloc(NodeKind::Leaf(Leaf::raw(raw))))
    }

    /// Parses nodes until `end`, returning them in order.
    fn parse_nodes(&mut self, tree: &mut Tree, end: usize) -> Result<Vec<NodeId>, ParseError> {
        let mut nodes = Vec::new();

        self.skip_whitespace(end);
        while self.position < end {
            let node = if self.current_char() == Some(self.options.children_start) {
                self.parse_group(tree)?
            } else {
                self.parse_leaf(tree, end)?
            };
            nodes.push(node);
            self.skip_whitespace(end);
        }

        Ok(nodes)
    }

    /// Parses the whole text into a tree whose root group holds the
    /// top-level nodes.
    pub fn parse(mut self) -> Result<Tree, ParseError> {
        let mut tree = Tree::with_shared(Rc::clone(&self.options));
        let end = self.input.len();
        let nodes = self.parse_nodes(&mut tree, end)?;

        debug!("parsed {} top-level node(s) from '{}'", nodes.len(), self.text);
        let root = tree.root();
        if let NodeKind::Nested(children) = tree.kind_mut(root) {
            *children = nodes;
        }
        tree.relink();
        Ok(tree)
    }
}

/// Parses a document with the default options.
///
/// ```
/// let tree = argtree::parse("a {b c} d.x").unwrap();
/// assert_eq!(tree.children(tree.root()).unwrap().len(), 3);
/// assert_eq!(tree.to_text(), "a {b c} d.x");
/// ```
pub fn parse(text: &str) -> Result<Tree, ParseError> {
    parse_with(text, ParseOptions::default())
}

pub fn parse_with(text: &str, options: ParseOptions) -> Result<Tree, ParseError> {
    NodeParser::new(text, Rc::new(options)).parse()
}

/// Parses `text` as one token; the resulting tree's root is a leaf.
///
/// Unlike [`parse`], the token is tokenized immediately.
pub fn parse_one(text: &str) -> Result<Tree, ParseError> {
    parse_one_with(text, ParseOptions::default())
}

pub fn parse_one_with(text: &str, options: ParseOptions) -> Result<Tree, ParseError> {
    Arg::parse_with(text, Rc::new(options)).map(Tree::leaf)
}
