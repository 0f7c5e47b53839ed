use std::rc::Rc;

use log::debug;

use crate::{
    ast::{
        Arg,
        node::{Leaf, NodeId, NodeKind, NodeSlot},
    },
    error::{Error, ParseError},
    options::ParseOptions,
    parser::NodeParser,
};

/// An argument tree: an arena of nodes reachable from one root.
///
/// A `Tree` is also the unit the structural operations hand out and take
/// in: [`split`](Tree::split) and [`clone_node`](Tree::clone_node) return
/// new trees, [`push`](Tree::push) and [`concat`] accept them.
///
/// Removed nodes, [`select_all`](Tree::select_all) views and the scratch
/// nodes of text parts stay in the arena, unreachable from the root.
/// [`compact`](Tree::compact) drops them.
///
/// # Examples
///
/// ```
/// let mut tree = argtree::parse("a {b c}").unwrap();
/// let root = tree.root();
/// tree.push(root, ["d"]).unwrap();
/// assert_eq!(tree.to_text(), "a {b c} d");
///
/// let group = tree.children(root).unwrap()[1];
/// assert_eq!(tree.text(group), "b c");
/// ```
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeSlot>,
    root: NodeId,
    options: Rc<ParseOptions>,
}

/// Something that can be added to a tree: text to tokenize, or another tree.
#[derive(Debug)]
pub enum Part {
    Text(String),
    Tree(Tree),
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::Text(text.to_string())
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::Text(text)
    }
}

impl From<Tree> for Part {
    fn from(tree: Tree) -> Self {
        Part::Tree(tree)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new(ParseOptions::default())
    }
}

impl Clone for Tree {
    /// Deep copy of everything reachable from the root.
    fn clone(&self) -> Self {
        self.clone_node(self.root)
    }
}

impl Tree {
    /// An empty group.
    pub fn new(options: ParseOptions) -> Self {
        Self::with_shared(Rc::new(options))
    }

    pub(crate) fn with_shared(options: Rc<ParseOptions>) -> Self {
        Tree {
            nodes: vec![NodeSlot::new(NodeKind::Nested(Vec::new()))],
            root: NodeId(0),
            options,
        }
    }

    /// A tree whose root is the leaf `arg`.
    pub fn leaf(arg: Arg) -> Self {
        let options = Rc::clone(arg.shared_options());
        Tree {
            nodes: vec![NodeSlot::new(NodeKind::Leaf(Leaf::parsed(arg)))],
            root: NodeId(0),
            options,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of arena slots, reachable or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every node not reachable from the root.
    ///
    /// Ids taken before the call no longer name the same nodes.
    pub fn compact(&mut self) {
        let before = self.nodes.len();
        *self = self.clone();
        debug!("compacted arena from {} to {} node(s)", before, self.nodes.len());
    }

    pub(crate) fn shared_options(&self) -> &Rc<ParseOptions> {
        &self.options
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot::new(kind));
        id
    }

    pub(crate) fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    pub fn is_nested(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Nested(_))
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        !self.is_nested(id)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], Error> {
        match self.kind(id) {
            NodeKind::Nested(children) => Ok(children),
            NodeKind::Leaf(_) => Err(Error::NotNested(self.text(id))),
        }
    }

    pub(crate) fn children_mut(&mut self, id: NodeId) -> Result<&mut Vec<NodeId>, Error> {
        if self.is_leaf(id) {
            return Err(Error::NotNested(self.text(id)));
        }
        match self.kind_mut(id) {
            NodeKind::Nested(children) => Ok(children),
            NodeKind::Leaf(_) => unreachable!("checked above"),
        }
    }

    /// The leaf's argument, tokenizing it on first access.
    pub fn arg(&self, id: NodeId) -> Result<&Arg, Error> {
        match self.kind(id) {
            NodeKind::Leaf(leaf) => Ok(leaf.arg(&self.options)?),
            NodeKind::Nested(_) => Err(Error::NotLeaf(self.text(id))),
        }
    }

    pub fn arg_mut(&mut self, id: NodeId) -> Result<&mut Arg, Error> {
        if self.is_nested(id) {
            return Err(Error::NotLeaf(self.text(id)));
        }
        let options = Rc::clone(&self.options);
        match self.kind_mut(id) {
            NodeKind::Leaf(leaf) => Ok(leaf.arg_mut(&options)?),
            NodeKind::Nested(_) => unreachable!("checked above"),
        }
    }

    /// The nested node listing `id`, as of the last structural change.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Points every node reachable from the root at the group listing it.
    pub(crate) fn relink(&mut self) {
        self.nodes[self.root.0].parent = None;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let children = match self.kind(id) {
                NodeKind::Nested(children) => children.clone(),
                NodeKind::Leaf(_) => continue,
            };
            for child in children {
                self.nodes[child.0].parent = Some(id);
                stack.push(child);
            }
        }
    }

    /// Copies the subtree at `id` of `source` into this arena.
    fn graft(&mut self, source: &Tree, id: NodeId) -> NodeId {
        match source.kind(id) {
            NodeKind::Leaf(leaf) => self.alloc(NodeKind::Leaf(leaf.clone())),
            NodeKind::Nested(children) => {
                let children = children
                    .iter()
                    .map(|&child| self.graft(source, child))
                    .collect();
                self.alloc(NodeKind::Nested(children))
            }
        }
    }

    /// Deep copy of the subtree at `id` as a new tree.
    ///
    /// Only the parse options are shared with the original.
    pub fn clone_node(&self, id: NodeId) -> Tree {
        let mut tree = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
            options: Rc::clone(&self.options),
        };
        tree.root = tree.graft(self, id);
        tree.relink();
        tree
    }

    /// Tokenizes `text` into new nodes of this arena, returning the top-level ones.
    fn parse_detached(&mut self, text: &str) -> Result<Vec<NodeId>, ParseError> {
        let parsed = NodeParser::new(text, Rc::clone(&self.options)).parse()?;
        let nodes = match parsed.kind(parsed.root) {
            NodeKind::Nested(children) => children
                .iter()
                .map(|&child| self.graft(&parsed, child))
                .collect(),
            NodeKind::Leaf(_) => vec![self.graft(&parsed, parsed.root)],
        };
        Ok(nodes)
    }

    /// New nodes for `part`: the top-level nodes of text, or the root of a tree.
    fn materialize(&mut self, part: Part) -> Result<Vec<NodeId>, ParseError> {
        match part {
            Part::Text(text) => self.parse_detached(&text),
            Part::Tree(tree) => Ok(vec![self.graft(&tree, tree.root)]),
        }
    }

    /// Appends parts to the group at `id`, in order.
    ///
    /// Text is tokenized and its top-level nodes appended one by one; a tree
    /// is appended as a single child (a nested root stays a group).
    pub fn push<I, P>(&mut self, id: NodeId, parts: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        self.children_mut(id)?;
        for part in parts {
            let nodes = self.materialize(part.into())?;
            self.children_mut(id)?.extend(nodes);
        }
        self.relink();
        Ok(())
    }

    /// Prepends parts to the group at `id`, keeping their given order.
    pub fn unshift<I, P>(&mut self, id: NodeId, parts: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        self.children_mut(id)?;
        let parts: Vec<Part> = parts.into_iter().map(Into::into).collect();
        for part in parts.into_iter().rev() {
            let nodes = self.materialize(part)?;
            self.children_mut(id)?.splice(0..0, nodes);
        }
        self.relink();
        Ok(())
    }

    /// Splits the group at `id` into a copy of its first child and a new
    /// group holding copies of the rest.
    pub fn split(&self, id: NodeId) -> Result<(Tree, Tree), Error> {
        let (first, rest) = match self.children(id)?.split_first() {
            Some(split) => split,
            None => return Err(Error::EmptyGroup(self.text(id))),
        };

        let head = self.clone_node(*first);
        let mut tail = Tree::with_shared(Rc::clone(&self.options));
        let nodes: Vec<NodeId> = rest.iter().map(|&child| tail.graft(self, child)).collect();
        if let NodeKind::Nested(children) = tail.kind_mut(tail.root) {
            *children = nodes;
        }
        tail.relink();

        debug!("split group into '{}' and '{}'", head, tail);
        Ok((head, tail))
    }
}

/// Builds a new group from parts.
///
/// Text is tokenized; trees with a nested root are spliced in child by
/// child, trees with a leaf root are added as one child. Text is tokenized
/// with the options of the last tree among the parts, or the defaults.
///
/// ```
/// use argtree::Part;
///
/// let first = argtree::parse_one("a").unwrap();
/// let second = argtree::parse("b c").unwrap();
/// let tree = argtree::concat([
///     Part::from(first),
///     Part::from(second),
///     Part::from("{c d}"),
///     Part::from("e f"),
/// ])
/// .unwrap();
/// assert_eq!(tree.to_text(), "a b c {c d} e f");
/// ```
pub fn concat<I, P>(parts: I) -> Result<Tree, ParseError>
where
    I: IntoIterator<Item = P>,
    P: Into<Part>,
{
    let parts: Vec<Part> = parts.into_iter().map(Into::into).collect();
    let options = parts
        .iter()
        .rev()
        .find_map(|part| match part {
            Part::Tree(tree) => Some(Rc::clone(&tree.options)),
            Part::Text(_) => None,
        })
        .unwrap_or_default();

    let mut result = Tree::with_shared(options);
    let mut nodes = Vec::new();
    for part in parts {
        match part {
            Part::Text(text) => nodes.extend(result.parse_detached(&text)?),
            Part::Tree(tree) => match tree.kind(tree.root) {
                NodeKind::Nested(children) => {
                    nodes.extend(children.iter().map(|&child| result.graft(&tree, child)));
                }
                NodeKind::Leaf(_) => nodes.push(result.graft(&tree, tree.root)),
            },
        }
    }
    let root = result.root;
    if let NodeKind::Nested(children) = result.kind_mut(root) {
        *children = nodes;
    }
    result.relink();
    Ok(result)
}
