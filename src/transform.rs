//! Tree walks that run leaf transforms.
//!
//! A leaf transform is any `FnMut(&mut ArgMut)`. [`ArgMut`] dereferences to
//! the leaf's [`Arg`] and also exposes the tree around it, so a transform
//! can edit its own token, look at its parent group, append siblings or
//! remove itself.
//!
//! Each walk snapshots a group's children before visiting them: nodes a
//! transform adds are not visited by the same walk, nodes it removes still
//! are. Parent links are recomputed once the walk finishes.
//!
//! # Examples
//!
//! ```
//! let mut tree = argtree::parse("a {b x x} {c y {y yy}}").unwrap();
//! tree.apply_all(tree.root(), |arg| arg.add("all")).unwrap();
//! assert_eq!(
//!     tree.to_text(),
//!     "a.all {b.all x.all x.all} {c.all y.all {y.all yy.all}}"
//! );
//! ```

use std::ops::{Deref, DerefMut};

use log::debug;

use crate::{
    ast::{Arg, NodeId, Tree, node::NodeKind},
    error::{Error, ParseError},
    matcher::Selector,
};

/// Mutable access to one leaf during a tree walk.
pub struct ArgMut<'t> {
    tree: &'t mut Tree,
    id: NodeId,
}

impl<'t> ArgMut<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Group listing this leaf, as of the last structural change.
    pub fn parent(&self) -> Option<NodeId> {
        self.tree.parent(self.id)
    }

    pub fn tree(&self) -> &Tree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    /// Takes this leaf out of its parent's children. The leaf's node id
    /// stays valid; it just isn't reachable from the root any more.
    pub fn remove(&mut self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };
        let id = self.id;
        match self.tree.kind_mut(parent) {
            NodeKind::Nested(children) => match children.iter().position(|&child| child == id) {
                Some(index) => {
                    children.remove(index);
                    true
                }
                None => false,
            },
            NodeKind::Leaf(_) => false,
        }
    }
}

impl Deref for ArgMut<'_> {
    type Target = Arg;

    fn deref(&self) -> &Arg {
        match self.tree.kind(self.id) {
            NodeKind::Leaf(leaf) => leaf
                .parsed_arg()
                .expect("ArgMut is only created for tokenized leaves"),
            NodeKind::Nested(_) => unreachable!("ArgMut is only created for leaves"),
        }
    }
}

impl DerefMut for ArgMut<'_> {
    fn deref_mut(&mut self) -> &mut Arg {
        match self.tree.arg_mut(self.id) {
            Ok(arg) => arg,
            Err(_) => unreachable!("ArgMut is only created for tokenized leaves"),
        }
    }
}

type LeafFn<'f> = dyn FnMut(&mut ArgMut<'_>) + 'f;

impl Tree {
    fn visit_leaf(&mut self, id: NodeId, f: &mut LeafFn<'_>) -> Result<(), Error> {
        self.arg_mut(id)?;
        let mut arg = ArgMut { tree: self, id };
        f(&mut arg);
        Ok(())
    }

    fn first_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            match self.kind(current) {
                NodeKind::Leaf(_) => return Some(current),
                NodeKind::Nested(children) => current = *children.first()?,
            }
        }
    }

    fn apply_first_inner(&mut self, id: NodeId, f: &mut LeafFn<'_>) -> Result<(), Error> {
        match self.first_leaf(id) {
            Some(leaf) => self.visit_leaf(leaf, f),
            None => Ok(()),
        }
    }

    fn apply_all_inner(&mut self, id: NodeId, f: &mut LeafFn<'_>) -> Result<(), Error> {
        match self.kind(id) {
            NodeKind::Leaf(_) => self.visit_leaf(id, f),
            NodeKind::Nested(children) => {
                for child in children.clone() {
                    self.apply_all_inner(child, f)?;
                }
                Ok(())
            }
        }
    }

    /// Runs `f` on the first leaf under `id`, descending through first
    /// children. An empty group is left alone.
    pub fn apply_first<F>(&mut self, id: NodeId, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&mut ArgMut<'_>),
    {
        let result = self.apply_first_inner(id, &mut f);
        self.relink();
        result
    }

    /// Runs `f` on the first leaf of every child of `id` except the first.
    /// Does nothing on a leaf.
    pub fn apply_rest<F>(&mut self, id: NodeId, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&mut ArgMut<'_>),
    {
        let children: Vec<NodeId> = match self.kind(id) {
            NodeKind::Nested(children) => children.iter().skip(1).copied().collect(),
            NodeKind::Leaf(_) => Vec::new(),
        };
        let result = children
            .into_iter()
            .try_for_each(|child| self.apply_first_inner(child, &mut f));
        self.relink();
        result
    }

    /// Runs `f` on the first leaf of every direct child of `id`; on a leaf,
    /// runs it on the leaf.
    pub fn apply<F>(&mut self, id: NodeId, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&mut ArgMut<'_>),
    {
        let result = match self.kind(id) {
            NodeKind::Nested(children) => children
                .clone()
                .into_iter()
                .try_for_each(|child| self.apply_first_inner(child, &mut f)),
            NodeKind::Leaf(_) => self.apply_first_inner(id, &mut f),
        };
        self.relink();
        result
    }

    /// Runs `f` on every leaf under `id`, depth-first, left to right.
    pub fn apply_all<F>(&mut self, id: NodeId, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&mut ArgMut<'_>),
    {
        let result = self.apply_all_inner(id, &mut f);
        self.relink();
        result
    }

    /// Removes the leaves `apply` reaches that equal a selector.
    ///
    /// Text selectors compare with non-strict [`Arg::equals`]. Matching is by
    /// node, so two equal-looking leaves are both removed.
    pub fn remove<'s, I, S>(&mut self, id: NodeId, selectors: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Selector<'s>>,
    {
        for selector in selectors {
            let selector = selector.into().resolve(self.shared_options())?;
            let mut matched: Result<(), ParseError> = Ok(());
            self.apply(id, |arg| match selector.matches(arg) {
                Ok(true) => {
                    arg.remove();
                }
                Ok(false) => {}
                Err(err) => matched = Err(err),
            })?;
            matched?;
        }
        Ok(())
    }

    /// Removes every leaf under `id` that equals a selector.
    pub fn remove_all<'s, I, S>(&mut self, id: NodeId, selectors: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<Selector<'s>>,
    {
        for selector in selectors {
            let selector = selector.into().resolve(self.shared_options())?;
            let mut matched: Result<(), ParseError> = Ok(());
            self.apply_all(id, |arg| match selector.matches(arg) {
                Ok(true) => {
                    arg.remove();
                }
                Ok(false) => {}
                Err(err) => matched = Err(err),
            })?;
            matched?;
        }
        Ok(())
    }

    /// Collects every leaf under `id` containing the selector into a new
    /// group and returns that group's id.
    ///
    /// The group is a view, not a copy: its children are the original leaf
    /// nodes, so transforms applied through it edit the tree in place. The
    /// view is not reachable from the root and never becomes its leaves'
    /// parent.
    ///
    /// ```
    /// let mut tree = argtree::parse("a.x {b a.x.y} a").unwrap();
    /// let view = tree.select_all(tree.root(), "a.x").unwrap();
    /// assert_eq!(tree.text(view), "a.x a.x.y");
    ///
    /// tree.apply(view, |arg| arg.add("hit")).unwrap();
    /// assert_eq!(tree.to_text(), "a.x.hit {b a.x.y.hit} a");
    /// ```
    pub fn select_all<'s>(
        &mut self,
        id: NodeId,
        selector: impl Into<Selector<'s>>,
    ) -> Result<NodeId, Error> {
        let selector = selector.into().resolve(self.shared_options())?;
        let mut selected = Vec::new();
        let mut matched: Result<(), ParseError> = Ok(());
        self.apply_all(id, |arg| match selector.is_contained_in(arg) {
            Ok(true) => selected.push(arg.id()),
            Ok(false) => {}
            Err(err) => matched = Err(err),
        })?;
        matched?;

        debug!("selected {} leaf node(s)", selected.len());
        Ok(self.alloc(NodeKind::Nested(selected)))
    }
}
