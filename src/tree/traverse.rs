//! Tree traversal.

use core::iter;

use crate::identity::Identify;
use crate::tree::{Node, Tree};

/// Depth-first traversal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DftEvent<T> {
    /// Node open.
    Open(T),
    /// Node close.
    Close(T),
}

impl<T> DftEvent<T> {
    /// Converts the internal value.
    pub fn map<F, U>(self, f: F) -> DftEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Open(v) => DftEvent::Open(f(v)),
            Self::Close(v) => DftEvent::Close(f(v)),
        }
    }

    /// Returns a reference to the internal value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Open(v) | Self::Close(v) => v,
        }
    }
}

/// Iterator for depth-first traversal.
///
/// Toplevel nodes are visited in order, and each of them is opened and
/// closed around its descendants.
pub struct DepthFirstTraverse<'a, T: Identify> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Pending events, the last one is emitted next.
    pending: Vec<DftEvent<&'a T::Identity>>,
}

impl<'a, T: Identify> DepthFirstTraverse<'a, T> {
    /// Creates a new iterator.
    ///
    /// Every toplevel identity must be a member of the tree.
    #[must_use]
    pub(crate) fn with_toplevels(tree: &'a Tree<T>, toplevels: &'a [T::Identity]) -> Self {
        Self {
            tree,
            pending: toplevels.iter().rev().map(DftEvent::Open).collect(),
        }
    }

    /// Returns the next event without advancing the iterator.
    #[must_use]
    pub fn peek(&self) -> Option<DftEvent<Node<'a, T>>> {
        let tree = self.tree;
        self.pending
            .last()
            .map(|ev| ev.map(|id| Node::with_member(tree, id)))
    }
}

impl<'a, T: Identify> Iterator for DepthFirstTraverse<'a, T> {
    type Item = DftEvent<Node<'a, T>>;

    /// # Panics
    ///
    /// Panics if the node being opened has no children entry, i.e. the tree
    /// is broken. [`peek`][`DepthFirstTraverse::peek`] may panic in that case
    /// too when debug assertions are enabled.
    fn next(&mut self) -> Option<Self::Item> {
        let ev = self.pending.pop()?;
        let node = Node::with_member(self.tree, *ev.value());
        if let DftEvent::Open(id) = ev {
            self.pending.push(DftEvent::Close(id));
            // Dive into the children, the first child comes next.
            self.pending
                .extend(node.child_ids().iter().rev().map(DftEvent::Open));
        }
        Some(ev.map(|_| node))
    }
}

impl<T: Identify> iter::FusedIterator for DepthFirstTraverse<'_, T> {}

impl<T: Identify> Clone for DepthFirstTraverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            pending: self.pending.clone(),
        }
    }
}

impl<T: Identify> core::fmt::Debug for DepthFirstTraverse<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthFirstTraverse")
            .field("pending", &self.pending)
            .finish()
    }
}
