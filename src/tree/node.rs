//! Node.

use core::fmt;

use crate::identity::Identify;
use crate::tree::traverse::DepthFirstTraverse;
use crate::tree::Tree;

/// Immutable reference to a node.
///
/// This type guarantees that the identity is a member of the tree.
pub struct Node<'a, T: Identify> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Identity, borrowed from the tree.
    id: &'a T::Identity,
}

impl<'a, T: Identify> Node<'a, T> {
    /// Creates a new `Node` object.
    ///
    /// Returns `None` if the identity is not a member.
    #[must_use]
    pub(crate) fn new(tree: &'a Tree<T>, id: &T::Identity) -> Option<Self> {
        let (id, _) = tree.hierarchy().entry(id)?;
        Some(Self { tree, id })
    }

    /// Creates a new `Node` object from an identity known to be a member.
    #[inline]
    #[must_use]
    pub(crate) fn with_member(tree: &'a Tree<T>, id: &'a T::Identity) -> Self {
        debug_assert!(
            tree.contains_identity(id),
            "[precondition] the identity must be a member"
        );
        Self { tree, id }
    }

    /// Returns the tree the node belongs to.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &'a Tree<T> {
        self.tree
    }

    /// Returns the identity.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &'a T::Identity {
        self.id
    }

    /// Returns a reference to the element.
    #[inline]
    #[must_use]
    pub fn element(&self) -> &'a T {
        self.tree.element(self.id)
    }

    /// Returns the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree
            .hierarchy()
            .parent(self.id)
            .map(|id| Self::with_member(self.tree, id))
    }

    /// Returns the child nodes, left to right.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'a, T>> + ExactSizeIterator {
        let tree = self.tree;
        self.child_ids()
            .iter()
            .map(move |id| Node::with_member(tree, id))
    }

    /// Returns true if the node is a root.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tree.hierarchy().parent(self.id).is_none()
    }

    /// Returns true if the node has no next sibling.
    #[must_use]
    pub fn is_last_sibling(&self) -> bool {
        self.tree
            .hierarchy()
            .siblings(self.id)
            .and_then(<[_]>::last)
            .map_or(true, |last| last == self.id)
    }

    /// Returns a depth-first traverser over the subtree rooted at the node.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'a, T> {
        DepthFirstTraverse::with_toplevels(self.tree, core::slice::from_ref(self.id))
    }

    /// Returns the identities of the children.
    pub(crate) fn child_ids(&self) -> &'a [T::Identity] {
        self.tree
            .hierarchy()
            .children(self.id)
            .expect("[validity] the node has been checked to be a member")
    }
}

impl<T: Identify> Clone for Node<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Identify> Copy for Node<'_, T> {}

impl<T: Identify> PartialEq for Node<'_, T> {
    /// Nodes are equal if they are the same member of the same tree.
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T: Identify> Eq for Node<'_, T> {}

impl<T: Identify> fmt::Debug for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(self.id).finish()
    }
}
