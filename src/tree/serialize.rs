//! Serde support.
//!
//! A tree serializes as `{"roots": [node, ..]}`, and each node as
//! `{"element": .., "children": [node, ..]}`. This is a read-only projection;
//! there is no way back.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::identity::Identify;
use crate::tree::{Node, Tree};

impl<T> Serialize for Tree<T>
where
    T: Identify + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let roots = self.hierarchy().roots();
        let mut state = serializer.serialize_struct("Tree", 1)?;
        state.serialize_field("roots", &NodeList { tree: self, ids: roots })?;
        state.end()
    }
}

impl<T> Serialize for Node<'_, T>
where
    T: Identify + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let children = NodeList {
            tree: self.tree(),
            ids: self.child_ids(),
        };
        let mut state = serializer.serialize_struct("Node", 2)?;
        state.serialize_field("element", self.element())?;
        state.serialize_field("children", &children)?;
        state.end()
    }
}

/// Sibling nodes serialized as a sequence.
struct NodeList<'a, T: Identify> {
    /// Tree.
    tree: &'a Tree<T>,
    /// Member identities, left to right.
    ids: &'a [T::Identity],
}

impl<T> Serialize for NodeList<'_, T>
where
    T: Identify + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tree = self.tree;
        serializer.collect_seq(self.ids.iter().map(|id| Node::with_member(tree, id)))
    }
}
