//! Identity-keyed hierarchy for forests.

use core::fmt;
use core::hash::Hash;

use std::collections::{HashMap, HashSet};

use crate::anchor::InsertAs;
use crate::error::{Result, TreeError};

/// A forest without elements tied to nodes.
///
/// Members are known only by their identities. Every member has a (possibly
/// empty) children entry, and every member is either in `roots` or in exactly
/// one children list, with `parent` agreeing with that placement.
#[derive(Debug, Clone)]
pub(crate) struct Hierarchy<Id> {
    /// Members in insertion order.
    order: Vec<Id>,
    /// Top-level members, left to right.
    roots: Vec<Id>,
    /// Parent of each non-root member.
    parent: HashMap<Id, Id>,
    /// Children of each member, left to right.
    children: HashMap<Id, Vec<Id>>,
}

impl<Id: Clone + Eq + Hash + fmt::Debug> Hierarchy<Id> {
    /// Returns true if the identity is a member.
    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, id: &Id) -> bool {
        self.children.contains_key(id)
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns the members in insertion order.
    #[inline]
    #[must_use]
    pub(crate) fn order(&self) -> &[Id] {
        &self.order
    }

    /// Returns the roots.
    #[inline]
    #[must_use]
    pub(crate) fn roots(&self) -> &[Id] {
        &self.roots
    }

    /// Returns the children of the member.
    ///
    /// Returns `None` if the identity is not a member.
    #[inline]
    #[must_use]
    pub(crate) fn children(&self, id: &Id) -> Option<&[Id]> {
        self.children.get(id).map(Vec::as_slice)
    }

    /// Returns the stored key and the children of the member.
    #[inline]
    #[must_use]
    pub(crate) fn entry(&self, id: &Id) -> Option<(&Id, &[Id])> {
        self.children
            .get_key_value(id)
            .map(|(key, children)| (key, children.as_slice()))
    }

    /// Returns the parent of the member, `None` for roots and non-members.
    #[inline]
    #[must_use]
    pub(crate) fn parent(&self, id: &Id) -> Option<&Id> {
        self.parent.get(id)
    }

    /// Returns the sibling list the member belongs to.
    #[must_use]
    pub(crate) fn siblings(&self, id: &Id) -> Option<&[Id]> {
        match self.parent.get(id) {
            Some(parent) => self.children(parent),
            None => Some(&self.roots),
        }
    }

    /// Registers a member with its bookkeeping but without linking it into
    /// any sibling list.
    ///
    /// The caller is responsible for making the member reachable, either by
    /// [`splice`][`Self::splice`] or by listing it in the children of an
    /// already registered member.
    pub(crate) fn register(&mut self, id: Id, parent: Option<Id>, children: Vec<Id>) {
        if let Some(parent) = parent {
            self.parent.insert(id.clone(), parent);
        }
        self.children.insert(id.clone(), children);
        self.order.push(id);
    }

    /// Links the registered `range` into the destination as a contiguous run.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Inconsistent`] if the anchor of the destination is
    /// not found where the bookkeeping says it should be.
    pub(crate) fn splice(&mut self, range: &[Id], dest: InsertAs<&Id>) -> Result<()> {
        let (parent, index) = match dest {
            InsertAs::LastRoot => (None, self.roots.len()),
            InsertAs::FirstChildOf(parent) => (Some(parent.clone()), 0),
            InsertAs::LastChildOf(parent) => {
                let len = self.children(parent).map_or(0, <[Id]>::len);
                (Some(parent.clone()), len)
            }
            InsertAs::PreviousSiblingOf(anchor) => {
                (self.parent.get(anchor).cloned(), self.position(anchor)?)
            }
            InsertAs::NextSiblingOf(anchor) => {
                (self.parent.get(anchor).cloned(), self.position(anchor)? + 1)
            }
        };

        for id in range {
            match &parent {
                Some(parent) => self.parent.insert(id.clone(), parent.clone()),
                None => self.parent.remove(id),
            };
        }
        let siblings = self.siblings_mut(parent.as_ref())?;
        siblings.splice(index..index, range.iter().cloned());

        Ok(())
    }

    /// Unlinks the member from its sibling list.
    ///
    /// The member keeps its children but is no longer reachable from the roots.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Inconsistent`] if the member is not found in the
    /// sibling list it should belong to.
    pub(crate) fn unlink(&mut self, id: &Id) -> Result<()> {
        let index = self.position(id)?;
        let parent = self.parent.remove(id);
        self.siblings_mut(parent.as_ref())?.remove(index);

        Ok(())
    }

    /// Drops the bookkeeping of an unlinked member and returns its children.
    ///
    /// The insertion order is not updated; see [`retain`][`Self::retain`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Inconsistent`] if the member has no children entry.
    pub(crate) fn forget(&mut self, id: &Id) -> Result<Vec<Id>> {
        self.parent.remove(id);
        self.children.remove(id).ok_or_else(|| {
            TreeError::inconsistent(format_args!("no children entry for {:?}", id))
        })
    }

    /// Removes the forgotten members from the insertion order.
    pub(crate) fn retain(&mut self, forgotten: &HashSet<Id>) {
        self.order.retain(|id| !forgotten.contains(id));
    }

    /// Returns the index of the member in its sibling list.
    fn position(&self, id: &Id) -> Result<usize> {
        self.siblings(id)
            .and_then(|siblings| siblings.iter().position(|v| v == id))
            .ok_or_else(|| {
                TreeError::inconsistent(format_args!("{:?} is missing from its sibling list", id))
            })
    }

    /// Returns the children of `parent`, or the roots for `None`.
    fn siblings_mut(&mut self, parent: Option<&Id>) -> Result<&mut Vec<Id>> {
        match parent {
            Some(parent) => self.children.get_mut(parent).ok_or_else(|| {
                TreeError::inconsistent(format_args!("no children entry for {:?}", parent))
            }),
            None => Ok(&mut self.roots),
        }
    }

    /// Checks the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Inconsistent`] describing the first violation found.
    pub(crate) fn validate(&self) -> Result<()> {
        let mut members = HashSet::with_capacity(self.order.len());
        for id in &self.order {
            if !members.insert(id) {
                return Err(TreeError::inconsistent(format_args!(
                    "{:?} appears twice in the member list",
                    id
                )));
            }
            if !self.children.contains_key(id) {
                return Err(TreeError::inconsistent(format_args!(
                    "no children entry for {:?}",
                    id
                )));
            }
        }
        if self.children.len() != members.len() {
            return Err(TreeError::inconsistent(
                "children entries exist for non-members",
            ));
        }

        // Walk from the roots. Each member must be reached exactly once, and
        // only through the list its parent entry names.
        let mut visited = HashSet::with_capacity(members.len());
        let mut pending: Vec<(&Id, Option<&Id>)> =
            self.roots.iter().rev().map(|id| (id, None)).collect();
        while let Some((id, expected_parent)) = pending.pop() {
            if !members.contains(id) {
                return Err(TreeError::inconsistent(format_args!(
                    "{:?} is linked but is not a member",
                    id
                )));
            }
            if !visited.insert(id) {
                return Err(TreeError::inconsistent(format_args!(
                    "{:?} is reachable more than once",
                    id
                )));
            }
            if self.parent.get(id) != expected_parent {
                return Err(TreeError::inconsistent(format_args!(
                    "parent entry of {:?} disagrees with its placement",
                    id
                )));
            }
            let children = self
                .children
                .get(id)
                .expect("[validity] membership has been checked above");
            pending.extend(children.iter().rev().map(|child| (child, Some(id))));
        }
        if visited.len() != members.len() {
            return Err(TreeError::inconsistent(format_args!(
                "{} member(s) are unreachable from the roots",
                members.len() - visited.len()
            )));
        }
        if self.parent.len() != members.len() - self.roots.len() {
            return Err(TreeError::inconsistent(
                "parent entries exist for non-members",
            ));
        }

        Ok(())
    }
}

impl<Id: Eq + Hash> PartialEq for Hierarchy<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
            && self.roots == other.roots
            && self.parent == other.parent
            && self.children == other.children
    }
}

impl<Id: Eq + Hash> Eq for Hierarchy<Id> {}

impl<Id> Default for Hierarchy<Id> {
    #[inline]
    fn default() -> Self {
        Self {
            order: Default::default(),
            roots: Default::default(),
            parent: Default::default(),
            children: Default::default(),
        }
    }
}
