//! Tree.

mod debug_print;
mod node;
#[cfg(feature = "serde")]
mod serialize;
pub mod traverse;

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::anchor::InsertAs;
use crate::error::{Result, TreeError};
use crate::hierarchy::Hierarchy;
use crate::identity::Identify;
use crate::options::Options;

pub use self::debug_print::DebugPrint;
pub use self::node::Node;
pub use self::traverse::{DepthFirstTraverse, DftEvent};

/// Ordered forest of identified elements.
///
/// The tree owns its elements but never inspects them beyond
/// [`Identify::identity`]. Mutating operations clone elements only as
/// handles (for snapshots and merges), so `T` is typically a cheap handle
/// such as `Rc<_>`, `Arc<_>`, or a small value type.
#[derive(Debug, Clone)]
pub struct Tree<T: Identify> {
    /// Hierarchy.
    hierarchy: Hierarchy<T::Identity>,
    /// Elements by identity.
    data: HashMap<T::Identity, T>,
}

/// Structural snapshot used to roll back a failed operation.
#[derive(Debug)]
struct Snapshot<T: Identify> {
    /// Hierarchy at the time of the snapshot.
    hierarchy: Hierarchy<T::Identity>,
    /// Element handles at the time of the snapshot.
    data: HashMap<T::Identity, T>,
}

impl<T: Identify> Tree<T> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    ///
    /// use idforest::{Identify, Tree};
    ///
    /// struct Item(u32);
    ///
    /// impl Identify for Item {
    ///     type Identity = u32;
    ///
    ///     fn identity(&self) -> Option<u32> {
    ///         Some(self.0)
    ///     }
    /// }
    ///
    /// let tree = Tree::<Rc<Item>>::new();
    /// assert!(tree.is_empty());
    /// assert!(tree.roots().is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree whose roots are the given elements, in order.
    ///
    /// # Errors
    ///
    /// * [`TreeError::InvalidElement`]
    ///     + In case any element does not have an identity.
    /// * [`TreeError::DuplicateElement`]
    ///     + In case two elements share an identity.
    ///
    /// Nothing is built when validation fails.
    pub fn from_roots<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut identified = Vec::new();
        for (index, element) in elements.into_iter().enumerate() {
            let id = element
                .identity()
                .ok_or(TreeError::InvalidElement { index })?;
            identified.push((id, element));
        }

        let mut tree = Self::new();
        for (id, element) in identified {
            if tree.data.contains_key(&id) {
                return Err(TreeError::duplicate(&id));
            }
            tree.hierarchy.register(id.clone(), None, Vec::new());
            tree.data.insert(id, element);
        }
        let roots = tree.hierarchy.order().to_vec();
        tree.hierarchy
            .splice(&roots, InsertAs::LastRoot)
            .expect("[consistency] the root list of a new tree is always available");

        Ok(tree)
    }

    /// Returns the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.hierarchy.len()
    }

    /// Returns true if the tree has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the element is a member of the tree.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        element
            .identity()
            .map_or(false, |id| self.hierarchy.contains(&id))
    }

    /// Returns true if an element with the identity is a member of the tree.
    #[inline]
    #[must_use]
    pub fn contains_identity(&self, id: &T::Identity) -> bool {
        self.hierarchy.contains(id)
    }

    /// Returns the member element with the identity.
    #[inline]
    #[must_use]
    pub fn get(&self, id: &T::Identity) -> Option<&T> {
        self.data.get(id)
    }

    /// Returns all elements in the order they were added.
    ///
    /// This is not the hierarchy order; use
    /// [`depth_first_traverse`][`Self::depth_first_traverse`] for that.
    #[must_use]
    pub fn elements(&self) -> Vec<&T> {
        self.elements_of(self.hierarchy.order())
    }

    /// Returns the roots, left to right.
    #[must_use]
    pub fn roots(&self) -> Vec<&T> {
        self.elements_of(self.hierarchy.roots())
    }

    /// Returns the children of the element, left to right.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ElementNotPresent`] if the element is not a member.
    pub fn children(&self, element: &T) -> Result<Vec<&T>> {
        let id = self.member_identity(element)?;
        let children = self
            .hierarchy
            .children(&id)
            .expect("[validity] membership has been checked");
        Ok(self.elements_of(children))
    }

    /// Returns the parent of the element, or `None` if it is a root.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ElementNotPresent`] if the element is not a member.
    pub fn parent(&self, element: &T) -> Result<Option<&T>> {
        let id = self.member_identity(element)?;
        Ok(self.hierarchy.parent(&id).map(|parent| self.element(parent)))
    }

    /// Returns a [proxy object][`Node`] to the member element.
    #[must_use]
    pub fn node(&self, element: &T) -> Option<Node<'_, T>> {
        self.node_by_identity(&element.identity()?)
    }

    /// Returns a [proxy object][`Node`] to the member with the identity.
    #[inline]
    #[must_use]
    pub fn node_by_identity(&self, id: &T::Identity) -> Option<Node<'_, T>> {
        Node::new(self, id)
    }

    /// Returns a depth-first traverser over every tree in the forest.
    ///
    /// Roots are visited left to right.
    #[inline]
    #[must_use]
    pub fn depth_first_traverse(&self) -> DepthFirstTraverse<'_, T> {
        DepthFirstTraverse::with_toplevels(self, self.hierarchy.roots())
    }

    /// Returns the pretty-printable proxy object to the forest.
    ///
    /// This provides a convenient way to get pretty-printable string of the
    /// forest. The output format is not guaranteed to be stable.
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'_, T> {
        DebugPrint::new(self)
    }

    /// Checks that the forest is well-formed.
    ///
    /// This always succeeds unless a non-atomic operation has failed midway.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Inconsistent`] describing the first violation
    /// found. Elements without bookkeeping and bookkeeping without elements
    /// are violations too.
    pub fn validate(&self) -> Result<()> {
        self.hierarchy.validate()?;
        if self.data.len() != self.hierarchy.len() {
            return Err(TreeError::inconsistent(
                "element count disagrees with the hierarchy",
            ));
        }
        match self
            .hierarchy
            .order()
            .iter()
            .find(|id| !self.data.contains_key(id))
        {
            Some(id) => Err(TreeError::inconsistent(format_args!(
                "no element for {:?}",
                id
            ))),
            None => Ok(()),
        }
    }

    /// Returns the hierarchy.
    #[inline]
    #[must_use]
    pub(crate) fn hierarchy(&self) -> &Hierarchy<T::Identity> {
        &self.hierarchy
    }

    /// Returns the element for the member identity.
    ///
    /// # Panics
    ///
    /// Panics if the identity is not a member.
    #[must_use]
    pub(crate) fn element(&self, id: &T::Identity) -> &T {
        self.data
            .get(id)
            .expect("[consistency] every member must have an element")
    }

    /// Returns the elements for the member identities.
    fn elements_of(&self, ids: &[T::Identity]) -> Vec<&T> {
        ids.iter().map(|id| self.element(id)).collect()
    }

    /// Returns the identity of the element if it is a member.
    fn member_identity(&self, element: &T) -> Result<T::Identity> {
        let id = element.identity().ok_or_else(TreeError::anonymous)?;
        if !self.hierarchy.contains(&id) {
            return Err(TreeError::not_present(&id));
        }
        Ok(id)
    }
}

impl<T: Identify + Clone> Tree<T> {
    /// Inserts the whole content of `other` at the destination.
    ///
    /// The roots of `other` are placed at `dest` as one contiguous run in
    /// their original order, and everything below them keeps its shape.
    /// `other` is left as is; its elements are cloned in as handles.
    ///
    /// This is all-or-nothing; see [`merge_with`][`Self::merge_with`].
    ///
    /// # Errors
    ///
    /// * [`TreeError::DuplicateElement`]
    ///     + In case any element of `other` is already a member.
    /// * [`TreeError::ElementNotPresent`]
    ///     + In case the anchor of `dest` is not a member.
    ///
    /// # Examples
    ///
    /// ```
    /// use idforest::{Identify, InsertAs, Tree};
    ///
    /// #[derive(Debug, Clone, PartialEq, Eq)]
    /// struct Item(u32);
    ///
    /// impl Identify for Item {
    ///     type Identity = u32;
    ///
    ///     fn identity(&self) -> Option<u32> {
    ///         Some(self.0)
    ///     }
    /// }
    ///
    /// let mut tree = Tree::from_roots([Item(0), Item(3)])?;
    /// let other = Tree::from_roots([Item(1), Item(2)])?;
    ///
    /// tree.merge(&other, InsertAs::NextSiblingOf(&Item(0)))?;
    /// assert_eq!(tree.roots(), [&Item(0), &Item(1), &Item(2), &Item(3)]);
    /// # Ok::<_, idforest::TreeError>(())
    /// ```
    #[inline]
    pub fn merge(&mut self, other: &Self, dest: InsertAs<&T>) -> Result<()> {
        self.merge_with(other, dest, Options::default())
    }

    /// Inserts the whole content of `other` at the destination with options.
    ///
    /// Preconditions are checked before anything is touched. With
    /// `options.atomic`, a failure after that point restores the tree to its
    /// state before the call. Without it, such a failure may leave the tree
    /// partially merged.
    ///
    /// # Errors
    ///
    /// Same as [`merge`][`Self::merge`], plus [`TreeError::Inconsistent`] if
    /// either tree turns out to be broken midway.
    pub fn merge_with(&mut self, other: &Self, dest: InsertAs<&T>, options: Options) -> Result<()> {
        if let Some(dup) = other
            .hierarchy
            .order()
            .iter()
            .find(|id| self.hierarchy.contains(id))
        {
            return Err(TreeError::duplicate(dup));
        }
        let dest = dest.try_map(|anchor| self.member_identity(anchor))?;

        self.transaction(options, |tree| tree.merge_unchecked(other, dest.as_ref()))?;
        debug!(
            merged = other.len(),
            total = self.len(),
            atomic = options.atomic,
            "merged tree"
        );
        Ok(())
    }

    /// Adds a single element at the destination.
    ///
    /// This is all-or-nothing; see [`add_with`][`Self::add_with`].
    ///
    /// # Errors
    ///
    /// * [`TreeError::InvalidElement`]
    ///     + In case the element does not have an identity.
    /// * [`TreeError::DuplicateElement`]
    ///     + In case the element is already a member.
    /// * [`TreeError::ElementNotPresent`]
    ///     + In case the anchor of `dest` is not a member.
    #[inline]
    pub fn add(&mut self, element: T, dest: InsertAs<&T>) -> Result<()> {
        self.add_with(element, dest, Options::default())
    }

    /// Adds a single element at the destination with options.
    ///
    /// Equivalent to merging a one-element tree.
    ///
    /// # Errors
    ///
    /// Same as [`add`][`Self::add`], plus [`TreeError::Inconsistent`] if the
    /// tree turns out to be broken midway.
    pub fn add_with(&mut self, element: T, dest: InsertAs<&T>, options: Options) -> Result<()> {
        let single = Self::from_roots([element])?;
        self.merge_with(&single, dest, options)
    }

    /// Detaches the subtree rooted at the element and returns it as a new tree.
    ///
    /// This is all-or-nothing; see [`prune_with`][`Self::prune_with`].
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ElementNotPresent`] if the element is not a member.
    ///
    /// # Examples
    ///
    /// ```
    /// use idforest::{Identify, InsertAs, Tree};
    ///
    /// #[derive(Debug, Clone, PartialEq, Eq)]
    /// struct Item(u32);
    ///
    /// impl Identify for Item {
    ///     type Identity = u32;
    ///
    ///     fn identity(&self) -> Option<u32> {
    ///         Some(self.0)
    ///     }
    /// }
    ///
    /// let mut tree = Tree::from_roots([Item(0)])?;
    /// tree.add(Item(1), InsertAs::LastChildOf(&Item(0)))?;
    /// tree.add(Item(2), InsertAs::LastChildOf(&Item(1)))?;
    ///
    /// let pruned = tree.prune(&Item(1))?;
    /// assert_eq!(tree.elements(), [&Item(0)]);
    /// assert_eq!(pruned.roots(), [&Item(1)]);
    /// assert_eq!(pruned.children(&Item(1))?, [&Item(2)]);
    /// # Ok::<_, idforest::TreeError>(())
    /// ```
    #[inline]
    pub fn prune(&mut self, element: &T) -> Result<Self> {
        self.prune_with(element, Options::default())
    }

    /// Detaches the subtree rooted at the element with options.
    ///
    /// With `options.atomic`, a failure during removal restores the tree to
    /// its state before the call. Without it, such a failure may leave the
    /// subtree partially removed.
    ///
    /// # Errors
    ///
    /// Same as [`prune`][`Self::prune`], plus [`TreeError::Inconsistent`] if
    /// the tree turns out to be broken midway.
    pub fn prune_with(&mut self, element: &T, options: Options) -> Result<Self> {
        let id = self.member_identity(element)?;

        let pruned = self.transaction(options, |tree| tree.prune_unchecked(&id))?;
        debug!(
            pruned = pruned.len(),
            remaining = self.len(),
            atomic = options.atomic,
            "pruned subtree"
        );
        Ok(pruned)
    }

    /// Registers every member of `other` and links its roots at `dest`.
    ///
    /// Fails after the fact if `other` was not a well-formed forest, since
    /// members it cannot reach from its roots are not reachable here either.
    fn merge_unchecked(&mut self, other: &Self, dest: InsertAs<&T::Identity>) -> Result<()> {
        for id in other.hierarchy.order() {
            let element = other.data.get(id).ok_or_else(|| {
                TreeError::inconsistent(format_args!("merged tree has no element for {:?}", id))
            })?;
            let children = other.hierarchy.children(id).ok_or_else(|| {
                TreeError::inconsistent(format_args!(
                    "merged tree has no children entry for {:?}",
                    id
                ))
            })?;
            self.hierarchy.register(
                id.clone(),
                other.hierarchy.parent(id).cloned(),
                children.to_vec(),
            );
            self.data.insert(id.clone(), element.clone());
        }

        self.hierarchy.splice(other.hierarchy.roots(), dest)?;
        other.hierarchy.validate()
    }

    /// Unlinks the member and moves its subtree into a new tree.
    fn prune_unchecked(&mut self, id: &T::Identity) -> Result<Self> {
        self.hierarchy.unlink(id)?;

        let mut pruned = Self::new();
        let mut forgotten = HashSet::new();
        // Preorder, so the new tree registers members top-down.
        let mut pending = vec![(id.clone(), None)];
        while let Some((current, parent)) = pending.pop() {
            let children = self.hierarchy.forget(&current)?;
            let element = self.data.remove(&current).ok_or_else(|| {
                TreeError::inconsistent(format_args!("no element for {:?}", current))
            })?;
            pending.extend(
                children
                    .iter()
                    .rev()
                    .map(|child| (child.clone(), Some(current.clone()))),
            );
            pruned
                .hierarchy
                .register(current.clone(), parent, children);
            pruned.data.insert(current.clone(), element);
            forgotten.insert(current);
        }
        self.hierarchy.retain(&forgotten);

        pruned
            .hierarchy
            .splice(std::slice::from_ref(id), InsertAs::LastRoot)?;
        Ok(pruned)
    }

    /// Runs the mutation, rolling back on failure if the options say so.
    fn transaction<R, F>(&mut self, options: Options, f: F) -> Result<R>
    where
        F: FnOnce(&mut Self) -> Result<R>,
    {
        if !options.atomic {
            return f(self);
        }

        let snapshot = self.backup();
        match f(self) {
            Ok(v) => Ok(v),
            Err(e) => {
                warn!(error = %e, "rolling back failed tree mutation");
                self.restore(snapshot);
                Err(e)
            }
        }
    }

    /// Takes a snapshot of the whole structure.
    ///
    /// Collections are copied; elements are cloned as handles.
    fn backup(&self) -> Snapshot<T> {
        trace!(elements = self.len(), "taking tree snapshot");
        Snapshot {
            hierarchy: self.hierarchy.clone(),
            data: self.data.clone(),
        }
    }

    /// Replaces the whole structure with the snapshot.
    fn restore(&mut self, snapshot: Snapshot<T>) {
        self.hierarchy = snapshot.hierarchy;
        self.data = snapshot.data;
    }
}

impl<T: Identify> Default for Tree<T> {
    fn default() -> Self {
        Self {
            hierarchy: Default::default(),
            data: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(&'static str);

    impl Identify for Item {
        type Identity = &'static str;

        fn identity(&self) -> Option<Self::Identity> {
            Some(self.0)
        }
    }

    /// Returns the sample tree.
    ///
    /// ```text
    /// a
    /// |-- b
    /// |   |-- c
    /// |   `-- d
    /// `-- e
    /// f
    /// ```
    fn sample() -> Tree<Item> {
        let mut tree =
            Tree::from_roots([Item("a"), Item("f")]).expect("should never fail: distinct roots");
        for (name, parent) in [("b", "a"), ("c", "b"), ("d", "b"), ("e", "a")] {
            tree.add(Item(name), InsertAs::LastChildOf(&Item(parent)))
                .expect("should never fail: parent exists");
        }
        tree
    }

    #[test]
    fn sample_is_valid() {
        let tree = sample();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn merge_rolls_back_broken_other() {
        let mut tree = sample();
        let before = tree.clone();

        let mut other =
            Tree::from_roots([Item("x"), Item("y")]).expect("should never fail: distinct roots");
        // `y` loses its element, so the merge fails after `x` is registered.
        other.data.remove("y");

        let result = tree.merge(&other, InsertAs::LastChildOf(&Item("e")));
        assert!(matches!(result, Err(TreeError::Inconsistent(_))));
        assert_eq!(tree.hierarchy, before.hierarchy);
        assert_eq!(tree.data, before.data);
        assert!(!tree.contains(&Item("x")));
    }

    #[test]
    fn merge_rolls_back_unreachable_member_of_other() {
        let mut tree = sample();
        let before = tree.clone();

        let mut other =
            Tree::from_roots([Item("x"), Item("y")]).expect("should never fail: distinct roots");
        // `y` keeps its element and bookkeeping but is linked nowhere.
        other.hierarchy.unlink(&"y").expect("y is a root");

        let result = tree.merge(&other, InsertAs::LastChildOf(&Item("a")));
        assert!(matches!(result, Err(TreeError::Inconsistent(_))));
        assert_eq!(tree.hierarchy, before.hierarchy);
        assert_eq!(tree.data, before.data);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn merge_rolls_back_dangling_child_of_other() {
        let mut tree = sample();
        let before = tree.clone();

        // `x` lists a child that was never registered.
        let mut other = Tree::new();
        other.hierarchy.register("x", None, vec!["ghost"]);
        other.data.insert("x", Item("x"));
        other
            .hierarchy
            .splice(&["x"], InsertAs::LastRoot)
            .expect("root list always exists");

        let result = tree.merge(&other, InsertAs::LastRoot);
        assert!(matches!(result, Err(TreeError::Inconsistent(_))));
        assert_eq!(tree.hierarchy, before.hierarchy);
        assert!(!tree.contains(&Item("x")));
    }

    #[test]
    fn duplicate_is_reported_before_unknown_anchor() {
        let mut tree = sample();
        assert_eq!(
            tree.add(Item("c"), InsertAs::NextSiblingOf(&Item("nope"))),
            Err(TreeError::duplicate(&"c"))
        );
    }

    #[test]
    fn prune_rolls_back_broken_subtree() {
        let mut tree = sample();
        tree.data.remove("d");
        let before = tree.clone();

        let result = tree.prune(&Item("b"));
        assert!(matches!(result, Err(TreeError::Inconsistent(_))));
        assert_eq!(tree.hierarchy, before.hierarchy);
        assert_eq!(tree.data, before.data);
        assert_eq!(
            tree.children(&Item("a")),
            Ok(vec![&Item("b"), &Item("e")])
        );
    }

    #[test]
    fn non_atomic_prune_leaves_partial_state() {
        let mut tree = sample();
        tree.data.remove("d");

        let result = tree.prune_with(&Item("b"), Options::non_atomic());
        assert!(matches!(result, Err(TreeError::Inconsistent(_))));
        // `b` and `c` are already gone while `d` is left behind.
        assert_eq!(tree.children(&Item("a")), Ok(vec![&Item("e")]));
        assert!(tree.validate().is_err());
    }

    #[test]
    fn non_atomic_merge_leaves_partial_state() {
        let mut tree = sample();
        let mut other =
            Tree::from_roots([Item("x"), Item("y")]).expect("should never fail: distinct roots");
        other.data.remove("y");

        let result = tree.merge_with(&other, InsertAs::LastRoot, Options::non_atomic());
        assert!(matches!(result, Err(TreeError::Inconsistent(_))));
        // `x` is registered but never linked.
        assert!(tree.contains(&Item("x")));
        assert!(tree.validate().is_err());
    }

    #[test]
    fn validation_failures_do_not_snapshot_or_mutate() {
        let mut tree = sample();
        let before = tree.clone();

        let dup = Tree::from_roots([Item("z"), Item("c")]).expect("distinct roots");
        assert_eq!(
            tree.merge_with(&dup, InsertAs::LastRoot, Options::non_atomic()),
            Err(TreeError::duplicate(&"c"))
        );
        assert_eq!(
            tree.add_with(
                Item("z"),
                InsertAs::PreviousSiblingOf(&Item("nope")),
                Options::non_atomic()
            ),
            Err(TreeError::not_present(&"nope"))
        );
        assert_eq!(tree.hierarchy, before.hierarchy);
    }

    #[test]
    fn backup_and_restore() {
        let mut tree = sample();
        let snapshot = tree.backup();
        let _ = tree.prune(&Item("a")).expect("a is a member");
        assert_eq!(tree.roots(), [&Item("f")]);

        tree.restore(snapshot);
        assert_eq!(tree.roots(), [&Item("a"), &Item("f")]);
        assert_eq!(tree.validate(), Ok(()));
    }
}
