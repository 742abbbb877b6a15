//! Per-call options for mutating operations.

/// Options for [`Tree::merge_with`], [`Tree::add_with`], and
/// [`Tree::prune_with`].
///
/// [`Tree::merge_with`]: `crate::Tree::merge_with`
/// [`Tree::add_with`]: `crate::Tree::add_with`
/// [`Tree::prune_with`]: `crate::Tree::prune_with`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    /// Whether the operation is all-or-nothing.
    ///
    /// If `true`, the whole structure is snapshotted before mutation and
    /// restored when a step fails, so a failed call leaves the tree untouched.
    ///
    /// If `false`, no snapshot is taken. A failure in the middle of the
    /// operation may leave the tree partially mutated and inconsistent; such a
    /// tree should be discarded or checked with [`Tree::validate`].
    ///
    /// [`Tree::validate`]: `crate::Tree::validate`
    pub atomic: bool,
}

impl Options {
    /// Options for an all-or-nothing operation.
    #[inline]
    #[must_use]
    pub const fn atomic() -> Self {
        Self { atomic: true }
    }

    /// Options for an operation without snapshotting.
    #[inline]
    #[must_use]
    pub const fn non_atomic() -> Self {
        Self { atomic: false }
    }
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self::atomic()
    }
}
