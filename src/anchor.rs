//! Anchors.

/// Target destination to merge or add nodes.
///
/// The anchor is the element the destination is relative to. When a whole
/// tree is merged, all of its roots are placed at the destination as one
/// contiguous run, keeping their relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// All variants but one have the common suffix "Of", but this is intended.
// Variants would be used as, for example, `InsertAs::LastChildOf(&some_node)`.
#[allow(clippy::enum_variant_names)]
pub enum InsertAs<E> {
    /// Immediately before the anchor, in the anchor's sibling list.
    ///
    /// If the anchor is a root, the root list is used.
    PreviousSiblingOf(E),
    /// Immediately after the anchor, in the anchor's sibling list.
    ///
    /// If the anchor is a root, the root list is used.
    NextSiblingOf(E),
    /// As the leading children of the anchor.
    FirstChildOf(E),
    /// As the trailing children of the anchor.
    LastChildOf(E),
    /// As the trailing roots of the forest.
    LastRoot,
}

impl<E> InsertAs<E> {
    /// Returns the anchor, if the destination has one.
    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Option<&E> {
        match self {
            Self::PreviousSiblingOf(v)
            | Self::NextSiblingOf(v)
            | Self::FirstChildOf(v)
            | Self::LastChildOf(v) => Some(v),
            Self::LastRoot => None,
        }
    }

    /// Converts from `&InsertAs<E>` to `InsertAs<&E>`.
    #[inline]
    #[must_use]
    pub fn as_ref(&self) -> InsertAs<&E> {
        match self {
            Self::PreviousSiblingOf(v) => InsertAs::PreviousSiblingOf(v),
            Self::NextSiblingOf(v) => InsertAs::NextSiblingOf(v),
            Self::FirstChildOf(v) => InsertAs::FirstChildOf(v),
            Self::LastChildOf(v) => InsertAs::LastChildOf(v),
            Self::LastRoot => InsertAs::LastRoot,
        }
    }

    /// Converts the anchor.
    ///
    /// # Examples
    ///
    /// ```
    /// use idforest::InsertAs;
    ///
    /// let dest = InsertAs::FirstChildOf("42").map(|s| s.len());
    /// assert_eq!(dest, InsertAs::FirstChildOf(2));
    /// ```
    pub fn map<F, U>(self, f: F) -> InsertAs<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::PreviousSiblingOf(v) => InsertAs::PreviousSiblingOf(f(v)),
            Self::NextSiblingOf(v) => InsertAs::NextSiblingOf(f(v)),
            Self::FirstChildOf(v) => InsertAs::FirstChildOf(f(v)),
            Self::LastChildOf(v) => InsertAs::LastChildOf(f(v)),
            Self::LastRoot => InsertAs::LastRoot,
        }
    }

    /// Converts the anchor with the given fallible function.
    pub(crate) fn try_map<F, U, Err>(self, f: F) -> Result<InsertAs<U>, Err>
    where
        F: FnOnce(E) -> Result<U, Err>,
    {
        Ok(match self {
            Self::PreviousSiblingOf(v) => InsertAs::PreviousSiblingOf(f(v)?),
            Self::NextSiblingOf(v) => InsertAs::NextSiblingOf(f(v)?),
            Self::FirstChildOf(v) => InsertAs::FirstChildOf(f(v)?),
            Self::LastChildOf(v) => InsertAs::LastChildOf(f(v)?),
            Self::LastRoot => InsertAs::LastRoot,
        })
    }
}

impl<E> Default for InsertAs<E> {
    #[inline]
    fn default() -> Self {
        Self::LastRoot
    }
}
