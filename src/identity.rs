//! Element identity.

use core::fmt;
use core::hash::Hash;

use std::rc::Rc;
use std::sync::Arc;

/// Capability of exposing a stable identity.
///
/// Two elements are the same node of a tree iff their identities compare
/// equal. The identity must not change while the element is in a tree.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use idforest::Identify;
///
/// struct Document {
///     key: Option<u64>,
///     title: String,
/// }
///
/// impl Identify for Document {
///     type Identity = u64;
///
///     fn identity(&self) -> Option<u64> {
///         self.key
///     }
/// }
///
/// let doc = Rc::new(Document { key: Some(7), title: "notes".into() });
/// assert_eq!(doc.identity(), Some(7));
/// ```
pub trait Identify {
    /// Identity type.
    type Identity: Clone + Eq + Hash + fmt::Debug;

    /// Returns the identity of the element.
    ///
    /// Returns `None` if the element does not have an identity, in which case
    /// it cannot be a member of any tree.
    #[must_use]
    fn identity(&self) -> Option<Self::Identity>;
}

macro_rules! impl_identify_for_pointer {
    ($($ty:ty),*) => {
        $(
            impl<T: Identify + ?Sized> Identify for $ty {
                type Identity = T::Identity;

                #[inline]
                fn identity(&self) -> Option<Self::Identity> {
                    (**self).identity()
                }
            }
        )*
    };
}
impl_identify_for_pointer!(&T, Box<T>, Rc<T>, Arc<T>);
