//! Ordered forest of externally identified elements.
//!
//! A [`Tree`] keeps its own parent/children bookkeeping keyed by element
//! identity, so elements stay opaque and are never required to hold links.
//! Subtrees can be merged in at an arbitrary position and pruned out as
//! independent trees; both operations are all-or-nothing by default.
//!
//! # Examples
//!
//! ```
//! use idforest::{Identify, InsertAs, Tree};
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! struct Item(&'static str);
//!
//! impl Identify for Item {
//!     type Identity = &'static str;
//!
//!     fn identity(&self) -> Option<Self::Identity> {
//!         Some(self.0)
//!     }
//! }
//!
//! let (a, b, c) = (Item("a"), Item("b"), Item("c"));
//! let mut tree = Tree::from_roots([a.clone(), b.clone()])?;
//! tree.add(c.clone(), InsertAs::LastChildOf(&b))?;
//! assert_eq!(tree.children(&b)?, [&c]);
//!
//! let pruned = tree.prune(&b)?;
//! assert_eq!(tree.roots(), [&a]);
//! assert_eq!(pruned.roots(), [&b]);
//! # Ok::<_, idforest::TreeError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
// `clippy::missing_docs_in_private_items` implies `missing_docs`.
#![warn(clippy::missing_docs_in_private_items)]
#![warn(clippy::must_use_candidate)]

mod anchor;
mod error;
mod hierarchy;
mod identity;
mod options;
pub mod tree;

pub use self::anchor::InsertAs;
pub use self::error::{Result, TreeError};
pub use self::identity::Identify;
pub use self::options::Options;
pub use self::tree::{DftEvent, Node, Tree};
