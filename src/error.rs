//! Error types for tree operations.

use core::fmt;

use thiserror::Error;

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur in tree operations.
///
/// Identities are carried in their `Debug` form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An element without identity was supplied.
    #[error("element at index {index} does not have an identity")]
    InvalidElement {
        /// Position of the element in the supplied sequence.
        index: usize,
    },

    /// A referenced element is not a member of the tree.
    #[error("element is not present in the tree: {0}")]
    ElementNotPresent(String),

    /// An element with the same identity is already a member of the tree.
    #[error("element is already present in the tree: {0}")]
    DuplicateElement(String),

    /// The hierarchy was found broken in the middle of an operation.
    #[error("inconsistent hierarchy: {0}")]
    Inconsistent(String),
}

impl TreeError {
    /// Creates [`TreeError::ElementNotPresent`] for the identity.
    pub(crate) fn not_present(id: &impl fmt::Debug) -> Self {
        Self::ElementNotPresent(format!("{:?}", id))
    }

    /// Creates [`TreeError::ElementNotPresent`] for an element without identity.
    pub(crate) fn anonymous() -> Self {
        Self::ElementNotPresent("<no identity>".to_owned())
    }

    /// Creates [`TreeError::DuplicateElement`] for the identity.
    pub(crate) fn duplicate(id: &impl fmt::Debug) -> Self {
        Self::DuplicateElement(format!("{:?}", id))
    }

    /// Creates [`TreeError::Inconsistent`] with the message.
    pub(crate) fn inconsistent(msg: impl fmt::Display) -> Self {
        Self::Inconsistent(msg.to_string())
    }
}
