//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent violations of the tree structure or the build process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found in tree: {0:?}")]
    NodeNotFound(NodeId),

    #[error("node '{child}' is not a child of '{parent}'")]
    ChildNotFound { parent: String, child: String },

    #[error("node '{0}' already has a parent")]
    AlreadyAttached(String),

    #[error("cycle detected: '{child}' is an ancestor of '{parent}'")]
    CycleDetected { parent: String, child: String },

    #[error("pre-order traversal exhausted")]
    Exhausted,

    #[error("tree builder is terminated, no state to handle node '{0}'")]
    IllegalState(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
