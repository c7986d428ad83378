//! DOM operation errors

use thiserror::Error;

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Node ID does not refer to a node in this tree
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// Insertion would break the tree shape (cycle, document as child,
    /// child appended to a text node)
    #[error("hierarchy request error: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Node is not a child of the given parent
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
