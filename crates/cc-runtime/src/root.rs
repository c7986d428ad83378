//! Render root: full-replace mounting

use cc_dom::{Document, DomError, NodeId};

use crate::element::append_children;
use crate::{Child, RenderError};

/// Handle bound to a mount point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    target: Option<NodeId>,
}

/// Bind a mount point. A missing target is only reported at render time.
pub fn create_root(target: Option<NodeId>) -> Root {
    Root { target }
}

impl Root {
    /// Mount point this root renders into
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Replace everything under the mount point with `node`.
    ///
    /// Previous content is detached together with its event listeners;
    /// nothing is diffed or reused. The mount point must still be attached
    /// to the document. A `node` containing the mount point is rejected and
    /// leaves the tree untouched.
    pub fn render(&self, doc: &mut Document, node: impl Into<Child>) -> Result<(), RenderError> {
        let target = self
            .target
            .filter(|&id| doc.tree.is_inclusive_ancestor(doc.tree.root(), id))
            .ok_or(RenderError::MountTargetMissing)?;

        let node = node.into();
        // Reject a cycle before the old content is cleared
        if let Child::Node(child) = node {
            if doc.tree.is_inclusive_ancestor(child, target) {
                return Err(DomError::HierarchyRequest { parent: target, child }.into());
            }
        }

        doc.clear_children(target)?;
        append_children(doc, target, vec![node])?;
        tracing::debug!(?target, "rendered root");
        Ok(())
    }
}
