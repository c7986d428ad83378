//! cc-dom - Document Object Model
//!
//! Arena-backed DOM tree the construction runtime renders into.
//! Elements carry a namespace (HTML or SVG), attributes, a live style
//! declaration and per-node event listeners owned by the [`Document`].

mod document;
mod error;
mod events;
mod interner;
mod node;
mod serializer;
mod style;
mod tree;

pub use document::{listener, Document};
pub use error::{DomError, DomResult};
pub use events::{Event, Listener, ListenerId};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Namespace, Node, NodeData, QualName};
pub use serializer::HtmlSerializer;
pub use style::StyleDeclaration;
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this ID refers to a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
