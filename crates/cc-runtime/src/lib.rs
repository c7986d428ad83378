//! cc-runtime - Element construction without a virtual DOM
//!
//! Turns declarative element descriptions (a [`Tag`], a [`Props`] bag and
//! a list of [`Child`] values) into live nodes of a [`cc_dom::Document`].
//! Nothing is retained between calls: every [`Root::render`] clears the
//! mount point and appends a freshly built subtree.
//!
//! ```
//! use cc_dom::Document;
//! use cc_runtime::{create_element, Child, Props};
//!
//! let mut doc = Document::new();
//! let node = create_element(
//!     &mut doc,
//!     "div",
//!     Props::new().with("className", "x"),
//!     vec!["hello".into(), Child::Empty, false.into(), "world".into()],
//! )
//! .unwrap();
//! let id = node.as_node().unwrap();
//! assert_eq!(doc.tree.text_content(id), "helloworld");
//! ```

mod child;
mod class_names;
mod element;
mod error;
mod fragment;
mod props;
mod root;

pub use child::Child;
pub use class_names::{class_names, ClassToken};
pub use element::{component, create_element, Component, Tag, SVG_TAGS};
pub use error::RenderError;
pub use fragment::{fragment, Fragment};
pub use props::{PropKind, PropValue, Props, SVG_PRESENTATION_ATTRS};
pub use root::{create_root, Root};
