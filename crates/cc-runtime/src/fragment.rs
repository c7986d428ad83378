//! Fragment component: renders children without a wrapper element

use std::rc::Rc;

use cc_dom::{Document, DomResult};

use crate::element::append_children;
use crate::{Child, Component, Props};

/// Collect `props.children` into a fresh document fragment. Appending the
/// result moves the children into the parent and leaves the fragment
/// empty.
pub fn fragment(doc: &mut Document, mut props: Props) -> DomResult<Child> {
    let frag = doc.tree.create_fragment();
    append_children(doc, frag, props.take_children())?;
    Ok(Child::Node(frag))
}

/// The fragment as a [`Component`] tag, for `create_element(doc, Fragment(), ..)`
#[allow(non_snake_case)]
pub fn Fragment() -> Component {
    Rc::new(fragment)
}
