//! Element construction
//!
//! `create_element` is the runtime's single entry point: a native tag
//! becomes a fresh node with its props applied and children appended; a
//! component tag is simply called and its result returned untouched.

use std::fmt;
use std::rc::Rc;

use cc_dom::{Document, DomResult, Namespace, NodeId};

use crate::{Child, PropKind, Props};

/// Tags created in the SVG namespace
pub const SVG_TAGS: &[&str] = &[
    "svg", "circle", "ellipse", "g", "line", "path", "polygon", "polyline", "rect", "text",
    "use",
];

/// A component renders a property bag into a child value
pub type Component = Rc<dyn Fn(&mut Document, Props) -> DomResult<Child>>;

/// Wrap a function as a [`Component`]
pub fn component(f: impl Fn(&mut Document, Props) -> DomResult<Child> + 'static) -> Component {
    Rc::new(f)
}

/// What to construct
#[derive(Clone)]
pub enum Tag {
    /// Native element name (`div`, `path`, ...)
    Native(String),
    /// User component
    Component(Component),
}

impl Tag {
    /// Namespace a native tag is created in
    pub fn namespace_for(name: &str) -> Namespace {
        if SVG_TAGS.contains(&name) {
            Namespace::Svg
        } else {
            Namespace::Html
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(name) => f.debug_tuple("Native").field(name).finish(),
            Self::Component(_) => f.write_str("Component(..)"),
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::Native(name.to_string())
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::Native(name)
    }
}

impl From<Component> for Tag {
    fn from(c: Component) -> Self {
        Self::Component(c)
    }
}

/// Construct a node from a tag, a property bag and children.
///
/// Components receive `props` with `children` set to the given list, or
/// left unset when the list is empty. Native tags produce a new element
/// (SVG namespace for [`SVG_TAGS`]) and return [`Child::Node`].
pub fn create_element(
    doc: &mut Document,
    tag: impl Into<Tag>,
    mut props: Props,
    children: Vec<Child>,
) -> DomResult<Child> {
    let name = match tag.into() {
        Tag::Component(render) => {
            props.children = (!children.is_empty()).then_some(children);
            return render(doc, props);
        }
        Tag::Native(name) => name,
    };

    let ns = Tag::namespace_for(&name);
    let element = doc.tree.create_element_ns(ns, &name);

    for (key, value) in props.iter() {
        apply_prop(doc, element, ns, key, PropKind::classify(key, value, ns), value)?;
    }

    append_children(doc, element, children)?;
    Ok(Child::Node(element))
}

fn apply_prop(
    doc: &mut Document,
    element: NodeId,
    ns: Namespace,
    key: &str,
    kind: PropKind<'_>,
    value: &crate::PropValue,
) -> DomResult<()> {
    match kind {
        PropKind::ClassName(class) => doc.tree.set_attribute(element, "class", class),
        PropKind::EventListener(event) => {
            if let crate::PropValue::Listener(listener) = value {
                doc.add_event_listener(element, &event, Rc::clone(listener))?;
            }
            Ok(())
        }
        PropKind::StyleObject(decls) => {
            for (name, val) in decls {
                doc.tree.set_style_property(element, name, val)?;
            }
            Ok(())
        }
        PropKind::PresentationAttribute(val) => doc.tree.set_attribute_ns(element, None, key, &val),
        PropKind::Attribute(Some(val)) => doc.tree.set_attribute(element, key, &val),
        PropKind::Attribute(None) => {
            tracing::debug!(key, ?ns, "skipping prop without a string form");
            Ok(())
        }
    }
}

/// Append a child list to `parent`.
///
/// The list is flattened one level; a list found after flattening is
/// walked once more, keeping only nodes, strings and numbers. `Empty` and
/// `false` are skipped; other scalars become text nodes.
pub(crate) fn append_children(doc: &mut Document, parent: NodeId, children: Vec<Child>) -> DomResult<()> {
    let flat = children.into_iter().flat_map(|child| match child {
        Child::List(items) => items,
        other => vec![other],
    });

    for child in flat {
        match child {
            Child::Node(id) => {
                doc.tree.append_child(parent, id)?;
            }
            Child::List(nested) => {
                for item in nested {
                    match item {
                        Child::Node(id) => {
                            doc.tree.append_child(parent, id)?;
                        }
                        Child::Text(_) | Child::Number(_) => append_text(doc, parent, &item)?,
                        _ => {}
                    }
                }
            }
            ref skipped if skipped.is_skipped() => {}
            scalar => append_text(doc, parent, &scalar)?,
        }
    }
    Ok(())
}

fn append_text(doc: &mut Document, parent: NodeId, child: &Child) -> DomResult<()> {
    let text = doc.tree.create_text(child.to_text().unwrap_or_default());
    doc.tree.append_child(parent, text)?;
    Ok(())
}
