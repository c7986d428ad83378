//! Banner building blocks
//!
//! Each component is a plain `fn(&mut Document, Props)` used as a tag via
//! [`cc_runtime::component`].

use cc_dom::{Document, DomResult};
use cc_runtime::{cn, component, create_element, Child, PropValue, Props};

use crate::icons::{check_icon, x_icon};

/// Keys a component consumes itself instead of forwarding to its element
const OWN_KEYS: &[&str] = &["variant", "className", "label", "title", "description"];

fn forward(props: &Props) -> Props {
    let mut out = Props::new();
    for (key, value) in props.iter().filter(|(key, _)| !OWN_KEYS.contains(key)) {
        out.insert(key, value.clone());
    }
    out
}

/// `<button>` with a `primary`/`secondary` variant
pub fn button(doc: &mut Document, mut props: Props) -> DomResult<Child> {
    let variant = match props.get_str("variant") {
        Some("secondary") => "btn btn-secondary text-accent-dark",
        _ => "btn btn-primary text-white",
    };
    let class = cn!("cb-button", variant, props.get_str("className"));
    let children = props.take_children();

    create_element(doc, "button", forward(&props).with("className", class), children)
}

/// Labelled checkbox. `id`, `checked`, `disabled` and `onChange` land on
/// the `<input>`.
pub fn checkbox(doc: &mut Document, props: Props) -> DomResult<Child> {
    let icon = create_element(
        doc,
        component(check_icon),
        Props::new().with("className", "w-0 h-4 transition-all duration-200"),
        vec![],
    )?;
    let mark = create_element(
        doc,
        "span",
        Props::new().with(
            "className",
            cn!(
                "w-4 h-4 inline-flex items-center justify-center rounded-sm border border-foreground",
                "transition-all duration-200",
            ),
        ),
        vec![icon],
    )?;

    let input = create_element(
        doc,
        "input",
        forward(&props)
            .with("type", "checkbox")
            .with("className", "checkbox hidden"),
        vec![],
    )?;

    let label = props.get_str("label").unwrap_or_default().to_string();
    create_element(
        doc,
        "label",
        Props::new().with(
            "className",
            cn!(
                "flex items-center gap-2 text-sm uppercase font-medium",
                "has-checked:text-accent",
                "has-checked:[&>span]:bg-accent",
                "has-checked:[&>span]:border-accent",
                "has-checked:[&_svg]:w-4",
                "transition-all duration-200 cursor-pointer",
            ),
        ),
        vec![mark, label.into(), input],
    )
}

/// Dialog shell: title, close button, description and body.
///
/// `onClose` is attached to the close button; `description` may be text or
/// a constructed node.
pub fn popup(doc: &mut Document, mut props: Props) -> DomResult<Child> {
    let title = props.get_str("title").unwrap_or_default().to_string();
    let description = match props.get("description") {
        Some(PropValue::Child(child)) => child.clone(),
        Some(PropValue::Str(text)) => Child::Text(text.clone()),
        _ => Child::Empty,
    };
    let mut close_props = Props::new().with(
        "className",
        cn!(
            "flex-shrink-0 text-foreground cursor-pointer",
            "rounded-sm w-6 h-6 inline-flex items-center justify-center",
            "ring-2 ring-transparent hover:ring-accent",
            "transition-all duration-200",
        ),
    );
    close_props.insert("aria-label", "Close");
    if let Some(on_close) = props.get_listener("onClose") {
        close_props.insert("onClick", PropValue::Listener(on_close.clone()));
    }
    let children = props.take_children();

    let heading = create_element(doc, "h2", Props::new().with("className", "text-xl font-medium"), vec![title.into()])?;
    let x = create_element(doc, component(x_icon), Props::new().with("className", "w-6 h-6"), vec![])?;
    let close = create_element(doc, "button", close_props, vec![x])?;
    let header = create_element(doc, "div", Props::new().with("className", "flex justify-between"), vec![heading, close])?;

    let description = create_element(
        doc,
        "div",
        Props::new().with("className", "mt-4 text-sm text-balance"),
        vec![description],
    )?;
    let body = create_element(doc, "div", Props::new().with("className", "mt-4"), children)?;

    let panel = create_element(
        doc,
        "div",
        Props::new().with(
            "className",
            cn!(
                "fixed bottom-3 left-3 p-4 max-w-xs w-full",
                "bg-background text-foreground rounded-lg shadow-lg",
                "will-change-transform transition-discrete",
                "data-[open=false]:translate-y-full data-[open=true]:translate-y-0",
                "transition-[transform] duration-200",
            ),
        ),
        vec![header, description, body],
    )?;
    let frame = create_element(doc, "div", Props::new().with("className", "w-full h-full"), vec![panel])?;

    create_element(
        doc,
        "div",
        Props::new().with("data-open", "false").with(
            "className",
            cn!(
                "cb-dialog fixed w-full h-screen top-0 left-0 bg-background/50",
                "will-change-opacity transition-discrete",
                "data-[open=false]:hidden data-[open=true]:block",
                "data-[open=false]:opacity-0 data-[open=true]:opacity-100",
                "transition-[display,opacity] duration-200",
            ),
        ),
        vec![frame],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_dom::HtmlSerializer;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_button_variants() {
        let mut doc = Document::new();
        let out = create_element(
            &mut doc,
            component(button),
            Props::new()
                .with("variant", "secondary")
                .with("className", "flex-1")
                .with("aria-label", "Decline all"),
            vec!["Decline all".into()],
        )
        .unwrap();

        assert_eq!(
            HtmlSerializer::new().serialize_outer(&doc.tree, out.as_node().unwrap()),
            "<button aria-label=\"Decline all\" class=\"cb-button btn btn-secondary text-accent-dark flex-1\">Decline all</button>"
        );
    }

    #[test]
    fn test_checkbox_input_attributes() {
        let mut doc = Document::new();
        let out = create_element(
            &mut doc,
            component(checkbox),
            Props::new()
                .with("id", "performance")
                .with("label", "Performance")
                .with("checked", false),
            vec![],
        )
        .unwrap();
        let label = out.as_node().unwrap();
        let input = doc.tree.child_ids(label)[2];

        assert_eq!(doc.tree.tag_name(input), Some("input"));
        assert_eq!(doc.tree.get_attribute(input, "id"), Some("performance"));
        assert_eq!(doc.tree.get_attribute(input, "checked"), Some("false"));
        assert_eq!(doc.tree.get_attribute(input, "type"), Some("checkbox"));
        assert_eq!(doc.tree.text_content(label), "Performance");
    }

    #[test]
    fn test_popup_close_button() {
        let mut doc = Document::new();
        let closed = Rc::new(Cell::new(false));
        let c = Rc::clone(&closed);

        let out = create_element(
            &mut doc,
            component(popup),
            Props::new()
                .with("title", "Cookies")
                .with("description", "We use cookies.")
                .on("onClose", move |_, _| c.set(true)),
            vec!["body".into()],
        )
        .unwrap();
        let dialog = out.as_node().unwrap();
        let body = doc.body();
        doc.tree.append_child(body, dialog).unwrap();
        assert_eq!(doc.tree.get_attribute(dialog, "data-open"), Some("false"));
        assert!(doc.tree.text_content(dialog).contains("We use cookies."));

        let close = doc.query_class("flex-shrink-0").unwrap();
        doc.click(close).unwrap();
        assert!(closed.get());
    }
}
