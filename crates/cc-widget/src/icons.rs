//! Inline SVG icons

use cc_dom::{Document, DomResult};
use cc_runtime::{create_element, Child, Props};

fn icon(doc: &mut Document, props: &Props, paths: &[&str]) -> DomResult<Child> {
    let mut children = Vec::with_capacity(paths.len());
    for d in paths {
        children.push(create_element(doc, "path", Props::new().with("d", *d), vec![])?);
    }

    let mut svg = Props::new()
        .with("xmlns", "http://www.w3.org/2000/svg")
        .with("viewBox", "0 0 24 24")
        .with("fill", "none")
        .with("stroke", "currentColor")
        .with("stroke-width", 2);
    if let Some(class) = props.get_str("className") {
        svg.insert("className", class);
    }
    create_element(doc, "svg", svg, children)
}

pub fn check_icon(doc: &mut Document, props: Props) -> DomResult<Child> {
    icon(doc, &props, &["M5 13l4 4L19 7"])
}

pub fn x_icon(doc: &mut Document, props: Props) -> DomResult<Child> {
    icon(doc, &props, &["M6 18L18 6", "M6 6l12 12"])
}

pub fn gear_icon(doc: &mut Document, props: Props) -> DomResult<Child> {
    icon(
        doc,
        &props,
        &[
            "M10.3 4.3c.4-1.8 3-1.8 3.4 0a1.7 1.7 0 0 0 2.6 1.1c1.5-.9 3.3.8 2.4 2.4a1.7 1.7 0 0 0 1 2.5c1.9.5 1.9 3.1 0 3.5a1.7 1.7 0 0 0-1 2.6c.9 1.5-.9 3.3-2.4 2.4a1.7 1.7 0 0 0-2.6 1c-.4 1.9-3 1.9-3.4 0a1.7 1.7 0 0 0-2.6-1c-1.5.9-3.3-.9-2.4-2.4a1.7 1.7 0 0 0-1-2.6c-1.9-.4-1.9-3 0-3.5a1.7 1.7 0 0 0 1-2.5c-.9-1.6.9-3.3 2.4-2.4a1.7 1.7 0 0 0 2.6-1.1z",
            "M9 12a3 3 0 1 0 6 0a3 3 0 1 0-6 0",
        ],
    )
}
