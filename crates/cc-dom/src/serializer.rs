//! HTML Serialization (innerHTML/outerHTML)

use crate::{DomTree, NodeData, NodeId};

/// Void elements (no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// HTML serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output);
        output
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document | NodeData::Fragment => {
                self.serialize_children(tree, node_id, output);
            }
            NodeData::Element(elem) => {
                let tag = tree.resolve(elem.name.local);

                output.push('<');
                output.push_str(tag);
                for attr in &elem.attrs {
                    output.push(' ');
                    output.push_str(tree.resolve(attr.name));
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
                output.push('>');

                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }

                self.serialize_children(tree, node_id, output);
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => escape_text(text, output),
        }
    }

    fn serialize_children(&self, tree: &DomTree, node_id: NodeId, output: &mut String) {
        for (child, _) in tree.children(node_id) {
            self.serialize_node(tree, child, output);
        }
    }
}

fn escape_text(text: &str, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(ch),
        }
    }
}

fn escape_attribute(value: &str, output: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Namespace;

    #[test]
    fn test_serialize_nested() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("a < b & c");
        tree.set_attribute(div, "title", "say \"hi\"").unwrap();
        tree.append_child(div, text).unwrap();

        let html = HtmlSerializer::new().serialize_outer(&tree, div);
        assert_eq!(html, "<div title=\"say &quot;hi&quot;\">a &lt; b &amp; c</div>");
    }

    #[test]
    fn test_void_element() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        tree.set_attribute(input, "type", "checkbox").unwrap();
        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, input),
            "<input type=\"checkbox\">"
        );
    }

    #[test]
    fn test_svg_keeps_case() {
        let mut tree = DomTree::new();
        let svg = tree.create_element_ns(Namespace::Svg, "svg");
        tree.set_attribute_ns(svg, None, "viewBox", "0 0 24 24").unwrap();
        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, svg),
            "<svg viewBox=\"0 0 24 24\"></svg>"
        );
    }
}
