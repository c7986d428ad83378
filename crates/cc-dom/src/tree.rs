//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; detached subtrees stay in the arena until the
//! tree is dropped. Widget renders are small and infrequent, so the arena
//! only grows by one banner's worth of nodes per full-replace render.

use crate::{
    DomError, DomResult, InternedString, Namespace, Node, NodeData, NodeId, QualName,
    StringInterner,
};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Check that an ID refers to a node
    pub fn contains(&self, id: NodeId) -> bool {
        id.is_valid() && id.index() < self.nodes.len()
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Name interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    /// Create an HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns(Namespace::Html, tag)
    }

    /// Create an element in the given namespace
    pub fn create_element_ns(&mut self, ns: Namespace, tag: &str) -> NodeId {
        let local = self.interner.intern(tag);
        let id = self.push(Node::element(QualName::new(ns, local)));
        tracing::trace!(?id, tag, ?ns, "create element");
        id
    }

    /// Create a text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.push(Node::text(content.into()))
    }

    /// Create an empty document fragment
    pub fn create_fragment(&mut self) -> NodeId {
        self.push(Node::fragment())
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while let Some(n) = self.get(current) {
            if current == ancestor {
                return true;
            }
            current = n.parent;
        }
        false
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// An attached `child` is moved. Appending a fragment moves its
    /// children and leaves the fragment empty.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        let hierarchy = DomError::HierarchyRequest { parent, child };

        if !parent_node.can_have_children()
            || matches!(child_node.data, NodeData::Document)
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(hierarchy);
        }

        if child_node.is_fragment() {
            for moved in self.child_ids(child) {
                self.detach(moved);
                self.link_last(parent, moved);
            }
            return Ok(child);
        }

        self.detach(child);
        self.link_last(parent, child);
        tracing::trace!(?parent, ?child, "append child");
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Detach every child of `parent`, returning the detached subtrees'
    /// node IDs (children and all their descendants)
    pub fn clear_children(&mut self, parent: NodeId) -> DomResult<Vec<NodeId>> {
        self.node(parent)?;
        let mut removed = Vec::new();
        for child in self.child_ids(parent) {
            self.detach(child);
            self.collect_subtree(child, &mut removed);
        }
        tracing::trace!(?parent, removed = removed.len(), "clear children");
        Ok(removed)
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in self.child_ids(id) {
            self.collect_subtree(child, out);
        }
    }

    /// Unlink a node from its parent and siblings
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Link a detached node as last child
    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.get(parent).map_or(NodeId::NONE, |p| p.last_child);

        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
            c.prev_sibling = last;
            c.next_sibling = NodeId::NONE;
        }
        match self.get_mut(last) {
            Some(l) => l.next_sibling = child,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = child;
                }
            }
        }
        if let Some(p) = self.get_mut(parent) {
            p.last_child = child;
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Child IDs of a node, in order
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
            return;
        }
        for (child, _) in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Local tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name.local))
    }

    /// Namespace of an element
    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        self.get(id)?.as_element().map(|e| e.name.ns)
    }

    // ------------------------------------------------------------------
    // Attributes and style
    // ------------------------------------------------------------------

    /// `element.setAttribute(name, value)`. Names are lower-cased on HTML
    /// elements; SVG keeps them verbatim.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let ns = self.element_ns(id)?;
        let name = match ns {
            Namespace::Html => self.interner.intern(&name.to_ascii_lowercase()),
            Namespace::Svg => self.interner.intern(name),
        };
        self.set_interned_attr(id, name, None, value)
    }

    /// `element.setAttributeNS(ns, name, value)`. The name is kept verbatim.
    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        ns: Option<Namespace>,
        name: &str,
        value: &str,
    ) -> DomResult<()> {
        self.element_ns(id)?;
        let name = self.interner.intern(name);
        self.set_interned_attr(id, name, ns, value)
    }

    fn set_interned_attr(
        &mut self,
        id: NodeId,
        name: InternedString,
        ns: Option<Namespace>,
        value: &str,
    ) -> DomResult<()> {
        let elem = self.element_mut(id)?;
        elem.set_attr(name, ns, value.to_string());
        Ok(())
    }

    /// Get an attribute value by exact name
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Remove an attribute
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let Some(name) = self.interner.lookup(name) else {
            return Ok(None);
        };
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    /// `element.style[name] = value`; the `style` attribute follows
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let style_attr = self.interner.intern("style");
        let elem = self.element_mut(id)?;
        elem.style.set_property(name, value);

        if elem.style.is_empty() {
            elem.remove_attr(style_attr);
        } else {
            let css = elem.style.css_text();
            elem.set_attr(style_attr, None, css);
        }
        Ok(())
    }

    fn element_ns(&self, id: NodeId) -> DomResult<Namespace> {
        self.namespace(id).ok_or(DomError::NotFound(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut crate::ElementData> {
        self.node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotFound(id))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
