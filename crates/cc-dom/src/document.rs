//! Document - High-level document API

use std::rc::Rc;

use crate::events::ListenerRegistry;
use crate::{DomResult, DomTree, Event, Listener, ListenerId, NodeId};

/// HTML Document
///
/// Owns the node arena and every event listener registered on its nodes.
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    listeners: ListenerRegistry,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an `html/head/body` skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached elements under the document or a fresh element
        // cannot fail the hierarchy checks
        let linked = [
            tree.append_child(tree.root(), html),
            tree.append_child(html, head),
            tree.append_child(html, body),
        ];
        debug_assert!(linked.iter().all(Result::is_ok), "skeleton failed to link");

        Self {
            tree,
            listeners: ListenerRegistry::default(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create a document with an empty tree (document node only)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            listeners: ListenerRegistry::default(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Find an attached element by its `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target_id: &str) -> Option<NodeId> {
        for (node_id, _) in self.tree.children(start) {
            if self.tree.get_attribute(node_id, "id") == Some(target_id) {
                return Some(node_id);
            }
            if let Some(found) = self.find_element_with_id(node_id, target_id) {
                return Some(found);
            }
        }
        None
    }

    /// First attached element carrying `class` as one of its classes
    pub fn query_class(&self, class: &str) -> Option<NodeId> {
        self.find_with_class(self.tree.root(), class)
    }

    fn find_with_class(&self, start: NodeId, class: &str) -> Option<NodeId> {
        for (node_id, _) in self.tree.children(start) {
            let has_class = self
                .tree
                .get_attribute(node_id, "class")
                .is_some_and(|c| c.split_whitespace().any(|token| token == class));
            if has_class {
                return Some(node_id);
            }
            if let Some(found) = self.find_with_class(node_id, class) {
                return Some(found);
            }
        }
        None
    }

    /// Detach every child of `parent` and drop the listeners registered
    /// anywhere in the detached subtrees
    pub fn clear_children(&mut self, parent: NodeId) -> DomResult<()> {
        for removed in self.tree.clear_children(parent)? {
            self.listeners.clear_node(removed);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener; it fires for every future matching event
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: Listener,
    ) -> DomResult<ListenerId> {
        if !self.tree.contains(node) {
            return Err(crate::DomError::NotFound(node));
        }
        Ok(self.listeners.add(node, event_type, listener))
    }

    /// Remove a previously registered listener
    pub fn remove_event_listener(&mut self, node: NodeId, event_type: &str, id: ListenerId) -> bool {
        self.listeners.remove(node, event_type, id)
    }

    /// Number of listeners for an event type on a node
    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Dispatch an event at `target`.
    ///
    /// Listeners on the target run first, then (for bubbling events) on
    /// each ancestor. On every node they run in registration order.
    /// Returns the event so callers can inspect `is_default_prevented`.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> DomResult<Event> {
        if !self.tree.contains(target) {
            return Err(crate::DomError::NotFound(target));
        }
        event.target = target;

        let mut path = vec![target];
        if event.bubbles {
            let mut current = target;
            while let Some(parent) = self.tree.parent(current) {
                path.push(parent);
                current = parent;
            }
        }
        tracing::debug!(event = %event.event_type, ?target, depth = path.len(), "dispatch event");

        for node in path {
            event.current_target = node;
            for listener in self.listeners.snapshot(node, &event.event_type) {
                listener(self, &mut event);
                if event.is_immediate_propagation_stopped() {
                    break;
                }
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target = NodeId::NONE;
        Ok(event)
    }

    /// Shorthand for dispatching a `click`
    pub fn click(&mut self, target: NodeId) -> DomResult<Event> {
        self.dispatch_event(target, Event::new("click"))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a closure as a [`Listener`]
pub fn listener(f: impl Fn(&mut Document, &mut Event) + 'static) -> Listener {
    Rc::new(f)
}
