//! DOM Events
//!
//! Native events and the per-node listener registry behind
//! `addEventListener`.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Event listener callback. Receives the document so handlers can mutate
/// the page they were fired from.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A native event travelling through the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event name (`click`, `change`, ...)
    pub event_type: String,
    /// Node the event was dispatched at
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    /// Bubbling, cancelable event (the shape of a user `click`)
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Event that only reaches the target
    pub fn non_bubbling(event_type: impl Into<String>) -> Self {
        Self {
            bubbles: false,
            ..Self::new(event_type)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation to ancestors after the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip the remaining listeners on this node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }
}

struct Registered {
    id: ListenerId,
    callback: Listener,
}

/// Listener storage: node -> event type -> listeners in registration order
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: HashMap<NodeId, HashMap<String, Vec<Registered>>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, node: NodeId, event_type: &str, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.listeners
            .entry(node)
            .or_default()
            .entry(event_type.to_string())
            .or_default()
            .push(Registered { id, callback });
        id
    }

    pub(crate) fn remove(&mut self, node: NodeId, event_type: &str, id: ListenerId) -> bool {
        let Some(by_type) = self.listeners.get_mut(&node) else {
            return false;
        };
        let Some(list) = by_type.get_mut(event_type) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| r.id != id);
        before != list.len()
    }

    /// Snapshot of the callbacks, so they can run while the registry is
    /// mutated by the callbacks themselves
    pub(crate) fn snapshot(&self, node: NodeId, event_type: &str) -> Vec<Listener> {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(event_type))
            .map(|list| list.iter().map(|r| Rc::clone(&r.callback)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners
            .get(&node)
            .and_then(|by_type| by_type.get(event_type))
            .map_or(0, Vec::len)
    }

    pub(crate) fn clear_node(&mut self, node: NodeId) {
        self.listeners.remove(&node);
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("nodes", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
