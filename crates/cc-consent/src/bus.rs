//! Event Bus
//!
//! Synchronous publish/subscribe between widget components. Delivery is
//! in subscription order on the publishing call; there is no queue and no
//! replay for late subscribers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::ConsentPreferences;

/// Event names shared by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentEvent {
    /// Payload: partial preference map to merge
    Updated,
    /// Payload: the all-granted map
    AllAccepted,
    /// Payload: the map with only required categories granted
    AllRejected,
}

impl ConsentEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "CONSENT_UPDATED",
            Self::AllAccepted => "CONSENT_ALL_ACCEPTED",
            Self::AllRejected => "CONSENT_ALL_REJECTED",
        }
    }
}

impl AsRef<str> for ConsentEvent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ConsentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data carried by a publish
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    None,
    Preferences(ConsentPreferences),
    Text(String),
}

impl Payload {
    pub fn as_preferences(&self) -> Option<&ConsentPreferences> {
        match self {
            Self::Preferences(p) => Some(p),
            _ => None,
        }
    }
}

impl From<ConsentPreferences> for Payload {
    fn from(p: ConsentPreferences) -> Self {
        Self::Preferences(p)
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Subscriber callback
pub type Callback = Rc<dyn Fn(&Payload)>;

type Registry = RefCell<HashMap<String, Vec<Callback>>>;

/// Handle to a shared subscriber registry. Clones publish to and subscribe
/// on the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    events: Rc<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `callback` to the subscribers of `event`
    pub fn subscribe(&self, event: impl AsRef<str>, callback: impl Fn(&Payload) + 'static) -> Unsubscribe {
        self.subscribe_shared(event, Rc::new(callback))
    }

    /// Subscribe an existing callback handle. Unsubscribing removes every
    /// registration of this same handle under `event`.
    pub fn subscribe_shared(&self, event: impl AsRef<str>, callback: Callback) -> Unsubscribe {
        let event = event.as_ref().to_string();
        self.events
            .borrow_mut()
            .entry(event.clone())
            .or_default()
            .push(Rc::clone(&callback));

        tracing::trace!(%event, "subscribed");
        Unsubscribe {
            events: Rc::downgrade(&self.events),
            event,
            callback,
        }
    }

    /// Call every current subscriber of `event` with `payload`.
    ///
    /// Subscribers run on a snapshot of the list, so they may subscribe or
    /// unsubscribe while being called; such changes apply from the next
    /// publish. A panicking subscriber aborts delivery to the rest.
    pub fn publish(&self, event: impl AsRef<str>, payload: impl Into<Payload>) {
        let event = event.as_ref();
        let snapshot: Vec<Callback> = match self.events.borrow().get(event) {
            Some(list) => list.clone(),
            None => return,
        };

        let payload = payload.into();
        tracing::debug!(event, subscribers = snapshot.len(), "publish");
        for callback in snapshot {
            callback(&payload);
        }
    }

    /// Number of callbacks registered for `event`
    pub fn subscriber_count(&self, event: impl AsRef<str>) -> usize {
        self.events
            .borrow()
            .get(event.as_ref())
            .map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.events.borrow().len())
            .finish()
    }
}

/// Returned by [`EventBus::subscribe`]. Dropping it keeps the subscription.
pub struct Unsubscribe {
    events: Weak<Registry>,
    event: String,
    callback: Callback,
}

impl Unsubscribe {
    /// Remove the callback from its event. A no-op once the bus is gone.
    pub fn unsubscribe(self) {
        let Some(events) = self.events.upgrade() else {
            return;
        };
        if let Some(list) = events.borrow_mut().get_mut(&self.event) {
            list.retain(|cb| !Rc::ptr_eq(cb, &self.callback));
        }
        tracing::trace!(event = %self.event, "unsubscribed");
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("event", &self.event).finish()
    }
}
