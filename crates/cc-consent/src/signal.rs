//! Tag signaling (consent mode) integration

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConsentPreferences;

/// Command name passed to the signaler
pub const CONSENT_COMMAND: &str = "consent";

/// Action name passed to the signaler
pub const UPDATE_ACTION: &str = "update";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentState {
    Granted,
    Denied,
}

impl From<bool> for ConsentState {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// The four storage signals plus `security_storage`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentModeParams {
    pub ad_storage: ConsentState,
    pub analytics_storage: ConsentState,
    pub functionality_storage: ConsentState,
    pub personalization_storage: ConsentState,
    pub security_storage: ConsentState,
}

impl ConsentModeParams {
    /// Map semantic categories onto storage signals. `functionality` drives
    /// two signals; security storage is always granted.
    pub fn from_preferences(preferences: &ConsentPreferences) -> Self {
        let functionality = ConsentState::from(preferences.is_granted("functionality"));
        Self {
            ad_storage: preferences.is_granted("targeting").into(),
            analytics_storage: preferences.is_granted("performance").into(),
            functionality_storage: functionality,
            personalization_storage: functionality,
            security_storage: ConsentState::Granted,
        }
    }
}

/// Receiver of consent mode updates (`gtag('consent', 'update', params)`)
pub trait TagSignaler {
    fn signal(&self, command: &str, action: &str, params: &ConsentModeParams);
}

impl<F> TagSignaler for F
where
    F: Fn(&str, &str, &ConsentModeParams),
{
    fn signal(&self, command: &str, action: &str, params: &ConsentModeParams) {
        self(command, action, params)
    }
}

/// In-memory data layer: every signal is pushed as a
/// `[command, action, params]` JSON array. Clones share the entries.
#[derive(Debug, Clone, Default)]
pub struct DataLayer {
    entries: Rc<RefCell<Vec<Value>>>,
}

impl DataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Value> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<Value> {
        self.entries.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TagSignaler for DataLayer {
    fn signal(&self, command: &str, action: &str, params: &ConsentModeParams) {
        match serde_json::to_value(params) {
            Ok(params) => self
                .entries
                .borrow_mut()
                .push(Value::Array(vec![command.into(), action.into(), params])),
            Err(err) => tracing::error!(%err, "failed to encode consent mode params"),
        }
    }
}
