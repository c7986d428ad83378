//! Consent Manager
//!
//! Owns the preference map. Changes arrive either by direct call or as
//! `CONSENT_UPDATED` publishes on the bus; each one is forwarded to the tag
//! signaler and persisted. Signaling and storage failures are logged and
//! absorbed so the widget keeps working in memory.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::signal::{CONSENT_COMMAND, UPDATE_ACTION};
use crate::{
    ConsentCategory, ConsentConfig, ConsentError, ConsentEvent, ConsentModeParams,
    ConsentPreferences, ConsentResult, EventBus, Payload, PreferenceStore, Storage, TagSignaler,
    Unsubscribe,
};

/// Everything a manager is built from
pub struct ConsentManagerOptions {
    pub categories: Vec<ConsentCategory>,
    pub event_bus: EventBus,
    pub storage: Box<dyn PreferenceStore>,
    /// `None` models a page without the tag script loaded
    pub signaler: Option<Box<dyn TagSignaler>>,
    pub config: ConsentConfig,
}

impl ConsentManagerOptions {
    /// Session storage, no signaler, default config
    pub fn new(categories: Vec<ConsentCategory>, event_bus: EventBus) -> Self {
        Self {
            categories,
            event_bus,
            storage: Box::new(Storage::session()),
            signaler: None,
            config: ConsentConfig::default(),
        }
    }

    pub fn with_storage(mut self, storage: impl PreferenceStore + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    pub fn with_signaler(mut self, signaler: impl TagSignaler + 'static) -> Self {
        self.signaler = Some(Box::new(signaler));
        self
    }

    pub fn with_config(mut self, config: ConsentConfig) -> Self {
        self.config = config;
        self
    }
}

struct Inner {
    categories: Vec<ConsentCategory>,
    preferences: RefCell<ConsentPreferences>,
    bus: EventBus,
    storage: RefCell<Box<dyn PreferenceStore>>,
    signaler: Option<Box<dyn TagSignaler>>,
    config: ConsentConfig,
    subscription: RefCell<Option<Unsubscribe>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.get_mut().take() {
            subscription.unsubscribe();
        }
    }
}

/// Handle to a consent manager. Clones share the same state.
#[derive(Clone)]
pub struct ConsentManager {
    inner: Rc<Inner>,
}

impl ConsentManager {
    /// Build the initial map from the categories and subscribe to
    /// `CONSENT_UPDATED`. With `load_on_init` the persisted snapshot, if
    /// any, replaces the initial map.
    pub fn new(options: ConsentManagerOptions) -> Self {
        let preferences = ConsentPreferences::from_categories(&options.categories);
        let inner = Rc::new(Inner {
            categories: options.categories,
            preferences: RefCell::new(preferences),
            bus: options.event_bus,
            storage: RefCell::new(options.storage),
            signaler: options.signaler,
            config: options.config,
            subscription: RefCell::new(None),
        });

        // The bus must not keep the manager alive; dropping the last handle
        // unsubscribes
        let weak = Rc::downgrade(&inner);
        let subscription = inner.bus.subscribe(ConsentEvent::Updated, move |payload| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match payload {
                Payload::Preferences(partial) => {
                    ConsentManager { inner }.update_preferences(partial);
                }
                other => tracing::debug!(?other, "ignoring update without preferences"),
            }
        });
        inner.subscription.replace(Some(subscription));

        let manager = Self { inner };
        if manager.inner.config.load_on_init {
            manager.load_preferences();
        }
        tracing::info!(
            categories = manager.inner.categories.len(),
            signaler = manager.inner.signaler.is_some(),
            "consent manager initialized"
        );
        manager
    }

    /// Current preference map
    pub fn preferences(&self) -> ConsentPreferences {
        self.inner.preferences.borrow().clone()
    }

    pub fn categories(&self) -> &[ConsentCategory] {
        &self.inner.categories
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.bus
    }

    pub fn config(&self) -> &ConsentConfig {
        &self.inner.config
    }

    /// Merge `partial` over the current map, signal and persist the result.
    /// Returns the merged map.
    pub fn update_preferences(&self, partial: &ConsentPreferences) -> ConsentPreferences {
        let merged = {
            let mut preferences = self.inner.preferences.borrow_mut();
            preferences.merge(partial);
            if self.inner.config.enforce_required_on_update {
                preferences.enforce_required(&self.inner.categories);
            }
            preferences.clone()
        };

        if let Err(err) = self.signal(&merged) {
            tracing::warn!(%err, "consent mode not updated");
        }
        if let Err(err) = self.persist(&merged) {
            tracing::error!(%err, "preferences kept in memory only");
        }
        tracing::debug!(changed = partial.len(), "preferences updated");
        merged
    }

    /// Replace the map with the persisted snapshot. `None` when nothing is
    /// stored or the snapshot cannot be read; the map is then unchanged.
    pub fn load_preferences(&self) -> Option<ConsentPreferences> {
        match self.try_load_preferences() {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::error!(%err, "falling back to current preferences");
                None
            }
        }
    }

    /// [`ConsentManager::load_preferences`] reporting why nothing was loaded
    pub fn try_load_preferences(&self) -> ConsentResult<Option<ConsentPreferences>> {
        let key = &self.inner.config.storage_key;
        let saved = self
            .inner
            .storage
            .borrow()
            .get_item(key)
            .map_err(ConsentError::Load)?;

        let Some(saved) = saved.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let mut loaded = ConsentPreferences::from_json(&saved).map_err(ConsentError::Malformed)?;
        if self.inner.config.enforce_required_on_update {
            loaded.enforce_required(&self.inner.categories);
        }

        *self.inner.preferences.borrow_mut() = loaded.clone();
        tracing::debug!(key = %key, entries = loaded.len(), "preferences loaded");
        Ok(Some(loaded))
    }

    /// Grant every listed category and publish `CONSENT_ALL_ACCEPTED`
    /// with the granted map
    pub fn accept_all(&self, categories: &[ConsentCategory]) -> ConsentPreferences {
        let all = ConsentPreferences::all_granted(categories);
        self.update_preferences(&all);
        self.inner.bus.publish(ConsentEvent::AllAccepted, all.clone());
        all
    }

    /// Deny every listed category except required ones and publish
    /// `CONSENT_ALL_REJECTED` with that map
    pub fn reject_all(&self, categories: &[ConsentCategory]) -> ConsentPreferences {
        let rejected = ConsentPreferences::only_required(categories);
        self.update_preferences(&rejected);
        self.inner.bus.publish(ConsentEvent::AllRejected, rejected.clone());
        rejected
    }

    fn signal(&self, preferences: &ConsentPreferences) -> ConsentResult<()> {
        let signaler = self
            .inner
            .signaler
            .as_ref()
            .ok_or(ConsentError::IntegrationUnavailable)?;
        let params = ConsentModeParams::from_preferences(preferences);
        signaler.signal(CONSENT_COMMAND, UPDATE_ACTION, &params);
        Ok(())
    }

    fn persist(&self, preferences: &ConsentPreferences) -> ConsentResult<()> {
        let json = preferences.to_json().map_err(ConsentError::Encode)?;
        self.inner
            .storage
            .borrow_mut()
            .set_item(&self.inner.config.storage_key, &json)
            .map_err(ConsentError::Persist)
    }
}

impl fmt::Debug for ConsentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsentManager")
            .field("categories", &self.inner.categories)
            .field("preferences", &self.inner.preferences.borrow())
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataLayer, StorageError};

    fn manager_with(storage: impl PreferenceStore + 'static) -> ConsentManager {
        let options = ConsentManagerOptions::new(ConsentCategory::defaults(), EventBus::new())
            .with_storage(storage);
        ConsentManager::new(options)
    }

    #[test]
    fn test_initial_map_covers_all_categories() {
        let manager = manager_with(Storage::session());
        let prefs = manager.preferences();
        assert_eq!(prefs.len(), 5);
        assert!(prefs.is_granted("strictly-necessary"));
        assert!(!prefs.is_granted("performance"));
    }

    #[test]
    fn test_update_without_signaler_still_persists() {
        let storage = Rc::new(RefCell::new(Storage::session()));
        let manager = manager_with(Rc::clone(&storage));

        manager.update_preferences(&ConsentPreferences::from([("performance", true)]));
        let saved = storage.borrow().get_item("cookiePreferences").unwrap().unwrap();
        assert!(ConsentPreferences::from_json(&saved).unwrap().is_granted("performance"));
    }

    #[test]
    fn test_update_survives_disabled_storage() {
        let manager = manager_with(Storage::disabled());
        let merged = manager.update_preferences(&ConsentPreferences::from([("analytics", true)]));
        assert!(merged.is_granted("analytics"));
        assert!(manager.preferences().is_granted("analytics"));
    }

    #[test]
    fn test_load_errors_are_reported() {
        let manager = manager_with(Storage::disabled());
        assert!(matches!(
            manager.try_load_preferences(),
            Err(ConsentError::Load(StorageError::Unavailable))
        ));
        assert_eq!(manager.load_preferences(), None);
    }

    #[test]
    fn test_malformed_snapshot_keeps_defaults() {
        let mut storage = Storage::session();
        storage.set_item("cookiePreferences", "{not json").unwrap();
        let manager = manager_with(storage);

        assert!(matches!(manager.try_load_preferences(), Err(ConsentError::Malformed(_))));
        assert_eq!(manager.preferences(), ConsentPreferences::from_categories(&ConsentCategory::defaults()));
    }

    #[test]
    fn test_signal_sent_per_update() {
        let layer = DataLayer::new();
        let options = ConsentManagerOptions::new(ConsentCategory::defaults(), EventBus::new())
            .with_signaler(layer.clone());
        let manager = ConsentManager::new(options);

        manager.update_preferences(&ConsentPreferences::from([("targeting", true)]));
        manager.update_preferences(&ConsentPreferences::new());
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.last().unwrap()[2]["ad_storage"], "granted");
    }

    #[test]
    fn test_manager_dropped_before_bus() {
        let bus = EventBus::new();
        let manager = ConsentManager::new(ConsentManagerOptions::new(ConsentCategory::defaults(), bus.clone()));
        let clone = manager.clone();
        assert_eq!(bus.subscriber_count(ConsentEvent::Updated), 1);

        drop(manager);
        assert_eq!(bus.subscriber_count(ConsentEvent::Updated), 1);
        drop(clone);
        assert_eq!(bus.subscriber_count(ConsentEvent::Updated), 0);
        bus.publish(ConsentEvent::Updated, ConsentPreferences::from([("performance", true)]));
    }
}
