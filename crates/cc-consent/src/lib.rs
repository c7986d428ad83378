//! cc-consent - Consent state for the cookie consent widget
//!
//! An [`EventBus`] carries `CONSENT_*` events between widget components;
//! the [`ConsentManager`] keeps the category -> granted map, forwards every
//! change to a [`TagSignaler`] and persists it through a
//! [`PreferenceStore`].

mod bus;
mod config;
mod error;
mod manager;
mod preferences;
mod signal;
mod storage;

pub use bus::{Callback, ConsentEvent, EventBus, Payload, Unsubscribe};
pub use config::{ConsentConfig, DEFAULT_MOUNT_ID, DEFAULT_STORAGE_KEY};
pub use error::{ConsentError, ConsentResult, StorageError};
pub use manager::{ConsentManager, ConsentManagerOptions};
pub use preferences::{ConsentCategory, ConsentPreferences};
pub use signal::{
    ConsentModeParams, ConsentState, DataLayer, TagSignaler, CONSENT_COMMAND, UPDATE_ACTION,
};
pub use storage::{PreferenceStore, Storage};
