//! Consent Configuration

use serde::{Deserialize, Serialize};

use crate::{ConsentError, ConsentResult};

/// Key the preference snapshot is stored under
pub const DEFAULT_STORAGE_KEY: &str = "cookiePreferences";

/// Element id the widget mounts into
pub const DEFAULT_MOUNT_ID: &str = "app";

/// Deployment options for the consent manager and its host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsentConfig {
    /// Durable storage key for the preference snapshot
    pub storage_key: String,

    /// Id of the mount point element
    pub mount_id: String,

    /// Force required categories back to granted after every merge
    pub enforce_required_on_update: bool,

    /// Read the persisted snapshot when the manager is constructed
    pub load_on_init: bool,
}

impl ConsentConfig {
    /// Parse a JSON config object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConsentResult<Self> {
        serde_json::from_str(json).map_err(ConsentError::Config)
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            enforce_required_on_update: false,
            load_on_init: false,
        }
    }
}
