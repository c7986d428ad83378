//! Consent categories and the preference map

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A cookie category the visitor can grant or deny
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentCategory {
    pub id: String,
    #[serde(default)]
    pub is_checked: bool,
    /// Required categories always resolve to granted
    #[serde(default)]
    pub is_required: bool,
}

impl ConsentCategory {
    /// Optional, unchecked category
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_checked: false,
            is_required: false,
        }
    }

    /// Required category
    pub fn required(id: impl Into<String>) -> Self {
        Self {
            is_required: true,
            ..Self::new(id)
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.is_checked = checked;
        self
    }

    /// Granted state before the visitor has chosen anything
    pub fn initially_granted(&self) -> bool {
        self.is_checked || self.is_required
    }

    /// The five categories of the stock banner
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::required("strictly-necessary"),
            Self::new("performance"),
            Self::new("targeting"),
            Self::new("analytics"),
            Self::new("unclassified"),
        ]
    }
}

/// Category id -> granted. Serialized as a flat JSON object, which is also
/// the persisted format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentPreferences(BTreeMap<String, bool>);

impl ConsentPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial map: `is_checked || is_required` for every category
    pub fn from_categories(categories: &[ConsentCategory]) -> Self {
        categories
            .iter()
            .map(|c| (c.id.clone(), c.initially_granted()))
            .collect()
    }

    /// Every listed category granted
    pub fn all_granted(categories: &[ConsentCategory]) -> Self {
        categories.iter().map(|c| (c.id.clone(), true)).collect()
    }

    /// Only required categories granted
    pub fn only_required(categories: &[ConsentCategory]) -> Self {
        categories
            .iter()
            .map(|c| (c.id.clone(), c.is_required))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    /// Missing ids count as denied
    pub fn is_granted(&self, id: &str) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn set(&mut self, id: impl Into<String>, granted: bool) {
        self.0.insert(id.into(), granted);
    }

    /// Shallow last-write-wins merge: keys in `partial` overwrite, the rest
    /// keep their value
    pub fn merge(&mut self, partial: &ConsentPreferences) {
        for (id, granted) in &partial.0 {
            self.0.insert(id.clone(), *granted);
        }
    }

    /// Set every required category back to granted
    pub fn enforce_required(&mut self, categories: &[ConsentCategory]) {
        for category in categories.iter().filter(|c| c.is_required) {
            self.0.insert(category.id.clone(), true);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, granted)| (id.as_str(), *granted))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ConsentPreferences {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<const N: usize> From<[(&str, bool); N]> for ConsentPreferences {
    fn from(entries: [(&str, bool); N]) -> Self {
        entries.into_iter().collect()
    }
}
