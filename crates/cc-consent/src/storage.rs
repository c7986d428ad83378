//! Storage APIs
//!
//! Key-value stores the consent manager persists into: an in-memory
//! session store and a file-backed local store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::StorageError;

/// Durable key-value storage (the `localStorage` surface)
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Lets a caller keep a handle on a store it gave away
impl<S: PreferenceStore> PreferenceStore for Rc<RefCell<S>> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.borrow().get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.borrow_mut().set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.borrow_mut().remove_item(key)
    }
}

/// Storage backend
#[derive(Debug, Default)]
pub struct Storage {
    data: BTreeMap<String, String>,
    path: Option<PathBuf>,
    quota: Option<usize>,
    disabled: bool,
}

impl Storage {
    /// Create in-memory storage (sessionStorage)
    pub fn session() -> Self {
        Self::default()
    }

    /// Open persistent storage backed by `path`, one `key\tvalue` line per
    /// entry. A missing file starts empty.
    pub fn local(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut data = BTreeMap::new();

        match fs::read_to_string(&path) {
            Ok(contents) => {
                for line in contents.lines() {
                    if let Some((key, value)) = line.split_once('\t') {
                        data.insert(key.to_string(), value.to_string());
                    }
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        tracing::debug!(path = %path.display(), entries = data.len(), "opened local storage");
        Ok(Self {
            data,
            path: Some(path),
            ..Self::default()
        })
    }

    /// Storage that refuses every operation (disabled by the browser)
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Cap the total bytes of keys plus values
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get key at index
    pub fn key(&self, index: usize) -> Option<&str> {
        self.data.keys().nth(index).map(String::as_str)
    }

    /// Get number of items
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Clear all items
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.data.clear();
        self.persist()
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn used_bytes(&self) -> usize {
        self.data.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Write the whole map to disk if file-backed
    fn persist(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents = self
            .data
            .iter()
            .map(|(k, v)| format!("{k}\t{v}"))
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.data.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        if self.path.is_some() && (key.contains(['\t', '\n']) || value.contains('\n')) {
            return Err(StorageError::Unrepresentable { key: key.to_string() });
        }

        if let Some(quota) = self.quota {
            let current = self.data.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - current + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        let previous = self.data.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist() {
            // Keep memory in step with what is on disk
            match previous {
                Some(old) => self.data.insert(key.to_string(), old),
                None => self.data.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        if self.data.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
