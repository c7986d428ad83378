//! Consent and storage errors

use thiserror::Error;

/// Failures of a [`crate::PreferenceStore`] backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Writing would push the store past its byte quota
    #[error("storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// The entry cannot be written to the line-based backing file
    #[error("entry {key:?} contains a tab or newline")]
    Unrepresentable { key: String },

    /// Storage is disabled for this page
    #[error("storage unavailable")]
    Unavailable,
}

/// Conditions the consent manager recovers from locally
#[derive(Error, Debug)]
pub enum ConsentError {
    #[error("failed to save preferences: {0}")]
    Persist(#[source] StorageError),

    #[error("failed to load preferences: {0}")]
    Load(#[source] StorageError),

    /// Persisted snapshot is not a JSON object of booleans
    #[error("malformed persisted preferences: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode preferences: {0}")]
    Encode(#[source] serde_json::Error),

    /// No tag signaling function is installed
    #[error("tag signaling integration unavailable")]
    IntegrationUnavailable,

    #[error("invalid consent configuration: {0}")]
    Config(#[source] serde_json::Error),
}

pub type ConsentResult<T> = Result<T, ConsentError>;
