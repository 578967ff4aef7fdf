//! Browser-style key-value persistence.
//!
//! The shop page persists everything through `localStorage`. This module
//! abstracts that behind [`KeyValueStore`] so the cart can run against an
//! in-memory fake in tests and a JSON file in the CLI.
//!
//! Stores are shared handles: cloning a [`MemoryStore`] or opening two
//! [`FileStore`]s on the same path behaves like two tabs of one origin.

use thiserror::Error;

mod file;
pub mod keys;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors a storage backend can report.
///
/// Callers in the cart treat every variant as a soft failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or inaccessible (private mode, sandboxed frame).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded { key: String },

    /// File-backed storage could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File-backed storage holds something that is not a string map.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal `localStorage`-like interface.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read a key, logging and discarding any backend failure.
pub fn soft_get(store: &impl KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage read failed");
            None
        }
    }
}

/// Write a key, logging and discarding any backend failure.
///
/// Returns whether the value was persisted.
pub fn soft_set(store: &impl KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "Storage write failed");
            false
        }
    }
}

/// Remove a key, logging and discarding any backend failure.
pub fn soft_remove(store: &impl KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!(key, error = %e, "Storage remove failed");
    }
}
