//! Durable key-value client storage.
//!
//! The cart snapshot and the admin session record live behind this trait.
//! It mirrors the platform's client-storage surface: string keys, string
//! values, and nothing else. Implementations (file-backed, in-memory) live
//! in `luxe-platform`; this crate defines only the seam.

use thiserror::Error;

/// Errors surfaced by a [`KeyValueStore`] implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium failed to read or write.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the store cannot represent.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A durable string-to-string store scoped to the current client.
///
/// Semantics match browser local storage: `get` returns the last value
/// written for the key (or `None`), `set` replaces it durably before
/// returning, `remove` is a no-op for absent keys.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium fails; a missing key
    /// is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Durably write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Absent keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
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

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
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
