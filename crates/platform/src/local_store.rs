//! Client-local durable storage.
//!
//! [`LocalStore`] is the durable store the cart snapshot (`luxe_cart`) and
//! the admin session record (`luxe_admin`) live in: one file per key under
//! a root directory, written via a temp file and rename so a crashed write
//! never leaves a torn value behind. [`MemoryStore`] keeps the same
//! contract in process memory for tests and ephemeral runs.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use luxe_core::{KeyValueStore, StorageError};

fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.')
}

/// File-per-key durable store rooted at a directory.
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!("{key}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process store with the same contract as [`LocalStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries, for tests.
    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            map: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.map
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("luxe-store-{tag}-{}", std::process::id()))
    }

    #[test]
    fn test_local_store_roundtrip() {
        let root = temp_root("roundtrip");
        let store = LocalStore::open(&root).unwrap();

        assert_eq!(store.get("luxe_cart").unwrap(), None);
        store.set("luxe_cart", "[]").unwrap();
        assert_eq!(store.get("luxe_cart").unwrap().as_deref(), Some("[]"));

        store.set("luxe_cart", "[{\"id\":\"p1\"}]").unwrap();
        assert_eq!(
            store.get("luxe_cart").unwrap().as_deref(),
            Some("[{\"id\":\"p1\"}]")
        );

        store.remove("luxe_cart").unwrap();
        assert_eq!(store.get("luxe_cart").unwrap(), None);
        // removing again is a no-op
        store.remove("luxe_cart").unwrap();

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_local_store_rejects_path_traversal_keys() {
        let root = temp_root("badkey");
        let store = LocalStore::open(&root).unwrap();

        assert!(matches!(
            store.get("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.set("", "x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(
            store.set(".hidden", "x"),
            Err(StorageError::InvalidKey(_))
        ));

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.set("luxe_admin", "{\"email\":\"a@b.c\"}").unwrap();
        assert_eq!(
            store.get("luxe_admin").unwrap().as_deref(),
            Some("{\"email\":\"a@b.c\"}")
        );
        store.remove("luxe_admin").unwrap();
        assert_eq!(store.get("luxe_admin").unwrap(), None);
    }
}
