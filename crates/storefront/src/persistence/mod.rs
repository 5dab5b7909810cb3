//! Durable key-value persistence.
//!
//! The storefront keeps two namespaces in the store:
//!
//! - [`cart::CART_NAMESPACE`] - cart lines, written after every cart change
//! - [`preferences::PREFERENCES_NAMESPACE`] - the `{theme, language}` pair
//!
//! Writes are best-effort. Callers log and swallow [`StoreError`]s; the
//! in-memory state stays authoritative for the rest of the session and the
//! next successful write catches the store up. Concurrent writers are not
//! coordinated: the last write wins.

pub mod cart;
pub mod preferences;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use thiserror::Error;

pub use cart::{CART_NAMESPACE, CartRepository, PersistCart};
pub use preferences::{PREFERENCES_NAMESPACE, PreferencesRepository};

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error for namespace `{namespace}`: {source}")]
    Io {
        namespace: String,
        #[source]
        source: io::Error,
    },

    /// Namespace contains characters that cannot be used as a key.
    #[error("invalid namespace `{0}`")]
    InvalidNamespace(String),

    /// The value could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The store cannot be used at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// String values keyed by namespace.
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `namespace`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load(&self, namespace: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save(&self, namespace: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each namespace as `<dir>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, namespace: &str) -> Result<PathBuf, StoreError> {
        validate_namespace(namespace)?;
        Ok(self.dir.join(format!("{namespace}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(namespace)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                namespace: namespace.to_owned(),
                source,
            }),
        }
    }

    fn save(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(namespace)?;
        let io_err = |source| StoreError::Io {
            namespace: namespace.to_owned(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        // Write-then-rename so a crash mid-write never leaves a truncated file
        let tmp = self.dir.join(format!(".{namespace}.json.tmp"));
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// Process-local store, used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_owned()))?;
        Ok(values.get(namespace).cloned())
    }

    fn save(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_owned()))?;
        values.insert(namespace.to_owned(), value.to_owned());
        Ok(())
    }
}

fn validate_namespace(namespace: &str) -> Result<(), StoreError> {
    let valid = !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidNamespace(namespace.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_namespace_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load("cart-storage").unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.save("ui-storage", "{\"theme\":\"light\"}").unwrap();
        assert_eq!(
            store.load("ui-storage").unwrap().as_deref(),
            Some("{\"theme\":\"light\"}")
        );
        assert!(dir.path().join("nested/ui-storage.json").exists());
    }

    #[test]
    fn test_file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save("cart-storage", "first").unwrap();
        store.save("cart-storage", "second").unwrap();
        assert_eq!(store.load("cart-storage").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_rejects_path_like_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.save("../escape", "x"),
            Err(StoreError::InvalidNamespace(_))
        ));
        assert!(matches!(
            store.load(""),
            Err(StoreError::InvalidNamespace(_))
        ));
    }

    #[test]
    fn test_memory_store_namespaces_are_separate() {
        let store = MemoryStore::new();
        store.save("cart-storage", "cart").unwrap();
        store.save("ui-storage", "ui").unwrap();
        assert_eq!(store.load("cart-storage").unwrap().as_deref(), Some("cart"));
        assert_eq!(store.load("ui-storage").unwrap().as_deref(), Some("ui"));
        assert!(store.load("other").unwrap().is_none());
    }
}
