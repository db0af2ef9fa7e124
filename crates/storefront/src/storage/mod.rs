//! Persistent key-value storage for visitor state.
//!
//! The storefront keeps everything a browser would keep in its local storage
//! (cart, session marker) in a per-visitor namespace of a [`KeyValueStore`].
//! Values are JSON text under fixed keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`keys::CART`] | array of cart items |
//! | [`keys::USERS`] | array of registered users (shared registry) |
//! | [`keys::SESSION`] | the logged-in user, absent when logged out |
//!
//! Stores are synchronous and each operation is atomic. Read-modify-write
//! sequences that span several operations go through [`SharedStore`].

mod file;
mod memory;
pub mod users;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Unique constraint violation (e.g., duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Storage keys.
pub mod keys {
    /// Serialized cart of the visitor.
    pub const CART: &str = "sunbag_cart";

    /// Registry of every registered user.
    pub const USERS: &str = "sunbag_users";

    /// The visitor's logged-in user.
    pub const SESSION: &str = "sunbag_session";
}

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value is not valid JSON for the expected type.
    #[error("malformed value stored under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key or namespace contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A thread panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Durable string-keyed storage with synchronous get/set/remove.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Check that a key is usable as a file name on every backend.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// Read and decode a JSON value.
///
/// Returns `Ok(None)` when nothing is stored under `key`.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the stored text does not decode as `T`,
/// or the backend error if the read itself fails.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_owned(),
            source,
        })
}

/// Read a JSON value, falling back to `T::default()` on any failure.
///
/// Malformed or unreadable values are logged and discarded; the caller
/// never sees the error.
pub fn load_json_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> T {
    match load_json(store, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored value");
            T::default()
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}

/// A store shared by every visitor, with serialized read-modify-write.
///
/// Single operations are already atomic on every backend; `transaction`
/// additionally excludes other transactions for the duration of the closure.
pub struct SharedStore {
    inner: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl SharedStore {
    /// Wrap a store.
    #[must_use]
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }

    /// Direct access for single reads.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.as_ref()
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if a previous transaction panicked.
    pub fn transaction<R>(
        &self,
        f: impl FnOnce(&dyn KeyValueStore) -> R,
    ) -> Result<R, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(f(self.inner.as_ref()))
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("sunbag_cart").is_ok());
        assert!(validate_key("visitor-01").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a.json").is_err());
    }

    #[test]
    fn test_load_json_absent() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = load_json(&store, "numbers").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_load_json_malformed() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load_json(&store, "numbers");
        assert!(matches!(result, Err(StorageError::Malformed { ref key, .. }) if key == "numbers"));
    }

    #[test]
    fn test_load_json_or_default_fails_closed() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();
        let value: Vec<u32> = load_json_or_default(&store, "numbers");
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &[1_u32, 2, 3]).unwrap();
        assert_eq!(store.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));
        let value: Vec<u32> = load_json_or_default(&store, "numbers");
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_shared_store_transaction() {
        let shared = SharedStore::new(Arc::new(MemoryStore::new()));
        let n = shared
            .transaction(|store| {
                store.set("counter", "1").unwrap();
                store.get("counter").unwrap()
            })
            .unwrap();
        assert_eq!(n.as_deref(), Some("1"));
        assert_eq!(shared.store().get("counter").unwrap().as_deref(), Some("1"));
    }
}
