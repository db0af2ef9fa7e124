//! Filesystem-backed store.
//!
//! Layout: one file per key, `<root>/<key>.json`. Namespaces are plain
//! subdirectories, so a visitor's state lives in
//! `<data_dir>/visitors/<visitor_id>/`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStore, StorageError, validate_key};

/// Durable store writing each key to its own JSON file.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader never observes a half-written value.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    /// The child store `<root>/<name>/`.
    ///
    /// The directory is created by the first write, so a namespace that is
    /// only ever read leaves nothing on disk.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` for an unusable name.
    pub fn namespace(&self, name: &str) -> Result<Self, StorageError> {
        validate_key(name)?;
        Ok(Self {
            root: self.root.join(name),
            lock: Mutex::new(()),
        })
    }

    /// Directory holding this store's files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        fs::create_dir_all(&self.root)?;
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("sunbag-filestore-{}", uuid::Uuid::new_v4().simple()))
    }

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = scratch_dir();
        let store = FileStore::open(&dir).unwrap();

        assert!(store.get("sunbag_cart").unwrap().is_none());
        store.set("sunbag_cart", "[{\"qty\":1}]").unwrap();
        assert_eq!(
            fs::read_to_string(dir.join("sunbag_cart.json")).unwrap(),
            "[{\"qty\":1}]"
        );

        // a second handle on the same directory sees the value
        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(
            reopened.get("sunbag_cart").unwrap().as_deref(),
            Some("[{\"qty\":1}]")
        );

        store.remove("sunbag_cart").unwrap();
        assert!(reopened.get("sunbag_cart").unwrap().is_none());
        store.remove("sunbag_cart").unwrap();

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let dir = scratch_dir();
        let root = FileStore::open(&dir).unwrap();
        let alice = root.namespace("alice").unwrap();
        let bob = root.namespace("bob").unwrap();

        alice.set("sunbag_session", "\"alice\"").unwrap();
        assert!(bob.get("sunbag_session").unwrap().is_none());
        assert!(root.get("sunbag_session").unwrap().is_none());
        assert_eq!(alice.root(), dir.join("alice"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_namespace_created_on_first_write() {
        let dir = scratch_dir();
        let root = FileStore::open(&dir).unwrap();
        let visitor = root.namespace("visitor-01").unwrap();

        assert!(visitor.get("sunbag_cart").unwrap().is_none());
        visitor.remove("sunbag_session").unwrap();
        assert!(!dir.join("visitor-01").exists());

        visitor.set("sunbag_cart", "[]").unwrap();
        assert!(dir.join("visitor-01").join("sunbag_cart.json").is_file());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = scratch_dir();
        let root = FileStore::open(&dir).unwrap();
        assert!(matches!(
            root.namespace(".."),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            root.get("../secret"),
            Err(StorageError::InvalidKey(_))
        ));
        fs::remove_dir_all(dir).unwrap();
    }
}
