use std::collections::HashMap;
use std::io;
use std::sync::RwLock;

use filestore_types::{Extension, FileId, FileKey};

use crate::error::{StoreError, StoreOp, StoreResult};
use crate::traits::FileStore;

/// In-memory, HashMap-based file store.
///
/// Intended for tests and embedding. Entries are keyed by
/// [`FileKey::file_name`], the same name [`DiskFileStore`](crate::DiskFileStore)
/// resolves on disk, so `abc` + `.tar.gz` and `abc.tar` + `.gz` address one
/// entry and listing splits names the same way.
pub struct InMemoryFileStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored files.
    pub fn total_bytes(&self) -> u64 {
        self.files
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for InMemoryFileStore {
    fn create(&self, content: &[u8], extension: Option<&str>) -> StoreResult<FileKey> {
        let key = FileKey::new(FileId::generate(), Extension::normalize(extension)?);
        let mut map = self.files.write().expect("lock poisoned");
        map.insert(key.file_name(), content.to_vec());
        Ok(key)
    }

    fn read(&self, key: &FileKey) -> StoreResult<Vec<u8>> {
        let map = self.files.read().expect("lock poisoned");
        map.get(&key.file_name())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }

    fn update(&self, key: &FileKey, content: &[u8]) -> StoreResult<()> {
        let mut map = self.files.write().expect("lock poisoned");
        map.insert(key.file_name(), content.to_vec());
        Ok(())
    }

    fn delete(&self, key: &FileKey) -> StoreResult<()> {
        let mut map = self.files.write().expect("lock poisoned");
        match map.remove(&key.file_name()) {
            Some(_) => Ok(()),
            None => Err(StoreError::io(
                StoreOp::Delete,
                key.file_name(),
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )),
        }
    }

    fn list(&self) -> StoreResult<Vec<FileKey>> {
        let map = self.files.read().expect("lock poisoned");
        let mut keys: Vec<FileKey> = map
            .keys()
            .filter_map(|name| FileKey::from_file_name(name))
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &FileKey) -> StoreResult<bool> {
        let map = self.files.read().expect("lock poisoned");
        Ok(map.contains_key(&key.file_name()))
    }
}

impl std::fmt::Debug for InMemoryFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFileStore")
            .field("file_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_read() {
        let store = InMemoryFileStore::new();
        let key = store.create(b"hello world", None).unwrap();
        assert_eq!(key.extension.as_str(), ".txt");
        assert_eq!(store.read(&key).unwrap(), b"hello world");
    }

    #[test]
    fn create_normalizes_extension() {
        let store = InMemoryFileStore::new();
        let key = store.create(b"x", Some("pdf")).unwrap();
        assert_eq!(key.extension.as_str(), ".pdf");
    }

    #[test]
    fn read_missing_is_not_found() {
        let store = InMemoryFileStore::new();
        let key = FileKey::new(FileId::generate(), Extension::default_txt());
        assert!(store.read(&key).unwrap_err().is_not_found());
    }

    #[test]
    fn update_replaces_and_creates() {
        let store = InMemoryFileStore::new();
        let key = store.create(b"long original", None).unwrap();
        store.update(&key, b"short").unwrap();
        assert_eq!(store.read(&key).unwrap(), b"short");

        let fresh = FileKey::new(FileId::generate(), Extension::default_txt());
        store.update(&fresh, b"new").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_present_then_missing() {
        let store = InMemoryFileStore::new();
        let key = store.create(b"x", None).unwrap();
        store.delete(&key).unwrap();
        assert!(!store.exists(&key).unwrap());
        let err = store.delete(&key).unwrap_err();
        assert!(matches!(err, StoreError::Io { op: StoreOp::Delete, .. }));
    }

    #[test]
    fn list_is_sorted() {
        let store = InMemoryFileStore::new();
        for _ in 0..5 {
            store.create(b"x", None).unwrap();
        }
        let keys = store.list().unwrap();
        assert_eq!(keys.len(), 5);
        for w in keys.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn multi_dot_extension_lists_like_disk() {
        let store = InMemoryFileStore::new();
        let id = FileId::parse("archive").unwrap();
        let stored = FileKey::new(id, Extension::verbatim(".tar.gz").unwrap());
        store.update(&stored, b"gz").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "archive.tar");
        assert_eq!(listed[0].extension.as_str(), ".gz");
        assert_eq!(listed[0].file_name(), stored.file_name());

        // Both spellings resolve to the same entry.
        assert_eq!(store.read(&listed[0]).unwrap(), b"gz");
        store.delete(&listed[0]).unwrap();
        assert!(!store.exists(&stored).unwrap());
    }

    #[test]
    fn len_and_total_bytes() {
        let store = InMemoryFileStore::new();
        assert!(store.is_empty());
        store.create(b"12345", None).unwrap();
        store.create(b"123456789", None).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn default_trait_exists_goes_through_read() {
        struct ReadOnly(InMemoryFileStore);
        impl FileStore for ReadOnly {
            fn create(&self, c: &[u8], e: Option<&str>) -> StoreResult<FileKey> {
                self.0.create(c, e)
            }
            fn read(&self, k: &FileKey) -> StoreResult<Vec<u8>> {
                self.0.read(k)
            }
            fn update(&self, k: &FileKey, c: &[u8]) -> StoreResult<()> {
                self.0.update(k, c)
            }
            fn delete(&self, k: &FileKey) -> StoreResult<()> {
                self.0.delete(k)
            }
            fn list(&self) -> StoreResult<Vec<FileKey>> {
                self.0.list()
            }
        }

        let store = ReadOnly(InMemoryFileStore::new());
        let key = store.create(b"x", None).unwrap();
        assert!(store.exists(&key).unwrap());
        store.delete(&key).unwrap();
        assert!(!store.exists(&key).unwrap());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryFileStore::new();
        store.create(b"x", None).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryFileStore"));
        assert!(debug.contains("file_count"));
    }
}
