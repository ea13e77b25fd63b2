use filestore_types::FileKey;

use crate::error::{StoreError, StoreResult};

/// Key-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - `create` is the only operation that generates an ID.
/// - `read` of a missing key fails with [`StoreError::NotFound`].
/// - `update` replaces the entire content and creates the object if absent.
/// - `delete` of a missing key fails with [`StoreError::Io`], the same as any
///   other removal failure.
/// - No operation leaves stale trailing bytes from previous content.
pub trait FileStore: Send + Sync {
    /// Store `content` under a freshly generated ID.
    ///
    /// `extension` is normalized (empty becomes `.txt`, a missing leading dot
    /// is added). Returns the key actually used.
    fn create(&self, content: &[u8], extension: Option<&str>) -> StoreResult<FileKey>;

    /// Read the full content stored under `key`.
    fn read(&self, key: &FileKey) -> StoreResult<Vec<u8>>;

    /// Overwrite the content stored under `key`.
    fn update(&self, key: &FileKey, content: &[u8]) -> StoreResult<()>;

    /// Remove the object stored under `key`.
    fn delete(&self, key: &FileKey) -> StoreResult<()>;

    /// Every object currently in the store, sorted by key.
    fn list(&self) -> StoreResult<Vec<FileKey>>;

    /// Check whether an object exists under `key`.
    ///
    /// Default implementation reads the object. Backends may override with
    /// a cheaper check.
    fn exists(&self, key: &FileKey) -> StoreResult<bool> {
        match self.read(key) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
