use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use filestore_types::{Extension, FileId, FileKey};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreOp, StoreResult};
use crate::traits::FileStore;

/// Filesystem-backed store: one file per object in a flat directory.
///
/// The store holds no mutable in-memory state. Every call resolves
/// `root/<id><extension>` and issues a single whole-file operation, so
/// concurrent callers coordinate only through the filesystem.
///
/// With [`StoreConfig::atomic_writes`] set, writes go to a temp file inside
/// the root and are renamed over the target, so readers see either the old
/// or the new content. Without it the target is truncated in place and a
/// racing reader may observe a partial file.
#[derive(Debug)]
pub struct DiskFileStore {
    config: StoreConfig,
}

impl DiskFileStore {
    /// Open a store at `config.root`, creating the directory if absent.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.root).map_err(|source| StoreError::Root {
            path: config.root.clone(),
            source,
        })?;
        let meta = fs::metadata(&config.root).map_err(|source| StoreError::Root {
            path: config.root.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(StoreError::Root {
                path: config.root.clone(),
                source: io::Error::new(io::ErrorKind::Other, "not a directory"),
            });
        }
        info!(root = %config.root.display(), atomic = config.atomic_writes, "file store opened");
        Ok(Self { config })
    }

    /// Open a store at `root` with default settings.
    pub fn open_at(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(StoreConfig::with_root(root))
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Resolve a key to its path under the root.
    pub fn path_for(&self, key: &FileKey) -> PathBuf {
        self.config.root.join(key.file_name())
    }

    fn write_file(&self, op: StoreOp, path: &Path, content: &[u8]) -> StoreResult<()> {
        let result = if self.config.atomic_writes {
            self.write_atomic(path, content)
        } else {
            self.write_in_place(path, content)
        };
        result.map_err(|e| StoreError::io(op, path, e))
    }

    fn write_in_place(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(self.config.file_mode);
        }
        let mut file = opts.open(path)?;
        // `mode` only applies on creation and is masked by the umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(self.config.file_mode))?;
        }
        file.write_all(content)?;
        self.finish(&file)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.config.root)?;
        tmp.write_all(content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(self.config.file_mode))?;
        }
        self.finish(tmp.as_file())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn finish(&self, file: &File) -> io::Result<()> {
        if self.config.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }
}

impl FileStore for DiskFileStore {
    fn create(&self, content: &[u8], extension: Option<&str>) -> StoreResult<FileKey> {
        let key = FileKey::new(FileId::generate(), Extension::normalize(extension)?);
        let path = self.path_for(&key);
        self.write_file(StoreOp::Create, &path, content)?;
        debug!(id = %key.id, ext = %key.extension, bytes = content.len(), "created file");
        Ok(key)
    }

    fn read(&self, key: &FileKey) -> StoreResult<Vec<u8>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(data) => {
                debug!(id = %key.id, bytes = data.len(), "read file");
                Ok(data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(key.clone())),
            Err(e) => Err(StoreError::io(StoreOp::Read, path, e)),
        }
    }

    fn update(&self, key: &FileKey, content: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key);
        self.write_file(StoreOp::Update, &path, content)?;
        debug!(id = %key.id, bytes = content.len(), "updated file");
        Ok(())
    }

    fn delete(&self, key: &FileKey) -> StoreResult<()> {
        let path = self.path_for(key);
        fs::remove_file(&path).map_err(|e| StoreError::io(StoreOp::Delete, &path, e))?;
        debug!(id = %key.id, "deleted file");
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<FileKey>> {
        let root = &self.config.root;
        let entries = fs::read_dir(root).map_err(|e| StoreError::io(StoreOp::List, root, e))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(StoreOp::List, root, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StoreError::io(StoreOp::List, entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
                continue;
            };
            if let Some(key) = FileKey::from_file_name(name) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &FileKey) -> StoreResult<bool> {
        let path = self.path_for(key);
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(StoreOp::Stat, path, e)),
        }
    }
}
