use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for [`DiskFileStore`](crate::DiskFileStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding every stored file. Created on open if absent.
    pub root: PathBuf,
    /// Write to a temp file in the root and rename it over the target,
    /// instead of truncating the target in place.
    pub atomic_writes: bool,
    /// `fsync` each file after writing it.
    pub sync_writes: bool,
    /// Permission bits for written files (Unix only).
    pub file_mode: u32,
}

impl StoreConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./files"),
            atomic_writes: true,
            sync_writes: false,
            file_mode: 0o644,
        }
    }
}
