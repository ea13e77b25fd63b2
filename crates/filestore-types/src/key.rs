use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extension::Extension;
use crate::id::FileId;

/// Address of a stored file: `id + extension`.
///
/// The key maps deterministically to one file name under the storage root.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileKey {
    pub id: FileId,
    pub extension: Extension,
}

impl FileKey {
    pub fn new(id: FileId, extension: Extension) -> Self {
        Self { id, extension }
    }

    /// The on-disk file name, `<id><extension>`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.id, self.extension)
    }

    /// Recover a key from a directory entry name.
    ///
    /// Splits at the last `.`. Names whose id part is empty (dotfiles, the
    /// store's own temp files) or otherwise invalid yield `None`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (id, ext) = match name.rfind('.') {
            Some(idx) => name.split_at(idx),
            None => (name, ""),
        };
        let id = FileId::parse(id).ok()?;
        let extension = Extension::verbatim(ext).ok()?;
        Some(Self { id, extension })
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.id, self.extension)
    }
}
