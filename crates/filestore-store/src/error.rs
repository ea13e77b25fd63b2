use std::fmt;
use std::io;
use std::path::PathBuf;

use filestore_types::{FileKey, TypeError};

/// The store operation that hit an I/O failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOp {
    Create,
    Read,
    Update,
    Delete,
    List,
    Stat,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::List => write!(f, "list"),
            Self::Stat => write!(f, "stat"),
        }
    }
}

/// Errors from file store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read targeted a path with no file behind it.
    #[error("file not found: {0}")]
    NotFound(FileKey),

    /// The id or extension would not resolve to a file inside the root.
    #[error("invalid file key: {0}")]
    InvalidKey(#[from] TypeError),

    /// Any other filesystem failure, with the underlying cause.
    #[error("failed to {op} file {}: {source}", .path.display())]
    Io {
        op: StoreOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The storage root could not be created or opened.
    #[error("storage root {} unavailable: {source}", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(op: StoreOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
