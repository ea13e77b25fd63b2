use thiserror::Error;

/// Errors produced when parsing or validating identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("file id is empty")]
    EmptyId,

    #[error("file id too long: {len} bytes (max {max})")]
    IdTooLong { len: usize, max: usize },

    #[error("invalid file id {0:?}: must not contain path separators, NUL, or be a relative path component")]
    InvalidId(String),

    #[error("invalid extension {0:?}: must not contain path separators or NUL")]
    InvalidExtension(String),
}
