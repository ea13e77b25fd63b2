//! Foundation types for FileStore.
//!
//! Every stored object is addressed by a [`FileKey`]: a server-generated
//! [`FileId`] plus a dotted [`Extension`]. The key maps to exactly one file
//! name (`<id><extension>`) under the storage root; there is no other index.
//!
//! # Key Types
//!
//! - [`FileId`] — 16-character random alphanumeric identifier
//! - [`Extension`] — dotted filename suffix, normalized on create
//! - [`FileKey`] — `(id, extension)` pair and its on-disk file name

pub mod error;
pub mod extension;
pub mod id;
pub mod key;

pub use error::TypeError;
pub use extension::{Extension, DEFAULT_EXTENSION};
pub use id::{FileId, FILE_ID_LEN};
pub use key::FileKey;
