//! Key-addressed blob storage for FileStore.
//!
//! Every stored object is one regular file in a flat storage directory, named
//! `<id><extension>`. The name is the only addressing scheme: there is no
//! manifest, sidecar, or in-process index.
//!
//! # Storage Backends
//!
//! All backends implement the [`FileStore`] trait:
//!
//! - [`DiskFileStore`] -- the filesystem-backed store used by the server
//! - [`InMemoryFileStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. IDs are generated only by `create`; nothing else synthesizes one.
//! 2. `update` replaces the whole content and creates the file if absent.
//! 3. No in-process locking. Concurrent writers resolve last-write-wins on
//!    the filesystem.
//! 4. All I/O errors are propagated, never masked.

pub mod config;
pub mod disk;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::StoreConfig;
pub use disk::DiskFileStore;
pub use error::{StoreError, StoreOp, StoreResult};
pub use memory::InMemoryFileStore;
pub use traits::FileStore;

pub use filestore_types::{Extension, FileId, FileKey};
