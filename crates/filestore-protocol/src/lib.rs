//! Wire protocol for FileStore.
//!
//! Defines the RPC methods, their request/response messages, the status
//! taxonomy surfaced to callers, and the bincode encoding used on the wire.
//! Messages carry plain strings for ids and extensions; the server validates
//! them into [`filestore_types::FileKey`]s.

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod status;

pub use codec::FileStoreCodec;
pub use endpoint::{endpoints, HealthResponse, RpcMethod};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{
    CreateFileRequest, CreateFileResponse, DeleteFileRequest, DeleteFileResponse, ErrorResponse,
    FileEntry, ListFilesRequest, ListFilesResponse, ReadFileRequest, ReadFileResponse,
    RpcMessage, UpdateFileRequest, UpdateFileResponse, MAX_MESSAGE_SIZE, PROTOCOL_VERSION,
};
pub use status::StatusCode;
