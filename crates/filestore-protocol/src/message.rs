use serde::{Deserialize, Serialize};

use filestore_types::{Extension, FileId, FileKey, TypeError};

use crate::status::StatusCode;

pub const PROTOCOL_VERSION: u32 = 1;
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFileRequest {
    pub file: Vec<u8>,
    /// Defaulted to `.txt` and dot-prefixed server-side.
    pub extension: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFileResponse {
    pub id: String,
    /// The normalized extension actually used. Callers pass this back on
    /// every later request for the same file.
    pub extension: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileRequest {
    pub id: String,
    pub extension: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileResponse {
    pub file: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFileRequest {
    pub id: String,
    pub file: Vec<u8>,
    pub extension: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFileResponse {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    pub id: String,
    pub extension: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileResponse {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesRequest {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub extension: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<FileEntry>,
}

/// Body returned alongside any non-OK status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: StatusCode,
    pub message: String,
}

/// Resolve wire-level `(id, extension)` into a key. The extension is taken
/// verbatim; only create normalizes.
fn key_from_wire(id: &str, extension: Option<&str>) -> Result<FileKey, TypeError> {
    Ok(FileKey::new(
        FileId::parse(id)?,
        Extension::verbatim(extension.unwrap_or_default())?,
    ))
}

impl ReadFileRequest {
    pub fn key(&self) -> Result<FileKey, TypeError> {
        key_from_wire(&self.id, self.extension.as_deref())
    }
}

impl UpdateFileRequest {
    pub fn key(&self) -> Result<FileKey, TypeError> {
        key_from_wire(&self.id, self.extension.as_deref())
    }
}

impl DeleteFileRequest {
    pub fn key(&self) -> Result<FileKey, TypeError> {
        key_from_wire(&self.id, self.extension.as_deref())
    }
}

impl From<FileKey> for CreateFileResponse {
    fn from(key: FileKey) -> Self {
        Self {
            id: key.id.into(),
            extension: key.extension.into(),
        }
    }
}

impl From<FileKey> for FileEntry {
    fn from(key: FileKey) -> Self {
        Self {
            id: key.id.into(),
            extension: key.extension.into(),
        }
    }
}

/// Every message in the protocol, for transports that multiplex a single
/// stream instead of routing by path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcMessage {
    CreateFileRequest(CreateFileRequest),
    CreateFileResponse(CreateFileResponse),
    ReadFileRequest(ReadFileRequest),
    ReadFileResponse(ReadFileResponse),
    UpdateFileRequest(UpdateFileRequest),
    UpdateFileResponse(UpdateFileResponse),
    DeleteFileRequest(DeleteFileRequest),
    DeleteFileResponse(DeleteFileResponse),
    ListFilesRequest(ListFilesRequest),
    ListFilesResponse(ListFilesResponse),
    Error(ErrorResponse),
}

impl RpcMessage {
    pub fn type_tag(&self) -> u8 {
        match self {
            Self::CreateFileRequest(_) => 1,
            Self::CreateFileResponse(_) => 2,
            Self::ReadFileRequest(_) => 3,
            Self::ReadFileResponse(_) => 4,
            Self::UpdateFileRequest(_) => 5,
            Self::UpdateFileResponse(_) => 6,
            Self::DeleteFileRequest(_) => 7,
            Self::DeleteFileResponse(_) => 8,
            Self::ListFilesRequest(_) => 9,
            Self::ListFilesResponse(_) => 10,
            Self::Error(_) => 255,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CreateFileRequest(_) => "CreateFileRequest",
            Self::CreateFileResponse(_) => "CreateFileResponse",
            Self::ReadFileRequest(_) => "ReadFileRequest",
            Self::ReadFileResponse(_) => "ReadFileResponse",
            Self::UpdateFileRequest(_) => "UpdateFileRequest",
            Self::UpdateFileResponse(_) => "UpdateFileResponse",
            Self::DeleteFileRequest(_) => "DeleteFileRequest",
            Self::DeleteFileResponse(_) => "DeleteFileResponse",
            Self::ListFilesRequest(_) => "ListFilesRequest",
            Self::ListFilesResponse(_) => "ListFilesResponse",
            Self::Error(_) => "Error",
        }
    }

    /// Tags that may appear on the wire.
    pub fn is_known_tag(tag: u8) -> bool {
        matches!(tag, 1..=10 | 255)
    }
}
