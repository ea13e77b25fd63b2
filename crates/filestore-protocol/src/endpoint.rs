use std::fmt;

/// HTTP endpoint paths for the FileStore protocol.
pub mod endpoints {
    pub const CREATE_FILE: &str = "/v1/files/create";
    pub const READ_FILE: &str = "/v1/files/read";
    pub const UPDATE_FILE: &str = "/v1/files/update";
    pub const DELETE_FILE: &str = "/v1/files/delete";
    pub const LIST_FILES: &str = "/v1/files/list";
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";
}

/// The RPC methods a FileStore server dispatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    CreateFile,
    ReadFile,
    UpdateFile,
    DeleteFile,
    ListFiles,
}

impl RpcMethod {
    pub const ALL: [RpcMethod; 5] = [
        Self::CreateFile,
        Self::ReadFile,
        Self::UpdateFile,
        Self::DeleteFile,
        Self::ListFiles,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::CreateFile => endpoints::CREATE_FILE,
            Self::ReadFile => endpoints::READ_FILE,
            Self::UpdateFile => endpoints::UPDATE_FILE,
            Self::DeleteFile => endpoints::DELETE_FILE,
            Self::ListFiles => endpoints::LIST_FILES,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CreateFile => "CreateFile",
            Self::ReadFile => "ReadFile",
            Self::UpdateFile => "UpdateFile",
            Self::DeleteFile => "DeleteFile",
            Self::ListFiles => "ListFiles",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: super::message::PROTOCOL_VERSION,
        }
    }
}
