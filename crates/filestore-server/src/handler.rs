use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use filestore_protocol::{
    CreateFileRequest, CreateFileResponse, DeleteFileRequest, DeleteFileResponse, FileEntry,
    FileStoreCodec, HealthResponse, ListFilesRequest, ListFilesResponse, ReadFileRequest,
    ReadFileResponse, RpcMethod, UpdateFileRequest, UpdateFileResponse,
};
use filestore_store::{FileStore, StoreResult};

use crate::error::{ServerError, ServerResult};

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

/// Shared handler state: the store every request dispatches to.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn FileStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Run a blocking store call off the async executor.
    async fn run<T, F>(&self, method: RpcMethod, f: F) -> ServerResult<T>
    where
        F: FnOnce(&dyn FileStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(format!("{method} task failed: {e}")))?;
        result.map_err(|e| {
            warn!(method = %method, error = %e, "request failed");
            ServerError::from(e)
        })
    }
}

/// Bincode-encoded RPC body, used as both extractor and response.
pub struct Rpc<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Rpc<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Rpc(FileStoreCodec::decode_body(&bytes)?))
    }
}

impl<T: Serialize> IntoResponse for Rpc<T> {
    fn into_response(self) -> Response {
        match FileStoreCodec::encode_body(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, OCTET_STREAM)], body).into_response(),
            Err(e) => ServerError::from(e).into_response(),
        }
    }
}

pub async fn create_file(
    State(state): State<AppState>,
    Rpc(req): Rpc<CreateFileRequest>,
) -> ServerResult<Rpc<CreateFileResponse>> {
    let key = state
        .run(RpcMethod::CreateFile, move |store| {
            store.create(&req.file, req.extension.as_deref())
        })
        .await?;
    debug!(id = %key.id, ext = %key.extension, "CreateFile");
    Ok(Rpc(key.into()))
}

pub async fn read_file(
    State(state): State<AppState>,
    Rpc(req): Rpc<ReadFileRequest>,
) -> ServerResult<Rpc<ReadFileResponse>> {
    let key = req.key()?;
    let file = state
        .run(RpcMethod::ReadFile, move |store| store.read(&key))
        .await?;
    Ok(Rpc(ReadFileResponse { file }))
}

pub async fn update_file(
    State(state): State<AppState>,
    Rpc(req): Rpc<UpdateFileRequest>,
) -> ServerResult<Rpc<UpdateFileResponse>> {
    let key = req.key()?;
    state
        .run(RpcMethod::UpdateFile, move |store| store.update(&key, &req.file))
        .await?;
    Ok(Rpc(UpdateFileResponse {}))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Rpc(req): Rpc<DeleteFileRequest>,
) -> ServerResult<Rpc<DeleteFileResponse>> {
    let key = req.key()?;
    state
        .run(RpcMethod::DeleteFile, move |store| store.delete(&key))
        .await?;
    Ok(Rpc(DeleteFileResponse {}))
}

pub async fn list_files(
    State(state): State<AppState>,
    Rpc(_req): Rpc<ListFilesRequest>,
) -> ServerResult<Rpc<ListFilesResponse>> {
    let keys = state
        .run(RpcMethod::ListFiles, |store| store.list())
        .await?;
    Ok(Rpc(ListFilesResponse {
        files: keys.into_iter().map(FileEntry::from).collect(),
    }))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    let methods: Vec<&str> = RpcMethod::ALL.iter().map(|m| m.name()).collect();
    Json(json!({
        "name": "filestore-server",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol_version": filestore_protocol::PROTOCOL_VERSION,
        "methods": methods,
    }))
}
