//! HTTP RPC server for FileStore.
//!
//! Exposes the four file operations (plus listing) as bincode-bodied `POST`
//! endpoints over axum, dispatching each request to a shared
//! [`filestore_store::FileStore`] on the blocking pool.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, Rpc};
pub use server::FileStoreServer;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use tower::util::ServiceExt;

    use filestore_protocol::*;
    use filestore_store::{DiskFileStore, FileStore, InMemoryFileStore};

    use super::router;

    fn app() -> Router {
        router::build_router(Arc::new(InMemoryFileStore::new()), MAX_MESSAGE_SIZE)
    }

    fn disk_app(dir: &tempfile::TempDir) -> Router {
        let store = DiskFileStore::open_at(dir.path().join("files")).unwrap();
        router::build_router(Arc::new(store), MAX_MESSAGE_SIZE)
    }

    async fn call_raw(app: &Router, path: &str, body: Vec<u8>) -> (u16, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header("content-type", "application/octet-stream")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Call an RPC; `Ok` carries the decoded response, `Err` the decoded error.
    async fn call<Req, Resp>(app: &Router, method: RpcMethod, req: &Req) -> Result<Resp, ErrorResponse>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let body = FileStoreCodec::encode_body(req).unwrap();
        let (status, bytes) = call_raw(app, method.path(), body).await;
        if status == 200 {
            Ok(FileStoreCodec::decode_body(&bytes).unwrap())
        } else {
            let err: ErrorResponse = FileStoreCodec::decode_body(&bytes).unwrap();
            assert_eq!(err.code.http_status(), status);
            Err(err)
        }
    }

    async fn create(app: &Router, file: &[u8], ext: Option<&str>) -> CreateFileResponse {
        call(
            app,
            RpcMethod::CreateFile,
            &CreateFileRequest {
                file: file.to_vec(),
                extension: ext.map(String::from),
            },
        )
        .await
        .unwrap()
    }

    async fn read(app: &Router, id: &str, ext: &str) -> Result<ReadFileResponse, ErrorResponse> {
        call(
            app,
            RpcMethod::ReadFile,
            &ReadFileRequest {
                id: id.into(),
                extension: Some(ext.into()),
            },
        )
        .await
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/v1/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let info: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(info["methods"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn hello_world_lifecycle_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let app = disk_app(&dir);

        let created = create(&app, b"hello", Some(".txt")).await;
        assert_eq!(created.extension, ".txt");
        assert_eq!(created.id.len(), 16);

        let got = read(&app, &created.id, ".txt").await.unwrap();
        assert_eq!(got.file, b"hello");

        let _: UpdateFileResponse = call(
            &app,
            RpcMethod::UpdateFile,
            &UpdateFileRequest {
                id: created.id.clone(),
                file: b"world".to_vec(),
                extension: Some(".txt".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(read(&app, &created.id, ".txt").await.unwrap().file, b"world");

        let _: DeleteFileResponse = call(
            &app,
            RpcMethod::DeleteFile,
            &DeleteFileRequest {
                id: created.id.clone(),
                extension: Some(".txt".into()),
            },
        )
        .await
        .unwrap();

        let err = read(&app, &created.id, ".txt").await.unwrap_err();
        assert_eq!(err.code, StatusCode::NotFound);
    }

    #[tokio::test]
    async fn create_defaults_and_normalizes_extension() {
        let dir = tempfile::tempdir().unwrap();
        for app in [app(), disk_app(&dir)] {
            assert_eq!(create(&app, b"x", None).await.extension, ".txt");
            assert_eq!(create(&app, b"x", Some("")).await.extension, ".txt");
            assert_eq!(create(&app, b"x", Some("pdf")).await.extension, ".pdf");
        }
    }

    #[tokio::test]
    async fn read_unknown_is_not_found() {
        let err = read(&app(), "AAAAAAAAAAAAAAAA", ".txt").await.unwrap_err();
        assert_eq!(err.code, StatusCode::NotFound);
        assert!(err.message.contains("not found"));
    }

    #[tokio::test]
    async fn delete_unknown_is_internal() {
        let dir = tempfile::tempdir().unwrap();
        let err = call::<_, DeleteFileResponse>(
            &disk_app(&dir),
            RpcMethod::DeleteFile,
            &DeleteFileRequest {
                id: "AAAAAAAAAAAAAAAA".into(),
                extension: Some(".txt".into()),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, StatusCode::Internal);
        assert!(err.message.contains("failed to delete"));
    }

    #[tokio::test]
    async fn update_unknown_creates() {
        let dir = tempfile::tempdir().unwrap();
        for app in [app(), disk_app(&dir)] {
            let _: UpdateFileResponse = call(
                &app,
                RpcMethod::UpdateFile,
                &UpdateFileRequest {
                    id: "handpicked".into(),
                    file: b"new".to_vec(),
                    extension: Some(".txt".into()),
                },
            )
            .await
            .unwrap();
            assert_eq!(read(&app, "handpicked", ".txt").await.unwrap().file, b"new");
        }
    }

    #[tokio::test]
    async fn traversal_id_is_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(&disk_app(&dir), "../../etc/passwd", "").await.unwrap_err();
        assert_eq!(err.code, StatusCode::InvalidArgument);
    }

    #[tokio::test]
    async fn garbage_body_is_invalid_argument() {
        let (status, bytes) = call_raw(&app(), endpoints::READ_FILE, vec![0xff; 3]).await;
        assert_eq!(status, 400);
        let err: ErrorResponse = FileStoreCodec::decode_body(&bytes).unwrap();
        assert_eq!(err.code, StatusCode::InvalidArgument);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let store: Arc<dyn FileStore> = Arc::new(InMemoryFileStore::new());
        let app = router::build_router(store, 16);
        let body = FileStoreCodec::encode_body(&CreateFileRequest {
            file: vec![0; 1024],
            extension: None,
        })
        .unwrap();
        let (status, _) = call_raw(&app, endpoints::CREATE_FILE, body).await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn list_reflects_store_contents() {
        let dir = tempfile::tempdir().unwrap();
        for app in [app(), disk_app(&dir)] {
            let a = create(&app, b"a", Some("pdf")).await;
            let b = create(&app, b"b", None).await;

            let listing: ListFilesResponse =
                call(&app, RpcMethod::ListFiles, &ListFilesRequest {})
                    .await
                    .unwrap();
            assert_eq!(listing.files.len(), 2);
            assert!(listing
                .files
                .iter()
                .any(|f| f.id == a.id && f.extension == ".pdf"));
            assert!(listing
                .files
                .iter()
                .any(|f| f.id == b.id && f.extension == ".txt"));
        }
    }

    #[tokio::test]
    async fn multi_dot_extension_lists_identically() {
        let dir = tempfile::tempdir().unwrap();
        for app in [app(), disk_app(&dir)] {
            let _: UpdateFileResponse = call(
                &app,
                RpcMethod::UpdateFile,
                &UpdateFileRequest {
                    id: "bundle".into(),
                    file: b"gz".to_vec(),
                    extension: Some(".tar.gz".into()),
                },
            )
            .await
            .unwrap();
            let listing: ListFilesResponse =
                call(&app, RpcMethod::ListFiles, &ListFilesRequest {})
                    .await
                    .unwrap();
            assert_eq!(listing.files.len(), 1);
            let entry = &listing.files[0];
            assert_eq!((entry.id.as_str(), entry.extension.as_str()), ("bundle.tar", ".gz"));
            assert_eq!(read(&app, &entry.id, &entry.extension).await.unwrap().file, b"gz");
        }
    }

    #[tokio::test]
    async fn binary_content_roundtrips() {
        let app = app();
        let content: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let created = create(&app, &content, Some("bin")).await;
        let got = read(&app, &created.id, &created.extension).await.unwrap();
        assert_eq!(got.file, content);
    }
}
