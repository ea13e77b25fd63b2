use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use filestore_store::{DiskFileStore, FileStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// FileStore RPC server.
pub struct FileStoreServer {
    config: ServerConfig,
    store: Arc<dyn FileStore>,
}

impl FileStoreServer {
    /// Open the disk store at `config.store.root` (creating it if absent).
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store = DiskFileStore::open(config.store.clone())?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Serve an arbitrary backend.
    pub fn with_store(config: ServerConfig, store: Arc<dyn FileStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn FileStore> {
        &self.store
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.store), self.config.max_body_size)
    }

    /// Bind `config.bind_addr` and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let addr = listener.local_addr()?;
        tracing::info!(
            "FileStore server listening on {} (root: {})",
            addr,
            self.config.store.root.display()
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("FileStore server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}
