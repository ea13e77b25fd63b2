use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use filestore_protocol::endpoints;
use filestore_store::FileStore;

use crate::handler::{self, AppState};

/// Build the axum router with all FileStore endpoints.
pub fn build_router(store: Arc<dyn FileStore>, max_body_size: usize) -> Router {
    Router::new()
        .route(endpoints::CREATE_FILE, post(handler::create_file))
        .route(endpoints::READ_FILE, post(handler::read_file))
        .route(endpoints::UPDATE_FILE, post(handler::update_file))
        .route(endpoints::DELETE_FILE, post(handler::delete_file))
        .route(endpoints::LIST_FILES, post(handler::list_files))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}
