use axum::http::{header, StatusCode as HttpStatus};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use filestore_protocol::{ErrorResponse, FileStoreCodec, ProtocolError, StatusCode};
use filestore_store::StoreError;
use filestore_types::TypeError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] TypeError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// The status surfaced to the caller for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound(_)) => StatusCode::NotFound,
            Self::Store(StoreError::InvalidKey(_)) => StatusCode::InvalidArgument,
            Self::Store(_) => StatusCode::Internal,
            Self::InvalidArgument(_) | Self::BadRequest(_) => StatusCode::InvalidArgument,
            Self::Protocol(ProtocolError::Serialization(_)) => StatusCode::Internal,
            Self::Protocol(_) => StatusCode::InvalidArgument,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::Internal,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let code = self.status();
        let http = HttpStatus::from_u16(code.http_status()).unwrap_or(HttpStatus::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            code,
            message: self.to_string(),
        };
        match FileStoreCodec::encode_body(&body) {
            Ok(bytes) => (
                http,
                [(header::CONTENT_TYPE, crate::handler::OCTET_STREAM)],
                bytes,
            )
                .into_response(),
            Err(_) => (http, body.message).into_response(),
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
