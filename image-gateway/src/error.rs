use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::storage::StorageError;
use crate::utils::key::unique_token;

#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("required request part '{0}' is not present")]
    MissingPart(&'static str),

    #[error("malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("multipart request rejected: {0}")]
    MultipartRejected(#[from] MultipartRejection),

    #[error("invalid request path: {0}")]
    Path(#[from] PathRejection),

    #[error("could not get key {key} from storage: {source}")]
    ObjectUnavailable {
        key: String,
        #[source]
        source: StorageError,
    },

    // Authorization errors
    #[error("access denied: {0}")]
    Forbidden(String),

    // Backend errors, re-surfaced with the backend's own status when it has one
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    // Internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Read failures surface as a client error, except when the backend
    /// answered with a status of its own.
    pub fn object_unavailable(key: &str, source: StorageError) -> Self {
        match source {
            StorageError::Backend { .. } => AppError::Storage(source),
            source => AppError::ObjectUnavailable {
                key: key.to_string(),
                source,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MissingPart(_) | Self::ObjectUnavailable { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Multipart(e) => e.status(),
            Self::MultipartRejected(e) => e.status(),
            Self::Path(e) => e.status(),
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Storage(StorageError::Backend { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Storage(StorageError::InvalidKey(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The short, user-visible description of the failure class.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "Access denied",
            Self::Storage(StorageError::Backend { .. }) => "Storage error",
            _ if self.status_code().is_client_error() => "Invalid request",
            _ => "Internal Server Error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = unique_token();
        let status_code = self.status_code();
        tracing::error!(
            %error_id,
            status = status_code.as_u16(),
            error = ?self,
            "{}",
            self
        );

        (status_code, format!("{} - {}", self.category(), error_id)).into_response()
    }
}
