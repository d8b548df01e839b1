use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{Response, StatusCode, header};

use crate::error::AppError;
use crate::utils::key::resolve_path_key;
use crate::utils::state::AppState;

pub const IMAGE_PREFIX: &str = "image/";
pub const DOWNLOAD_PREFIX: &str = "download/";

/// GET /image/<key>
pub async fn get_image_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response<Body>, AppError> {
    let Path(tail) = path?;
    fetch_object(&state, IMAGE_PREFIX, &tail).await
}

/// GET /download/<key>
pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response<Body>, AppError> {
    let Path(tail) = path?;
    fetch_object(&state, DOWNLOAD_PREFIX, &tail).await
}

async fn fetch_object(
    state: &AppState,
    prefix: &str,
    tail: &str,
) -> Result<Response<Body>, AppError> {
    let path = format!("{prefix}{tail}");
    let key = resolve_path_key(&path, prefix)
        .ok_or_else(|| AppError::BadRequest(format!("no key in path {path}")))?;

    let object = state
        .storage
        .get(state.bucket(), key)
        .await
        .map_err(|e| AppError::object_unavailable(key, e))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, object.metadata.content_type)
        .header(header::CONTENT_LENGTH, object.body.len())
        .body(Body::from(object.body))
        .map_err(|e| AppError::Internal(format!("cannot build response for {key}: {e}")))
}
