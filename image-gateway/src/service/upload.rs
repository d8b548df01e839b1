use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use bytes::Bytes;
use futures::StreamExt;

use crate::error::AppError;
use crate::storage::ObjectMetadata;
use crate::utils::key::upload_key;
use crate::utils::state::AppState;

pub const FILE_PART: &str = "file";
pub const KEY_PART: &str = "key";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

struct FilePart {
    content_type: String,
    bytes: Bytes,
}

/// POST /upload
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart?;
    let mut file = None;
    let mut key_prefix = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_PART) => {
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field.bytes().await?;
                file = Some(FilePart { content_type, bytes });
            }
            Some(KEY_PART) => key_prefix = Some(field.text().await?),
            _ => continue,
        }
    }

    let file = file.ok_or(AppError::MissingPart(FILE_PART))?;
    let key_prefix = key_prefix.ok_or(AppError::MissingPart(KEY_PART))?;

    let key = upload_key(&key_prefix);
    let location = HeaderValue::from_str(&key).map_err(|_| {
        AppError::BadRequest(format!("key {key_prefix:?} cannot be used as a location"))
    })?;

    let metadata = ObjectMetadata::new(file.content_type, file.bytes.len() as u64);
    let body = file.bytes;
    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(body) }).boxed();
    state
        .storage
        .save(state.bucket(), &key, metadata, stream)
        .await?;

    tracing::info!(%key, "stored uploaded object");
    Ok((StatusCode::CREATED, [(LOCATION, location)]))
}
