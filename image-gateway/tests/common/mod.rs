//! Shared fixtures for the gateway integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, header};
use bytes::Bytes;
use futures::TryStreamExt;
use http_body_util::BodyExt;
use image_gateway::config::{Config, StorageType};
use image_gateway::storage::{ByteStream, ObjectMetadata, ObjectStore, StorageError, StoredObject};
use image_gateway::utils::jwt::{ADMIN_ROLE, gen_token};
use image_gateway::AppState;

pub const BUCKET: &str = "test-bucket";
pub const JWT_SECRET: &str = "test-secret";
pub const BOUNDARY: &str = "X-IMAGE-GATEWAY-BOUNDARY";

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        bucket: BUCKET.to_string(),
        storage_typ: StorageType::Filesystem,
        root_dir: String::new(),
        s3_endpoint: None,
        context_path: String::new(),
        max_upload_bytes: 1024 * 1024,
        jwt_secret: JWT_SECRET.to_string(),
        jwt_lifetime_secs: 3600,
    }
}

pub fn state_with(config: Config, storage: Arc<dyn ObjectStore>) -> Arc<AppState> {
    Arc::new(AppState::new(config, storage))
}

pub fn admin_token() -> String {
    gen_token(3600, JWT_SECRET, "admin", &[ADMIN_ROLE.to_string()]).unwrap()
}

pub fn user_token() -> String {
    gen_token(3600, JWT_SECRET, "user", &["USER".to_string()]).unwrap()
}

/// A 10 KiB PNG-looking payload.
pub fn original_png() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    bytes.extend((0..10240 - bytes.len()).map(|i| (i % 251) as u8));
    bytes
}

pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\nContent-Type: text/plain\r\n\r\n{value}"
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_request(token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(body: Body) -> Bytes {
    body.collect().await.unwrap().to_bytes()
}

pub async fn body_to_string(body: Body) -> String {
    String::from_utf8(body_bytes(body).await.to_vec()).unwrap()
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Get {
        bucket: String,
        key: String,
    },
    Save {
        bucket: String,
        key: String,
        metadata: ObjectMetadata,
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Backend(u16),
    Unreadable,
}

/// In-memory store recording every call that reaches it.
#[derive(Default)]
pub struct RecordingStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<Failure>>,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(failure: Failure) -> Arc<Self> {
        let store = Self::default();
        *store.failure.lock().unwrap() = Some(failure);
        Arc::new(store)
    }

    pub fn insert(&self, bucket: &str, key: &str, content_type: &str, bytes: &[u8]) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                metadata: ObjectMetadata::new(content_type, bytes.len() as u64),
                body: Bytes::copy_from_slice(bytes),
            },
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn injected_failure(&self, key: &str) -> Option<StorageError> {
        self.failure.lock().unwrap().map(|failure| match failure {
            Failure::Backend(status) => StorageError::Backend {
                status,
                message: format!("injected failure for {key}"),
            },
            Failure::Unreadable => StorageError::Other(format!("{key} is unreadable")),
        })
    }
}

#[async_trait::async_trait]
impl ObjectStore for RecordingStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        self.calls.lock().unwrap().push(Call::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        if let Some(err) = self.injected_failure(key) {
            return Err(err);
        }
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn save(
        &self,
        bucket: &str,
        key: &str,
        metadata: ObjectMetadata,
        stream: ByteStream,
    ) -> Result<(), StorageError> {
        let chunks: Vec<Bytes> = stream.try_collect().await?;
        let bytes = chunks.concat();
        self.calls.lock().unwrap().push(Call::Save {
            bucket: bucket.to_string(),
            key: key.to_string(),
            metadata: metadata.clone(),
            bytes: bytes.clone(),
        });
        if let Some(err) = self.injected_failure(key) {
            return Err(err);
        }
        self.insert(bucket, key, &metadata.content_type, &bytes);
        Ok(())
    }
}
