use bytes::Bytes;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

pub mod driver;
pub mod paths;

/// A stream of object bytes handed to a store on save.
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// Declared metadata of a stored object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub content_type: String,
    pub content_length: u64,
}

impl ObjectMetadata {
    pub fn new(content_type: impl Into<String>, content_length: u64) -> Self {
        Self {
            content_type: content_type.into(),
            content_length,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StoredObject {
    pub metadata: ObjectMetadata,
    pub body: Bytes,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object {0} not found")]
    NotFound(String),

    #[error("key {0} cannot be stored")]
    InvalidKey(String),

    /// A structured failure reported by the backend, carrying its own HTTP status.
    #[error("backend responded with status {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError>;
    async fn save(
        &self,
        bucket: &str,
        key: &str,
        metadata: ObjectMetadata,
        stream: ByteStream,
    ) -> Result<(), StorageError>;
}
