use std::path::{Path, PathBuf};

use crate::storage::paths::PathManager;
use crate::storage::{ByteStream, ObjectMetadata, ObjectStore, StorageError, StoredObject};

use bytes::Bytes;
use tokio::{
    fs::{self, File, create_dir_all},
    io::{self, AsyncWriteExt, BufWriter},
};
use tokio_util::io::StreamReader;

pub struct FilesystemStorage {
    path_manager: PathManager,
}

impl FilesystemStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        FilesystemStorage {
            path_manager: PathManager::new(root),
        }
    }

    async fn crate_path(&self, path: PathBuf) -> io::Result<PathBuf> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent).await?;
        }
        Ok(path)
    }
}

fn not_found_on_missing(key: &str, err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(key.to_string())
    } else {
        StorageError::Io(err)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FilesystemStorage {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        let (Some(data_path), Some(meta_path)) = (
            self.path_manager.object_data_path(bucket, key),
            self.path_manager.object_meta_path(bucket, key),
        ) else {
            return Err(StorageError::NotFound(key.to_string()));
        };

        let meta = fs::read(&meta_path)
            .await
            .map_err(|e| not_found_on_missing(key, e))?;
        let metadata: ObjectMetadata = serde_json::from_slice(&meta)
            .map_err(|e| StorageError::Other(format!("corrupt metadata for {key}: {e}")))?;
        let body = fs::read(&data_path)
            .await
            .map_err(|e| not_found_on_missing(key, e))?;

        tracing::debug!(bucket, key, size = body.len(), "read object from filesystem");
        Ok(StoredObject {
            metadata,
            body: Bytes::from(body),
        })
    }

    async fn save(
        &self,
        bucket: &str,
        key: &str,
        metadata: ObjectMetadata,
        stream: ByteStream,
    ) -> Result<(), StorageError> {
        let (Some(data_path), Some(meta_path)) = (
            self.path_manager.object_data_path(bucket, key),
            self.path_manager.object_meta_path(bucket, key),
        ) else {
            return Err(StorageError::InvalidKey(key.to_string()));
        };

        // Convert the stream into an `AsyncRead`.
        let body_reader = StreamReader::new(stream);
        futures::pin_mut!(body_reader);

        // Create the file. `File` implements `AsyncWrite`.
        let file = File::create(self.crate_path(data_path).await?).await?;
        let mut file_writer = BufWriter::new(file);

        // Copy the body into the file.
        let written = tokio::io::copy(&mut body_reader, &mut file_writer).await?;
        file_writer.flush().await?;

        let meta = serde_json::to_vec(&metadata)
            .map_err(|e| StorageError::Other(format!("cannot encode metadata for {key}: {e}")))?;
        fs::write(meta_path, meta).await?;

        tracing::debug!(bucket, key, written, "stored object on filesystem");
        Ok(())
    }
}
