use crate::storage::{ByteStream, ObjectMetadata, ObjectStore, StorageError, StoredObject};

use aws_sdk_s3::Client;
use aws_sdk_s3::config::BehaviorVersion;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream as S3ByteStream;
use futures::TryStreamExt;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    pub fn new(client: Client) -> Self {
        S3Storage { client }
    }

    /// Builds a client from the ambient AWS configuration, optionally pointed
    /// at an S3-compatible endpoint with path-style addressing.
    pub async fn from_env(endpoint: Option<&str>) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        S3Storage::new(Client::from_conf(builder.build()))
    }
}

/// Re-surfaces the HTTP status of a backend response when there is one.
fn backend_error<E>(err: SdkError<E, HttpResponse>) -> StorageError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    match err.raw_response().map(|response| response.status().as_u16()) {
        Some(status) if status >= 400 => StorageError::Backend { status, message },
        _ => StorageError::Other(message),
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Storage {
    async fn get(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        let output = match self.client.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(SdkError::ServiceError(err)) if matches!(err.err(), GetObjectError::NoSuchKey(_)) => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(err) => return Err(backend_error(err)),
        };

        let content_type = output
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Other(format!("cannot read {key}: {e}")))?
            .into_bytes();

        tracing::debug!(bucket, key, size = body.len(), "read object from s3");
        Ok(StoredObject {
            metadata: ObjectMetadata::new(content_type, body.len() as u64),
            body,
        })
    }

    async fn save(
        &self,
        bucket: &str,
        key: &str,
        metadata: ObjectMetadata,
        mut stream: ByteStream,
    ) -> Result<(), StorageError> {
        let mut buffer = Vec::with_capacity(metadata.content_length as usize);
        while let Some(chunk) = stream.try_next().await? {
            buffer.extend_from_slice(&chunk);
        }

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(metadata.content_type)
            .content_length(metadata.content_length as i64)
            .body(S3ByteStream::from(buffer))
            .send()
            .await
            .map_err(backend_error)?;

        tracing::debug!(bucket, key, "stored object in s3");
        Ok(())
    }
}
