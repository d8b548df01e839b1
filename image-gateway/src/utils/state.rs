use std::sync::Arc;

use crate::config::{Config, StorageType};
use crate::storage::{ObjectStore, driver::filesystem::FilesystemStorage};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ObjectStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn ObjectStore>) -> Self {
        AppState {
            storage,
            config: Arc::new(config),
        }
    }

    /// Builds the storage backend named by the configuration.
    pub async fn from_config(config: Config) -> Self {
        let storage_backend: Arc<dyn ObjectStore> = match config.storage_typ {
            StorageType::Filesystem => Arc::new(FilesystemStorage::new(&config.root_dir)),
            #[cfg(feature = "s3")]
            StorageType::S3 => Arc::new(
                crate::storage::driver::s3::S3Storage::from_env(config.s3_endpoint.as_deref())
                    .await,
            ),
        };
        AppState::new(config, storage_backend)
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}
