//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use postcast_core::ports::KeyValueStorage;
use postcast_core::{DomainError, Notifier, PostStore};
use postcast_infra::InMemoryStorage;

#[cfg(feature = "file-storage")]
use postcast_infra::FileStorage;

use crate::config::{AppConfig, StorageBackend};
use crate::middleware::error::AppError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostStore>,
    pub max_image_bytes: usize,
}

impl AppState {
    /// Build the application state with the configured storage backend.
    pub async fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let storage = Self::storage(&config.storage);
        let state = Self::with_storage(storage, config.toast_ttl, config.max_image_bytes).await?;

        tracing::info!("Application state initialized");
        Ok(state)
    }

    pub async fn with_storage(
        storage: Arc<dyn KeyValueStorage>,
        toast_ttl: Duration,
        max_image_bytes: usize,
    ) -> Result<Self, DomainError> {
        let store = PostStore::open(storage, Notifier::new(toast_ttl)).await?;
        Ok(Self {
            store: Arc::new(store),
            max_image_bytes,
        })
    }

    fn storage(backend: &StorageBackend) -> Arc<dyn KeyValueStorage> {
        match backend {
            StorageBackend::Memory { quota } => {
                tracing::warn!("Using in-memory storage. Posts are lost on restart.");
                match quota {
                    Some(bytes) => Arc::new(InMemoryStorage::with_quota(*bytes)),
                    None => Arc::new(InMemoryStorage::new()),
                }
            }
            #[cfg(feature = "file-storage")]
            StorageBackend::File { dir } => {
                tracing::info!(dir = %dir.display(), "Using file storage");
                Arc::new(FileStorage::new(dir.clone()))
            }
            #[cfg(not(feature = "file-storage"))]
            StorageBackend::File { .. } => {
                tracing::warn!("Built without file-storage feature - using in-memory storage");
                Arc::new(InMemoryStorage::new())
            }
        }
    }

    /// Body limit for raw uploads.
    pub fn payload_config(&self) -> web::PayloadConfig {
        web::PayloadConfig::new(self.max_image_bytes)
    }

    /// JSON limit sized for a form carrying a base64 image, with problem-details errors.
    pub fn json_config(&self) -> web::JsonConfig {
        web::JsonConfig::default()
            .limit(self.max_image_bytes.saturating_mul(2))
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
    }
}
