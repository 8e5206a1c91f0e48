//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use postcast_core::notifier::DEFAULT_TTL;

/// Default upload limit for `/api/images`.
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Where the post collection is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Durable, one file per key under `dir`.
    File { dir: PathBuf },
    /// Process memory, optionally capped at `quota` bytes.
    Memory { quota: Option<usize> },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub toast_ttl: Duration,
    pub max_image_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let data_dir = lookup("POSTCAST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let storage = match lookup("POSTCAST_STORAGE")
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("memory") => StorageBackend::Memory {
                quota: parsed("POSTCAST_STORAGE_QUOTA").map(|q| q as usize),
            },
            Some("file") | None => StorageBackend::File { dir: data_dir },
            Some(other) => {
                tracing::warn!(backend = %other, "Unknown POSTCAST_STORAGE, using file storage");
                StorageBackend::File { dir: data_dir }
            }
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage,
            toast_ttl: parsed("POSTCAST_TOAST_MS")
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TTL),
            max_image_bytes: parsed("POSTCAST_MAX_IMAGE_BYTES")
                .map(|b| b as usize)
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
        }
    }
}
