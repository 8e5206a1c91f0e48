use async_trait::async_trait;

/// Key-value storage trait - abstraction over durable local storage backends
/// (file system, in-memory).
///
/// Values are opaque text; callers own the serialization format.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage quota exceeded: {requested} bytes requested, quota is {quota} bytes")]
    QuotaExceeded { requested: usize, quota: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
