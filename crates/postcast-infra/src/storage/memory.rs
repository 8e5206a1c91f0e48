//! In-memory storage implementation - used when no data directory is configured and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postcast_core::ports::{KeyValueStorage, StorageError};

/// In-memory key-value storage using a HashMap with async RwLock.
///
/// An optional byte quota mimics the browser storage limit: a write whose value
/// would push the total past the quota is rejected and the old value is kept.
/// Note: Data is lost on process restart.
pub struct InMemoryStorage {
    store: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota: None,
        }
    }

    /// Limit the total size of all stored values to `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Bytes currently held across all keys.
    pub async fn used_bytes(&self) -> usize {
        let store = self.store.read().await;
        store.values().map(String::len).sum()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStorage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;

        if let Some(quota) = self.quota {
            let others: usize = store
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let available = quota.saturating_sub(others);
            if value.len() > available {
                tracing::warn!(key = %key, requested = value.len(), available, "Storage quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    requested: value.len(),
                    quota,
                });
            }
        }

        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}
