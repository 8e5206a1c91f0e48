//! Persistence adapter - keeps the post collection in one storage slot.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::Post;
use crate::ports::{KeyValueStorage, StorageError};

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "scheduledPosts";

/// Reads and writes the whole post collection as a JSON array under one key.
#[derive(Clone)]
pub struct PostPersistence {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl PostPersistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored collection.
    ///
    /// Absent or corrupt data yields an empty collection. A failed read is an error.
    pub async fn load(&self) -> Result<Vec<Post>, StorageError> {
        let Some(raw) = self.storage.get(&self.key).await? else {
            tracing::debug!(key = %self.key, "No stored posts");
            return Ok(Vec::new());
        };

        let posts: Vec<Post> = match serde_json::from_str(&raw) {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Stored posts are not valid, starting empty"
                );
                return Ok(Vec::new());
            }
        };

        let mut seen = HashSet::new();
        let total = posts.len();
        let posts: Vec<Post> = posts
            .into_iter()
            .filter(|post| seen.insert(post.id.clone()))
            .collect();
        if posts.len() < total {
            tracing::warn!(
                key = %self.key,
                dropped = total - posts.len(),
                "Dropped posts with duplicate ids"
            );
        }

        tracing::debug!(key = %self.key, count = posts.len(), "Loaded stored posts");
        Ok(posts)
    }

    /// Serialize the full collection and overwrite the stored value.
    pub async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(posts).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &raw).await?;

        tracing::debug!(
            key = %self.key,
            count = posts.len(),
            bytes = raw.len(),
            "Saved posts"
        );
        Ok(())
    }
}
