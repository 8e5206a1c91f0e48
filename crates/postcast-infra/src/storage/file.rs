//! File-backed storage - one JSON file per key under a data directory.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use postcast_core::ports::{KeyValueStorage, StorageError};

/// Durable key-value storage.
///
/// Each key maps to `<dir>/<key>.json`. Writes go to `<key>.json.tmp`, which is
/// synced and renamed over the target, so a crash never leaves a torn value. A
/// failed write removes the temp file.
pub struct FileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Use `dir` as the data directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

async fn write_and_rename(tmp_path: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path).await?;
    file.write_all(value.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(tmp_path, path).await
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.dir).await?;

        if let Err(e) = write_and_rename(&tmp_path, &path, value).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temp file");
            }
            return Err(e.into());
        }

        tracing::debug!(key = %key, bytes = value.len(), path = %path.display(), "Value written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
