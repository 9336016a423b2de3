use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::registry::{StorageConfig, StorageFactory};
use super::state_storage::{StateStorage, StorageError};

/// One JSON file per key inside a directory.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(StorageError::Configuration(format!(
                "key '{key}' cannot be used as a file name"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl StateStorage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Backend(format!(
                "failed to read '{}': {e}",
                path.display()
            ))),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).await.map_err(|e| {
            StorageError::Backend(format!(
                "failed to create directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        fs::write(&tmp, value).await.map_err(|e| {
            StorageError::Backend(format!("failed to write '{}': {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            StorageError::Backend(format!("failed to replace '{}': {e}", path.display()))
        })?;

        debug!(path = %path.display(), bytes = value.len(), "state file written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Backend(format!(
                "failed to remove '{}': {e}",
                path.display()
            ))),
        }
    }
}

/// [`StorageFactory`] for the `"file"` backend.
///
/// The connection string is the directory holding the state files; it is
/// created on first save.
pub struct FileStorageFactory;

#[async_trait]
impl StorageFactory for FileStorageFactory {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn create(&self, config: &StorageConfig) -> Result<Arc<dyn StateStorage>, StorageError> {
        if config.connection_string.trim().is_empty() {
            return Err(StorageError::Configuration(
                "file backend needs a directory as its connection string".to_string(),
            ));
        }
        Ok(Arc::new(FileStorage::new(&config.connection_string)))
    }
}
