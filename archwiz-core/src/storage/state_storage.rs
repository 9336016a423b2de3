use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("unknown storage backend '{requested}'; available: {available}")]
    UnknownBackend { requested: String, available: String },
}

/// Durable key-value storage for store snapshots.
///
/// Values are opaque strings (JSON documents in practice). A `save` must be
/// visible to a later `load` of the same key on the same instance.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Returns `None` when nothing has been saved under `key`.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value under `key`.
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
