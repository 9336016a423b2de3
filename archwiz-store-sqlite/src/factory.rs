use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use archwiz_core::{StateStorage, StorageConfig, StorageError, StorageFactory};

use crate::storage::SqliteStorage;

/// [`StorageFactory`] for SQLite.
///
/// Register this with an [`archwiz_core::StorageRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use archwiz_core::StorageRegistry;
/// use archwiz_store_sqlite::SqliteStorageFactory;
///
/// let mut registry = StorageRegistry::new();
/// registry.register(Box::new(SqliteStorageFactory));
/// ```
pub struct SqliteStorageFactory;

#[async_trait]
impl StorageFactory for SqliteStorageFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string`.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"archwiz.db"`. The file is created if it
    ///   does not exist.
    /// * `":memory:"`: an ephemeral in-memory database (useful for tests).
    async fn create(&self, config: &StorageConfig) -> Result<Arc<dyn StateStorage>, StorageError> {
        if config.connection_string.trim().is_empty() {
            return Err(StorageError::Configuration(
                "sqlite backend needs a database path or \":memory:\"".to_string(),
            ));
        }

        let storage = SqliteStorage::new(&config.connection_string)
            .await
            .map_err(|e| StorageError::Connection(format!("{e:#}")))?;
        storage
            .run_migrations()
            .await
            .map_err(|e| StorageError::Backend(format!("{e:#}")))?;

        info!(database = %config.connection_string, "sqlite state storage ready");
        Ok(Arc::new(storage))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(connection_string: &str) -> StorageConfig {
        StorageConfig {
            backend: "sqlite".to_string(),
            connection_string: connection_string.to_string(),
        }
    }

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStorageFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_storage() {
        let result = SqliteStorageFactory.create(&config(":memory:")).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory storage: {:#?}",
            result.err()
        );
    }

    #[tokio::test]
    async fn empty_connection_string_is_configuration_error() {
        let result = SqliteStorageFactory.create(&config("  ")).await;
        assert!(matches!(result, Err(StorageError::Configuration(_))));
    }

    #[tokio::test]
    async fn unopenable_path_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("state.db");

        let result = SqliteStorageFactory
            .create(&config(&path.to_string_lossy()))
            .await;
        assert!(matches!(result, Err(StorageError::Connection(_))));
    }

    #[tokio::test]
    async fn file_database_keeps_values_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let cfg = config(&path.to_string_lossy());

        let first = SqliteStorageFactory.create(&cfg).await.unwrap();
        first
            .save("archwiz.questionnaire", r#"{"current_step":3}"#)
            .await
            .unwrap();
        drop(first);

        let second = SqliteStorageFactory.create(&cfg).await.unwrap();
        assert_eq!(
            second.load("archwiz.questionnaire").await.unwrap().as_deref(),
            Some(r#"{"current_step":3}"#)
        );
    }
}
