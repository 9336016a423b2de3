use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::state_storage::{StateStorage, StorageError};

/// The `[storage]` table: which backend holds the wizard state, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: String,
    /// A directory for `file`, a database path or `:memory:` for `sqlite`.
    /// The `memory` backend ignores it.
    pub connection_string: String,
}

impl StorageConfig {
    pub fn new(backend: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            connection_string: connection_string.into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new("sqlite", "archwiz.db")
    }
}

/// Opens the [`StateStorage`] for one backend name.
#[async_trait]
pub trait StorageFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn create(&self, config: &StorageConfig) -> Result<Arc<dyn StateStorage>, StorageError>;
}

/// The backends a binary was built with, looked up by name.
#[derive(Default)]
pub struct StorageRegistry {
    backends: BTreeMap<&'static str, Box<dyn StorageFactory>>,
}

impl StorageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A later factory with the same name takes over.
    pub fn register(&mut self, factory: Box<dyn StorageFactory>) {
        self.backends.insert(factory.backend_name(), factory);
    }

    pub fn available_backends(&self) -> Vec<&'static str> {
        self.backends.keys().copied().collect()
    }

    /// Open the storage the questionnaire and the solution flow will share.
    pub async fn create(
        &self,
        config: &StorageConfig,
    ) -> Result<Arc<dyn StateStorage>, StorageError> {
        match self.backends.get(config.backend.as_str()) {
            Some(factory) => factory.create(config).await,
            None => Err(StorageError::UnknownBackend {
                requested: config.backend.clone(),
                available: self.available_backends().join(", "),
            }),
        }
    }
}
