//! Persisted stores.
//!
//! A store owns the current snapshot of one state type and a handle to
//! durable storage. Each mutation clones the snapshot, applies the
//! transition, publishes the result and then writes the persisted subset
//! back under the state's fixed key. Storage failures are logged and the
//! store keeps working in memory.

mod application;
mod questionnaire;

pub use application::ApplicationStore;
pub use questionnaire::QuestionnaireStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::storage::StateStorage;

/// Ties a state type to its storage key and persisted-field subset.
pub trait Persist: Default + Clone + Send + Sync + 'static {
    const STORAGE_KEY: &'static str;

    /// Only these fields are written and restored.
    type Persisted: Serialize + DeserializeOwned;

    fn to_persisted(&self) -> Self::Persisted;
    fn from_persisted(persisted: Self::Persisted) -> Self;
}

pub(crate) struct PersistedStore<S: Persist> {
    state: Arc<S>,
    storage: Arc<dyn StateStorage>,
}

impl<S: Persist> PersistedStore<S> {
    /// Load the last saved snapshot, falling back to defaults when nothing is
    /// stored, the stored value is corrupt, or storage is unreachable.
    pub(crate) async fn open(storage: Arc<dyn StateStorage>) -> Self {
        let state = match storage.load(S::STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<S::Persisted>(&raw) {
                Ok(persisted) => {
                    debug!(key = S::STORAGE_KEY, "restored stored snapshot");
                    S::from_persisted(persisted)
                }
                Err(error) => {
                    warn!(key = S::STORAGE_KEY, %error, "stored snapshot is corrupt; using defaults");
                    S::default()
                }
            },
            Ok(None) => S::default(),
            Err(error) => {
                warn!(key = S::STORAGE_KEY, %error, "storage unavailable; using defaults");
                S::default()
            }
        };

        Self {
            state: Arc::new(state),
            storage,
        }
    }

    pub(crate) fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.state)
    }

    pub(crate) fn state(&self) -> &S {
        &self.state
    }

    /// Apply an infallible transition, publish it and persist it.
    pub(crate) async fn apply(&mut self, transition: impl FnOnce(&mut S)) -> Arc<S> {
        let mut next = S::clone(&self.state);
        transition(&mut next);
        self.state = Arc::new(next);
        self.persist().await;
        self.snapshot()
    }

    /// Apply a fallible transition. On error nothing is published or written.
    pub(crate) async fn try_apply<E>(
        &mut self,
        transition: impl FnOnce(&mut S) -> Result<(), E>,
    ) -> Result<Arc<S>, E> {
        let mut next = S::clone(&self.state);
        transition(&mut next)?;
        self.state = Arc::new(next);
        self.persist().await;
        Ok(self.snapshot())
    }

    async fn persist(&self) {
        let json = match serde_json::to_string(&self.state.to_persisted()) {
            Ok(json) => json,
            Err(error) => {
                warn!(key = S::STORAGE_KEY, %error, "failed to serialize snapshot; not persisted");
                return;
            }
        };

        if let Err(error) = self.storage.save(S::STORAGE_KEY, &json).await {
            warn!(key = S::STORAGE_KEY, %error, "failed to persist snapshot; continuing in memory");
        }
    }
}
