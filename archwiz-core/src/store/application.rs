use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::PersistedStore;
use crate::application::ApplicationState;
use crate::models::{EntrySource, SolutionParametersPatch};
use crate::storage::StateStorage;

/// Cross-page flow state for one session, persisted under
/// `archwiz.application`. The analyzing and generating flags live only in
/// memory and reset on reopen.
pub struct ApplicationStore {
    inner: PersistedStore<ApplicationState>,
}

impl ApplicationStore {
    pub async fn open(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            inner: PersistedStore::open(storage).await,
        }
    }

    pub fn snapshot(&self) -> Arc<ApplicationState> {
        self.inner.snapshot()
    }

    pub fn state(&self) -> &ApplicationState {
        self.inner.state()
    }

    pub async fn set_entry_source(&mut self, source: Option<EntrySource>) -> Arc<ApplicationState> {
        info!(source = source.map_or("none", |s| s.as_str()), "entry source selected");
        self.inner.apply(|s| s.set_entry_source(source)).await
    }

    pub async fn set_repository_url(&mut self, url: impl Into<String>) -> Arc<ApplicationState> {
        let url = url.into();
        debug!(%url, "repository url set");
        self.inner.apply(|s| s.set_repository_url(url)).await
    }

    pub async fn set_idea_prompt(&mut self, prompt: impl Into<String>) -> Arc<ApplicationState> {
        let prompt = prompt.into();
        debug!(chars = prompt.chars().count(), "idea prompt set");
        self.inner.apply(|s| s.set_idea_prompt(prompt)).await
    }

    pub async fn set_solution_parameters(
        &mut self,
        patch: &SolutionParametersPatch,
    ) -> Arc<ApplicationState> {
        debug!(?patch, "merging solution parameters");
        self.inner.apply(|s| s.set_solution_parameters(patch)).await
    }

    pub async fn complete_review(&mut self) -> Arc<ApplicationState> {
        debug!("review complete");
        self.inner.apply(ApplicationState::complete_review).await
    }

    pub async fn start_analysis(&mut self) -> Arc<ApplicationState> {
        debug!("analysis started");
        self.inner.apply(ApplicationState::start_analysis).await
    }

    pub async fn finish_analysis(&mut self) -> Arc<ApplicationState> {
        debug!("analysis finished");
        self.inner.apply(ApplicationState::finish_analysis).await
    }

    pub async fn start_solution_generation(&mut self) -> Arc<ApplicationState> {
        info!("solution generation started");
        self.inner
            .apply(ApplicationState::start_solution_generation)
            .await
    }

    /// Marks generation done and stamps the results with the current time.
    pub async fn finish_solution_generation(&mut self) -> Arc<ApplicationState> {
        let now = Utc::now();
        info!(at = %now, "solution generation finished");
        self.inner
            .apply(|s| s.finish_solution_generation(now))
            .await
    }

    pub async fn cancel_solution_generation(&mut self) -> Arc<ApplicationState> {
        info!("solution generation cancelled");
        self.inner
            .apply(ApplicationState::cancel_solution_generation)
            .await
    }

    pub async fn reset_results(&mut self) -> Arc<ApplicationState> {
        debug!("results reset");
        self.inner.apply(ApplicationState::reset_results).await
    }

    pub async fn reset_state(&mut self) -> Arc<ApplicationState> {
        debug!("application state reset");
        self.inner.apply(ApplicationState::reset_state).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::models::{ComplexityPreference, Provider, ProviderStrategy, SolutionParameters};
    use crate::store::Persist;
    use crate::store::test_support::UnavailableStorage;
    use crate::storage::MemoryStorage;

    async fn fresh() -> (ApplicationStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = ApplicationStore::open(storage.clone()).await;
        (store, storage)
    }

    #[tokio::test]
    async fn entry_source_switch_clears_review_and_results() {
        let (mut store, _) = fresh().await;
        store.complete_review().await;
        store.finish_solution_generation().await;

        let snapshot = store.set_entry_source(Some(EntrySource::Idea)).await;

        assert_eq!(snapshot.entry_source, Some(EntrySource::Idea));
        assert!(!snapshot.review_complete);
        assert!(!snapshot.has_results);
    }

    #[tokio::test]
    async fn generation_round_trip_sets_timestamp() {
        let (mut store, _) = fresh().await;

        let started = store.start_solution_generation().await;
        assert!(started.is_generating_solution);

        let called_at = Utc::now();
        let finished = store.finish_solution_generation().await;

        assert!(!finished.is_generating_solution);
        assert!(finished.has_results);
        assert!(finished.results_generated.is_some_and(|at| at >= called_at));
    }

    #[tokio::test]
    async fn reset_results_restores_default_parameters() {
        let (mut store, _) = fresh().await;
        store.set_entry_source(Some(EntrySource::Repository)).await;
        store
            .set_solution_parameters(
                &SolutionParametersPatch::new()
                    .complexity(ComplexityPreference::Simple)
                    .include([Provider::Aws]),
            )
            .await;
        store.complete_review().await;
        store.start_solution_generation().await;
        store.finish_solution_generation().await;

        let snapshot = store.reset_results().await;

        assert!(!snapshot.has_results);
        assert_eq!(snapshot.results_generated, None);
        assert!(!snapshot.review_complete);
        assert_eq!(snapshot.solution_parameters, SolutionParameters::default());
        assert_eq!(snapshot.entry_source, Some(EntrySource::Repository));
    }

    #[tokio::test]
    async fn reopen_restores_persisted_subset_only() {
        let (mut store, storage) = fresh().await;
        store.set_entry_source(Some(EntrySource::Repository)).await;
        store.set_repository_url("https://github.com/acme/shop").await;
        store
            .set_solution_parameters(
                &SolutionParametersPatch::new()
                    .strategy(ProviderStrategy::BestOfBreed)
                    .primary(Some(Provider::Aws)),
            )
            .await;
        store.complete_review().await;
        store.start_solution_generation().await;
        store.finish_solution_generation().await;
        store.start_analysis().await;
        store.start_solution_generation().await;
        let saved = store.snapshot();

        let reopened = ApplicationStore::open(storage).await;
        let restored = reopened.state();

        assert_eq!(restored.entry_source, saved.entry_source);
        assert_eq!(restored.entry_source_data, saved.entry_source_data);
        assert_eq!(restored.review_complete, saved.review_complete);
        assert_eq!(restored.solution_parameters, saved.solution_parameters);
        assert_eq!(restored.has_results, saved.has_results);
        assert_eq!(restored.results_generated, saved.results_generated);
        assert!(!restored.is_analyzing);
        assert!(!restored.is_generating_solution);
    }

    #[tokio::test]
    async fn stored_document_omits_phase_flags() {
        let (mut store, storage) = fresh().await;
        store.start_analysis().await;

        let raw = storage
            .load(ApplicationState::STORAGE_KEY)
            .await
            .unwrap()
            .expect("snapshot should be stored");
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert!(stored.get("is_analyzing").is_none());
        assert!(stored.get("is_generating_solution").is_none());
        assert_eq!(stored["entry_source"], json!(null));
        assert_eq!(stored["solution_parameters"]["complexity_preference"], json!("balanced"));
    }

    #[tokio::test]
    async fn unavailable_storage_keeps_flow_in_memory() {
        let mut store = ApplicationStore::open(Arc::new(UnavailableStorage)).await;

        store.set_idea_prompt("ride sharing for dogs").await;
        let snapshot = store.complete_review().await;

        assert!(snapshot.review_complete);
        assert_eq!(
            snapshot.entry_source_data.idea_prompt.as_deref(),
            Some("ride sharing for dogs")
        );
    }
}
