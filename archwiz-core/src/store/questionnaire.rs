use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::PersistedStore;
use crate::models::{
    ApplicationField, BudgetField, DataField, GeographicField, ScalingField, Section,
    SecurityField,
};
use crate::questionnaire::{QuestionnaireError, QuestionnaireState};
use crate::storage::StateStorage;

/// The questionnaire answers for one session, persisted under
/// `archwiz.questionnaire`.
///
/// Every mutator returns the newly published snapshot.
pub struct QuestionnaireStore {
    inner: PersistedStore<QuestionnaireState>,
}

impl QuestionnaireStore {
    pub async fn open(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            inner: PersistedStore::open(storage).await,
        }
    }

    pub fn snapshot(&self) -> Arc<QuestionnaireState> {
        self.inner.snapshot()
    }

    pub fn state(&self) -> &QuestionnaireState {
        self.inner.state()
    }

    pub async fn next_step(&mut self) -> Arc<QuestionnaireState> {
        let snapshot = self.inner.apply(QuestionnaireState::next_step).await;
        debug!(step = snapshot.current_step, "advanced step");
        snapshot
    }

    pub async fn prev_step(&mut self) -> Arc<QuestionnaireState> {
        let snapshot = self.inner.apply(QuestionnaireState::prev_step).await;
        debug!(step = snapshot.current_step, "went back a step");
        snapshot
    }

    /// Unchecked jump; see [`QuestionnaireState::go_to_step`].
    pub async fn go_to_step(&mut self, step: usize) -> Arc<QuestionnaireState> {
        debug!(step, "jumping to step");
        self.inner.apply(|s| s.go_to_step(step)).await
    }

    pub async fn try_go_to_step(
        &mut self,
        step: usize,
    ) -> Result<Arc<QuestionnaireState>, QuestionnaireError> {
        self.inner.try_apply(|s| s.try_go_to_step(step)).await
    }

    pub async fn edit_section(&mut self, section: Section) -> Arc<QuestionnaireState> {
        debug!(%section, "editing section");
        self.inner.apply(|s| s.edit_section(section)).await
    }

    pub async fn update_application(&mut self, field: ApplicationField) -> Arc<QuestionnaireState> {
        debug!(section = "application", field = field.name(), "updating field");
        self.inner.apply(|s| s.update_application(field)).await
    }

    pub async fn update_scaling(&mut self, field: ScalingField) -> Arc<QuestionnaireState> {
        debug!(section = "scaling", field = field.name(), "updating field");
        self.inner.apply(|s| s.update_scaling(field)).await
    }

    pub async fn update_data(&mut self, field: DataField) -> Arc<QuestionnaireState> {
        debug!(section = "data", field = field.name(), "updating field");
        self.inner.apply(|s| s.update_data(field)).await
    }

    pub async fn update_geographic(&mut self, field: GeographicField) -> Arc<QuestionnaireState> {
        debug!(section = "geographic", field = field.name(), "updating field");
        self.inner.apply(|s| s.update_geographic(field)).await
    }

    pub async fn update_security(&mut self, field: SecurityField) -> Arc<QuestionnaireState> {
        debug!(section = "security", field = field.name(), "updating field");
        self.inner.apply(|s| s.update_security(field)).await
    }

    pub async fn update_budget(&mut self, field: BudgetField) -> Arc<QuestionnaireState> {
        debug!(section = "budget", field = field.name(), "updating field");
        self.inner.apply(|s| s.update_budget(field)).await
    }

    /// Untyped single-field update; see [`QuestionnaireState::set_field`].
    pub async fn set_field(
        &mut self,
        section: Section,
        field: &str,
        value: Value,
    ) -> Result<Arc<QuestionnaireState>, QuestionnaireError> {
        self.inner
            .try_apply(|s| s.set_field(section, field, value))
            .await
    }

    pub async fn reset_section(&mut self, section: Section) -> Arc<QuestionnaireState> {
        debug!(%section, "resetting section");
        self.inner.apply(|s| s.reset_section(section)).await
    }

    pub async fn reset_all(&mut self) -> Arc<QuestionnaireState> {
        debug!("resetting questionnaire");
        self.inner.apply(QuestionnaireState::reset_all).await
    }

    pub async fn complete_questionnaire(&mut self) -> Arc<QuestionnaireState> {
        debug!("questionnaire marked complete");
        self.inner
            .apply(QuestionnaireState::complete_questionnaire)
            .await
    }
}
