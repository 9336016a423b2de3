//! Questionnaire state machine.
//!
//! [`QuestionnaireState`] is a plain snapshot: six section records, the step
//! cursor and the completion flag. Sections live behind `Arc` so a transition
//! that touches one section leaves every other section pointer-identical to
//! the previous snapshot. Transitions take `&mut self` on a cloned snapshot;
//! [`crate::store::QuestionnaireStore`] does the cloning and publishing.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    ApplicationAnswers, ApplicationField, BudgetAnswers, BudgetField, DataAnswers, DataField,
    GeographicAnswers, GeographicField, ScalingAnswers, ScalingField, Section, SecurityAnswers,
    SecurityField,
};
use crate::store::Persist;

/// Number of questionnaire steps, one per section.
pub const STEP_COUNT: usize = Section::ALL.len();

/// Index of the final step.
pub const LAST_STEP: usize = STEP_COUNT - 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionnaireError {
    #[error("step {0} is outside 0..={max}", max = LAST_STEP)]
    InvalidStepIndex(usize),

    #[error("unknown section '{0}'")]
    UnknownSection(String),

    #[error("section '{section}' has no field '{field}'")]
    InvalidField { section: &'static str, field: String },

    #[error("invalid value for {section}.{field}: {reason}")]
    InvalidValue {
        section: &'static str,
        field: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireState {
    pub current_step: usize,
    pub application: Arc<ApplicationAnswers>,
    pub scaling: Arc<ScalingAnswers>,
    pub data: Arc<DataAnswers>,
    pub geographic: Arc<GeographicAnswers>,
    pub security: Arc<SecurityAnswers>,
    pub budget: Arc<BudgetAnswers>,
    pub is_complete: bool,
}

impl Default for QuestionnaireState {
    fn default() -> Self {
        Self {
            current_step: 0,
            application: Arc::default(),
            scaling: Arc::default(),
            data: Arc::default(),
            geographic: Arc::default(),
            security: Arc::default(),
            budget: Arc::default(),
            is_complete: false,
        }
    }
}

impl QuestionnaireState {
    /// Advance one step, stopping at the last step.
    pub fn next_step(&mut self) {
        self.current_step = self.current_step.saturating_add(1).min(LAST_STEP);
    }

    /// Go back one step, stopping at the first step.
    pub fn prev_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Jump straight to `step` without bounds checking.
    ///
    /// Deep links are trusted to carry a valid index. Use
    /// [`try_go_to_step`](Self::try_go_to_step) for untrusted input.
    pub fn go_to_step(&mut self, step: usize) {
        self.current_step = step;
    }

    pub fn try_go_to_step(&mut self, step: usize) -> Result<(), QuestionnaireError> {
        if step > LAST_STEP {
            return Err(QuestionnaireError::InvalidStepIndex(step));
        }
        self.current_step = step;
        Ok(())
    }

    /// Route back into the questionnaire to edit `section`. Answers are untouched.
    pub fn edit_section(&mut self, section: Section) {
        self.current_step = section.step_index();
    }

    pub fn update_application(&mut self, field: ApplicationField) {
        self.application = Arc::new(self.application.with_field(field));
    }

    pub fn update_scaling(&mut self, field: ScalingField) {
        self.scaling = Arc::new(self.scaling.with_field(field));
    }

    pub fn update_data(&mut self, field: DataField) {
        self.data = Arc::new(self.data.with_field(field));
    }

    pub fn update_geographic(&mut self, field: GeographicField) {
        self.geographic = Arc::new(self.geographic.with_field(field));
    }

    pub fn update_security(&mut self, field: SecurityField) {
        self.security = Arc::new(self.security.with_field(field));
    }

    pub fn update_budget(&mut self, field: BudgetField) {
        self.budget = Arc::new(self.budget.with_field(field));
    }

    /// Set one field from an untyped value.
    ///
    /// Unknown fields and values of the wrong shape are rejected and the
    /// state is left as it was.
    pub fn set_field(
        &mut self,
        section: Section,
        field: &str,
        value: Value,
    ) -> Result<(), QuestionnaireError> {
        match section {
            Section::Application => {
                self.update_application(ApplicationAnswers::field_from_json(field, value)?)
            }
            Section::Scaling => self.update_scaling(ScalingAnswers::field_from_json(field, value)?),
            Section::Data => self.update_data(DataAnswers::field_from_json(field, value)?),
            Section::Geographic => {
                self.update_geographic(GeographicAnswers::field_from_json(field, value)?)
            }
            Section::Security => {
                self.update_security(SecurityAnswers::field_from_json(field, value)?)
            }
            Section::Budget => self.update_budget(BudgetAnswers::field_from_json(field, value)?),
        }
        debug!(%section, field, "section field updated");
        Ok(())
    }

    /// Current value of one field, for display.
    pub fn field_value(&self, section: Section, field: &str) -> Option<Value> {
        match section {
            Section::Application => self.application.field_to_json(field),
            Section::Scaling => self.scaling.field_to_json(field),
            Section::Data => self.data.field_to_json(field),
            Section::Geographic => self.geographic.field_to_json(field),
            Section::Security => self.security.field_to_json(field),
            Section::Budget => self.budget.field_to_json(field),
        }
    }

    /// Restore one section to its defaults. Step and completion are untouched.
    pub fn reset_section(&mut self, section: Section) {
        match section {
            Section::Application => self.application = Arc::default(),
            Section::Scaling => self.scaling = Arc::default(),
            Section::Data => self.data = Arc::default(),
            Section::Geographic => self.geographic = Arc::default(),
            Section::Security => self.security = Arc::default(),
            Section::Budget => self.budget = Arc::default(),
        }
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Mark the questionnaire complete. No section is checked.
    pub fn complete_questionnaire(&mut self) {
        self.is_complete = true;
    }

    /// Section under the cursor; `None` after an out-of-range jump.
    pub fn current_section(&self) -> Option<Section> {
        Section::from_step_index(self.current_step)
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step >= LAST_STEP
    }

    /// Fraction of steps reached, in `(0, 1]`, for a progress indicator.
    pub fn progress(&self) -> f32 {
        (self.current_step.min(LAST_STEP) + 1) as f32 / STEP_COUNT as f32
    }
}

impl fmt::Display for QuestionnaireState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step_title = self
            .current_section()
            .map(|s| s.title())
            .unwrap_or("(out of range)");
        writeln!(
            f,
            "Step {}/{}: {}{}",
            self.current_step.saturating_add(1),
            STEP_COUNT,
            step_title,
            if self.is_complete { " [complete]" } else { "" }
        )?;

        let blocks: [(Section, &dyn fmt::Display); 6] = [
            (Section::Application, &*self.application),
            (Section::Scaling, &*self.scaling),
            (Section::Data, &*self.data),
            (Section::Geographic, &*self.geographic),
            (Section::Security, &*self.security),
            (Section::Budget, &*self.budget),
        ];
        for (section, block) in blocks {
            writeln!(f)?;
            writeln!(f, "── {} ──", section.title())?;
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Stored form of a [`QuestionnaireState`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedQuestionnaire {
    pub current_step: usize,
    pub application: ApplicationAnswers,
    pub scaling: ScalingAnswers,
    pub data: DataAnswers,
    pub geographic: GeographicAnswers,
    pub security: SecurityAnswers,
    pub budget: BudgetAnswers,
    pub is_complete: bool,
}

impl Persist for QuestionnaireState {
    const STORAGE_KEY: &'static str = "archwiz.questionnaire";
    type Persisted = PersistedQuestionnaire;

    fn to_persisted(&self) -> PersistedQuestionnaire {
        PersistedQuestionnaire {
            current_step: self.current_step,
            application: (*self.application).clone(),
            scaling: (*self.scaling).clone(),
            data: (*self.data).clone(),
            geographic: (*self.geographic).clone(),
            security: (*self.security).clone(),
            budget: (*self.budget).clone(),
            is_complete: self.is_complete,
        }
    }

    fn from_persisted(persisted: PersistedQuestionnaire) -> Self {
        Self {
            current_step: persisted.current_step,
            application: Arc::new(persisted.application),
            scaling: Arc::new(persisted.scaling),
            data: Arc::new(persisted.data),
            geographic: Arc::new(persisted.geographic),
            security: Arc::new(persisted.security),
            budget: Arc::new(persisted.budget),
            is_complete: persisted.is_complete,
        }
    }
}
