//! Drives one solution-generation run against the flow store.
//!
//! The stores only record phases; this driver owns the engine call. It
//! flags generation as started, awaits the engine under a timeout, and then
//! either finishes (results + timestamp) or cancels the run so the
//! generating flag never stays stuck.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::engine::{ArchitectureRequest, EngineError, Recommendation, RecommendationEngine};
use crate::questionnaire::QuestionnaireState;
use crate::store::ApplicationStore;

/// Used when no timeout is configured.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("solution generation timed out after {0:?}")]
    Timeout(Duration),
}

pub struct SolutionFlow<'a> {
    engine: &'a dyn RecommendationEngine,
    timeout: Duration,
}

impl<'a> SolutionFlow<'a> {
    pub fn new(engine: &'a dyn RecommendationEngine) -> Self {
        Self {
            engine,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the engine for `questionnaire` with the store's current parameters.
    ///
    /// Review completion is not required; a run without it is logged.
    pub async fn generate(
        &self,
        questionnaire: &QuestionnaireState,
        application: &mut ApplicationStore,
    ) -> Result<Recommendation, FlowError> {
        if !application.state().review_complete {
            warn!("generating a solution before the review was completed");
        }

        let request = ArchitectureRequest::new(questionnaire, &application.state().solution_parameters);
        application.start_solution_generation().await;

        match tokio::time::timeout(self.timeout, self.engine.recommend(&request)).await {
            Ok(Ok(recommendation)) => {
                application.finish_solution_generation().await;
                info!(
                    providers = recommendation.providers.len(),
                    "recommendation received"
                );
                Ok(recommendation)
            }
            Ok(Err(error)) => {
                warn!(%error, "recommendation engine failed");
                application.cancel_solution_generation().await;
                Err(FlowError::Engine(error))
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "recommendation engine timed out");
                application.cancel_solution_generation().await;
                Err(FlowError::Timeout(self.timeout))
            }
        }
    }
}
