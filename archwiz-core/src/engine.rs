//! Boundary to the architecture recommendation engine.
//!
//! The engine itself lives outside this crate; only what goes in and what
//! comes out is fixed here.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ComplexityPreference, Provider, ProviderStrategy, SolutionParameters};
use crate::questionnaire::QuestionnaireState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("recommendation engine unavailable: {0}")]
    Unavailable(String),

    #[error("recommendation failed: {0}")]
    Failed(String),
}

/// Everything the engine receives for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureRequest {
    pub questionnaire: QuestionnaireState,
    pub complexity_preference: ComplexityPreference,
    pub provider_strategy: ProviderStrategy,
    pub primary_provider: Option<Provider>,
    pub include_providers: BTreeSet<Provider>,
}

impl ArchitectureRequest {
    pub fn new(questionnaire: &QuestionnaireState, parameters: &SolutionParameters) -> Self {
        Self {
            questionnaire: questionnaire.clone(),
            complexity_preference: parameters.complexity_preference,
            provider_strategy: parameters.provider_strategy,
            primary_provider: parameters.primary_provider,
            include_providers: parameters.include_providers.clone(),
        }
    }

    /// Providers the engine may draw from, primary first.
    pub fn candidate_providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = Vec::new();
        if let Some(primary) = self.primary_provider {
            providers.push(primary);
        }
        providers.extend(
            self.include_providers
                .iter()
                .copied()
                .filter(|p| Some(*p) != self.primary_provider),
        );
        providers
    }
}

/// Minimal result record. Only its presence matters to the flow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub providers: Vec<Provider>,
    pub summary: String,
}

#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    async fn recommend(&self, request: &ArchitectureRequest) -> Result<Recommendation, EngineError>;
}
