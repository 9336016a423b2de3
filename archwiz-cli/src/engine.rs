//! Stand-in recommendation engine for driving the flow from the command line.

use std::time::Duration;

use archwiz_core::{
    ArchitectureRequest, EngineError, ProviderStrategy, Recommendation, RecommendationEngine,
};
use async_trait::async_trait;
use tracing::debug;

/// Waits for `delay`, then recommends from the candidate providers.
///
/// A single-provider strategy keeps only the first candidate.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    delay: Duration,
}

impl SimulatedEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RecommendationEngine for SimulatedEngine {
    async fn recommend(&self, request: &ArchitectureRequest) -> Result<Recommendation, EngineError> {
        debug!(delay = ?self.delay, "simulating recommendation");
        tokio::time::sleep(self.delay).await;

        let mut providers = request.candidate_providers();
        if providers.is_empty() {
            return Err(EngineError::Failed("no providers selected".to_string()));
        }
        if request.provider_strategy == ProviderStrategy::Single {
            providers.truncate(1);
        }

        let answers = &request.questionnaire;
        let name = match answers.application.name.trim() {
            "" => "unnamed application",
            name => name,
        };
        let summary = format!(
            "{} {} on {} ({}, {} region, {} complexity)",
            answers.application.application_type,
            name,
            providers
                .iter()
                .map(|p| p.label())
                .collect::<Vec<_>>()
                .join(" + "),
            answers.scaling.availability_target,
            answers.geographic.primary_region,
            request.complexity_preference,
        );

        Ok(Recommendation { providers, summary })
    }
}
