use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::choices::choice_enum;

choice_enum! {
    /// Which flow produced the initial requirements.
    "entry-sources" => pub enum EntrySource {
        Questionnaire => ("questionnaire", "Questionnaire", "Requirements collected through the six-step questionnaire"),
        Repository => ("repository", "Repository import", "Requirements inferred from an existing source repository"),
        Idea => ("idea", "Idea", "Requirements inferred from a free-form description"),
    }
}

choice_enum! {
    "providers" => pub enum Provider {
        Aws => ("aws", "Amazon Web Services", "AWS public cloud"),
        Azure => ("azure", "Microsoft Azure", "Azure public cloud"),
        Gcp => ("gcp", "Google Cloud", "Google Cloud Platform"),
    }
}

choice_enum! {
    "complexity-preferences" => pub enum ComplexityPreference {
        Simple => ("simple", "Simple", "Fewest moving parts, managed services first"),
        Balanced => ("balanced", "Balanced", "Managed services with room to grow"),
        Advanced => ("advanced", "Advanced", "Fine-grained services tuned for scale and control"),
    }
}

choice_enum! {
    "provider-strategies" => pub enum ProviderStrategy {
        Single => ("single", "Single provider", "Every service comes from one provider"),
        BestOfBreed => ("best-of-breed", "Best of breed", "Pick the strongest service per category across providers"),
    }
}

/// Free-form inputs attached to the entry source.
///
/// Each field is set independently; setting one never clears the other.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySourceData {
    pub repository_url: Option<String>,
    pub idea_prompt: Option<String>,
}

static REPOSITORY_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://|git@)[^/:]+[/:]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
        .expect("repository URL pattern is valid")
});

impl EntrySourceData {
    /// `owner/name` for hosted-git URLs such as `https://github.com/acme/shop.git`.
    ///
    /// Returns `None` when no URL is set or it doesn't look like a hosted
    /// repository; the URL itself is stored as given either way.
    pub fn repository_slug(&self) -> Option<String> {
        let url = self.repository_url.as_deref()?.trim();
        let captures = REPOSITORY_URL.captures(url)?;
        Some(format!("{}/{}", &captures[1], &captures[2]))
    }
}

/// Tunable inputs handed to the recommendation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionParameters {
    pub complexity_preference: ComplexityPreference,
    pub provider_strategy: ProviderStrategy,
    pub primary_provider: Option<Provider>,
    pub include_providers: BTreeSet<Provider>,
}

impl Default for SolutionParameters {
    fn default() -> Self {
        Self {
            complexity_preference: ComplexityPreference::Balanced,
            provider_strategy: ProviderStrategy::Single,
            primary_provider: None,
            include_providers: Provider::ALL.iter().copied().collect(),
        }
    }
}

/// Sparse update for [`SolutionParameters`].
///
/// `None` leaves a field alone. `primary_provider` is doubly optional so a
/// patch can clear the primary provider (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionParametersPatch {
    pub complexity_preference: Option<ComplexityPreference>,
    pub provider_strategy: Option<ProviderStrategy>,
    pub primary_provider: Option<Option<Provider>>,
    pub include_providers: Option<BTreeSet<Provider>>,
}

impl SolutionParametersPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complexity(mut self, value: ComplexityPreference) -> Self {
        self.complexity_preference = Some(value);
        self
    }

    pub fn strategy(mut self, value: ProviderStrategy) -> Self {
        self.provider_strategy = Some(value);
        self
    }

    pub fn primary(mut self, value: Option<Provider>) -> Self {
        self.primary_provider = Some(value);
        self
    }

    pub fn include(mut self, providers: impl IntoIterator<Item = Provider>) -> Self {
        self.include_providers = Some(providers.into_iter().collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns `base` with the fields present in this patch overwritten.
    pub fn apply_to(&self, base: &SolutionParameters) -> SolutionParameters {
        SolutionParameters {
            complexity_preference: self
                .complexity_preference
                .unwrap_or(base.complexity_preference),
            provider_strategy: self.provider_strategy.unwrap_or(base.provider_strategy),
            primary_provider: self.primary_provider.unwrap_or(base.primary_provider),
            include_providers: self
                .include_providers
                .clone()
                .unwrap_or_else(|| base.include_providers.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_parameters_include_every_provider() {
        let params = SolutionParameters::default();
        assert_eq!(params.complexity_preference, ComplexityPreference::Balanced);
        assert_eq!(params.provider_strategy, ProviderStrategy::Single);
        assert_eq!(params.primary_provider, None);
        assert_eq!(
            params.include_providers,
            BTreeSet::from([Provider::Aws, Provider::Azure, Provider::Gcp])
        );
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let base = SolutionParameters {
            primary_provider: Some(Provider::Gcp),
            ..Default::default()
        };
        let patched = SolutionParametersPatch::new()
            .complexity(ComplexityPreference::Advanced)
            .apply_to(&base);

        assert_eq!(patched.complexity_preference, ComplexityPreference::Advanced);
        assert_eq!(patched.provider_strategy, base.provider_strategy);
        assert_eq!(patched.primary_provider, Some(Provider::Gcp));
        assert_eq!(patched.include_providers, base.include_providers);
    }

    #[test]
    fn patch_can_clear_primary_provider() {
        let base = SolutionParameters {
            primary_provider: Some(Provider::Aws),
            ..Default::default()
        };
        let patched = SolutionParametersPatch::new().primary(None).apply_to(&base);
        assert_eq!(patched.primary_provider, None);
    }

    #[test]
    fn empty_patch_is_identity() {
        let base = SolutionParameters::default();
        let patch = SolutionParametersPatch::new();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&base), base);
    }

    #[test]
    fn repository_slug_from_hosted_urls() {
        let data = |url: &str| EntrySourceData {
            repository_url: Some(url.to_string()),
            idea_prompt: None,
        };
        assert_eq!(
            data("https://github.com/acme/shop").repository_slug().as_deref(),
            Some("acme/shop")
        );
        assert_eq!(
            data("https://gitlab.com/acme/shop.git/").repository_slug().as_deref(),
            Some("acme/shop")
        );
        assert_eq!(
            data("git@github.com:acme/shop.git").repository_slug().as_deref(),
            Some("acme/shop")
        );
        assert_eq!(data("not a url").repository_slug(), None);
        assert_eq!(EntrySourceData::default().repository_slug(), None);
    }

    #[test]
    fn partial_parameters_document_fills_defaults() {
        let params: SolutionParameters =
            serde_json::from_str(r#"{"provider_strategy":"best-of-breed"}"#).unwrap();
        assert_eq!(params.provider_strategy, ProviderStrategy::BestOfBreed);
        assert_eq!(params.complexity_preference, ComplexityPreference::Balanced);
        assert_eq!(params.include_providers.len(), 3);
    }
}
