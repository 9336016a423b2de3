//! Application / solution flow state.
//!
//! Tracks how the user entered the flow, whether the requirements were
//! reviewed, the parameters handed to the recommendation engine, and the
//! analyzing/generating phases. Every action is independently callable; the
//! intended order (entry source → review → parameters → generate → results)
//! is a convention, not an enforced automaton.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EntrySource, EntrySourceData, SolutionParameters, SolutionParametersPatch};
use crate::store::Persist;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationState {
    pub entry_source: Option<EntrySource>,
    pub entry_source_data: EntrySourceData,
    pub review_complete: bool,
    pub solution_parameters: SolutionParameters,
    pub is_analyzing: bool,
    pub is_generating_solution: bool,
    pub has_results: bool,
    pub results_generated: Option<DateTime<Utc>>,
}

impl ApplicationState {
    /// Switch entry source. Any earlier review or results are invalidated.
    pub fn set_entry_source(&mut self, source: Option<EntrySource>) {
        self.entry_source = source;
        self.review_complete = false;
        self.has_results = false;
    }

    pub fn set_repository_url(&mut self, url: impl Into<String>) {
        self.entry_source_data.repository_url = Some(url.into());
    }

    pub fn set_idea_prompt(&mut self, prompt: impl Into<String>) {
        self.entry_source_data.idea_prompt = Some(prompt.into());
    }

    pub fn set_solution_parameters(&mut self, patch: &SolutionParametersPatch) {
        self.solution_parameters = patch.apply_to(&self.solution_parameters);
    }

    pub fn complete_review(&mut self) {
        self.review_complete = true;
    }

    pub fn start_analysis(&mut self) {
        self.is_analyzing = true;
    }

    pub fn finish_analysis(&mut self) {
        self.is_analyzing = false;
    }

    pub fn start_solution_generation(&mut self) {
        self.is_generating_solution = true;
    }

    /// Generation finished: results are available as of `at`.
    pub fn finish_solution_generation(&mut self, at: DateTime<Utc>) {
        self.is_generating_solution = false;
        self.has_results = true;
        self.results_generated = Some(at);
    }

    /// Drop the generating flag without producing results.
    pub fn cancel_solution_generation(&mut self) {
        self.is_generating_solution = false;
    }

    /// Clear results and review, restore default parameters. Entry source stays.
    pub fn reset_results(&mut self) {
        self.has_results = false;
        self.results_generated = None;
        self.review_complete = false;
        self.solution_parameters = SolutionParameters::default();
    }

    pub fn reset_state(&mut self) {
        *self = Self::default();
    }
}

fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = &self.solution_parameters;
        writeln!(
            f,
            "Entry source:       {}",
            self.entry_source.map_or("—", |s| s.label())
        )?;
        if let Some(url) = &self.entry_source_data.repository_url {
            match self.entry_source_data.repository_slug() {
                Some(slug) => writeln!(f, "Repository:         {slug} ({url})")?,
                None => writeln!(f, "Repository:         {url}")?,
            }
        }
        if let Some(prompt) = &self.entry_source_data.idea_prompt {
            writeln!(f, "Idea:               {prompt}")?;
        }
        writeln!(f, "Review complete:    {}", flag(self.review_complete))?;
        writeln!(f, "Complexity:         {}", params.complexity_preference)?;
        writeln!(f, "Provider strategy:  {}", params.provider_strategy)?;
        writeln!(
            f,
            "Primary provider:   {}",
            params.primary_provider.map_or("—", |p| p.label())
        )?;
        writeln!(
            f,
            "Providers:          {}",
            params
                .include_providers
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(f, "Analyzing:          {}", flag(self.is_analyzing))?;
        writeln!(f, "Generating:         {}", flag(self.is_generating_solution))?;
        write!(
            f,
            "Results:            {}",
            match (self.has_results, self.results_generated) {
                (true, Some(at)) => format!("generated {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                (true, None) => "available".to_string(),
                (false, _) => "none".to_string(),
            }
        )
    }
}

/// Stored form of an [`ApplicationState`]; the phase flags are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedApplication {
    pub entry_source: Option<EntrySource>,
    pub entry_source_data: EntrySourceData,
    pub review_complete: bool,
    pub solution_parameters: SolutionParameters,
    pub has_results: bool,
    pub results_generated: Option<DateTime<Utc>>,
}

impl Persist for ApplicationState {
    const STORAGE_KEY: &'static str = "archwiz.application";
    type Persisted = PersistedApplication;

    fn to_persisted(&self) -> PersistedApplication {
        PersistedApplication {
            entry_source: self.entry_source,
            entry_source_data: self.entry_source_data.clone(),
            review_complete: self.review_complete,
            solution_parameters: self.solution_parameters.clone(),
            has_results: self.has_results,
            results_generated: self.results_generated,
        }
    }

    fn from_persisted(persisted: PersistedApplication) -> Self {
        Self {
            entry_source: persisted.entry_source,
            entry_source_data: persisted.entry_source_data,
            review_complete: persisted.review_complete,
            solution_parameters: persisted.solution_parameters,
            has_results: persisted.has_results,
            results_generated: persisted.results_generated,
            ..Default::default()
        }
    }
}
