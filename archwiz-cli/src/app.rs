use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use archwiz_core::metadata::{self, MetadataTable};
use archwiz_core::storage::{FileStorageFactory, MemoryStorageFactory};
use archwiz_core::{
    ApplicationState, ApplicationStore, QuestionnaireError, QuestionnaireState,
    QuestionnaireStore, STEP_COUNT, Section, SolutionFlow, SolutionParametersPatch, StateStorage,
    StorageRegistry,
};
use archwiz_store_sqlite::SqliteStorageFactory;
use serde_json::Value;
use tracing::info;

use crate::cli::{Command, ParamsArgs};
use crate::config::GenerationConfig;
use crate::engine::SimulatedEngine;
use crate::utils::{display_value, fallback_values, parse_entry_source, parse_value};

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> StorageRegistry {
    let mut registry = StorageRegistry::new();
    registry.register(Box::new(MemoryStorageFactory));
    registry.register(Box::new(FileStorageFactory));
    registry.register(Box::new(SqliteStorageFactory));
    registry
}

/// Both stores, opened over the same storage.
pub struct Session {
    pub questionnaire: QuestionnaireStore,
    pub application: ApplicationStore,
}

impl Session {
    pub async fn open(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            questionnaire: QuestionnaireStore::open(storage.clone()).await,
            application: ApplicationStore::open(storage).await,
        }
    }
}

/// Apply `command` to the session and render what the user should see.
pub async fn run(
    session: &mut Session,
    command: Command,
    generation: &GenerationConfig,
) -> Result<String> {
    let questionnaire = &mut session.questionnaire;
    let application = &mut session.application;

    let output = match command {
        Command::Show => overview(questionnaire.state(), application.state()),
        Command::Next => step_panel(&*questionnaire.next_step().await),
        Command::Prev => step_panel(&*questionnaire.prev_step().await),
        Command::Goto { step } => step_panel(&*questionnaire.try_go_to_step(step).await?),
        Command::Edit { section } => step_panel(&*questionnaire.edit_section(section).await),
        Command::Set {
            section,
            field,
            value,
        } => {
            let state = set_answer(questionnaire, section, &field, &value).await?;
            fields_panel(&*state, section)
        }
        Command::Fields { section } => fields_panel(questionnaire.state(), section),
        Command::Reset {
            section: Some(section),
        } => fields_panel(&*questionnaire.reset_section(section).await, section),
        Command::Reset { section: None } => step_panel(&*questionnaire.reset_all().await),
        Command::Complete => questionnaire.complete_questionnaire().await.to_string(),
        Command::Entry { source } => {
            let source = parse_entry_source(&source)?;
            application.set_entry_source(source).await.to_string()
        }
        Command::RepoUrl { url } => application.set_repository_url(url).await.to_string(),
        Command::Idea { prompt } => application.set_idea_prompt(prompt.join(" ")).await.to_string(),
        Command::Analyze => {
            application.start_analysis().await;
            tokio::time::sleep(generation.simulated_delay()).await;
            info!("entry source analysed");
            application.finish_analysis().await.to_string()
        }
        Command::Params(args) => application
            .set_solution_parameters(&params_patch(args))
            .await
            .to_string(),
        Command::Review => application.complete_review().await.to_string(),
        Command::Generate => {
            let engine = SimulatedEngine::new(generation.simulated_delay());
            let recommendation = SolutionFlow::new(&engine)
                .with_timeout(generation.timeout())
                .generate(&questionnaire.snapshot(), application)
                .await?;
            format!(
                "Recommendation: {}\nProviders: {}\n\n{}",
                recommendation.summary,
                recommendation
                    .providers
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                application.state()
            )
        }
        Command::ResetResults => application.reset_results().await.to_string(),
        Command::ResetState => application.reset_state().await.to_string(),
        Command::Metadata { table: Some(name) } => {
            let table = metadata::find_table(&name).ok_or_else(|| {
                let names: Vec<_> = metadata::tables().iter().map(|t| t.name).collect();
                anyhow!("unknown table '{name}'; available: {}", names.join(", "))
            })?;
            render_table(&table)
        }
        Command::Metadata { table: None } => metadata::tables()
            .iter()
            .map(render_table)
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    Ok(output)
}

/// Sets one answer from command-line text. When the field rejects the
/// first reading of `raw`, the fallbacks are tried; if none fits, the
/// first rejection is reported.
async fn set_answer(
    questionnaire: &mut QuestionnaireStore,
    section: Section,
    field: &str,
    raw: &str,
) -> Result<Arc<QuestionnaireState>, QuestionnaireError> {
    let first = questionnaire.set_field(section, field, parse_value(raw)).await;
    if !matches!(first, Err(QuestionnaireError::InvalidValue { .. })) {
        return first;
    }
    for value in fallback_values(raw) {
        if let Ok(state) = questionnaire.set_field(section, field, value).await {
            return Ok(state);
        }
    }
    first
}

fn params_patch(args: ParamsArgs) -> SolutionParametersPatch {
    let mut patch = SolutionParametersPatch::new();
    if let Some(complexity) = args.complexity {
        patch = patch.complexity(complexity);
    }
    if let Some(strategy) = args.strategy {
        patch = patch.strategy(strategy);
    }
    if args.no_primary {
        patch = patch.primary(None);
    } else if let Some(primary) = args.primary {
        patch = patch.primary(Some(primary));
    }
    if let Some(include) = args.include {
        patch = patch.include(include);
    }
    patch
}

fn overview(questionnaire: &QuestionnaireState, application: &ApplicationState) -> String {
    format!(
        "{}\nProgress: {:.0}%\n\n── Solution flow ──\n{}",
        questionnaire.to_string().trim_end(),
        questionnaire.progress() * 100.0,
        application
    )
}

fn step_panel(state: &QuestionnaireState) -> String {
    match state.current_section() {
        Some(section) => format!(
            "Step {}/{}: {}\n{}",
            state.current_step.saturating_add(1),
            STEP_COUNT,
            section.title(),
            fields_panel(state, section)
        ),
        None => format!("Step {} is outside the questionnaire", state.current_step),
    }
}

fn fields_panel(state: &QuestionnaireState, section: Section) -> String {
    let names = section.field_names();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    let mut out = String::new();
    for name in names {
        let value = state.field_value(section, name).unwrap_or(Value::Null);
        let _ = writeln!(out, "  {name:<width$}  {}", display_value(&value));
    }
    out.trim_end().to_string()
}

fn render_table(table: &MetadataTable) -> String {
    let id_width = table.entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
    let label_width = table.entries.iter().map(|e| e.label.len()).max().unwrap_or(0);
    let mut out = format!("{}:", table.name);
    for entry in &table.entries {
        let _ = write!(
            out,
            "\n  {:<id_width$}  {:<label_width$}  {}",
            entry.id, entry.label, entry.description
        );
    }
    out
}
