//! Drives the command dispatcher the way repeated `archwiz` invocations do:
//! each command opens a fresh session over the same storage.

use std::sync::Arc;

use archwiz_cli::app::{self, Session};
use archwiz_cli::cli::{Command, ParamsArgs};
use archwiz_cli::config::GenerationConfig;
use archwiz_core::{
    ComplianceFramework, EntrySource, Provider, ProviderStrategy, Section, StateStorage,
    StorageConfig,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fast_generation() -> GenerationConfig {
    GenerationConfig {
        timeout_secs: 5,
        simulated_delay_ms: 0,
    }
}

async fn file_storage(dir: &tempfile::TempDir) -> Arc<dyn StateStorage> {
    app::build_registry()
        .create(&StorageConfig {
            backend: "file".to_string(),
            connection_string: dir.path().to_string_lossy().into_owned(),
        })
        .await
        .unwrap()
}

/// One invocation: open, run, drop.
async fn invoke(storage: &Arc<dyn StateStorage>, command: Command) -> anyhow::Result<String> {
    let mut session = Session::open(storage.clone()).await;
    app::run(&mut session, command, &fast_generation()).await
}

#[tokio::test]
async fn registry_offers_every_backend() {
    assert_eq!(
        app::build_registry().available_backends(),
        vec!["file", "memory", "sqlite"]
    );
}

#[tokio::test]
async fn answers_and_navigation_persist_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    invoke(
        &storage,
        Command::Set {
            section: Section::Application,
            field: "name".to_string(),
            value: "checkout".to_string(),
        },
    )
    .await
    .unwrap();
    invoke(
        &storage,
        Command::Set {
            section: Section::Budget,
            field: "monthly_budget".to_string(),
            value: "7,500".to_string(),
        },
    )
    .await
    .unwrap();
    let panel = invoke(&storage, Command::Next).await.unwrap();
    assert!(panel.starts_with("Step 2/6"), "{panel}");

    let session = Session::open(storage).await;
    let state = session.questionnaire.state();
    assert_eq!(state.current_step, 1);
    assert_eq!(state.application.name, "checkout");
    assert_eq!(state.budget.monthly_budget, dec!(7500));
}

#[tokio::test]
async fn set_lists_the_updated_section() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    let output = invoke(
        &storage,
        Command::Set {
            section: Section::Data,
            field: "storage_types".to_string(),
            value: r#"["document","object"]"#.to_string(),
        },
    )
    .await
    .unwrap();

    assert!(output.contains("storage_types"), "{output}");
    assert!(output.contains("document, object"), "{output}");
}

fn set(section: Section, field: &str, value: &str) -> Command {
    Command::Set {
        section,
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[tokio::test]
async fn text_fields_accept_values_that_look_like_json() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    invoke(&storage, set(Section::Application, "name", "2024")).await.unwrap();
    let session = Session::open(storage.clone()).await;
    assert_eq!(session.questionnaire.state().application.name, "2024");

    invoke(&storage, set(Section::Application, "name", "true")).await.unwrap();
    let session = Session::open(storage).await;
    assert_eq!(session.questionnaire.state().application.name, "true");
}

#[tokio::test]
async fn list_fields_accept_comma_separated_ids() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    let output = invoke(&storage, set(Section::Security, "compliance", "hipaa, gdpr"))
        .await
        .unwrap();
    invoke(&storage, set(Section::Application, "languages", "rust")).await.unwrap();

    assert!(output.contains("hipaa, gdpr"), "{output}");
    let session = Session::open(storage).await;
    let state = session.questionnaire.state();
    assert_eq!(
        state.security.compliance,
        vec![ComplianceFramework::Hipaa, ComplianceFramework::Gdpr]
    );
    assert_eq!(state.application.languages, vec!["rust".to_string()]);
}

#[tokio::test]
async fn list_with_an_unknown_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    let result = invoke(&storage, set(Section::Security, "compliance", "hipaa,sox")).await;

    assert!(result.is_err());
    let session = Session::open(storage).await;
    assert!(session.questionnaire.state().security.compliance.is_empty());
}

#[tokio::test]
async fn navigation_commands_render_the_step_panel() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    let goto = invoke(&storage, Command::Goto { step: 5 }).await.unwrap();
    let next = invoke(&storage, Command::Next).await.unwrap();
    let prev = invoke(&storage, Command::Prev).await.unwrap();
    let edit = invoke(&storage, Command::Edit { section: Section::Data }).await.unwrap();
    let reset_data = invoke(&storage, Command::Reset { section: Some(Section::Data) })
        .await
        .unwrap();
    let reset_all = invoke(&storage, Command::Reset { section: None }).await.unwrap();

    assert!(goto.starts_with("Step 6/6"), "{goto}");
    assert!(next.starts_with("Step 6/6"), "{next}");
    assert!(prev.starts_with("Step 5/6"), "{prev}");
    assert!(edit.starts_with("Step 3/6"), "{edit}");
    assert!(reset_data.contains("storage_types"), "{reset_data}");
    assert!(reset_all.starts_with("Step 1/6"), "{reset_all}");
}

#[tokio::test]
async fn bad_input_is_reported_and_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;
    invoke(&storage, Command::Next).await.unwrap();

    let goto = invoke(&storage, Command::Goto { step: 9 }).await;
    let unknown_field = invoke(
        &storage,
        Command::Set {
            section: Section::Scaling,
            field: "max_users".to_string(),
            value: "10".to_string(),
        },
    )
    .await;
    let bad_value = invoke(
        &storage,
        Command::Set {
            section: Section::Scaling,
            field: "expected_users".to_string(),
            value: "lots".to_string(),
        },
    )
    .await;

    assert!(goto.is_err());
    assert!(unknown_field.unwrap_err().to_string().contains("max_users"));
    assert!(bad_value.is_err());
    let session = Session::open(storage).await;
    assert_eq!(session.questionnaire.state().current_step, 1);
    assert_eq!(session.questionnaire.state().scaling.expected_users, 1_000);
}

#[tokio::test]
async fn entry_source_and_repository() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    invoke(
        &storage,
        Command::Entry {
            source: "repository".to_string(),
        },
    )
    .await
    .unwrap();
    let output = invoke(
        &storage,
        Command::RepoUrl {
            url: "https://github.com/acme/shop.git".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(output.contains("acme/shop"), "{output}");
    let session = Session::open(storage.clone()).await;
    assert_eq!(
        session.application.state().entry_source,
        Some(EntrySource::Repository)
    );

    assert!(
        invoke(
            &storage,
            Command::Entry {
                source: "spreadsheet".to_string()
            }
        )
        .await
        .is_err()
    );
}

#[tokio::test]
async fn full_flow_generates_results() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    invoke(
        &storage,
        Command::Entry {
            source: "questionnaire".to_string(),
        },
    )
    .await
    .unwrap();
    invoke(&storage, Command::Complete).await.unwrap();
    invoke(&storage, Command::Review).await.unwrap();
    invoke(
        &storage,
        Command::Params(ParamsArgs {
            strategy: Some(ProviderStrategy::BestOfBreed),
            primary: Some(Provider::Gcp),
            include: Some(vec![Provider::Aws, Provider::Gcp]),
            ..ParamsArgs::default()
        }),
    )
    .await
    .unwrap();

    let output = invoke(&storage, Command::Generate).await.unwrap();
    assert!(output.contains("Providers: gcp, aws"), "{output}");

    let session = Session::open(storage.clone()).await;
    let flow = session.application.state();
    assert!(flow.review_complete);
    assert!(flow.has_results);
    assert!(flow.results_generated.is_some());
    assert!(!flow.is_generating_solution);
    assert!(session.questionnaire.state().is_complete);

    invoke(&storage, Command::ResetResults).await.unwrap();
    let session = Session::open(storage).await;
    assert!(!session.application.state().has_results);
    assert!(!session.application.state().review_complete);
    assert_eq!(
        session.application.state().entry_source,
        Some(EntrySource::Questionnaire)
    );
}

#[tokio::test]
async fn failed_generation_leaves_no_results() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;
    invoke(
        &storage,
        Command::Params(ParamsArgs {
            include: Some(Vec::new()),
            ..ParamsArgs::default()
        }),
    )
    .await
    .unwrap();

    let result = invoke(&storage, Command::Generate).await;

    assert!(result.is_err());
    let session = Session::open(storage).await;
    assert!(!session.application.state().has_results);
    assert!(!session.application.state().is_generating_solution);
}

#[tokio::test]
async fn no_primary_clears_the_primary_provider() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;
    invoke(
        &storage,
        Command::Params(ParamsArgs {
            primary: Some(Provider::Azure),
            ..ParamsArgs::default()
        }),
    )
    .await
    .unwrap();

    invoke(
        &storage,
        Command::Params(ParamsArgs {
            no_primary: true,
            ..ParamsArgs::default()
        }),
    )
    .await
    .unwrap();

    let session = Session::open(storage).await;
    assert_eq!(
        session.application.state().solution_parameters.primary_provider,
        None
    );
}

#[tokio::test]
async fn reset_state_returns_flow_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;
    invoke(&storage, Command::Idea { prompt: vec!["photo".into(), "app".into()] })
        .await
        .unwrap();
    invoke(&storage, Command::Analyze).await.unwrap();

    invoke(&storage, Command::ResetState).await.unwrap();

    let session = Session::open(storage).await;
    assert_eq!(session.application.state().entry_source_data.idea_prompt, None);
    assert!(!session.application.state().is_analyzing);
}

#[tokio::test]
async fn metadata_prints_one_or_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    let one = invoke(
        &storage,
        Command::Metadata {
            table: Some("retention-periods".to_string()),
        },
    )
    .await
    .unwrap();
    let all = invoke(&storage, Command::Metadata { table: None }).await.unwrap();
    let unknown = invoke(
        &storage,
        Command::Metadata {
            table: Some("colours".to_string()),
        },
    )
    .await;

    assert!(one.starts_with("retention-periods:"), "{one}");
    assert!(one.contains("indefinite"), "{one}");
    assert!(all.contains("storage-types:") && all.contains("providers:"));
    assert!(unknown.unwrap_err().to_string().contains("retention-periods"));
}

#[tokio::test]
async fn show_renders_both_stores() {
    let dir = tempfile::tempdir().unwrap();
    let storage = file_storage(&dir).await;

    let output = invoke(&storage, Command::Show).await.unwrap();

    assert!(output.starts_with("Step 1/6"), "{output}");
    assert!(output.contains("Progress: 17%"), "{output}");
    assert!(output.contains("Solution flow"), "{output}");
}
