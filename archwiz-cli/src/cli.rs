use std::path::PathBuf;

use archwiz_core::{ComplexityPreference, Provider, ProviderStrategy, Section};
use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;
use crate::utils::parse_choice;

/// Cloud architecture questionnaire and solution flow.
///
/// Every command loads the saved questionnaire and flow state, applies one
/// action, saves, and prints the result.
#[derive(Debug, Parser)]
#[command(name = "archwiz", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (`memory`, `file`, `sqlite`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Backend connection string.
    /// A directory for `file`; a database path or `:memory:` for `sqlite`.
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Log filter, e.g. `debug` or `archwiz_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            store: self.store.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Summarise the questionnaire and the solution flow.
    Show,
    /// Advance to the next questionnaire step.
    Next,
    /// Go back one questionnaire step.
    Prev,
    /// Jump to a step (0-5).
    Goto { step: usize },
    /// Jump to the step that owns a section.
    Edit { section: Section },
    /// Set one answer. The value is read as JSON when the field takes it,
    /// otherwise as plain text or a comma-separated list.
    Set {
        section: Section,
        field: String,
        value: String,
    },
    /// List a section's fields and current values.
    Fields { section: Section },
    /// Restore one section, or the whole questionnaire, to defaults.
    Reset { section: Option<Section> },
    /// Mark the questionnaire complete.
    Complete,
    /// Choose how the user entered the flow (`questionnaire`, `repository`, `idea`, `none`).
    Entry { source: String },
    /// Record the repository to analyse.
    RepoUrl { url: String },
    /// Record a free-form idea prompt.
    Idea {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Simulate analysing the entry source.
    Analyze,
    /// Adjust solution parameters; omitted options are left alone.
    Params(ParamsArgs),
    /// Mark the review step complete.
    Review,
    /// Generate a recommendation with the simulated engine.
    Generate,
    /// Discard generated results.
    ResetResults,
    /// Return the whole flow to its initial state.
    ResetState,
    /// Print the descriptive tables for every choice, or just one.
    Metadata { table: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Args)]
pub struct ParamsArgs {
    #[arg(long, value_parser = parse_choice::<ComplexityPreference>)]
    pub complexity: Option<ComplexityPreference>,

    #[arg(long, value_parser = parse_choice::<ProviderStrategy>)]
    pub strategy: Option<ProviderStrategy>,

    #[arg(long, value_parser = parse_choice::<Provider>, conflicts_with = "no_primary")]
    pub primary: Option<Provider>,

    /// Clear the primary provider.
    #[arg(long)]
    pub no_primary: bool,

    /// Comma-separated providers to consider, e.g. `aws,gcp`.
    #[arg(long, value_parser = parse_choice::<Provider>, value_delimiter = ',', num_args = 0..)]
    pub include: Option<Vec<Provider>>,
}
