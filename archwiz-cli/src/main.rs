use clap::Parser;
use tracing::debug;

use archwiz_cli::app::{self, Session};
use archwiz_cli::cli::Cli;
use archwiz_cli::config::WizardConfig;
use archwiz_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = WizardConfig::resolve(cli.config.as_deref(), cli.overrides())?;
    logging::init(config.logging.level.as_deref(), config.logging.file.as_deref())?;

    debug!(
        backend = %config.storage.backend,
        store = %config.storage.connection_string,
        "opening state storage"
    );
    let registry = app::build_registry();
    let storage = registry.create(&config.storage).await?;
    let mut session = Session::open(storage).await;

    let output = app::run(&mut session, cli.command, &config.generation).await?;
    println!("{output}");

    Ok(())
}
