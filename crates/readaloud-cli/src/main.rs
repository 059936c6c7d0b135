//! CLI entry point - the composition root.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use readaloud_cli::{Cli, CliError, Commands, handlers};
use readaloud_core::{ReadAloudSettings, SettingsUpdate, validate_settings};

/// Layer CLI overrides on top of the environment and validate the result.
fn resolve_settings(
    language: Option<String>,
    engine: Option<String>,
) -> Result<ReadAloudSettings, CliError> {
    let mut settings = ReadAloudSettings::from_env();
    settings.merge(&SettingsUpdate::overrides(language, engine));
    validate_settings(&settings)?;
    tracing::debug!(?settings, "Resolved settings");
    Ok(settings)
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Speak {
            input,
            language,
            engine,
        } => {
            let settings = resolve_settings(language, engine)?;
            handlers::speak::execute(&settings, &input).await
        }
        Commands::Clean { input } => handlers::clean::execute(&input),
        Commands::Check { json, engine } => {
            let settings = resolve_settings(None, engine)?;
            handlers::check::execute(&settings, json)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so `clean` output stays pipeable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(e) = run(command).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}
