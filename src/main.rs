//! fathertranslator - streaming LLM translation in the terminal

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use fathertranslator_core::config::{FileSettingsStore, SettingsStore, load_dotenv};
use fathertranslator_core::ui::style_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_tracing(args.verbose);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", style_error(&format!("Error: {err:#}")));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so translated text on stdout stays clean
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(args: Cli) -> Result<bool> {
    load_dotenv()?;

    let store = match &args.config {
        Some(path) => FileSettingsStore::new(path.clone()),
        None => FileSettingsStore::discover_from_cwd()?,
    };
    tracing::debug!(path = %store.path().display(), "using settings file");

    let overrides = args.overrides();

    match args.command {
        Commands::Translate { text, to } => {
            cli::handle_translate_command(&store, &overrides, text, to).await
        }
        Commands::Config { command } => {
            cli::handle_config_command(&store, command)?;
            Ok(true)
        }
        Commands::Models { provider } => {
            let mut settings = store.load()?;
            overrides.apply(&mut settings)?;
            let provider = provider.unwrap_or(settings.provider);
            cli::handle_models_command(provider, &settings.model);
            Ok(true)
        }
        Commands::Languages => {
            cli::handle_languages_command();
            Ok(true)
        }
    }
}
