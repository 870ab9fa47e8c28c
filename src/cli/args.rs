//! CLI argument parsing and configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use fathertranslator_core::config::{Provider, TranslatorSettings};
use std::path::PathBuf;

/// Main CLI structure for fathertranslator
#[derive(Parser, Debug)]
#[command(
    name = "fathertranslator",
    version,
    about = "Stream translations from OpenAI- and Groq-compatible chat-completion APIs"
)]
pub struct Cli {
    /// Provider for this run (openai, groq); resets host and model to its defaults
    #[arg(long, global = true)]
    pub provider: Option<Provider>,

    /// Model ID for this run
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API base URL for this run, e.g. http://localhost:11434/v1
    #[arg(long, global = true)]
    pub api_host: Option<String>,

    /// Settings file path; defaults to the first fathertranslator.toml found
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text, streaming the result to stdout
    Translate {
        /// Text to translate; read from stdin when omitted
        text: Vec<String>,

        /// Target language code (en, es, fr, de, zh, ms) or any language name
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Inspect or edit the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List the curated models of a provider
    Models {
        /// Provider to list; defaults to the configured one
        #[arg(long)]
        provider: Option<Provider>,
    },

    /// List the built-in target language codes
    Languages,
}

/// Settings file operations
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the settings with the API key masked
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the settings file location
    Path,

    /// Update one setting
    Set {
        /// Setting name, e.g. temperature or api_key
        key: String,
        value: String,
    },

    /// Switch provider, resetting host and model to its defaults
    Provider { name: Provider },

    /// Restore default settings (clears the stored API key)
    Reset,

    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Per-run settings overrides from global flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub api_host: Option<String>,
}

impl SettingsOverrides {
    /// Apply provider first, so an explicit model or host still wins
    pub fn apply(&self, settings: &mut TranslatorSettings) -> Result<()> {
        if let Some(provider) = self.provider {
            settings.set_provider(provider);
        }
        if let Some(model) = &self.model {
            settings.set_field("model", model)?;
        }
        if let Some(api_host) = &self.api_host {
            settings.set_field("api_host", api_host)?;
        }
        Ok(())
    }
}

impl Cli {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            provider: self.provider,
            model: self.model.clone(),
            api_host: self.api_host.clone(),
        }
    }
}
