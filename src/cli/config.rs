use crate::cli::args::ConfigCommands;
use anyhow::{Context, Result, bail};
use console::style;
use fathertranslator_core::config::{FileSettingsStore, SettingsStore, TranslatorSettings};
use fathertranslator_core::ui::{style_dim, style_provider_name, style_success};

/// Handle the config command
pub fn handle_config_command(store: &FileSettingsStore, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let settings = store.load()?;
            if json {
                let masked = masked(&settings);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&masked).context("Failed to render settings")?
                );
            } else {
                println!("{}", render_settings(&settings, store));
            }
        }
        ConfigCommands::Path => {
            println!("{}", store.path().display());
        }
        ConfigCommands::Set { key, value } => {
            let mut settings = store.load()?;
            settings.set_field(&key, &value)?;
            store.save(&settings)?;
            println!("{}", style_success(&format!("Updated {key}")));
        }
        ConfigCommands::Provider { name } => {
            let mut settings = store.load()?;
            settings.set_provider(name);
            store.save(&settings)?;
            println!(
                "Provider set to {} (model {}, host {})",
                style_provider_name(name),
                settings.model,
                settings.api_host
            );
        }
        ConfigCommands::Reset => {
            let mut settings = store.load()?;
            settings.restore_defaults();
            store.save(&settings)?;
            println!("{}", style_success("Settings restored to defaults"));
        }
        ConfigCommands::Init { force } => {
            if store.exists() && !force {
                bail!(
                    "Settings file already exists at {} (use --force to overwrite)",
                    store.path().display()
                );
            }
            store.save(&TranslatorSettings::default())?;
            println!(
                "{} {}",
                style_success("Created"),
                store.path().display()
            );
        }
    }
    Ok(())
}

fn masked(settings: &TranslatorSettings) -> TranslatorSettings {
    TranslatorSettings {
        api_key: settings.masked_api_key(),
        ..settings.clone()
    }
}

fn render_settings(settings: &TranslatorSettings, store: &FileSettingsStore) -> String {
    let api_key = if settings.api_key.is_empty() {
        style_dim("(not set)")
    } else {
        settings.masked_api_key()
    };
    let target = if settings.target_language.is_empty() {
        style_dim("(none)")
    } else {
        settings.target_language.clone()
    };

    let rows = [
        ("provider", style_provider_name(settings.provider)),
        ("model", settings.model.clone()),
        ("api_key", api_key),
        ("api_host", settings.api_host.clone()),
        ("endpoint", settings.endpoint()),
        ("temperature", settings.temperature.to_string()),
        ("top_p", settings.top_p.to_string()),
        ("presence_penalty", settings.presence_penalty.to_string()),
        ("frequency_penalty", settings.frequency_penalty.to_string()),
        ("system_prompt", settings.system_prompt.clone()),
        ("target_language", target),
    ];

    let mut out = format!(
        "{} {}\n",
        style("Settings").bold(),
        style_dim(&store.path().display().to_string())
    );
    for (key, value) in rows {
        out.push_str(&format!("  {key:<18} {value}\n"));
    }
    out.trim_end().to_string()
}
