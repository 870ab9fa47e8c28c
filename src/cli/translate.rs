use crate::cli::args::SettingsOverrides;
use anyhow::{Context, Result};
use fathertranslator_core::config::{ApiKeySources, SettingsStore, resolve_api_key};
use fathertranslator_core::language::{is_known_code, resolve_language};
use fathertranslator_core::llm::HttpTransport;
use fathertranslator_core::translation::{
    ModelConfig, SessionOutcome, TranslationRequest, TranslationSession,
};
use fathertranslator_core::ui::{TerminalRenderer, start_request_spinner, style_error, style_warning};
use is_terminal::IsTerminal;
use std::io;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Handle the translate command
///
/// Returns whether the translation succeeded. Ctrl-C cancels the stream,
/// keeps what was printed so far and still counts as success.
pub async fn handle_translate_command(
    store: &dyn SettingsStore,
    overrides: &SettingsOverrides,
    text: Vec<String>,
    to: Option<String>,
) -> Result<bool> {
    let mut settings = store.load()?;
    overrides.apply(&mut settings)?;

    let source_text = if text.is_empty() {
        read_stdin().await?
    } else {
        text.join(" ")
    };

    let target = to.unwrap_or_else(|| settings.target_language.clone());
    let language = resolve_language(&target);
    if !target.trim().is_empty() && !is_known_code(&target) {
        tracing::debug!(%language, "using custom target language");
    }

    let api_key = resolve_api_key(
        &ApiKeySources::for_provider(settings.provider).with_config_value(settings.api_key.clone()),
    )
    .unwrap_or_default();

    let request = TranslationRequest::new(
        source_text,
        language.clone(),
        ModelConfig::from_settings(&settings, api_key),
    );
    if let Err(err) = request.validate() {
        eprintln!("{}", style_error(err.user_message()));
        return Ok(false);
    }

    let spinner = start_request_spinner(
        &format!("Translating to {language}..."),
        io::stderr().is_terminal(),
    );
    let renderer = TerminalRenderer::stdout().with_spinner(spinner);

    let session = TranslationSession::new(Arc::new(HttpTransport::new()));
    let handle = session.start(request, renderer)?;

    let token = handle.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let outcome = handle.wait().await;
    interrupt.abort();

    Ok(report_outcome(&outcome))
}

/// Failures were already printed by the renderer
fn report_outcome(outcome: &SessionOutcome) -> bool {
    match outcome {
        SessionOutcome::Completed(_) => true,
        SessionOutcome::Cancelled(_) => {
            eprintln!("{}", style_warning("Translation cancelled."));
            true
        }
        SessionOutcome::Failed { .. } => false,
    }
}

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read text from stdin")?;
    Ok(input)
}
