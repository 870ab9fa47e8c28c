//! # fathertranslator-core - Streaming LLM translation
//!
//! `fathertranslator-core` sends text to an OpenAI- or Groq-compatible
//! chat-completion endpoint with a fixed translation instruction and renders
//! the streamed answer as it arrives.
//!
//! ## Architecture Overview
//!
//! - `config/`: settings document, settings stores, provider catalogue and
//!   API key resolution.
//! - `llm/`: chat-completion wire types, the incremental stream decoder and
//!   the HTTP transport.
//! - `translation/`: request validation and the cancellable session that
//!   turns a byte stream into accumulated text.
//! - `ui/`: terminal rendering (spinner, typing output, styled errors).
//! - `language`: target-language code resolution.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use fathertranslator_core::config::{FileSettingsStore, SettingsStore};
//! use fathertranslator_core::llm::HttpTransport;
//! use fathertranslator_core::translation::{ModelConfig, TranslationRequest, TranslationSession};
//! use fathertranslator_core::ui::TerminalRenderer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = FileSettingsStore::discover_from_cwd()?.load()?;
//!     let request = TranslationRequest::new("Hello", "French", ModelConfig::from(&settings));
//!
//!     let session = TranslationSession::new(Arc::new(HttpTransport::new()));
//!     let handle = session.start(request, TerminalRenderer::stdout())?;
//!     let outcome = handle.wait().await;
//!     println!("{}", outcome.text());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod language;
pub mod llm;
pub mod translation;
pub mod ui;

pub use config::{Provider, SettingsStore, TranslatorSettings};
pub use language::resolve_language;
pub use llm::{ChatTransport, HttpTransport, TransportError, decode_stream};
pub use translation::{
    ModelConfig, SessionHandle, SessionOutcome, SessionState, TranslationFailure,
    TranslationObserver, TranslationRequest, TranslationSession, ValidationError, run_session,
};
