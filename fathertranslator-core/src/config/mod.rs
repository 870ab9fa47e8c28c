//! FatherTranslator Configuration Module
//!
//! Settings are plain values owned by the caller. They are loaded from
//! `fathertranslator.toml` through a [`SettingsStore`], combined with API keys
//! from the environment, and passed explicitly into translation sessions.

pub mod api_keys;
pub mod constants;
pub mod provider;
pub mod settings;
pub mod store;

pub use api_keys::{ApiKeySources, load_dotenv, resolve_api_key};
pub use provider::{Provider, ProviderParseError};
pub use settings::{SETTING_KEYS, TranslatorSettings};
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
