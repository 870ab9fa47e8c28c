//! API key management module for retrieval from environment variables,
//! .env files, and the settings file.
//!
//! Environment variables are checked first, then values loaded from a .env
//! file (which end up in the environment), and finally the key stored in the
//! settings file.

use crate::config::provider::Provider;
use anyhow::Result;
use std::env;

/// API key sources for a provider
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Environment variable consulted first
    pub env_var: String,
    /// API key from the settings file
    pub config_value: Option<String>,
}

impl ApiKeySources {
    /// Create API key sources for a provider with its default environment variable
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            env_var: provider.api_key_env().to_string(),
            config_value: None,
        }
    }

    pub fn with_config_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.config_value = if value.is_empty() { None } else { Some(value) };
        self
    }
}

/// Load environment variables from .env file
///
/// A missing .env file is not an error; a malformed one is logged and skipped.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded environment variables");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load .env file");
            Ok(())
        }
    }
}

/// Get the API key for a provider
///
/// Returns `None` when no source holds a non-empty key, so the translation
/// session's own "missing API key" validation reports it to the user.
pub fn resolve_api_key(sources: &ApiKeySources) -> Option<String> {
    if let Ok(key) = env::var(&sources.env_var) {
        if !key.is_empty() {
            tracing::debug!(env_var = %sources.env_var, "using API key from environment");
            return Some(key);
        }
    }

    sources
        .config_value
        .as_ref()
        .filter(|key| !key.is_empty())
        .cloned()
}
