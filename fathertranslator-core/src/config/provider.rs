//! Provider identification
//!
//! Both supported providers expose the same OpenAI-compatible
//! `/chat/completions` shape, so a provider only decides defaults:
//! the API host, the model list and the API key environment variable.

use crate::config::constants::{env, model_helpers, urls};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported chat-completion providers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI GPT models
    #[default]
    OpenAI,
    /// Groq-hosted open models
    Groq,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[Provider::OpenAI, Provider::Groq];

    /// Lowercase identifier used in settings files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Groq => "groq",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Groq => "GROQ",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => urls::OPENAI_API_BASE,
            Provider::Groq => urls::GROQ_API_BASE,
        }
    }

    pub fn default_model(&self) -> &'static str {
        model_helpers::default_for(self.as_str()).unwrap_or_default()
    }

    pub fn supported_models(&self) -> &'static [&'static str] {
        model_helpers::supported_for(self.as_str()).unwrap_or_default()
    }

    /// Whether the model appears in this provider's curated list
    pub fn lists_model(&self, model: &str) -> bool {
        model_helpers::is_listed(self.as_str(), model)
    }

    /// Get the default API key environment variable for this provider
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAI => env::OPENAI_API_KEY,
            Provider::Groq => env::GROQ_API_KEY,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for provider parsing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid provider '{0}'. Supported providers: openai, groq")]
pub struct ProviderParseError(pub String);

impl FromStr for Provider {
    type Err = ProviderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "groq" => Ok(Provider::Groq),
            _ => Err(ProviderParseError(s.to_string())),
        }
    }
}
