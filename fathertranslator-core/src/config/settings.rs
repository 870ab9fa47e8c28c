//! Persisted translator settings
//!
//! `TranslatorSettings` is the document the settings store reads and writes.
//! It carries everything a translation request needs besides the source
//! text: provider, credentials, endpoint, sampling parameters and the
//! preferred target language.

use crate::config::constants::{defaults, urls};
use crate::config::provider::Provider;
use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Settings consumed by translation sessions
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TranslatorSettings {
    /// Chat-completion provider (openai, groq)
    #[serde(default)]
    pub provider: Provider,

    /// Model identifier sent with every request; absent means the provider's default
    #[serde(default)]
    pub model: String,

    /// Bearer token for the provider; environment variables take precedence
    #[serde(default)]
    pub api_key: String,

    /// Base URL; `/chat/completions` is appended. Absent means the provider's default
    #[serde(default)]
    pub api_host: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_presence_penalty")]
    pub presence_penalty: f32,

    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,

    /// System message sent ahead of the translation instruction
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Last selected target language (code or free text); empty means none
    #[serde(default)]
    pub target_language: String,
}

fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_api_host() -> String {
    urls::OPENAI_API_BASE.to_string()
}
fn default_temperature() -> f32 {
    defaults::DEFAULT_TEMPERATURE
}
fn default_top_p() -> f32 {
    defaults::DEFAULT_TOP_P
}
fn default_presence_penalty() -> f32 {
    defaults::DEFAULT_PRESENCE_PENALTY
}
fn default_frequency_penalty() -> f32 {
    defaults::DEFAULT_FREQUENCY_PENALTY
}
fn default_system_prompt() -> String {
    defaults::DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            api_key: String::new(),
            api_host: default_api_host(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            presence_penalty: default_presence_penalty(),
            frequency_penalty: default_frequency_penalty(),
            system_prompt: default_system_prompt(),
            target_language: String::new(),
        }
    }
}

/// Keys accepted by [`TranslatorSettings::set_field`]
pub const SETTING_KEYS: &[&str] = &[
    "provider",
    "model",
    "api_key",
    "api_host",
    "temperature",
    "top_p",
    "presence_penalty",
    "frequency_penalty",
    "system_prompt",
    "target_language",
];

impl TranslatorSettings {
    /// Parse a settings document
    ///
    /// A missing `model` or `api_host` takes the configured provider's
    /// default, so `provider = "groq"` alone targets Groq.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(content)?;
        settings.fill_provider_defaults();
        Ok(settings)
    }

    /// Fill an empty host or model from the provider
    pub fn fill_provider_defaults(&mut self) {
        if self.api_host.trim().is_empty() {
            self.api_host = self.provider.default_base_url().to_string();
        }
        if self.model.trim().is_empty() {
            self.model = self.provider.default_model().to_string();
        }
    }

    /// Switch provider, resetting host and model to that provider's defaults
    pub fn set_provider(&mut self, provider: Provider) {
        self.provider = provider;
        self.api_host = provider.default_base_url().to_string();
        self.model = provider.default_model().to_string();
    }

    /// Values applied by "Restore Defaults"
    ///
    /// Unlike [`Default`], this zeroes temperature and top_p.
    pub fn restore_defaults(&mut self) {
        *self = Self {
            temperature: defaults::RESTORED_TEMPERATURE,
            top_p: defaults::RESTORED_TOP_P,
            ..Self::default()
        };
    }

    /// Full chat-completion endpoint derived from the API host
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.api_host.trim_end_matches('/'),
            urls::CHAT_COMPLETIONS_PATH
        )
    }

    /// Check the settings-form constraints
    pub fn validate(&self) -> Result<()> {
        if self.api_host.trim().is_empty() {
            bail!("api_host cannot be empty");
        }

        let sampling = [
            ("temperature", self.temperature),
            ("top_p", self.top_p),
            ("presence_penalty", self.presence_penalty),
            ("frequency_penalty", self.frequency_penalty),
        ];
        for (name, value) in sampling {
            if !(defaults::SAMPLING_MIN..=defaults::SAMPLING_MAX).contains(&value) {
                bail!(
                    "{name} must be between {} and {}, got {value}",
                    defaults::SAMPLING_MIN,
                    defaults::SAMPLING_MAX
                );
            }
        }

        Ok(())
    }

    /// Update one field from its string form
    ///
    /// Nothing changes when the value fails to parse or validate.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        updated.apply_field(key, value)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn apply_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "provider" => {
                let provider = value.parse::<Provider>()?;
                self.set_provider(provider);
            }
            "model" => {
                if !self.provider.lists_model(value) {
                    tracing::debug!(
                        provider = %self.provider,
                        model = value,
                        "using a model outside the curated list"
                    );
                }
                self.model = value.to_string();
            }
            "api_key" => self.api_key = value.to_string(),
            "api_host" => self.api_host = value.trim_end_matches('/').to_string(),
            "temperature" => self.temperature = parse_sampling(key, value)?,
            "top_p" => self.top_p = parse_sampling(key, value)?,
            "presence_penalty" => self.presence_penalty = parse_sampling(key, value)?,
            "frequency_penalty" => self.frequency_penalty = parse_sampling(key, value)?,
            "system_prompt" => self.system_prompt = value.to_string(),
            "target_language" => self.target_language = value.trim().to_string(),
            other => {
                return Err(anyhow!(
                    "Unknown setting '{other}'. Valid keys: {}",
                    SETTING_KEYS.join(", ")
                ));
            }
        }
        Ok(())
    }

    /// API key with everything but the last four characters masked
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{tail}", "*".repeat(hidden))
    }
}

fn parse_sampling(key: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .with_context(|| format!("{key} expects a number, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_form() {
        let settings = TranslatorSettings::default();
        assert_eq!(settings.provider, Provider::OpenAI);
        assert_eq!(settings.model, "gpt-4o-mini-2024-07-18");
        assert_eq!(settings.api_host, "https://api.openai.com/v1");
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.top_p, 1.0);
        assert!(settings.api_key.is_empty());
        assert!(settings.target_language.is_empty());
    }

    #[test]
    fn test_set_provider_resets_host_and_model() {
        let mut settings = TranslatorSettings {
            model: "custom-model".to_string(),
            api_host: "http://localhost:8080/v1".to_string(),
            ..Default::default()
        };
        settings.set_provider(Provider::Groq);
        assert_eq!(settings.api_host, "https://api.groq.com/openai/v1");
        assert_eq!(settings.model, Provider::Groq.default_model());
    }

    #[test]
    fn test_restore_defaults_zeroes_sampling() {
        let mut settings = TranslatorSettings {
            api_key: "sk-test".to_string(),
            temperature: 0.4,
            ..Default::default()
        };
        settings.restore_defaults();
        assert_eq!(settings.temperature, 0.0);
        assert_eq!(settings.top_p, 0.0);
        assert!(settings.api_key.is_empty());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let settings = TranslatorSettings {
            api_host: "https://api.groq.com/openai/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_sampling() {
        let settings = TranslatorSettings {
            presence_penalty: 1.5,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("presence_penalty"));
    }

    #[test]
    fn test_set_field() {
        let mut settings = TranslatorSettings::default();
        settings.set_field("temperature", "0.2").unwrap();
        assert_eq!(settings.temperature, 0.2);

        assert!(settings.set_field("temperature", "warm").is_err());
        assert!(settings.set_field("theme", "dark").is_err());

        settings.set_field("provider", "groq").unwrap();
        assert_eq!(settings.provider, Provider::Groq);
        assert_eq!(settings.api_host, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_masked_api_key() {
        let settings = TranslatorSettings {
            api_key: "sk-abcdef123456".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.masked_api_key(), "***********3456");
        assert_eq!(TranslatorSettings::default().masked_api_key(), "");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = TranslatorSettings::from_toml("api_key = \"sk-1\"\n").unwrap();
        assert_eq!(settings.provider, Provider::OpenAI);
        assert_eq!(settings.api_host, "https://api.openai.com/v1");
        assert_eq!(settings.model, defaults::DEFAULT_MODEL);
        assert_eq!(settings.system_prompt, defaults::DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_partial_toml_follows_configured_provider() {
        let settings =
            TranslatorSettings::from_toml("provider = \"groq\"\napi_key = \"gsk-1\"\n").unwrap();
        assert_eq!(settings.provider, Provider::Groq);
        assert_eq!(settings.api_key, "gsk-1");
        assert_eq!(settings.api_host, Provider::Groq.default_base_url());
        assert_eq!(settings.model, Provider::Groq.default_model());
        assert_eq!(
            settings.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_explicit_host_survives_provider_defaults() {
        let settings = TranslatorSettings::from_toml(
            "provider = \"groq\"\napi_host = \"http://localhost:8080/v1\"\n",
        )
        .unwrap();
        assert_eq!(settings.api_host, "http://localhost:8080/v1");
        assert_eq!(settings.model, Provider::Groq.default_model());
    }

    #[test]
    fn test_set_field_rejection_leaves_settings_untouched() {
        let mut settings = TranslatorSettings::default();
        let before = settings.clone();

        assert!(settings.set_field("temperature", "1.5").is_err());
        assert!(settings.set_field("top_p", "-0.1").is_err());
        assert!(settings.set_field("api_host", "").is_err());
        assert_eq!(settings, before);
        assert_eq!(settings.temperature, 0.7);
    }
}
