//! Translation request construction and precondition checks

use crate::config::constants::{prompts, urls};
use crate::config::{Provider, TranslatorSettings};
use crate::llm::types::{ChatCompletionRequest, ChatMessage};
use crate::translation::error::ValidationError;

/// Model configuration supplied by the settings collaborator
///
/// Values are taken as given; range checks belong to the settings layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub provider: Provider,
    pub api_key: String,
    pub api_host: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    pub system_prompt: String,
}

impl ModelConfig {
    /// Snapshot of the settings document, with the key resolved separately
    pub fn from_settings(settings: &TranslatorSettings, api_key: impl Into<String>) -> Self {
        Self {
            provider: settings.provider,
            api_key: api_key.into(),
            api_host: settings.api_host.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            presence_penalty: settings.presence_penalty,
            frequency_penalty: settings.frequency_penalty,
            system_prompt: settings.system_prompt.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.api_host.trim_end_matches('/'),
            urls::CHAT_COMPLETIONS_PATH
        )
    }
}

impl From<&TranslatorSettings> for ModelConfig {
    fn from(settings: &TranslatorSettings) -> Self {
        Self::from_settings(settings, settings.api_key.clone())
    }
}

/// One translation, immutable once issued
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: String,
    pub model: ModelConfig,
}

impl TranslationRequest {
    pub fn new(
        source_text: impl Into<String>,
        target_language: impl Into<String>,
        model: ModelConfig,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            target_language: target_language.into(),
            model,
        }
    }

    /// First failing precondition, checked in a fixed order
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source_text.trim().is_empty() {
            return Err(ValidationError::EmptySourceText);
        }
        if self.model.api_key.is_empty() {
            return Err(ValidationError::MissingApiKey);
        }
        if self.target_language.trim().is_empty() {
            return Err(ValidationError::MissingTargetLanguage);
        }
        Ok(())
    }

    pub fn user_prompt(&self) -> String {
        prompts::translation_instruction(&self.target_language, &self.source_text)
    }

    /// Streaming chat-completion body: system prompt, then the instruction
    pub fn to_chat_request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.model.clone(),
            messages: vec![
                ChatMessage::system(self.model.system_prompt.clone()),
                ChatMessage::user(self.user_prompt()),
            ],
            temperature: self.model.temperature,
            top_p: self.model.top_p,
            presence_penalty: self.model.presence_penalty,
            frequency_penalty: self.model.frequency_penalty,
            stream: true,
        }
    }

    pub fn endpoint(&self) -> String {
        self.model.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::MessageRole;

    fn config_with_key(key: &str) -> ModelConfig {
        ModelConfig::from_settings(&TranslatorSettings::default(), key)
    }

    #[test]
    fn test_validation_order() {
        let empty_everything = TranslationRequest::new("  ", "", config_with_key(""));
        assert_eq!(
            empty_everything.validate(),
            Err(ValidationError::EmptySourceText)
        );

        let missing_key = TranslationRequest::new("Hello", "", config_with_key(""));
        assert_eq!(missing_key.validate(), Err(ValidationError::MissingApiKey));

        let missing_language = TranslationRequest::new("Hello", "", config_with_key("sk-test"));
        assert_eq!(
            missing_language.validate(),
            Err(ValidationError::MissingTargetLanguage)
        );

        let ok = TranslationRequest::new("Hello", "French", config_with_key("sk-test"));
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn test_user_prompt_template() {
        let request = TranslationRequest::new("Hello", "French", config_with_key("sk-test"));
        assert_eq!(
            request.user_prompt(),
            "Translate the following source text to French. Output translation directly without any additional text.\nSource Text: Hello\n\nTranslated Text:"
        );
    }

    #[test]
    fn test_chat_request_carries_settings() {
        let mut settings = TranslatorSettings::default();
        settings.set_provider(Provider::Groq);
        settings.temperature = 0.5;
        settings.system_prompt = "Be terse.".to_string();

        let request = TranslationRequest::new("Hola", "English", ModelConfig::from(&settings));
        let body = request.to_chat_request();

        assert!(body.stream);
        assert_eq!(body.model, Provider::Groq.default_model());
        assert_eq!(body.temperature, 0.5);
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, MessageRole::System);
        assert_eq!(body.messages[0].content, "Be terse.");
        assert_eq!(body.messages[1].role, MessageRole::User);
        assert!(body.messages[1].content.contains("Source Text: Hola"));
        assert_eq!(
            request.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = config_with_key("k");
        config.api_host = "http://localhost:8080/v1/".to_string();
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
