/// Model ID constants for the model dropdowns of each provider
pub mod models {
    // OpenAI models
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";
        pub const SUPPORTED_MODELS: &[&str] = &[
            GPT_4O_MINI_2024_07_18,
            GPT_4O_MINI,
            GPT_4O,
            GPT_4O_2024_08_06,
            GPT_4_TURBO,
            GPT_3_5_TURBO,
        ];

        pub const GPT_4O_MINI_2024_07_18: &str = "gpt-4o-mini-2024-07-18";
        pub const GPT_4O_MINI: &str = "gpt-4o-mini";
        pub const GPT_4O: &str = "gpt-4o";
        pub const GPT_4O_2024_08_06: &str = "gpt-4o-2024-08-06";
        pub const GPT_4_TURBO: &str = "gpt-4-turbo";
        pub const GPT_3_5_TURBO: &str = "gpt-3.5-turbo";
    }

    // Groq models (OpenAI-compatible endpoint)
    pub mod groq {
        pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
        pub const SUPPORTED_MODELS: &[&str] = &[
            LLAMA_3_1_70B_VERSATILE,
            LLAMA_3_1_8B_INSTANT,
            LLAMA3_70B_8192,
            LLAMA3_8B_8192,
            MIXTRAL_8X7B_32768,
            GEMMA2_9B_IT,
        ];

        pub const LLAMA_3_1_70B_VERSATILE: &str = "llama-3.1-70b-versatile";
        pub const LLAMA_3_1_8B_INSTANT: &str = "llama-3.1-8b-instant";
        pub const LLAMA3_70B_8192: &str = "llama3-70b-8192";
        pub const LLAMA3_8B_8192: &str = "llama3-8b-8192";
        pub const MIXTRAL_8X7B_32768: &str = "mixtral-8x7b-32768";
        pub const GEMMA2_9B_IT: &str = "gemma2-9b-it";
    }
}

/// Model validation and helper functions
pub mod model_helpers {
    use super::models;

    /// Get supported models for a provider
    pub fn supported_for(provider: &str) -> Option<&'static [&'static str]> {
        match provider {
            "openai" => Some(models::openai::SUPPORTED_MODELS),
            "groq" => Some(models::groq::SUPPORTED_MODELS),
            _ => None,
        }
    }

    /// Get default model for a provider
    pub fn default_for(provider: &str) -> Option<&'static str> {
        match provider {
            "openai" => Some(models::openai::DEFAULT_MODEL),
            "groq" => Some(models::groq::DEFAULT_MODEL),
            _ => None,
        }
    }

    /// Validate if a model is listed for a provider
    pub fn is_listed(provider: &str, model: &str) -> bool {
        supported_for(provider)
            .map(|list| list.iter().any(|m| *m == model))
            .unwrap_or(false)
    }
}

/// Default configuration values
pub mod defaults {
    use super::models;

    pub const DEFAULT_PROVIDER: &str = "openai";
    pub const DEFAULT_MODEL: &str = models::openai::DEFAULT_MODEL;
    pub const DEFAULT_SYSTEM_PROMPT: &str =
        "You are a professional, authentic machine translation engine.";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_TOP_P: f32 = 1.0;
    pub const DEFAULT_PRESENCE_PENALTY: f32 = 0.0;
    pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.0;

    /// Sampling values applied by "restore defaults"
    pub const RESTORED_TEMPERATURE: f32 = 0.0;
    pub const RESTORED_TOP_P: f32 = 0.0;

    /// Inclusive bounds accepted for every sampling parameter
    pub const SAMPLING_MIN: f32 = 0.0;
    pub const SAMPLING_MAX: f32 = 1.0;
}

/// URL constants for API endpoints
pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
    pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
}

/// Environment variables consulted for API keys
pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
}

/// Server-sent event markers used by chat-completion streams
pub mod sse {
    pub const DATA_PREFIX: &str = "data: ";
    pub const DONE_MARKER: &str = "[DONE]";
}

/// User-facing messages
pub mod messages {
    pub const EMPTY_SOURCE_TEXT: &str = "Please enter some text to translate.";
    pub const MISSING_API_KEY: &str = "Please enter your API key in the settings.";
    pub const MISSING_TARGET_LANGUAGE: &str = "Please select a target language.";
    pub const TRANSLATION_FAILED: &str =
        "An error occurred during translation. Please check your settings and try again.";
}

/// Settings file locations
pub mod paths {
    pub const SETTINGS_FILE_NAME: &str = "fathertranslator.toml";
    pub const SETTINGS_DIR_NAME: &str = ".fathertranslator";
}

/// Prompt construction
pub mod prompts {
    /// User message asking the model for a bare translation
    pub fn translation_instruction(language: &str, source_text: &str) -> String {
        format!(
            "Translate the following source text to {language}. Output translation directly without any additional text.\nSource Text: {source_text}\n\nTranslated Text:"
        )
    }
}
