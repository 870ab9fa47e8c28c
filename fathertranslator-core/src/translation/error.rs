//! Error taxonomy for translation sessions
//!
//! Only two kinds of failure ever reach the user: a [`ValidationError`],
//! raised before any network call, and a [`TranslationFailure`], which always
//! displays the same generic wording. Malformed stream lines and
//! cancellation are not errors at all.

use crate::config::constants::messages;
use thiserror::Error;

/// Missing input detected before a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some text to translate.")]
    EmptySourceText,
    #[error("Please enter your API key in the settings.")]
    MissingApiKey,
    #[error("Please select a target language.")]
    MissingTargetLanguage,
}

impl ValidationError {
    /// User-visible message
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptySourceText => messages::EMPTY_SOURCE_TEXT,
            ValidationError::MissingApiKey => messages::MISSING_API_KEY,
            ValidationError::MissingTargetLanguage => messages::MISSING_TARGET_LANGUAGE,
        }
    }
}

/// Session-ending failure after the request was issued
///
/// The payload is for logs; [`Display`](std::fmt::Display) never shows it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationFailure {
    #[error("An error occurred during translation. Please check your settings and try again.")]
    HttpStatus(u16),
    #[error("An error occurred during translation. Please check your settings and try again.")]
    Unexpected(String),
}

impl TranslationFailure {
    pub fn user_message(&self) -> &'static str {
        messages::TRANSLATION_FAILED
    }

    /// Diagnostic detail for logging
    pub fn detail(&self) -> String {
        match self {
            TranslationFailure::HttpStatus(status) => format!("HTTP status {status}"),
            TranslationFailure::Unexpected(detail) => detail.clone(),
        }
    }
}
