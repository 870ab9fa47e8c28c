//! Console styling for user-facing messages

use crate::config::Provider;
use console::style;

pub fn style_error(message: &str) -> String {
    style(message).red().to_string()
}

pub fn style_warning(message: &str) -> String {
    style(message).yellow().to_string()
}

pub fn style_success(message: &str) -> String {
    style(message).green().to_string()
}

pub fn style_dim(message: &str) -> String {
    style(message).dim().to_string()
}

/// Provider name coloured by provider
pub fn style_provider_name(provider: Provider) -> String {
    match provider {
        Provider::OpenAI => style(provider.display_name()).yellow().to_string(),
        Provider::Groq => style(provider.display_name()).magenta().to_string(),
    }
}
