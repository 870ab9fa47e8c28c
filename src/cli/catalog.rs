use console::style;
use fathertranslator_core::config::Provider;
use fathertranslator_core::language::SUPPORTED_LANGUAGES;
use fathertranslator_core::ui::{style_dim, style_provider_name};

/// Handle the models command
pub fn handle_models_command(provider: Provider, configured_model: &str) {
    println!("{}", style_provider_name(provider));
    for line in model_lines(provider, configured_model) {
        println!("{line}");
    }
}

fn model_lines(provider: Provider, configured_model: &str) -> Vec<String> {
    provider
        .supported_models()
        .iter()
        .map(|model| {
            let mut line = format!("  {model}");
            if *model == provider.default_model() {
                line.push_str(&format!(" {}", style_dim("(default)")));
            }
            if *model == configured_model {
                line.push_str(&format!(" {}", style("*").green()));
            }
            line
        })
        .collect()
}

/// Handle the languages command
pub fn handle_languages_command() {
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {code:<4} {name}");
    }
    println!(
        "{}",
        style_dim("Any other value passed to --to is sent to the model as written.")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_lines_mark_default_and_configured() {
        console::set_colors_enabled(false);
        let lines = model_lines(Provider::OpenAI, "gpt-4o");
        assert_eq!(lines.len(), Provider::OpenAI.supported_models().len());
        assert!(lines[0].contains("gpt-4o-mini-2024-07-18 (default)"));
        assert!(lines.iter().any(|line| line == "  gpt-4o *"));
    }
}
