//! Target language resolution
//!
//! The language picker offers a handful of codes; anything else is treated
//! as a custom free-text language and forwarded to the model as typed.

/// Language codes offered by the picker, with their full names
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("zh", "Chinese"),
    ("ms", "Bahasa Malaysia"),
];

/// Full language name for a known code, otherwise the input trimmed
pub fn resolve_language(input: &str) -> String {
    let trimmed = input.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(trimmed))
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Whether the input is one of the picker's codes
pub fn is_known_code(input: &str) -> bool {
    let trimmed = input.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .any(|(code, _)| code.eq_ignore_ascii_case(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_resolve_to_names() {
        assert_eq!(resolve_language("fr"), "French");
        assert_eq!(resolve_language(" ZH "), "Chinese");
        assert_eq!(resolve_language("ms"), "Bahasa Malaysia");
    }

    #[test]
    fn test_custom_language_passes_through() {
        assert_eq!(resolve_language("Klingon"), "Klingon");
        assert_eq!(resolve_language("  Brazilian Portuguese "), "Brazilian Portuguese");
        assert!(!is_known_code("Klingon"));
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(resolve_language("   "), "");
    }
}
