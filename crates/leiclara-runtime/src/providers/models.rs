//! Model discovery filtering.
//!
//! Turns the service's model listing into the identifiers usable for
//! text generation.

use lazy_static::lazy_static;
use regex::Regex;

use super::ModelDescriptor;

/// Generation method required of a usable model.
pub const GENERATE_METHOD: &str = "generateContent";

lazy_static! {
    /// Families that cannot answer a text prompt with text.
    static ref EXCLUDED_FAMILIES: Regex = Regex::new(r"(?i)image|vision|audio|embedding").unwrap();
}

/// Identifiers (without the `models/` prefix) that support text generation.
///
/// Order of the listing is kept; duplicates are dropped.
pub fn usable_models(descriptors: &[ModelDescriptor]) -> Vec<String> {
    let mut usable: Vec<String> = Vec::new();

    for descriptor in descriptors {
        let id = descriptor.name.trim_start_matches("models/");
        if id.is_empty() {
            continue;
        }
        if !descriptor
            .supported_generation_methods
            .iter()
            .any(|m| m == GENERATE_METHOD)
        {
            continue;
        }
        if EXCLUDED_FAMILIES.is_match(id) {
            continue;
        }
        if !usable.iter().any(|u| u == id) {
            usable.push(id.to_string());
        }
    }

    usable
}

/// Keep `current` if it is still offered, otherwise take the first offered.
pub fn select_model(usable: &[String], current: &str) -> Option<String> {
    if usable.iter().any(|m| m == current) {
        Some(current.to_string())
    } else {
        usable.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, methods: &[&str]) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_filters_listing() {
        let listing = vec![
            descriptor("models/gemini-pro", &["generateContent", "countTokens"]),
            descriptor("models/text-embedding-004", &["embedContent"]),
            descriptor("models/gemini-pro-vision", &["generateContent"]),
            descriptor("models/gemini-2.0-flash-image", &["generateContent"]),
            descriptor("models/Gemini-Audio-Preview", &["generateContent"]),
            descriptor("models/gemini-1.5-pro-latest", &["generateContent"]),
            descriptor("models/gemini-pro", &["generateContent"]),
            descriptor("", &["generateContent"]),
        ];

        assert_eq!(
            usable_models(&listing),
            vec!["gemini-pro".to_string(), "gemini-1.5-pro-latest".to_string()]
        );
    }

    #[test]
    fn test_select_model_keeps_current_when_offered() {
        let usable = vec!["gemini-pro".to_string(), "gemini-1.5-pro-latest".to_string()];
        assert_eq!(
            select_model(&usable, "gemini-1.5-pro-latest").as_deref(),
            Some("gemini-1.5-pro-latest")
        );
        assert_eq!(select_model(&usable, "gone").as_deref(), Some("gemini-pro"));
        assert_eq!(select_model(&[], "gone"), None);
    }
}
