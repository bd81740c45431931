//! Generative-language backends for leiclara-runtime.
//!
//! This module defines the trait the remote adapter talks to, and the
//! Gemini implementation (behind the `gemini` feature).
//!
//! ## Security
//!
//! Backends hold their credential as an [`ApiCredential`]; see the
//! [`secrets`] module for the handling rules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod models;
pub mod secrets;

#[cfg(feature = "gemini")]
mod gemini;

pub use models::{select_model, usable_models};
pub use secrets::{ApiCredential, CredentialSource};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiBackend, GEMINI_API_KEY_ENV};

/// Errors from generative-language backends.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("API error: {status}{}", .message.as_deref().map(|m| format!(" - {}", m)).unwrap_or_default())]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// HTTP status, when the service answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A model as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Full resource name, e.g. `models/gemini-pro`
    #[serde(default)]
    pub name: String,

    /// Generation methods the model accepts
    #[serde(
        rename = "supportedGenerationMethods",
        alias = "supported_generation_methods",
        default
    )]
    pub supported_generation_methods: Vec<String>,
}

/// Backend abstraction so the adapter can be driven without a network.
///
/// # Contract
/// - `generate` returns the raw text of the first candidate (possibly empty)
/// - Non-success HTTP responses surface as [`ProviderError::ApiError`]
/// - Implementations do not retry; the adapter owns the fallback policy
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate content for `prompt` with `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// List models available to the configured credential.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_message() {
        let err = ProviderError::ApiError {
            status: 429,
            message: Some("Quota exceeded".to_string()),
        };
        assert_eq!(err.to_string(), "API error: 429 - Quota exceeded");
        assert_eq!(err.status(), Some(429));

        let bare = ProviderError::ApiError {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "API error: 500");
    }

    #[test]
    fn test_model_descriptor_accepts_both_field_spellings() {
        let camel: ModelDescriptor = serde_json::from_value(serde_json::json!({
            "name": "models/gemini-pro",
            "supportedGenerationMethods": ["generateContent"]
        }))
        .unwrap();
        let snake: ModelDescriptor = serde_json::from_value(serde_json::json!({
            "name": "models/gemini-pro",
            "supported_generation_methods": ["generateContent"]
        }))
        .unwrap();

        assert_eq!(camel, snake);
    }
}
