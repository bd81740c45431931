//! Google Gemini (`generativelanguage`) backend.
//!
//! ## Security
//!
//! The API key travels as the `key` query parameter, as the service requires.
//! It is held in an [`ApiCredential`] and exposed only when the request is
//! built; request URLs are never logged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    secrets::{ApiCredential, CredentialSource},
    GenerativeBackend, ModelDescriptor, ProviderError,
};
use crate::config::DEFAULT_API_BASE;

/// Environment variable name for the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Generic fallback variable accepted after [`GEMINI_API_KEY_ENV`].
pub const API_KEY_ENV: &str = "API_KEY";

/// Gemini backend.
pub struct GeminiBackend {
    credential: ApiCredential,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiBackend {
    /// Create a backend for `credential` against the default API base.
    pub fn new(credential: ApiCredential) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::HttpError(e.to_string()))?;

        Ok(Self {
            credential,
            base_url: DEFAULT_API_BASE.to_string(),
            client,
        })
    }

    /// Create from an API key string.
    pub fn with_key(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new(ApiCredential::new(
            api_key,
            CredentialSource::Programmatic,
            "Gemini API key",
        ))
    }

    /// Create from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Result<Self, ProviderError> {
        let credential =
            ApiCredential::from_env(&[GEMINI_API_KEY_ENV, API_KEY_ENV], "Gemini API key")?;
        Self::new(credential)
    }

    /// Set custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// `{base}/models[/{tail}]`, with `tail` percent-encoded as one segment.
    fn models_url(&self, tail: Option<&str>) -> Result<reqwest::Url, ProviderError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ProviderError::NotConfigured(format!("Invalid base URL: {}", e)))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ProviderError::NotConfigured("Base URL cannot carry a path".to_string())
            })?;
            segments.pop_if_empty().push("models");
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|body| body.error.message);

        Err(ProviderError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    ProviderError::HttpError(e.to_string())
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// `generateContent` response body.
#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, or empty.
    fn first_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = self.models_url(Some(&format!("{}:generateContent", model)))?;
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %model, "Calling generateContent");

        // SECURITY: Only expose the credential here, at the point of use
        let response = self
            .client
            .post(url)
            .query(&[("key", self.credential.expose())])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check_status(response).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(body.first_text())
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        let url = self.models_url(None)?;

        let response = self
            .client
            .get(url)
            .query(&[("key", self.credential.expose())])
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::check_status(response).await?;

        let list: ModelList = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(list.models)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_url_encodes_model_segment() {
        let backend = GeminiBackend::with_key("k").unwrap();
        let url = backend
            .models_url(Some("gemini-pro:generateContent"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );

        let url = backend.models_url(Some("a/b:generateContent")).unwrap();
        assert!(url.as_str().ends_with("/models/a%2Fb:generateContent"));
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let backend = GeminiBackend::with_key("k")
            .unwrap()
            .with_base_url("http://localhost:8080/v1beta/");
        let url = backend.models_url(None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v1beta/models");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "olá" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "contents": [{ "role": "user", "parts": [{ "text": "olá" }] }] })
        );
    }

    #[test]
    fn test_first_text_extraction() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "primeiro" }, { "text": "segundo" }] } },
                { "content": { "parts": [{ "text": "outro" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.first_text(), "primeiro");

        let empty: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty.first_text(), "");
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let secret_key = "AIza-super-secret-key-12345";
        let backend = GeminiBackend::with_key(secret_key).unwrap();

        let debug_output = format!("{:?}", backend);
        assert!(!debug_output.contains(secret_key));
        assert!(debug_output.contains("[REDACTED]"));
    }
}
